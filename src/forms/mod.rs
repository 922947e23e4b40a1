//! Admin form payloads and the sanitizers they share.

pub mod brands;
pub mod categories;
pub mod products;

/// Trim, collapse runs of whitespace into one space and drop control characters.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Sanitize each line, dropping leading/trailing blank lines and collapsing
/// repeated blank lines.
pub(crate) fn sanitize_multiline_text(input: &str) -> String {
    let mut lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    let mut result = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty {
            if previous_empty {
                continue;
            }
            previous_empty = true;
            result.push(String::new());
        } else {
            previous_empty = false;
            result.push(line);
        }
    }

    result.join("\n")
}

/// Sanitized optional single-line value; blank input becomes `None`.
pub(crate) fn optional_inline(value: Option<&str>) -> Option<String> {
    value
        .map(sanitize_inline_text)
        .filter(|value| !value.is_empty())
}

/// Sanitized optional multi-line value; blank input becomes `None`.
pub(crate) fn optional_multiline(value: Option<&str>) -> Option<String> {
    value
        .map(sanitize_multiline_text)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_collapses_whitespace() {
        assert_eq!(sanitize_inline_text("  Queso \t  Sardo \u{7}"), "Queso Sardo");
        assert_eq!(sanitize_inline_text("   "), "");
    }

    #[test]
    fn multiline_text_keeps_single_blank_lines() {
        assert_eq!(
            sanitize_multiline_text("\n  Estacionado \n\n\n 6 meses  \n\n"),
            "Estacionado\n\n6 meses"
        );
    }

    #[test]
    fn optional_values_drop_blanks() {
        assert_eq!(optional_inline(Some("  ")), None);
        assert_eq!(optional_inline(Some(" icono ")), Some("icono".to_string()));
        assert_eq!(optional_multiline(None), None);
    }
}
