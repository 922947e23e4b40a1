//! Accent- and case-insensitive text matching used by catalog search and
//! slug generation.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercases `text`, decomposes it canonically and strips combining marks,
/// so `"Lácteos"` becomes `"lacteos"`.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|ch| !COMBINING_DIACRITICS.contains(ch))
        .collect()
}

/// Whether `query` occurs in `text` once both are normalized.
///
/// An empty query matches everything.
pub fn matches_search(text: &str, query: &str) -> bool {
    normalize_text(text).contains(&normalize_text(query))
}

/// URL-safe identifier derived from `text`: normalized, runs of anything
/// outside `[a-z0-9]` collapsed into one hyphen, no leading/trailing hyphen.
pub fn slugify(text: &str) -> String {
    let normalized = normalize_text(text);
    let mut slug = String::with_capacity(normalized.len());
    let mut pending_hyphen = false;

    for ch in normalized.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Normalized, pre-computed needle for matching many haystacks.
#[derive(Debug, Clone)]
pub struct SearchNeedle {
    normalized: String,
}

impl SearchNeedle {
    pub fn new(query: &str) -> Self {
        Self {
            normalized: normalize_text(query.trim()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        normalize_text(text).contains(&self.normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize_text("Lácteos"), "lacteos");
        assert_eq!(normalize_text("JAMÓN Crudo"), "jamon crudo");
        assert_eq!(normalize_text("Ñandú"), "nandu");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["Lácteos", "Queso Sardo", "ÀÉÎÕÜ ç", "", "1/2 horma", "ßtraße"] {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn matches_search_ignores_accents() {
        assert!(matches_search("Lácteos", "lacteos"));
        assert!(matches_search("Fiambres", "AMBR"));
        assert!(matches_search("Queso Sardo", "só"));
        assert!(!matches_search("Queso Sardo", "reggianito"));
    }

    #[test]
    fn substrings_of_normalized_text_always_match() {
        let name = "Salamín Tandilero";
        let normalized = normalize_text(name);
        let chars: Vec<char> = normalized.chars().collect();

        for start in 0..chars.len() {
            for end in start..=chars.len() {
                let needle: String = chars[start..end].iter().collect();
                assert!(matches_search(name, &needle), "needle {needle:?}");
            }
        }
    }

    #[test]
    fn empty_needle_and_haystack() {
        assert!(matches_search("Quesos", ""));
        assert!(matches_search("", ""));
        assert!(!matches_search("", "q"));
    }

    #[test]
    fn slugify_produces_url_safe_identifiers() {
        assert_eq!(slugify("Lácteos y Quesos"), "lacteos-y-quesos");
        assert_eq!(slugify("  Fiambres  "), "fiambres");
        assert_eq!(slugify("¡Ofertas -- 2x1!"), "ofertas-2x1");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn search_needle_trims_query() {
        let needle = SearchNeedle::new("  sardo ");

        assert!(!needle.is_empty());
        assert!(needle.matches("Queso Sardo"));
        assert!(SearchNeedle::new("   ").is_empty());
    }
}
