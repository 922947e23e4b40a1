use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod brand;
pub mod category;
pub mod price_change;
pub mod product;

/// Encode a JSON column value.
pub(crate) fn encode_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::error!("Failed to encode JSON column: {err}");
            "[]".to_string()
        }
    }
}

/// Decode a JSON column value, falling back to `fallback` for corrupt data.
pub(crate) fn decode_json<T: DeserializeOwned>(raw: &str, fallback: impl FnOnce() -> T) -> T {
    match serde_json::from_str(raw) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::warn!("Failed to decode JSON column `{raw}`: {err}");
            fallback()
        }
    }
}
