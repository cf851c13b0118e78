use serde_json::Value;

/// String field with an empty-string default for anything absent or
/// non-string.
pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Trimmed, non-empty string field; `None` otherwise.
pub(crate) fn extract_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// First present key from an ordered candidate list.
pub(crate) fn extract_str_from_keys<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| extract_str(value, key))
}
