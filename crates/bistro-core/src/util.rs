//! Small helpers shared by the gateway, config, and model modules.

/// Trim optional text, mapping whitespace-only values to `None`.
///
/// Used wherever an endpoint or override may arrive blank (env vars, CLI
/// flags) and blank must mean "not set".
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a value carries an explicit `http://` or `https://` scheme.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Clamp text to at most 180 characters for inclusion in error messages,
/// so a long API error body does not flood the log.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current Unix timestamp in milliseconds (review and queue timestamps).
pub fn unix_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
