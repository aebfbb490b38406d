//! Common display utilities and helpers

use crate::provider::StringValue;

/// Placeholder shown for null or unknown values
pub const EMPTY: &str = "--";

/// Render an attribute value for a table cell
pub fn display_value(value: &StringValue) -> String {
    match value.as_known() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => EMPTY.to_string(),
    }
}

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
