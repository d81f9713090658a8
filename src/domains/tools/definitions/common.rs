//! Common utilities shared across Feedly tools.
//!
//! Count validation, default values, and tool-result formatting helpers.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use super::super::error::ToolError;

/// Minimum accepted result count.
pub const MIN_COUNT: u32 = 1;

/// Maximum accepted result count.
pub const MAX_COUNT: u32 = 100;

/// Default count for search and autocomplete.
pub fn default_search_count() -> u32 {
    10
}

/// Default count for stream collection.
pub fn default_collect_count() -> u32 {
    20
}

/// Validate that a count is within the accepted range.
///
/// Out-of-range counts are rejected, not clamped, so no upstream request is
/// ever issued for them.
pub fn validate_count(count: u32) -> Result<(), ToolError> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, count
        )))
    }
}

/// Validate that a required string argument is non-empty.
pub fn validate_non_empty(value: &str, name: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        Err(ToolError::invalid_arguments(format!(
            "'{}' must not be empty",
            name
        )))
    } else {
        Ok(())
    }
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result carrying a JSON value serialized compact as text.
pub fn json_result(value: &serde_json::Value) -> CallToolResult {
    match serde_json::to_string(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_result(&format!("Failed to serialize upstream response: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_validate_count_in_range() {
        assert!(validate_count(1).is_ok());
        assert!(validate_count(50).is_ok());
        assert!(validate_count(100).is_ok());
    }

    #[test]
    fn test_validate_count_out_of_range() {
        assert!(validate_count(0).is_err());
        assert!(validate_count(101).is_err());
        assert!(validate_count(150).is_err());
    }

    #[test]
    fn test_validate_non_empty() {
        assert!(validate_non_empty("abc", "query").is_ok());
        assert!(validate_non_empty("", "query").is_err());
        assert!(validate_non_empty("   ", "query").is_err());
    }

    #[test]
    fn test_json_result_is_compact() {
        let value = serde_json::json!({"items": [1, 2, 3]});
        let result = json_result(&value);
        assert!(!result.is_error.unwrap_or(false));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, r#"{"items":[1,2,3]}"#);
        } else {
            panic!("expected text content");
        }
    }

    #[test]
    fn test_error_result_carries_message_verbatim() {
        let result = error_result("not found");
        assert!(result.is_error.unwrap_or(false));
        if let RawContent::Text(text) = &result.content[0].raw {
            assert_eq!(text.text, "not found");
        } else {
            panic!("expected text content");
        }
    }
}
