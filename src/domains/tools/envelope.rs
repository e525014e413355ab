//! Tool content envelope.
//!
//! Every tool answers with a single text item:
//! `{"content": [{"type": "text", "text": ...}]}`. Successes carry the backend
//! payload (strings verbatim, everything else pretty-printed), failures carry
//! a compact `{"error": message}` document and set `isError`.

use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};

/// Outcome of a tool call before it is flattened to the wire shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The backend answered with this payload.
    Success(Value),

    /// The call failed; the message is already prefixed with the operation.
    Failure(String),

    /// The operation exists in the tool table but has no backend endpoint yet.
    NotImplemented {
        operation: String,
        input: Option<Value>,
    },
}

impl ToolOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Flatten into the envelope sent to MCP clients.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success(value) => as_tool_text(&value),
            Self::Failure(message) => as_tool_error(&message),
            Self::NotImplemented { operation, input } => {
                let mut body = json!({
                    "message": format!("{operation} not implemented yet"),
                    "status": "not_implemented",
                });
                if let (Some(input), Some(obj)) = (input, body.as_object_mut()) {
                    obj.insert("input".to_string(), input);
                }
                as_tool_text(&body)
            }
        }
    }
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        outcome.into_call_result()
    }
}

/// Render a payload as text: strings as-is, anything else as 2-space
/// indented JSON.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Success envelope.
pub fn as_tool_text(value: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(render_text(value))])
}

/// Error envelope with body `{"error": message}` serialized compactly.
pub fn as_tool_error(message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(json!({ "error": message }).to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_string_used_verbatim() {
        let result = as_tool_text(&Value::String("already a string".to_string()));
        assert_eq!(text_of(&result), "already a string");
        assert_eq!(result.content.len(), 1);
    }

    #[test]
    fn test_value_pretty_printed() {
        let result = as_tool_text(&json!({"a": 1}));
        assert_eq!(text_of(&result), "{\n  \"a\": 1\n}");
        assert!(!result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_error_is_compact() {
        let result = as_tool_error("Failed to fetch doctors: 500 Internal Server Error");
        assert_eq!(
            text_of(&result),
            r#"{"error":"Failed to fetch doctors: 500 Internal Server Error"}"#
        );
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_wire_shape() {
        let serialized = serde_json::to_value(as_tool_text(&json!([1, 2]))).unwrap();
        assert_eq!(serialized["content"][0]["type"], "text");
        assert_eq!(serialized["content"][0]["text"], "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_not_implemented_is_marked() {
        let outcome = ToolOutcome::NotImplemented {
            operation: "get_profile(42)".to_string(),
            input: None,
        };
        assert!(!outcome.is_failure());
        let result = outcome.into_call_result();
        assert!(!result.is_error.unwrap_or(false));

        let body: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(body["message"], "get_profile(42) not implemented yet");
        assert_eq!(body["status"], "not_implemented");
        assert!(body.get("input").is_none());
    }

    #[test]
    fn test_not_implemented_echoes_input() {
        let result: CallToolResult = ToolOutcome::NotImplemented {
            operation: "update_profile(7)".to_string(),
            input: Some(json!({"bio": "hi"})),
        }
        .into();

        let body: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(body["input"], json!({"bio": "hi"}));
    }
}
