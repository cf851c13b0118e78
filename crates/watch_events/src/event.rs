use serde::Deserialize;
use serde_json::Value;

use crate::fields::str_field;

/// One decoded record from the input stream, tagged by its `type` field.
///
/// Payloads stay loosely typed: the renderer reads fields defensively and a
/// missing or wrong-typed field degrades to an empty value rather than
/// failing the event.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The assistant invoking an external capability.
    ToolUse(ToolUse),
    /// Prose output from the assistant.
    Text { text: String },
    /// An error reported by the producer.
    Error { payload: Value },
    /// Valid JSON with a `type` this program does not display.
    Other,
}

/// The display-relevant slice of a `tool_use` record: the tool identifier,
/// the invocation state, and the tool input mapping nested inside it.
#[derive(Debug, Clone)]
pub struct ToolUse {
    pub tool: String,
    pub state: Value,
    pub input: Value,
}

/// One entry of a todo-list tool's `todos` array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoItem {
    pub status: String,
    pub content: String,
}

impl SessionEvent {
    /// Classifies a parsed JSON value. Total: unrecognized `type` values map
    /// to [`SessionEvent::Other`].
    pub fn from_value(value: &Value) -> Self {
        match value.get("type").and_then(|t| t.as_str()).unwrap_or("") {
            "tool_use" => {
                let part = value.get("part").cloned().unwrap_or(Value::Null);
                let state = part.get("state").cloned().unwrap_or(Value::Null);
                let input = state.get("input").cloned().unwrap_or(Value::Null);
                SessionEvent::ToolUse(ToolUse {
                    tool: str_field(&part, "tool").to_string(),
                    state,
                    input,
                })
            }
            "text" => SessionEvent::Text {
                text: value
                    .get("part")
                    .map(|part| str_field(part, "text"))
                    .unwrap_or_default()
                    .to_string(),
            },
            "error" => SessionEvent::Error {
                payload: value.get("error").cloned().unwrap_or(Value::Null),
            },
            _ => SessionEvent::Other,
        }
    }
}

impl ToolUse {
    /// Todo entries from `input.todos`. Entries that do not look like todo
    /// objects decode to empty items instead of dropping the whole list.
    pub fn todos(&self) -> Vec<TodoItem> {
        match self.input.get("todos").and_then(|t| t.as_array()) {
            Some(items) => items
                .iter()
                .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
                .collect(),
            None => Vec::new(),
        }
    }
}
