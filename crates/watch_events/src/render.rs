use serde_json::Value;

use crate::event::{SessionEvent, ToolUse};
use crate::fields::{extract_str, extract_str_from_keys, str_field};
use crate::style::Palette;

/// Fixed marker prefixed to every display line.
pub const INDENT: &str = "   ";

const DEFAULT_MAX: usize = 60;
const PATTERN_MAX: usize = 40;
const TASK_DESC_MAX: usize = 50;
const ERROR_MAX: usize = 80;

/// Keys tried in order when resolving a path-like argument.
const PATH_KEYS: &[&str] = &["filePath", "file_path", "path", "target", "file"];

fn icon_for(tool: &str) -> &'static str {
    match tool {
        "bash" => "🔧",
        "edit" => "📝",
        "write" => "📄",
        "read" => "📖",
        "grep" => "🔍",
        "glob" => "📁",
        "task" => "🤖",
        "webfetch" => "🌐",
        "websearch" => "🔎",
        "todoread" | "todowrite" => "📋",
        "skill" => "⚡",
        _ => "🔹",
    }
}

/// Collapses line breaks to spaces, trims, and bounds the result to `max`
/// characters, replacing the tail with `...` when it was cut.
///
/// Idempotent: truncating an already-truncated string is a no-op.
pub fn truncate(s: &str, max: usize) -> String {
    let collapsed = s.replace('\n', " ");
    let trimmed = collapsed.trim();
    if trimmed.chars().count() <= max {
        return trimmed.to_string();
    }
    if max <= 3 {
        return trimmed.chars().take(max).collect();
    }
    let mut out: String = trimmed.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn error_message(payload: &Value) -> String {
    if let Some(message) = extract_str(payload, "message") {
        return message.to_string();
    }
    if let Some(name) = extract_str(payload, "name") {
        return name.to_string();
    }
    match payload {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn format_tool_use(invocation: &ToolUse) -> String {
    let tool = invocation.tool.to_lowercase();
    let icon = icon_for(&tool);
    let input = &invocation.input;

    match tool.as_str() {
        "bash" => {
            let description = str_field(input, "description");
            let shown = if description.is_empty() {
                truncate(str_field(input, "command"), DEFAULT_MAX)
            } else {
                truncate(description, DEFAULT_MAX)
            };
            format!("{icon} Bash: {shown}")
        }
        "edit" | "write" | "read" => {
            let path = extract_str_from_keys(input, PATH_KEYS)
                .or_else(|| extract_str(&invocation.state, "title"));
            let name = match path {
                Some(path) => path.rsplit('/').next().unwrap_or(path),
                None => "unknown",
            };
            format!("{icon} {}: {name}", capitalize(&tool))
        }
        "grep" => format!(
            "{icon} Grep: {}",
            truncate(str_field(input, "pattern"), PATTERN_MAX)
        ),
        "glob" => format!("{icon} Glob: {}", str_field(input, "pattern")),
        "task" => format!(
            "{icon} Task ({}): {}",
            str_field(input, "subagent_type"),
            truncate(str_field(input, "description"), TASK_DESC_MAX)
        ),
        "skill" => format!(
            "{icon} Skill: {}",
            extract_str(input, "name")
                .or_else(|| extract_str(input, "skill"))
                .unwrap_or("")
        ),
        "todoread" | "todowrite" => {
            let todos = invocation.todos();
            match todos.iter().find(|todo| todo.status == "in_progress") {
                Some(active) => format!("{icon} Todo: {}", truncate(&active.content, DEFAULT_MAX)),
                None => format!("{icon} Todo: {} items", todos.len()),
            }
        }
        _ => format!("{icon} {}", invocation.tool),
    }
}

/// Renders one event to a display line, or nothing for events the current
/// verbosity hides.
///
/// Tool and error events are always shown; prose commentary is opt-in via
/// `verbose`. Unrecognized event types render nothing.
pub fn render(event: &SessionEvent, verbose: bool, palette: &Palette) -> Option<String> {
    match event {
        SessionEvent::ToolUse(invocation) => Some(format!(
            "{INDENT}{}{}{}",
            palette.dim,
            format_tool_use(invocation),
            palette.reset
        )),
        SessionEvent::Text { text } => {
            if !verbose || text.trim().is_empty() {
                return None;
            }
            Some(format!("{INDENT}{}💬 {text}{}", palette.cyan, palette.reset))
        }
        SessionEvent::Error { payload } => {
            let message = truncate(&error_message(payload), ERROR_MAX);
            if message.is_empty() {
                return None;
            }
            Some(format!(
                "{INDENT}{}❌ {message}{}",
                palette.dim, palette.reset
            ))
        }
        SessionEvent::Other => None,
    }
}
