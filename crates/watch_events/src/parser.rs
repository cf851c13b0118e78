use serde_json::Value;

use crate::error::EventParseError;
use crate::event::SessionEvent;

/// Line-oriented parser for session event streams.
///
/// Tolerant by contract: blank lines produce no event, and a malformed line
/// only fails that line, never the stream.
#[derive(Debug, Clone, Default)]
pub struct SessionEventParser;

impl SessionEventParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a single logical line.
    ///
    /// - Returns `Ok(None)` for empty / whitespace-only lines.
    /// - Returns `Ok(Some(SessionEvent))` for any valid JSON value.
    /// - Returns `Err(EventParseError)` on JSON syntax failures.
    pub fn parse_line(&mut self, line: &str) -> Result<Option<SessionEvent>, EventParseError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.chars().all(|ch| ch.is_whitespace()) {
            return Ok(None);
        }

        serde_json::from_str::<Value>(line)
            .map(|value| Some(SessionEvent::from_value(&value)))
            .map_err(|err| EventParseError {
                message: err.to_string(),
            })
    }
}
