use thiserror::Error;

/// A line that was not valid JSON.
///
/// The stream driver treats this as a silent skip; it is surfaced as a typed
/// error so embedders can observe individual failures if they care to.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct EventParseError {
    pub message: String,
}
