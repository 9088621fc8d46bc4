//! Error types for tree input and link resolution.

/// Error reading extractor output.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Input is not a JSON array of documentation blocks.
    #[error("invalid documentation JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error raised by an [`ExternalResolver`](crate::ExternalResolver).
#[derive(Debug, thiserror::Error)]
#[error("external resolver failed for `{name}`: {message}")]
pub struct ResolveError {
    /// Name that was being resolved.
    pub name: String,
    /// Resolver-provided reason.
    pub message: String,
}

impl ResolveError {
    /// Create a resolver error for `name`.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
