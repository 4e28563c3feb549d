use thiserror::Error;

/// Failures reported by a metadata provider.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The provider answered, but has no record for the query
    #[error("no record found for '{0}'")]
    NotFound(String),

    /// Transport failure: connect, TLS, timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status, or an explicit error payload
    #[error("provider returned an error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Body could not be decoded into the expected shape
    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("provider is not configured: {0}")]
    NotConfigured(String),
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}
