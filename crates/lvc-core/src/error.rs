use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("search term is empty")]
    EmptyTerm,
}

/// Errors raised by a [`crate::provider::DocumentProvider`] backend.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("document provider unavailable: {0}")]
    Unavailable(String),

    #[error("document provider error: {0}")]
    Backend(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("document provider unavailable: {0}")]
    ProviderUnavailable(String),
}
