use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document could not be decoded: {0}")]
    Unreadable(String),

    #[error("document is encrypted")]
    Encrypted,

    #[error("document has no pages")]
    NoPages,
}
