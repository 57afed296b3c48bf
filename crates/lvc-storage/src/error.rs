use lvc_core::error::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: {key}")]
    NotFound { key: String },

    #[error("S3 bucket not configured")]
    NotConfigured,

    #[error("S3 GetObject error: {0}")]
    GetObject(String),

    #[error("S3 ListObjects error: {0}")]
    ListObjects(String),

    #[error("S3 presign error: {0}")]
    Presign(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ProviderError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ProviderError::NotFound { key },
            StorageError::NotConfigured => {
                ProviderError::Unavailable("S3 bucket not configured".to_string())
            }
            other => ProviderError::Backend(other.to_string()),
        }
    }
}
