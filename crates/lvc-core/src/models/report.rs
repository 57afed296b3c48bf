use serde::{Deserialize, Serialize};

/// A generated inspection summary. Returned to the caller, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Display name of the source PDF.
    pub document_name: String,
    pub text: String,
    pub model_id: String,
}
