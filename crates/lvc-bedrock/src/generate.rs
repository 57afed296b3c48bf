use std::sync::Arc;

use lvc_core::models::report::Report;
use tracing::info;

use crate::error::BedrockError;
use crate::model::ReportModel;
use crate::prompt::{self, DEFAULT_MAX_PROMPT_CHARS};

/// Turns one document's text into an LVC report.
#[derive(Clone)]
pub struct ReportGenerator {
    model: Arc<dyn ReportModel>,
    max_prompt_chars: usize,
}

impl ReportGenerator {
    pub fn new(model: Arc<dyn ReportModel>) -> Self {
        Self {
            model,
            max_prompt_chars: DEFAULT_MAX_PROMPT_CHARS,
        }
    }

    /// Character budget for the document text; longer text is cut silently.
    pub fn max_prompt_chars(mut self, max: usize) -> Self {
        self.max_prompt_chars = max;
        self
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Generate the report for `document_name`. Attempted once, no retries.
    pub async fn generate(&self, document_name: &str, text: &str) -> Result<Report, BedrockError> {
        let prompt = prompt::build_prompt(document_name, text, self.max_prompt_chars);

        info!(
            document = document_name,
            model_id = self.model.model_id(),
            text_chars = prompt.text_chars,
            truncated = prompt.truncated,
            "generating report"
        );

        let reply = self.model.complete(&prompt.system, &prompt.user).await?;

        Ok(Report {
            document_name: document_name.to_string(),
            text: reply,
            model_id: self.model.model_id().to_string(),
        })
    }
}
