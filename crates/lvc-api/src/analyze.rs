//! The analyze pipeline: resolve → fetch → extract → generate.
//!
//! Every terminal state maps to exactly one [`ChatReply`]; nothing here is
//! surfaced as a transport error. No state survives between calls.

use std::sync::Arc;

use lvc_bedrock::ReportGenerator;
use lvc_bedrock::error::BedrockError;
use lvc_core::error::ResolveError;
use lvc_core::models::document::DocumentRef;
use lvc_core::models::report::Report;
use lvc_core::models::resolution::Resolution;
use lvc_core::models::term::SearchTerm;
use lvc_core::provider::DocumentProvider;
use lvc_core::resolver;
use lvc_pdf::TextExtractor;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const EMPTY_TERM_REPLY: &str = "⚠️ Informe o nome (ou parte do nome) do arquivo PDF.";
pub const UNAVAILABLE_REPLY: &str =
    "⚠️ O repositório de documentos não está disponível no momento.";
pub const AMBIGUOUS_REPLY: &str =
    "🔍 Encontrei mais de um arquivo com esse nome. Qual deles você quer analisar?";
pub const UNREADABLE_REPLY: &str = "❌ Encontrei o arquivo, mas não consegui ler o texto.";

/// Body of `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body of every `POST /chat` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_name: Option<String>,
}

impl ChatReply {
    fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            options: None,
            pdf_name: None,
        }
    }
}

/// Terminal state of one analysis.
#[derive(Debug)]
pub enum Outcome {
    InvalidTerm,
    ProviderUnavailable(String),
    NoMatch { term: String },
    Ambiguous { options: Vec<String> },
    Unreadable { document: String, reason: String },
    GenerationFailed { document: String, error: BedrockError },
    Done(Report),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::InvalidTerm => "invalid_term",
            Outcome::ProviderUnavailable(_) => "provider_unavailable",
            Outcome::NoMatch { .. } => "no_match",
            Outcome::Ambiguous { .. } => "ambiguous",
            Outcome::Unreadable { .. } => "unreadable",
            Outcome::GenerationFailed { .. } => "generation_failed",
            Outcome::Done(_) => "done",
        }
    }

    /// Display name of the document the analysis got as far as, if any.
    pub fn document(&self) -> Option<&str> {
        match self {
            Outcome::Unreadable { document, .. } | Outcome::GenerationFailed { document, .. } => {
                Some(document)
            }
            Outcome::Done(report) => Some(&report.document_name),
            _ => None,
        }
    }
}

impl From<Outcome> for ChatReply {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::InvalidTerm => ChatReply::text(EMPTY_TERM_REPLY),
            Outcome::ProviderUnavailable(_) => ChatReply::text(UNAVAILABLE_REPLY),
            Outcome::NoMatch { term } => ChatReply::text(format!(
                "⚠️ Não encontrei nenhum arquivo PDF com o termo '{term}'."
            )),
            Outcome::Ambiguous { options } => ChatReply {
                reply: AMBIGUOUS_REPLY.to_string(),
                options: Some(options),
                pdf_name: None,
            },
            Outcome::Unreadable { .. } => ChatReply::text(UNREADABLE_REPLY),
            Outcome::GenerationFailed { error, .. } => {
                ChatReply::text(format!("Erro na IA: {error}"))
            }
            Outcome::Done(report) => ChatReply {
                reply: report.text,
                options: None,
                pdf_name: Some(report.document_name),
            },
        }
    }
}

/// Runs the pipeline against one provider, extractor and generator.
pub struct Analyzer {
    provider: Arc<dyn DocumentProvider>,
    extractor: Arc<dyn TextExtractor>,
    generator: ReportGenerator,
}

impl Analyzer {
    pub fn new(
        provider: Arc<dyn DocumentProvider>,
        extractor: Arc<dyn TextExtractor>,
        generator: ReportGenerator,
    ) -> Self {
        Self {
            provider,
            extractor,
            generator,
        }
    }

    pub async fn analyze(&self, message: &str) -> Outcome {
        let outcome = self.run(message).await;
        match &outcome {
            Outcome::ProviderUnavailable(reason) => {
                warn!(backend = self.provider.backend(), %reason, "provider unavailable");
            }
            Outcome::Unreadable { document, reason } => {
                warn!(%document, %reason, "document unreadable");
            }
            Outcome::GenerationFailed { document, error } => {
                warn!(%document, %error, "report generation failed");
            }
            _ => {}
        }
        info!(
            outcome = outcome.label(),
            document = outcome.document(),
            "analysis finished"
        );
        outcome
    }

    async fn run(&self, message: &str) -> Outcome {
        let Ok(term) = SearchTerm::parse(message) else {
            return Outcome::InvalidTerm;
        };

        let doc = match resolver::resolve(&term, self.provider.as_ref()).await {
            Ok(Resolution::SingleMatch(doc)) => doc,
            Ok(Resolution::NoMatch) => {
                return Outcome::NoMatch {
                    term: term.as_str().to_string(),
                };
            }
            Ok(Resolution::AmbiguousMatch(options)) => return Outcome::Ambiguous { options },
            Err(ResolveError::ProviderUnavailable(reason)) => {
                return Outcome::ProviderUnavailable(reason);
            }
        };

        let text = match self.extract(&doc).await {
            Ok(text) => text,
            Err(reason) => {
                return Outcome::Unreadable {
                    document: doc.name,
                    reason,
                };
            }
        };

        match self.generator.generate(&doc.name, &text).await {
            Ok(report) => Outcome::Done(report),
            Err(error) => Outcome::GenerationFailed {
                document: doc.name,
                error,
            },
        }
    }

    /// Fetch and extract `doc`. Any scratch copy is released once extraction
    /// returns, whatever the result.
    async fn extract(&self, doc: &DocumentRef) -> Result<String, String> {
        let fetched = self.provider.fetch(doc).await.map_err(|e| e.to_string())?;
        let extractor = Arc::clone(&self.extractor);

        let text = tokio::task::spawn_blocking(move || extractor.extract(fetched.bytes()))
            .await
            .map_err(|e| format!("extraction task failed: {e}"))?
            .map_err(|e| e.to_string())?;

        if text.trim().is_empty() {
            return Err("no extractable text".to_string());
        }
        Ok(text)
    }
}
