//! In-memory fakes for the provider, extractor and model.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use lvc_bedrock::error::BedrockError;
use lvc_bedrock::{ReportGenerator, ReportModel};
use lvc_core::error::ProviderError;
use lvc_core::models::document::{CandidateSet, DocumentRef, FetchedDocument, Retrieval};
use lvc_core::models::term::SearchTerm;
use lvc_core::provider::{BoxFuture, DocumentProvider};
use lvc_pdf::TextExtractor;
use lvc_pdf::error::ExtractError;

use crate::analyze::Analyzer;

pub struct FakeProvider {
    docs: Vec<(DocumentRef, Vec<u8>)>,
    ready: bool,
    scratch: bool,
    redirect_base: Option<String>,
    vanished: bool,
    /// Number of scratch copies dropped so far.
    pub released: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new(docs: &[(&str, &str)]) -> Self {
        Self {
            docs: docs
                .iter()
                .map(|(name, body)| {
                    (
                        DocumentRef::from_key(format!("store/{name}")),
                        body.as_bytes().to_vec(),
                    )
                })
                .collect(),
            ready: true,
            scratch: false,
            redirect_base: None,
            vanished: false,
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Self::new(&[])
        }
    }

    /// Hand out fetched documents with a scratch guard, like the S3 backend.
    pub fn with_scratch(mut self) -> Self {
        self.scratch = true;
        self
    }

    /// Serve downloads as redirects under `base`, like the S3 backend.
    pub fn redirecting(mut self, base: &str) -> Self {
        self.redirect_base = Some(base.to_string());
        self
    }

    /// List documents on search but fail every read, as if they were
    /// deleted right after the listing.
    pub fn vanishing(mut self) -> Self {
        self.vanished = true;
        self
    }

    fn lookup(&self, doc: &DocumentRef) -> Result<&[u8], ProviderError> {
        if self.vanished {
            return Err(ProviderError::NotFound {
                key: doc.key.clone(),
            });
        }
        self.docs
            .iter()
            .find(|(d, _)| d.key == doc.key)
            .map(|(_, bytes)| bytes.as_slice())
            .ok_or_else(|| ProviderError::NotFound {
                key: doc.key.clone(),
            })
    }
}

struct ReleaseGuard(Arc<AtomicUsize>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl DocumentProvider for FakeProvider {
    fn backend(&self) -> &str {
        "fake"
    }

    fn find<'a>(&'a self, term: &'a SearchTerm) -> BoxFuture<'a, CandidateSet> {
        Box::pin(async move {
            if !self.ready {
                return CandidateSet::unavailable("fake store offline");
            }
            CandidateSet::ready(
                self.docs
                    .iter()
                    .map(|(d, _)| d.clone())
                    .filter(|d| d.matches(term)),
            )
        })
    }

    fn fetch<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<FetchedDocument, ProviderError>> {
        Box::pin(async move {
            let bytes = self.lookup(doc)?.to_vec();
            if self.scratch {
                let guard = ReleaseGuard(Arc::clone(&self.released));
                Ok(FetchedDocument::with_scratch(doc.clone(), bytes, guard))
            } else {
                Ok(FetchedDocument::in_memory(doc.clone(), bytes))
            }
        })
    }

    fn retrieval<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<Retrieval, ProviderError>> {
        Box::pin(async move {
            let bytes = self.lookup(doc)?;
            Ok(match &self.redirect_base {
                Some(base) => Retrieval::Redirect(format!("{base}/{}", doc.key)),
                None => Retrieval::Bytes(bytes.to_vec()),
            })
        })
    }
}

/// Treats document bytes as UTF-8 text.
pub struct Utf8Extractor;

impl Utf8Extractor {
    /// Documents starting with this marker fail to decode.
    pub const CORRUPT: &'static str = "%CORRUPT%";
}

impl TextExtractor for Utf8Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if bytes.starts_with(Self::CORRUPT.as_bytes()) {
            return Err(ExtractError::Unreadable("broken xref table".to_string()));
        }
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Unreadable(e.to_string()))
    }
}

/// Records user prompts and answers with a fixed report.
#[derive(Default)]
pub struct RecordingModel {
    pub prompts: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl ReportModel for RecordingModel {
    fn model_id(&self) -> &str {
        "fake-model"
    }

    fn complete<'a>(
        &'a self,
        _system_prompt: &'a str,
        prompt: &'a str,
    ) -> BoxFuture<'a, Result<String, BedrockError>> {
        Box::pin(async move {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail.load(Ordering::SeqCst) {
                Err(BedrockError::Invocation("quota exceeded".to_string()))
            } else {
                Ok("RELATÓRIO GERADO".to_string())
            }
        })
    }
}

pub fn analyzer_with(provider: FakeProvider) -> (Analyzer, Arc<RecordingModel>) {
    let model = Arc::new(RecordingModel::default());
    let analyzer = Analyzer::new(
        Arc::new(provider),
        Arc::new(Utf8Extractor),
        ReportGenerator::new(model.clone()),
    );
    (analyzer, model)
}

pub fn state_with(provider: FakeProvider) -> (crate::state::AppState, Arc<RecordingModel>) {
    let provider: Arc<dyn DocumentProvider> = Arc::new(provider);
    let model = Arc::new(RecordingModel::default());
    let analyzer = Analyzer::new(
        Arc::clone(&provider),
        Arc::new(Utf8Extractor),
        ReportGenerator::new(model.clone()),
    );
    let state = crate::state::AppState {
        provider,
        analyzer: Arc::new(analyzer),
    };
    (state, model)
}
