use std::future::Future;
use std::pin::Pin;

use crate::error::ProviderError;
use crate::models::document::{CandidateSet, DocumentRef, FetchedDocument, Retrieval};
use crate::models::term::SearchTerm;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A storage backend holding inspection PDFs.
///
/// Implemented once per backend (local tree, S3 bucket). The resolver and
/// the report pipeline only ever talk to this trait.
///
/// Methods return boxed futures for dyn compatibility.
pub trait DocumentProvider: Send + Sync {
    /// Short backend tag used in logs and the health probe.
    fn backend(&self) -> &str;

    /// Every PDF whose name contains `term`, case-insensitively.
    ///
    /// Never fails: a backend that cannot be consulted returns an
    /// unavailable [`CandidateSet`] instead.
    fn find<'a>(&'a self, term: &'a SearchTerm) -> BoxFuture<'a, CandidateSet>;

    /// Full raw content of `doc`.
    fn fetch<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<FetchedDocument, ProviderError>>;

    /// How `doc` should be served to a downloading client.
    fn retrieval<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<Retrieval, ProviderError>>;
}
