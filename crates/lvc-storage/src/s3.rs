use std::path::PathBuf;
use std::time::Duration;

use aws_sdk_s3::Client;
use lvc_core::error::ProviderError;
use lvc_core::models::document::{CandidateSet, DocumentRef, FetchedDocument, Retrieval};
use lvc_core::models::term::SearchTerm;
use lvc_core::provider::{BoxFuture, DocumentProvider};
use tracing::{info, warn};

use crate::error::StorageError;
use crate::objects;
use crate::scratch;

const DEFAULT_PRESIGN_TTL: Duration = Duration::from_secs(900);

/// Documents stored as objects in an S3 bucket.
///
/// A provider without a bucket is valid but never ready: searches report it
/// as unavailable rather than empty.
#[derive(Debug, Clone)]
pub struct S3Provider {
    client: Client,
    bucket: Option<String>,
    prefix: String,
    scratch_dir: PathBuf,
    presign_ttl: Duration,
}

impl S3Provider {
    pub fn new(config: &aws_config::SdkConfig, bucket: Option<String>) -> Self {
        Self::with_client(Client::new(config), bucket)
    }

    pub fn with_client(client: Client, bucket: Option<String>) -> Self {
        Self {
            client,
            bucket: bucket.filter(|b| !b.trim().is_empty()),
            prefix: String::new(),
            scratch_dir: std::env::temp_dir(),
            presign_ttl: DEFAULT_PRESIGN_TTL,
        }
    }

    /// Only list keys under `prefix`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory for per-request scratch copies.
    pub fn scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn presign_ttl(mut self, ttl: Duration) -> Self {
        self.presign_ttl = ttl;
        self
    }

    fn bucket(&self) -> Result<&str, StorageError> {
        self.bucket.as_deref().ok_or(StorageError::NotConfigured)
    }
}

impl DocumentProvider for S3Provider {
    fn backend(&self) -> &str {
        "s3"
    }

    fn find<'a>(&'a self, term: &'a SearchTerm) -> BoxFuture<'a, CandidateSet> {
        Box::pin(async move {
            let bucket = match self.bucket() {
                Ok(b) => b,
                Err(e) => return CandidateSet::unavailable(e.to_string()),
            };

            match objects::list_objects(&self.client, bucket, &self.prefix).await {
                Ok(keys) => {
                    let scanned = keys.len();
                    let set = CandidateSet::ready(
                        keys.into_iter()
                            .map(DocumentRef::from_key)
                            .filter(|doc| doc.matches(term)),
                    );
                    info!(bucket, scanned, matched = set.len(), "listed bucket");
                    set
                }
                Err(e) => {
                    warn!(bucket, error = %e, "bucket listing failed");
                    CandidateSet::unavailable(e.to_string())
                }
            }
        })
    }

    fn fetch<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<FetchedDocument, ProviderError>> {
        Box::pin(async move {
            let bucket = self.bucket()?;
            let (bytes, guard) =
                scratch::materialize(&self.client, bucket, &doc.key, &self.scratch_dir).await?;
            Ok(FetchedDocument::with_scratch(doc.clone(), bytes, guard))
        })
    }

    fn retrieval<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<Retrieval, ProviderError>> {
        Box::pin(async move {
            let bucket = self.bucket()?;
            let url = objects::presign_get(&self.client, bucket, &doc.key, self.presign_ttl).await?;
            Ok(Retrieval::Redirect(url))
        })
    }
}
