use std::path::{Path, PathBuf};

use lvc_core::error::ProviderError;
use lvc_core::models::document::{CandidateSet, DocumentRef, FetchedDocument, Retrieval};
use lvc_core::models::term::SearchTerm;
use lvc_core::provider::{BoxFuture, DocumentProvider};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Documents stored under a directory tree on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, doc: &DocumentRef) -> Result<Vec<u8>, ProviderError> {
        tokio::fs::read(&doc.key).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ProviderError::NotFound {
                key: doc.key.clone(),
            },
            _ => ProviderError::Backend(format!("reading {}: {e}", doc.key)),
        })
    }
}

impl DocumentProvider for LocalProvider {
    fn backend(&self) -> &str {
        "local"
    }

    fn find<'a>(&'a self, term: &'a SearchTerm) -> BoxFuture<'a, CandidateSet> {
        Box::pin(async move {
            let root = self.root.clone();
            let owned_term = term.clone();
            match tokio::task::spawn_blocking(move || find_blocking(&root, &owned_term)).await {
                Ok(set) => set,
                Err(e) => {
                    warn!(error = %e, "directory scan task failed");
                    CandidateSet::unavailable(format!("directory scan failed: {e}"))
                }
            }
        })
    }

    fn fetch<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<FetchedDocument, ProviderError>> {
        Box::pin(async move {
            let bytes = self.read(doc).await?;
            Ok(FetchedDocument::in_memory(doc.clone(), bytes))
        })
    }

    fn retrieval<'a>(
        &'a self,
        doc: &'a DocumentRef,
    ) -> BoxFuture<'a, Result<Retrieval, ProviderError>> {
        Box::pin(async move { Ok(Retrieval::Bytes(self.read(doc).await?)) })
    }
}

/// Scan `root`; when nothing matches, broaden to its parent tree.
///
/// The parent fallback covers a server started from a working directory one
/// level below the real document root.
fn find_blocking(root: &Path, term: &SearchTerm) -> CandidateSet {
    let root = match root.canonicalize() {
        Ok(p) if p.is_dir() => p,
        Ok(p) => {
            return CandidateSet::unavailable(format!(
                "document root {} is not a directory",
                p.display()
            ));
        }
        Err(e) => {
            return CandidateSet::unavailable(format!(
                "document root {} unreadable: {e}",
                root.display()
            ));
        }
    };

    let mut found = scan(&root, term);

    if found.is_empty()
        && let Some(parent) = root.parent()
    {
        info!(
            root = %root.display(),
            parent = %parent.display(),
            "no match under document root, scanning parent"
        );
        found = scan(parent, term);
    }

    CandidateSet::ready(found)
}

fn scan(dir: &Path, term: &SearchTerm) -> Vec<DocumentRef> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let doc = DocumentRef::new(entry.path().to_string_lossy(), name);
            doc.matches(term).then_some(doc)
        })
        .collect()
}
