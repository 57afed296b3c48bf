use std::any::Any;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::term::SearchTerm;

/// A document inside one provider's namespace.
///
/// `key` is whatever the backend needs to locate the bytes (an absolute path
/// or an object key). `name` is the base name shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentRef {
    pub key: String,
    pub name: String,
}

impl DocumentRef {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }

    /// Build a reference from a `/`-separated key, using the last segment as
    /// the display name.
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        let name = base_name(&key).to_string();
        Self { key, name }
    }

    /// Whether this document is a candidate for `term`.
    pub fn matches(&self, term: &SearchTerm) -> bool {
        is_pdf_name(&self.name) && term.is_contained_in(&self.name)
    }
}

/// Last path segment of a key, accepting both separators.
pub fn base_name(key: &str) -> &str {
    key.rsplit(['/', '\\']).next().unwrap_or(key)
}

pub fn is_pdf_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ready,
    /// The backend could not be consulted (not configured, unreachable).
    Unavailable(String),
}

/// The documents a provider returned for one search.
///
/// Deduplicated by key and kept in a stable order (display name, then key)
/// so repeated searches over an unchanged store list the same candidates.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    documents: Vec<DocumentRef>,
    status: ProviderStatus,
}

impl CandidateSet {
    pub fn ready(documents: impl IntoIterator<Item = DocumentRef>) -> Self {
        let unique: BTreeMap<(String, String), DocumentRef> = documents
            .into_iter()
            .map(|doc| ((doc.name.clone(), doc.key.clone()), doc))
            .collect();

        Self {
            documents: unique.into_values().collect(),
            status: ProviderStatus::Ready,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            status: ProviderStatus::Unavailable(reason.into()),
        }
    }

    pub fn status(&self) -> &ProviderStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == ProviderStatus::Ready
    }

    pub fn documents(&self) -> &[DocumentRef] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<DocumentRef> {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Raw bytes of a fetched document.
///
/// Backends that materialize the document on local disk hand over a scratch
/// guard; the scratch copy lives exactly as long as this value.
pub struct FetchedDocument {
    pub doc: DocumentRef,
    bytes: Vec<u8>,
    _scratch: Option<Box<dyn Any + Send>>,
}

impl FetchedDocument {
    pub fn in_memory(doc: DocumentRef, bytes: Vec<u8>) -> Self {
        Self {
            doc,
            bytes,
            _scratch: None,
        }
    }

    pub fn with_scratch(doc: DocumentRef, bytes: Vec<u8>, scratch: impl Any + Send) -> Self {
        Self {
            doc,
            bytes,
            _scratch: Some(Box::new(scratch)),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn has_scratch(&self) -> bool {
        self._scratch.is_some()
    }
}

impl std::fmt::Debug for FetchedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchedDocument")
            .field("doc", &self.doc)
            .field("len", &self.bytes.len())
            .field("scratch", &self._scratch.is_some())
            .finish()
    }
}

/// How a document is handed to a downloading client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    Bytes(Vec<u8>),
    /// Time-limited URL the client should be redirected to.
    Redirect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_strips_prefix() {
        assert_eq!(base_name("relatorios/2024/trecho1.pdf"), "trecho1.pdf");
        assert_eq!(base_name("C:\\docs\\trecho1.pdf"), "trecho1.pdf");
        assert_eq!(base_name("trecho1.pdf"), "trecho1.pdf");
    }

    #[test]
    fn only_pdf_names_match() {
        let term = SearchTerm::parse("br101").unwrap();
        assert!(DocumentRef::from_key("a/relatorio_BR101.PDF").matches(&term));
        assert!(!DocumentRef::from_key("a/relatorio_BR101.docx").matches(&term));
        // Directory names are not part of the match.
        assert!(!DocumentRef::from_key("br101/outro.pdf").matches(&term));
    }

    #[test]
    fn candidate_set_dedups_and_sorts() {
        let set = CandidateSet::ready(vec![
            DocumentRef::from_key("z/b.pdf"),
            DocumentRef::from_key("a/a.pdf"),
            DocumentRef::from_key("z/b.pdf"),
        ]);
        let names: Vec<_> = set.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        assert!(set.is_ready());
    }

    #[test]
    fn unavailable_set_is_empty_but_flagged() {
        let set = CandidateSet::unavailable("bucket not configured");
        assert!(set.is_empty());
        assert!(!set.is_ready());
    }
}
