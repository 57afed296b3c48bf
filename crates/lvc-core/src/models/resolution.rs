use serde::Serialize;

use crate::models::document::DocumentRef;

/// Outcome of resolving a search term against a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Resolution {
    NoMatch,
    SingleMatch(DocumentRef),
    /// Display names of every candidate, in candidate-set order.
    AmbiguousMatch(Vec<String>),
}
