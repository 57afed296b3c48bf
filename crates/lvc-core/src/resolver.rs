//! Term → document resolution.
//!
//! Substring match first, exact base-name override second, user prompt
//! last. Both backends go through the same code.

use tracing::{debug, info};

use crate::error::ResolveError;
use crate::models::document::{DocumentRef, ProviderStatus};
use crate::models::resolution::Resolution;
use crate::models::term::SearchTerm;
use crate::provider::DocumentProvider;

/// Resolve `term` to at most one document of `provider`.
pub async fn resolve(
    term: &SearchTerm,
    provider: &dyn DocumentProvider,
) -> Result<Resolution, ResolveError> {
    let candidates = provider.find(term).await;

    if let ProviderStatus::Unavailable(reason) = candidates.status() {
        return Err(ResolveError::ProviderUnavailable(reason.clone()));
    }

    info!(
        backend = provider.backend(),
        term = term.as_str(),
        candidates = candidates.len(),
        "resolved candidates"
    );

    Ok(disambiguate(term, candidates.into_documents()))
}

/// Collapse a candidate list into a [`Resolution`].
///
/// `candidates` must already be deduplicated and in stable order.
pub fn disambiguate(term: &SearchTerm, mut candidates: Vec<DocumentRef>) -> Resolution {
    match candidates.len() {
        0 => Resolution::NoMatch,
        1 => Resolution::SingleMatch(candidates.remove(0)),
        _ => {
            if let Some(exact) = candidates.iter().position(|d| term.equals_name(&d.name)) {
                debug!(name = %candidates[exact].name, "exact name wins over substring matches");
                return Resolution::SingleMatch(candidates.swap_remove(exact));
            }
            Resolution::AmbiguousMatch(candidates.into_iter().map(|d| d.name).collect())
        }
    }
}

/// Pick the document a download request refers to.
///
/// Prefers an exact base-name match; otherwise the first candidate.
pub fn select_for_download(term: &SearchTerm, candidates: Vec<DocumentRef>) -> Option<DocumentRef> {
    let exact = candidates.iter().position(|d| term.equals_name(&d.name));
    let mut candidates = candidates;
    match exact {
        Some(i) => Some(candidates.swap_remove(i)),
        None => candidates.into_iter().next(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(keys: &[&str]) -> Vec<DocumentRef> {
        keys.iter().map(|k| DocumentRef::from_key(*k)).collect()
    }

    #[test]
    fn empty_is_no_match() {
        let term = SearchTerm::parse("x").unwrap();
        assert_eq!(disambiguate(&term, vec![]), Resolution::NoMatch);
    }

    #[test]
    fn single_candidate_wins_even_without_exact_name() {
        let term = SearchTerm::parse("br101").unwrap();
        let res = disambiguate(&term, docs(&["r/relatorio_BR101.pdf"]));
        assert_eq!(
            res,
            Resolution::SingleMatch(DocumentRef::from_key("r/relatorio_BR101.pdf"))
        );
    }

    #[test]
    fn exact_base_name_overrides_ambiguity() {
        let term = SearchTerm::parse("TRECHO1.pdf").unwrap();
        let res = disambiguate(&term, docs(&["a/trecho1-anexo.pdf", "b/trecho1.pdf"]));
        assert_eq!(res, Resolution::SingleMatch(DocumentRef::from_key("b/trecho1.pdf")));
    }

    #[test]
    fn no_exact_name_is_ambiguous() {
        let term = SearchTerm::parse("trecho1").unwrap();
        let res = disambiguate(&term, docs(&["trecho1-anexo.pdf", "trecho1.pdf"]));
        assert_eq!(
            res,
            Resolution::AmbiguousMatch(vec![
                "trecho1-anexo.pdf".to_string(),
                "trecho1.pdf".to_string()
            ])
        );
    }

    #[test]
    fn download_prefers_exact_then_first() {
        let term = SearchTerm::parse("trecho1.pdf").unwrap();
        let picked = select_for_download(&term, docs(&["trecho1-anexo.pdf", "trecho1.pdf"]));
        assert_eq!(picked.unwrap().name, "trecho1.pdf");

        let term = SearchTerm::parse("trecho").unwrap();
        let picked = select_for_download(&term, docs(&["trecho1-anexo.pdf", "trecho1.pdf"]));
        assert_eq!(picked.unwrap().name, "trecho1-anexo.pdf");

        assert!(select_for_download(&term, vec![]).is_none());
    }
}
