use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A user-supplied search term.
///
/// Keeps both the trimmed input (echoed back in replies) and the normalized
/// lower-case form used for every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
    raw: String,
    normalized: String,
}

impl SearchTerm {
    /// Trim and normalize `input`. Blank input is rejected.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Err(CoreError::EmptyTerm);
        }
        Ok(Self {
            raw: raw.to_string(),
            normalized: raw.to_lowercase(),
        })
    }

    /// The trimmed term as the user typed it.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Case-insensitive substring test against a document name.
    pub fn is_contained_in(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.normalized)
    }

    /// Case-insensitive whole-name equality.
    pub fn equals_name(&self, name: &str) -> bool {
        name.to_lowercase() == self.normalized
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        let term = SearchTerm::parse("  BR101 \n").unwrap();
        assert_eq!(term.as_str(), "BR101");
        assert_eq!(term.normalized(), "br101");
    }

    #[test]
    fn blank_is_rejected() {
        assert!(matches!(SearchTerm::parse("   "), Err(CoreError::EmptyTerm)));
        assert!(matches!(SearchTerm::parse(""), Err(CoreError::EmptyTerm)));
    }

    #[test]
    fn substring_and_equality_ignore_case() {
        let term = SearchTerm::parse("Trecho1.PDF").unwrap();
        assert!(term.is_contained_in("trecho1.pdf"));
        assert!(term.equals_name("TRECHO1.pdf"));
        assert!(!term.equals_name("trecho1-anexo.pdf"));
    }
}
