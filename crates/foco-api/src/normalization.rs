//! Text folding for search filters.
//!
//! Students type "funcao" and expect to find "Função". Both sides go through
//! [`fold_for_search`] before comparing.

use unicode_normalization::UnicodeNormalization;

/// Lowercase, strip combining marks and collapse whitespace.
///
/// Punctuation is kept, so "f(x)" still matches "f(x) = 2x".
pub fn fold_for_search(s: &str) -> String {
    s.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A folded needle, built once per request and matched against many fields.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    folded: String,
}

impl SearchQuery {
    /// `None` for a missing or blank term, which matches everything.
    pub fn new(term: Option<&str>) -> Option<Self> {
        let folded = fold_for_search(term?);
        (!folded.is_empty()).then_some(Self { folded })
    }

    /// Whether any of the fields contains the term.
    pub fn matches_any(&self, fields: &[&str]) -> bool {
        fields
            .iter()
            .any(|field| fold_for_search(field).contains(&self.folded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold_for_search("Função"), "funcao");
        assert_eq!(fold_for_search("ÁLGEBRA Linear"), "algebra linear");
        assert_eq!(fold_for_search("  Revolução   Francesa "), "revolucao francesa");
    }

    #[test]
    fn test_fold_keeps_punctuation() {
        assert_eq!(fold_for_search("f(x) = 2x"), "f(x) = 2x");
    }

    #[test]
    fn test_blank_query_is_none() {
        assert!(SearchQuery::new(None).is_none());
        assert!(SearchQuery::new(Some("   ")).is_none());
    }

    #[test]
    fn test_matches_any_field() {
        let query = SearchQuery::new(Some("estequiometria")).unwrap();
        assert!(query.matches_any(&["Química", "Lista de Estequiometría"]));
        assert!(!query.matches_any(&["Química", "Termoquímica"]));
    }
}
