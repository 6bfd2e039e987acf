//! Field rules shared by the request payloads.
//!
//! Lengths and ranges are declared on the payloads with `#[validate(...)]`;
//! the checks that need code live here and are plugged in with
//! `#[validate(custom(function = ...))]`.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::ValidationError;

use crate::error::ApiError;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("color pattern is valid"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// `#RRGGBB`, either case.
///
/// # Examples
/// ```
/// use foco_api::validation::validate_hex_color;
///
/// assert!(validate_hex_color("#3b82f6").is_ok());
/// assert!(validate_hex_color("blue").is_err());
/// ```
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    if HEX_COLOR.is_match(color) {
        Ok(())
    } else {
        Err(error("hex_color", "must be a #RRGGBB color"))
    }
}

/// Rejects values made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "must not be blank"))
    } else {
        Ok(())
    }
}

/// A topic name or search term used as a query filter.
pub fn validate_search_term(term: &str) -> Result<(), ApiError> {
    if term.chars().count() > 200 {
        return Err(ApiError::Validation(
            "Search term must be at most 200 characters long".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_hex_color() {
        assert!(validate_hex_color("#3B82F6").is_ok());
        assert!(validate_hex_color("#000000").is_ok());

        assert!(validate_hex_color("3B82F6").is_err());
        assert!(validate_hex_color("#3B82F").is_err());
        assert!(validate_hex_color("#3B82F6A").is_err());
        assert!(validate_hex_color("#GGGGGG").is_err());
        assert!(validate_hex_color("").is_err());
    }

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Física").is_ok());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
    }

    #[test]
    fn test_validate_search_term() {
        assert!(validate_search_term("função").is_ok());
        assert!(validate_search_term(&"a".repeat(201)).is_err());
    }
}
