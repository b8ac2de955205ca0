//! Catalog records: breweries, beer types and ingredients.
//!
//! Plain data plus input validation (no IO, no HTTP, no storage).

pub mod beer_type;
pub mod brewery;
pub mod ingredient;

pub use beer_type::{BeerType, NewBeerType};
pub use brewery::{Brewery, NewBrewery};
pub use ingredient::{Ingredient, NewIngredient};

use brewops_core::DomainError;

/// Trim a required text field and enforce a length bound.
pub(crate) fn required_text(
    field: &str,
    raw: &str,
    max_chars: usize,
) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{field} cannot exceed {max_chars} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank becomes `None`.
pub(crate) fn optional_text(
    field: &str,
    raw: Option<String>,
    max_chars: usize,
) -> Result<Option<String>, DomainError> {
    match raw {
        Some(s) if !s.trim().is_empty() => required_text(field, &s, max_chars).map(Some),
        _ => Ok(None),
    }
}
