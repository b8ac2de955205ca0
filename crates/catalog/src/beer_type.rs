use serde::{Deserialize, Serialize};

use brewops_core::{BeerTypeId, DomainError};

use crate::{optional_text, required_text};

/// A stored beer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeerType {
    pub id: BeerTypeId,
    pub name: String,
    /// Style family (e.g. "lager"). Serialized as `type`.
    #[serde(rename = "type")]
    pub style: Option<String>,
    /// Alcohol by volume, percent.
    pub alcohol_content: Option<f64>,
    pub description: Option<String>,
}

/// Validated input for creating a beer type.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeerType {
    pub name: String,
    pub style: Option<String>,
    pub alcohol_content: Option<f64>,
    pub description: Option<String>,
}

impl NewBeerType {
    pub fn new(
        name: &str,
        style: Option<String>,
        alcohol_content: Option<f64>,
        description: Option<String>,
    ) -> Result<Self, DomainError> {
        if let Some(abv) = alcohol_content {
            if !abv.is_finite() || !(0.0..=100.0).contains(&abv) {
                return Err(DomainError::validation(
                    "alcohol_content must be between 0 and 100",
                ));
            }
        }

        Ok(Self {
            name: required_text("name", name, 200)?,
            style: optional_text("type", style, 100)?,
            alcohol_content,
            description: optional_text("description", description, 2000)?,
        })
    }

    pub fn with_id(self, id: BeerTypeId) -> BeerType {
        BeerType {
            id,
            name: self.name,
            style: self.style,
            alcohol_content: self.alcohol_content,
            description: self.description,
        }
    }
}
