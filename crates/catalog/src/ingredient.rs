use serde::{Deserialize, Serialize};

use brewops_core::{DomainError, IngredientId};

use crate::required_text;

/// A stored brewing ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Ingredient class (e.g. "hop", "malt"). Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub kind: String,
}

impl NewIngredient {
    pub fn new(name: &str, kind: &str) -> Result<Self, DomainError> {
        Ok(Self {
            name: required_text("name", name, 200)?,
            kind: required_text("type", kind, 100)?,
        })
    }

    pub fn with_id(self, id: IngredientId) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            kind: self.kind,
        }
    }
}
