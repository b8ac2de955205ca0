use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewops_core::{BreweryId, DomainError};

use crate::{optional_text, required_text};

/// A stored brewery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brewery {
    pub id: BreweryId,
    pub name: String,
    pub location: Option<String>,
    pub establishment_date: Option<NaiveDate>,
}

/// Validated input for creating a brewery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBrewery {
    pub name: String,
    pub location: Option<String>,
    pub establishment_date: Option<NaiveDate>,
}

impl NewBrewery {
    pub fn new(
        name: &str,
        location: Option<String>,
        establishment_date: Option<NaiveDate>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: required_text("name", name, 200)?,
            location: optional_text("location", location, 200)?,
            establishment_date,
        })
    }

    pub fn with_id(self, id: BreweryId) -> Brewery {
        Brewery {
            id,
            name: self.name,
            location: self.location,
            establishment_date: self.establishment_date,
        }
    }
}
