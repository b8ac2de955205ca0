use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewops_core::{BatchId, BeerTypeId, DomainError};

/// A production batch of one beer type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub beer_type_id: BeerTypeId,
    pub production_date: NaiveDate,
    /// Produced volume, litres.
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBatch {
    pub beer_type_id: BeerTypeId,
    pub production_date: NaiveDate,
    pub volume: f64,
}

impl NewBatch {
    pub fn new(
        beer_type_id: BeerTypeId,
        production_date: NaiveDate,
        volume: f64,
    ) -> Result<Self, DomainError> {
        if !volume.is_finite() || volume < 0.0 {
            return Err(DomainError::validation(
                "volume must be a non-negative number",
            ));
        }
        Ok(Self {
            beer_type_id,
            production_date,
            volume,
        })
    }

    pub fn with_id(self, id: BatchId) -> Batch {
        Batch {
            id,
            beer_type_id: self.beer_type_id,
            production_date: self.production_date,
            volume: self.volume,
        }
    }
}
