use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewops_core::{BatchId, DomainError, SaleId};

/// A sale drawn from one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub batch_id: BatchId,
    pub sale_date: NaiveDate,
    /// Sold volume, litres.
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSale {
    pub batch_id: BatchId,
    pub sale_date: NaiveDate,
    pub quantity: f64,
    pub price: f64,
}

impl NewSale {
    /// Over-selling a batch is not rejected here; the balance simply goes
    /// negative and shows up in the balance view.
    pub fn new(
        batch_id: BatchId,
        sale_date: NaiveDate,
        quantity: f64,
        price: f64,
    ) -> Result<Self, DomainError> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self {
            batch_id,
            sale_date,
            quantity,
            price,
        })
    }

    pub fn with_id(self, id: SaleId) -> Sale {
        Sale {
            id,
            batch_id: self.batch_id,
            sale_date: self.sale_date,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
