use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewops_core::BatchId;

use crate::{Batch, Sale};

/// `initial - Σ sold`.
pub fn remaining_volume<I>(initial: f64, sold: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    initial - sold.into_iter().sum::<f64>()
}

/// Flat, fully materialized balance row for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchBalance {
    pub batch_id: BatchId,
    pub beer_type_name: String,
    pub production_date: NaiveDate,
    pub initial_volume: f64,
    pub remaining_volume: f64,
}

impl BatchBalance {
    /// Build the row from a batch and any slice of sales; sales for other
    /// batches are ignored.
    pub fn compute(batch: &Batch, beer_type_name: impl Into<String>, sales: &[Sale]) -> Self {
        let sold = sales
            .iter()
            .filter(|s| s.batch_id == batch.id)
            .map(|s| s.quantity);

        Self {
            batch_id: batch.id,
            beer_type_name: beer_type_name.into(),
            production_date: batch.production_date,
            initial_volume: batch.volume,
            remaining_volume: remaining_volume(batch.volume, sold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewops_core::{BeerTypeId, SaleId};
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn batch(id: i64, volume: f64) -> Batch {
        Batch {
            id: BatchId::new(id),
            beer_type_id: BeerTypeId::new(1),
            production_date: day(),
            volume,
        }
    }

    fn sale(id: i64, batch_id: i64, quantity: f64) -> Sale {
        Sale {
            id: SaleId::new(id),
            batch_id: BatchId::new(batch_id),
            sale_date: day(),
            quantity,
            price: 3.5,
        }
    }

    #[test]
    fn batch_seven_scenario() {
        let sales = vec![sale(1, 7, 20.0), sale(2, 7, 30.0), sale(3, 8, 99.0)];
        let row = BatchBalance::compute(&batch(7, 100.0), "IPA", &sales);
        assert_eq!(row.remaining_volume, 50.0);
        assert_eq!(row.initial_volume, 100.0);
        assert_eq!(row.beer_type_name, "IPA");
    }

    #[test]
    fn no_sales_leaves_full_volume() {
        let row = BatchBalance::compute(&batch(1, 12.5), "Stout", &[]);
        assert_eq!(row.remaining_volume, 12.5);
    }

    proptest! {
        /// Property: remaining + sold of this batch == initial, regardless of
        /// sales recorded against other batches.
        #[test]
        fn balance_conserves_volume(
            volume in 0.0f64..10_000.0,
            own in prop::collection::vec(0.01f64..100.0, 0..20),
            other in prop::collection::vec(0.01f64..100.0, 0..20),
        ) {
            let mut sales = Vec::new();
            for (i, q) in own.iter().enumerate() {
                sales.push(sale(i as i64 + 1, 1, *q));
            }
            for (i, q) in other.iter().enumerate() {
                sales.push(sale(1_000 + i as i64, 2, *q));
            }

            let row = BatchBalance::compute(&batch(1, volume), "X", &sales);
            let sold: f64 = own.iter().sum();
            prop_assert!((row.remaining_volume + sold - volume).abs() < 1e-6);
        }
    }
}
