//! Batches, sales and the remaining-volume balance view.

use std::sync::Arc;

use async_trait::async_trait;

use brewops_core::{BatchId, Page, StoreError};
use brewops_inventory::{Batch, BatchBalance, NewBatch, NewSale, Sale};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;

/// Read-only balance view over batches and their sales.
///
/// Every read is computed against the current state of the store; nothing
/// is cached between calls.
#[async_trait]
pub trait BalanceView: Send + Sync {
    /// `initial volume - Σ sale quantities` for one batch.
    ///
    /// Returns `StoreError::NotFound` when the batch does not exist.
    async fn remaining_volume(&self, batch_id: BatchId) -> Result<f64, StoreError>;

    /// One balance row per batch, ordered by batch id.
    async fn list_balances(&self, page: Page) -> Result<Vec<BatchBalance>, StoreError>;
}

/// Write side for batches and sales.
#[async_trait]
pub trait InventoryStore: BalanceView {
    /// Returns `StoreError::NotFound` when the beer type does not exist.
    async fn create_batch(&self, batch: NewBatch) -> Result<Batch, StoreError>;

    /// Returns `StoreError::NotFound` when the batch does not exist.
    async fn record_sale(&self, sale: NewSale) -> Result<Sale, StoreError>;
}

#[async_trait]
impl<S> BalanceView for Arc<S>
where
    S: BalanceView + ?Sized,
{
    async fn remaining_volume(&self, batch_id: BatchId) -> Result<f64, StoreError> {
        (**self).remaining_volume(batch_id).await
    }

    async fn list_balances(&self, page: Page) -> Result<Vec<BatchBalance>, StoreError> {
        (**self).list_balances(page).await
    }
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn create_batch(&self, batch: NewBatch) -> Result<Batch, StoreError> {
        (**self).create_batch(batch).await
    }

    async fn record_sale(&self, sale: NewSale) -> Result<Sale, StoreError> {
        (**self).record_sale(sale).await
    }
}
