use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use brewops_core::{BatchId, Page, SaleId, StoreError};
use brewops_inventory::{Batch, BatchBalance, NewBatch, NewSale, Sale};

use super::{BalanceView, InventoryStore};
use crate::catalog::CatalogStore;

#[derive(Debug, Default)]
struct Inner {
    batches: BTreeMap<BatchId, Batch>,
    sales: Vec<Sale>,
    last_batch_id: i64,
    last_sale_id: i64,
}

/// In-memory batch/sale store.
///
/// Intended for tests/dev. Beer types are resolved through the catalog store
/// it was built with.
pub struct InMemoryInventoryStore {
    catalog: Arc<dyn CatalogStore>,
    inner: RwLock<Inner>,
}

impl InMemoryInventoryStore {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog,
            inner: RwLock::new(Inner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

#[async_trait]
impl BalanceView for InMemoryInventoryStore {
    async fn remaining_volume(&self, batch_id: BatchId) -> Result<f64, StoreError> {
        let inner = self.read()?;
        let batch = inner
            .batches
            .get(&batch_id)
            .ok_or_else(|| StoreError::not_found(format!("batch {batch_id}")))?;

        let sold = inner
            .sales
            .iter()
            .filter(|s| s.batch_id == batch_id)
            .map(|s| s.quantity);
        Ok(brewops_inventory::remaining_volume(batch.volume, sold))
    }

    async fn list_balances(&self, page: Page) -> Result<Vec<BatchBalance>, StoreError> {
        // Snapshot under the lock; the guard cannot live across the catalog lookups.
        let (batches, sales) = {
            let inner = self.read()?;
            let batches: Vec<Batch> = page.apply(inner.batches.values()).cloned().collect();
            let sales: Vec<Sale> = inner
                .sales
                .iter()
                .filter(|s| batches.iter().any(|b| b.id == s.batch_id))
                .cloned()
                .collect();
            (batches, sales)
        };

        let mut rows = Vec::with_capacity(batches.len());
        for batch in &batches {
            let name = self
                .catalog
                .find_beer_type(batch.beer_type_id)
                .await?
                .map(|bt| bt.name)
                .ok_or_else(|| {
                    StoreError::backend(format!(
                        "batch {} references missing beer type {}",
                        batch.id, batch.beer_type_id
                    ))
                })?;
            rows.push(BatchBalance::compute(batch, name, &sales));
        }
        Ok(rows)
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn create_batch(&self, batch: NewBatch) -> Result<Batch, StoreError> {
        if self.catalog.find_beer_type(batch.beer_type_id).await?.is_none() {
            return Err(StoreError::not_found(format!(
                "beer type {}",
                batch.beer_type_id
            )));
        }

        let mut inner = self.write()?;
        inner.last_batch_id += 1;
        let stored = batch.with_id(BatchId::new(inner.last_batch_id));
        inner.batches.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn record_sale(&self, sale: NewSale) -> Result<Sale, StoreError> {
        let mut inner = self.write()?;
        if !inner.batches.contains_key(&sale.batch_id) {
            return Err(StoreError::not_found(format!("batch {}", sale.batch_id)));
        }

        inner.last_sale_id += 1;
        let stored = sale.with_id(SaleId::new(inner.last_sale_id));
        inner.sales.push(stored.clone());
        Ok(stored)
    }
}
