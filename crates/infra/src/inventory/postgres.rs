use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use brewops_core::{BatchId, Page, SaleId, StoreError};
use brewops_inventory::{Batch, BatchBalance, NewBatch, NewSale, Sale};

use super::{BalanceView, InventoryStore};
use crate::db::{map_sqlx_error, offset_limit};

/// Postgres-backed batch/sale store.
///
/// Balances are aggregated in SQL: one `LEFT JOIN` + `SUM` per read, so a
/// batch with no sales reports its full volume.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn decode<T>(operation: &str, res: Result<T, sqlx::Error>) -> Result<T, StoreError> {
    res.map_err(|e| map_sqlx_error(operation, e))
}

fn row_to_balance(row: &PgRow) -> Result<BatchBalance, StoreError> {
    Ok(BatchBalance {
        batch_id: BatchId::new(decode("decode batch_id", row.try_get("batch_id"))?),
        beer_type_name: decode("decode beer_type_name", row.try_get("beer_type_name"))?,
        production_date: decode("decode production_date", row.try_get("production_date"))?,
        initial_volume: decode("decode initial_volume", row.try_get("initial_volume"))?,
        remaining_volume: decode("decode remaining_volume", row.try_get("remaining_volume"))?,
    })
}

#[async_trait]
impl BalanceView for PostgresInventoryStore {
    async fn remaining_volume(&self, batch_id: BatchId) -> Result<f64, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT b.volume - COALESCE(SUM(s.quantity), 0) AS remaining_volume
            FROM batches b
            LEFT JOIN sales s ON s.batch_id = b.id
            WHERE b.id = $1
            GROUP BY b.id, b.volume
            "#,
        )
        .bind(batch_id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("remaining_volume", e))?;

        match row {
            Some(row) => decode("decode remaining_volume", row.try_get("remaining_volume")),
            None => Err(StoreError::not_found(format!("batch {batch_id}"))),
        }
    }

    async fn list_balances(&self, page: Page) -> Result<Vec<BatchBalance>, StoreError> {
        let (offset, limit) = offset_limit(page);
        let rows = sqlx::query(
            r#"
            SELECT
                b.id AS batch_id,
                bt.name AS beer_type_name,
                b.production_date,
                b.volume AS initial_volume,
                b.volume - COALESCE(SUM(s.quantity), 0) AS remaining_volume
            FROM batches b
            JOIN beer_types bt ON bt.id = b.beer_type_id
            LEFT JOIN sales s ON s.batch_id = b.id
            GROUP BY b.id, bt.name, b.production_date, b.volume
            ORDER BY b.id
            LIMIT $2 OFFSET $1
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_balances", e))?;

        rows.iter().map(row_to_balance).collect()
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    async fn create_batch(&self, batch: NewBatch) -> Result<Batch, StoreError> {
        // The foreign key rejects unknown beer types (23503 -> NotFound).
        let row = sqlx::query(
            r#"
            INSERT INTO batches (beer_type_id, production_date, volume)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(batch.beer_type_id.get())
        .bind(batch.production_date)
        .bind(batch.volume)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_batch", e))?;

        let id: i64 = decode("decode batches.id", row.try_get("id"))?;
        Ok(batch.with_id(BatchId::new(id)))
    }

    async fn record_sale(&self, sale: NewSale) -> Result<Sale, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO sales (batch_id, sale_date, quantity, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(sale.batch_id.get())
        .bind(sale.sale_date)
        .bind(sale.quantity)
        .bind(sale.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("record_sale", e))?;

        let id: i64 = decode("decode sales.id", row.try_get("id"))?;
        Ok(sale.with_id(SaleId::new(id)))
    }
}
