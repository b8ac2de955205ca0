use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use brewops_catalog::{BeerType, Brewery, Ingredient, NewBeerType, NewBrewery, NewIngredient};
use brewops_core::{BeerTypeId, BreweryId, IngredientId, Page, StoreError};

use super::CatalogStore;
use crate::db::{map_sqlx_error, offset_limit};

/// Postgres-backed catalog store.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| map_sqlx_error(&format!("decode {column}"), e))
}

fn row_to_brewery(row: &PgRow) -> Result<Brewery, StoreError> {
    Ok(Brewery {
        id: BreweryId::new(get(row, "id")?),
        name: get(row, "name")?,
        location: get(row, "location")?,
        establishment_date: get(row, "establishment_date")?,
    })
}

fn row_to_beer_type(row: &PgRow) -> Result<BeerType, StoreError> {
    Ok(BeerType {
        id: BeerTypeId::new(get(row, "id")?),
        name: get(row, "name")?,
        style: get(row, "type")?,
        alcohol_content: get(row, "alcohol_content")?,
        description: get(row, "description")?,
    })
}

fn row_to_ingredient(row: &PgRow) -> Result<Ingredient, StoreError> {
    Ok(Ingredient {
        id: IngredientId::new(get(row, "id")?),
        name: get(row, "name")?,
        kind: get(row, "type")?,
    })
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn list_breweries(&self, page: Page) -> Result<Vec<Brewery>, StoreError> {
        let (offset, limit) = offset_limit(page);
        let rows = sqlx::query(
            r#"
            SELECT id, name, location, establishment_date
            FROM breweries
            ORDER BY id
            LIMIT $2 OFFSET $1
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_breweries", e))?;

        rows.iter().map(row_to_brewery).collect()
    }

    async fn create_brewery(&self, brewery: NewBrewery) -> Result<Brewery, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO breweries (name, location, establishment_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, location, establishment_date
            "#,
        )
        .bind(&brewery.name)
        .bind(&brewery.location)
        .bind(brewery.establishment_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_brewery", e))?;

        row_to_brewery(&row)
    }

    async fn delete_brewery(&self, id: BreweryId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM breweries WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_brewery", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("brewery {id}")));
        }
        Ok(())
    }

    async fn list_beer_types(&self, page: Page) -> Result<Vec<BeerType>, StoreError> {
        let (offset, limit) = offset_limit(page);
        let rows = sqlx::query(
            r#"
            SELECT id, name, type, alcohol_content, description
            FROM beer_types
            ORDER BY id
            LIMIT $2 OFFSET $1
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_beer_types", e))?;

        rows.iter().map(row_to_beer_type).collect()
    }

    async fn create_beer_type(&self, beer_type: NewBeerType) -> Result<BeerType, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO beer_types (name, type, alcohol_content, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, type, alcohol_content, description
            "#,
        )
        .bind(&beer_type.name)
        .bind(&beer_type.style)
        .bind(beer_type.alcohol_content)
        .bind(&beer_type.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_beer_type", e))?;

        row_to_beer_type(&row)
    }

    async fn find_beer_type(&self, id: BeerTypeId) -> Result<Option<BeerType>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, type, alcohol_content, description FROM beer_types WHERE id = $1",
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_beer_type", e))?;

        row.as_ref().map(row_to_beer_type).transpose()
    }

    async fn list_ingredients(&self, page: Page) -> Result<Vec<Ingredient>, StoreError> {
        let (offset, limit) = offset_limit(page);
        let rows = sqlx::query(
            r#"
            SELECT id, name, type
            FROM ingredients
            ORDER BY id
            LIMIT $2 OFFSET $1
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_ingredients", e))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    async fn create_ingredient(
        &self,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO ingredients (name, type)
            VALUES ($1, $2)
            RETURNING id, name, type
            "#,
        )
        .bind(&ingredient.name)
        .bind(&ingredient.kind)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_ingredient", e))?;

        row_to_ingredient(&row)
    }
}
