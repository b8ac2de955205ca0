//! Catalog store: breweries, beer types, ingredients.

use std::sync::Arc;

use async_trait::async_trait;

use brewops_catalog::{BeerType, Brewery, Ingredient, NewBeerType, NewBrewery, NewIngredient};
use brewops_core::{BeerTypeId, BreweryId, Page, StoreError};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Catalog persistence. Listings are ordered by id and windowed by `Page`.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_breweries(&self, page: Page) -> Result<Vec<Brewery>, StoreError>;

    async fn create_brewery(&self, brewery: NewBrewery) -> Result<Brewery, StoreError>;

    /// Returns `StoreError::NotFound` when no brewery has this id.
    async fn delete_brewery(&self, id: BreweryId) -> Result<(), StoreError>;

    async fn list_beer_types(&self, page: Page) -> Result<Vec<BeerType>, StoreError>;

    async fn create_beer_type(&self, beer_type: NewBeerType) -> Result<BeerType, StoreError>;

    async fn find_beer_type(&self, id: BeerTypeId) -> Result<Option<BeerType>, StoreError>;

    async fn list_ingredients(&self, page: Page) -> Result<Vec<Ingredient>, StoreError>;

    async fn create_ingredient(&self, ingredient: NewIngredient)
    -> Result<Ingredient, StoreError>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn list_breweries(&self, page: Page) -> Result<Vec<Brewery>, StoreError> {
        (**self).list_breweries(page).await
    }

    async fn create_brewery(&self, brewery: NewBrewery) -> Result<Brewery, StoreError> {
        (**self).create_brewery(brewery).await
    }

    async fn delete_brewery(&self, id: BreweryId) -> Result<(), StoreError> {
        (**self).delete_brewery(id).await
    }

    async fn list_beer_types(&self, page: Page) -> Result<Vec<BeerType>, StoreError> {
        (**self).list_beer_types(page).await
    }

    async fn create_beer_type(&self, beer_type: NewBeerType) -> Result<BeerType, StoreError> {
        (**self).create_beer_type(beer_type).await
    }

    async fn find_beer_type(&self, id: BeerTypeId) -> Result<Option<BeerType>, StoreError> {
        (**self).find_beer_type(id).await
    }

    async fn list_ingredients(&self, page: Page) -> Result<Vec<Ingredient>, StoreError> {
        (**self).list_ingredients(page).await
    }

    async fn create_ingredient(
        &self,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, StoreError> {
        (**self).create_ingredient(ingredient).await
    }
}
