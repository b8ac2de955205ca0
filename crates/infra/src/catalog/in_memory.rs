use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use brewops_catalog::{BeerType, Brewery, Ingredient, NewBeerType, NewBrewery, NewIngredient};
use brewops_core::{BeerTypeId, BreweryId, IngredientId, Page, StoreError};

use super::CatalogStore;

#[derive(Debug, Default)]
struct Inner {
    breweries: BTreeMap<BreweryId, Brewery>,
    beer_types: BTreeMap<BeerTypeId, BeerType>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    last_brewery_id: i64,
    last_beer_type_id: i64,
    last_ingredient_id: i64,
}

/// In-memory catalog store.
///
/// Intended for tests/dev. `BTreeMap` keeps listings in id order.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
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
impl CatalogStore for InMemoryCatalogStore {
    async fn list_breweries(&self, page: Page) -> Result<Vec<Brewery>, StoreError> {
        Ok(page.apply(self.read()?.breweries.values()).cloned().collect())
    }

    async fn create_brewery(&self, brewery: NewBrewery) -> Result<Brewery, StoreError> {
        let mut inner = self.write()?;
        inner.last_brewery_id += 1;
        let stored = brewery.with_id(BreweryId::new(inner.last_brewery_id));
        inner.breweries.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_brewery(&self, id: BreweryId) -> Result<(), StoreError> {
        match self.write()?.breweries.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::not_found(format!("brewery {id}"))),
        }
    }

    async fn list_beer_types(&self, page: Page) -> Result<Vec<BeerType>, StoreError> {
        Ok(page.apply(self.read()?.beer_types.values()).cloned().collect())
    }

    async fn create_beer_type(&self, beer_type: NewBeerType) -> Result<BeerType, StoreError> {
        let mut inner = self.write()?;
        inner.last_beer_type_id += 1;
        let stored = beer_type.with_id(BeerTypeId::new(inner.last_beer_type_id));
        inner.beer_types.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_beer_type(&self, id: BeerTypeId) -> Result<Option<BeerType>, StoreError> {
        Ok(self.read()?.beer_types.get(&id).cloned())
    }

    async fn list_ingredients(&self, page: Page) -> Result<Vec<Ingredient>, StoreError> {
        Ok(page.apply(self.read()?.ingredients.values()).cloned().collect())
    }

    async fn create_ingredient(
        &self,
        ingredient: NewIngredient,
    ) -> Result<Ingredient, StoreError> {
        let mut inner = self.write()?;
        inner.last_ingredient_id += 1;
        let stored = ingredient.with_id(IngredientId::new(inner.last_ingredient_id));
        inner.ingredients.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
