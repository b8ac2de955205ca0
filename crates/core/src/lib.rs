//! Shared building blocks for the brewery domain crates.
//!
//! Pure types only: identifiers, pagination and the error vocabulary that the
//! domain, auth and infrastructure layers agree on.

pub mod error;
pub mod id;
pub mod page;

pub use error::{DomainError, DomainResult, StoreError};
pub use id::{BatchId, BeerTypeId, BreweryId, IdentityId, IngredientId, SaleId};
pub use page::Page;
