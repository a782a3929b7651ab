//! Ingredient persistence abstractions.

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use pizzeria_core::IngredientId;
use pizzeria_inventory::{Ingredient, NewIngredient};

pub use in_memory::InMemoryIngredientStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresIngredientStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("ingredient {0} not found")]
    NotFound(IngredientId),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Keyed ingredient store.
///
/// Each call is atomic on its own. Callers that read, modify, then save get
/// no protection against concurrent writers (last write wins).
pub trait IngredientStore: Send + Sync {
    fn get(&self, id: IngredientId) -> Result<Ingredient, StoreError>;

    /// Insert or replace the record keyed by `ingredient.id()`.
    fn save(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError>;

    /// Insert a new record under a store-assigned id.
    fn create(&self, attrs: NewIngredient) -> Result<Ingredient, StoreError>;

    fn delete(&self, id: IngredientId) -> Result<(), StoreError>;

    /// All records, ascending by id.
    fn list(&self) -> Result<Vec<Ingredient>, StoreError>;
}

impl<S> IngredientStore for Arc<S>
where
    S: IngredientStore + ?Sized,
{
    fn get(&self, id: IngredientId) -> Result<Ingredient, StoreError> {
        (**self).get(id)
    }

    fn save(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError> {
        (**self).save(ingredient)
    }

    fn create(&self, attrs: NewIngredient) -> Result<Ingredient, StoreError> {
        (**self).create(attrs)
    }

    fn delete(&self, id: IngredientId) -> Result<(), StoreError> {
        (**self).delete(id)
    }

    fn list(&self) -> Result<Vec<Ingredient>, StoreError> {
        (**self).list()
    }
}
