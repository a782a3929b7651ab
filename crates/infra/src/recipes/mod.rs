//! Recipe lookup: read-only access to the external recipe service.

pub mod http;
pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use pizzeria_core::RecipeId;
use pizzeria_pricing::Recipe;

pub use http::HttpRecipeClient;
pub use in_memory::InMemoryRecipeBook;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeLookupError {
    #[error("recipe {0} not found")]
    NotFound(RecipeId),

    #[error("recipe service unreachable: {0}")]
    Transport(String),

    #[error("recipe service returned an unreadable recipe: {0}")]
    Decode(String),
}

/// Resolve a recipe id into its ingredient list.
///
/// A single blocking call; no retry or backoff.
pub trait RecipeLookup: Send + Sync {
    fn fetch_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeLookupError>;
}

impl<R> RecipeLookup for Arc<R>
where
    R: RecipeLookup + ?Sized,
{
    fn fetch_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeLookupError> {
        (**self).fetch_recipe(id)
    }
}
