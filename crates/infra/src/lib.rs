//! Infrastructure layer: ingredient storage, the recipe service client, and
//! the pricing engine that orchestrates them.

pub mod engine;
pub mod recipes;
pub mod store;

pub use engine::{EngineError, PricingEngine};
pub use recipes::{HttpRecipeClient, InMemoryRecipeBook, RecipeLookup, RecipeLookupError};
pub use store::{InMemoryIngredientStore, IngredientStore, StoreError};
