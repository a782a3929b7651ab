//! Inventory domain module.
//!
//! Ingredient records and the rules that mutate them (stock movements and
//! deal discounts), implemented as deterministic domain logic (no IO, no
//! HTTP, no storage).

pub mod ingredient;

pub use ingredient::{Ingredient, NewIngredient};
