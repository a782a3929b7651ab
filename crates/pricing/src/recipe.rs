use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pizzeria_core::{IngredientId, RecipeId};

/// A standard pizza owned by the external recipe service.
///
/// Quantities are base portions for the smallest size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub description: String,
    pub ingredients: BTreeMap<IngredientId, u32>,
}

impl Recipe {
    pub fn new(id: RecipeId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            ingredients: BTreeMap::new(),
        }
    }

    pub fn with_ingredient(mut self, ingredient_id: IngredientId, base_portions: u32) -> Self {
        self.ingredients.insert(ingredient_id, base_portions);
        self
    }
}
