use std::collections::HashMap;
use std::sync::RwLock;

use pizzeria_core::RecipeId;
use pizzeria_pricing::Recipe;

use super::{RecipeLookup, RecipeLookupError};

/// Canned recipes for tests/dev (stands in for the recipe service).
#[derive(Debug, Default)]
pub struct InMemoryRecipeBook {
    recipes: RwLock<HashMap<RecipeId, Recipe>>,
}

impl InMemoryRecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let map = recipes.into_iter().map(|recipe| (recipe.id, recipe)).collect();
        Self {
            recipes: RwLock::new(map),
        }
    }

    /// Register or replace a recipe.
    pub fn insert(&self, recipe: Recipe) -> Result<(), RecipeLookupError> {
        let mut map = self.recipes.write().map_err(|_| poisoned())?;
        map.insert(recipe.id, recipe);
        Ok(())
    }
}

fn poisoned() -> RecipeLookupError {
    RecipeLookupError::Transport("lock poisoned".to_string())
}

impl RecipeLookup for InMemoryRecipeBook {
    fn fetch_recipe(&self, id: RecipeId) -> Result<Recipe, RecipeLookupError> {
        let map = self
            .recipes
            .read()
            .map_err(|_| poisoned())?;
        map.get(&id).cloned().ok_or(RecipeLookupError::NotFound(id))
    }
}
