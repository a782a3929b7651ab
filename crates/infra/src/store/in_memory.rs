use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use pizzeria_core::{Entity, IngredientId};
use pizzeria_inventory::{Ingredient, NewIngredient};

use super::{IngredientStore, StoreError};

/// In-memory ingredient store for tests/dev.
///
/// Ids are assigned from a sequence starting at 1; saving a record with an
/// explicit id moves the sequence past it.
#[derive(Debug)]
pub struct InMemoryIngredientStore {
    inner: RwLock<BTreeMap<IngredientId, Ingredient>>,
    next_id: AtomicI64,
}

impl InMemoryIngredientStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Seed the store with existing records (ids kept as given).
    pub fn with_ingredients(ingredients: impl IntoIterator<Item = Ingredient>) -> Self {
        let map: BTreeMap<IngredientId, Ingredient> = ingredients
            .into_iter()
            .map(|ingredient| (ingredient.id(), ingredient))
            .collect();
        let next_id = map
            .keys()
            .next_back()
            .map_or(1, |last| last.get().saturating_add(1).max(1));
        Self {
            inner: RwLock::new(map),
            next_id: AtomicI64::new(next_id),
        }
    }

    fn bump_sequence(&self, id: IngredientId) {
        self.next_id.fetch_max(id.get().saturating_add(1), Ordering::SeqCst);
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("lock poisoned".to_string())
    }
}

impl Default for InMemoryIngredientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientStore for InMemoryIngredientStore {
    fn get(&self, id: IngredientId) -> Result<Ingredient, StoreError> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        map.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn save(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        self.bump_sequence(ingredient.id());
        map.insert(ingredient.id(), ingredient.clone());
        Ok(ingredient)
    }

    fn create(&self, attrs: NewIngredient) -> Result<Ingredient, StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        let id = IngredientId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let ingredient = Ingredient::from_parts(id, attrs);
        map.insert(id, ingredient.clone());
        Ok(ingredient)
    }

    fn delete(&self, id: IngredientId) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| Self::poisoned())?;
        map.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }

    fn list(&self) -> Result<Vec<Ingredient>, StoreError> {
        let map = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(map.values().cloned().collect())
    }
}
