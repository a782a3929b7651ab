use std::collections::BTreeMap;

use pizzeria_core::{DomainError, IngredientId, RecipeId};

use crate::size::PizzaSize;

/// Whether a customization adds an ingredient or removes it from the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizationKind {
    Add,
    Remove,
}

impl CustomizationKind {
    /// Parse a wire code (`A`, `R`, case-insensitive).
    pub fn from_code(code: &str) -> Result<Self, DomainError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(CustomizationKind::Add),
            "R" => Ok(CustomizationKind::Remove),
            _ => Err(DomainError::invalid_customization_kind(format!(
                "{code:?} (expected one of: A, R)"
            ))),
        }
    }
}

/// Per-ingredient override on an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customization {
    pub kind: CustomizationKind,
    /// Base portions (scaled by the order size when used).
    pub portion_quantity: u32,
    pub note: Option<String>,
}

impl Customization {
    pub fn add(portion_quantity: u32) -> Self {
        Self {
            kind: CustomizationKind::Add,
            portion_quantity,
            note: None,
        }
    }

    pub fn remove(portion_quantity: u32) -> Self {
        Self {
            kind: CustomizationKind::Remove,
            portion_quantity,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn is_removal(&self) -> bool {
        self.kind == CustomizationKind::Remove
    }
}

/// An order to price (transient; never persisted here).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub recipe_id: Option<RecipeId>,
    pub size: PizzaSize,
    /// Crust thickness code; carried through but not priced.
    pub crust: Option<String>,
    pub customizations: BTreeMap<IngredientId, Customization>,
}

impl Order {
    pub fn new(size: PizzaSize) -> Self {
        Self {
            recipe_id: None,
            size,
            crust: None,
            customizations: BTreeMap::new(),
        }
    }

    pub fn with_recipe(mut self, recipe_id: RecipeId) -> Self {
        self.recipe_id = Some(recipe_id);
        self
    }

    pub fn with_crust(mut self, crust: impl Into<String>) -> Self {
        self.crust = Some(crust.into());
        self
    }

    pub fn customize(mut self, ingredient_id: IngredientId, customization: Customization) -> Self {
        self.customizations.insert(ingredient_id, customization);
        self
    }

    pub fn customization(&self, ingredient_id: IngredientId) -> Option<&Customization> {
        self.customizations.get(&ingredient_id)
    }
}
