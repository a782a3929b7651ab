//! Consumption plan: which ingredients an order uses, and how many portions.
//!
//! Pricing and reversal both walk the same plan, so reversal restores exactly
//! what pricing withdrew.

use pizzeria_core::IngredientId;

use crate::order::{CustomizationKind, Order};
use crate::recipe::Recipe;

/// Where a plan line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumptionSource {
    /// Recipe ingredient at its full scaled quantity.
    Recipe,
    /// Recipe ingredient reduced by a partial REMOVE customization.
    PartialRemoval,
    /// ADD customization.
    Addition,
}

/// One ingredient consumption (already scaled by size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumption {
    pub ingredient_id: IngredientId,
    pub portions: i64,
    pub source: ConsumptionSource,
}

/// Ordered list of consumptions for one order.
///
/// Recipe lines come first (ascending ingredient id), then ADD lines
/// (ascending ingredient id). An ingredient may appear twice when it is both
/// in the recipe and added on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumptionPlan {
    lines: Vec<Consumption>,
}

impl ConsumptionPlan {
    /// Build the plan for `order`.
    ///
    /// `recipe` is the resolved recipe for `order.recipe_id` (ignored when the
    /// order has no recipe id). A REMOVE customization at or above the recipe
    /// quantity drops the ingredient; a REMOVE for an ingredient that is not in
    /// the recipe has no effect.
    pub fn for_order(order: &Order, recipe: Option<&Recipe>) -> Self {
        let mut lines = Vec::new();
        let size = order.size;

        if let (Some(_), Some(recipe)) = (order.recipe_id, recipe) {
            for (&ingredient_id, &base) in &recipe.ingredients {
                let required = size.scale(base);

                match order.customization(ingredient_id) {
                    Some(c) if c.is_removal() => {
                        let removed = size.scale(c.portion_quantity);
                        if removed < required {
                            lines.push(Consumption {
                                ingredient_id,
                                portions: required - removed,
                                source: ConsumptionSource::PartialRemoval,
                            });
                        }
                    }
                    _ => lines.push(Consumption {
                        ingredient_id,
                        portions: required,
                        source: ConsumptionSource::Recipe,
                    }),
                }
            }
        }

        for (&ingredient_id, c) in &order.customizations {
            if c.kind == CustomizationKind::Add {
                lines.push(Consumption {
                    ingredient_id,
                    portions: size.scale(c.portion_quantity),
                    source: ConsumptionSource::Addition,
                });
            }
        }

        Self { lines }
    }

    pub fn lines(&self) -> &[Consumption] {
        &self.lines
    }

}
