use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainResult, IngredientId, RecipeId};
use pizzeria_pricing::{Customization, CustomizationKind, Order, PizzaSize};

/// Wire shape of an order; `into_order` validates the size and kind codes.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
    pub size: String,
    #[serde(default)]
    pub crust: Option<String>,
    #[serde(default)]
    pub customizations: BTreeMap<IngredientId, CustomizationRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomizationRequest {
    pub kind: String,
    pub portion_quantity: u32,
    #[serde(default)]
    pub note: Option<String>,
}

impl OrderRequest {
    pub fn into_order(self) -> DomainResult<Order> {
        let mut order = Order::new(PizzaSize::from_code(&self.size)?);
        order.recipe_id = self.recipe_id;
        order.crust = self.crust;

        for (ingredient_id, custom) in self.customizations {
            order = order.customize(ingredient_id, custom.into_customization()?);
        }
        Ok(order)
    }
}

impl CustomizationRequest {
    fn into_customization(self) -> DomainResult<Customization> {
        Ok(Customization {
            kind: CustomizationKind::from_code(&self.kind)?,
            portion_quantity: self.portion_quantity,
            note: self.note,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceResponse {
    pub total: Decimal,
}
