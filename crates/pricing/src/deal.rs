use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_core::{DealId, IngredientId};

/// A promotion: percentage discounts to stack on a set of ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub id: DealId,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub discounts: BTreeMap<IngredientId, Decimal>,
}

impl Deal {
    pub fn new(id: DealId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            discounts: BTreeMap::new(),
        }
    }

    pub fn with_discount(mut self, ingredient_id: IngredientId, percentage: Decimal) -> Self {
        self.discounts.insert(ingredient_id, percentage);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn deserializes_with_missing_discounts() {
        let deal: Deal = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(deal.id, DealId::new(4));
        assert!(deal.discounts.is_empty());
    }

    #[test]
    fn discounts_accept_string_decimals() {
        let deal: Deal =
            serde_json::from_str(r#"{"id": 1, "description": "Tuesday", "discounts": {"2": "12.5"}}"#)
                .unwrap();
        assert_eq!(deal.discounts.get(&IngredientId::new(2)), Some(&dec!(12.5)));
    }
}
