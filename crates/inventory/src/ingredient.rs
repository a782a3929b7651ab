use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pizzeria_core::{DomainError, DomainResult, Entity, IngredientId};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Ingredient attributes as supplied by callers (no identity yet).
///
/// Used for creation and for full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub description: String,
    pub category: String,
    /// Portions on hand.
    pub portion_quantity: i64,
    /// Price of a single portion.
    pub portion_price: Decimal,
    /// Percentage discount (0-100 in normal operation). `None` means no discount.
    #[serde(default)]
    pub percentage_discount: Option<Decimal>,
}

impl NewIngredient {
    /// Reject attributes no ingredient record should start with.
    ///
    /// The discount range is not checked; out-of-range discounts only warn.
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        if self.portion_price < Decimal::ZERO {
            return Err(DomainError::validation("portion_price cannot be negative"));
        }
        Ok(())
    }
}

/// Entity: Ingredient (inventory record).
///
/// Quantities are counted in portions. Stock is allowed to go negative:
/// orders are never rejected for lack of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    id: IngredientId,
    description: String,
    category: String,
    portion_quantity: i64,
    portion_price: Decimal,
    #[serde(default)]
    percentage_discount: Option<Decimal>,
}

impl Ingredient {
    pub fn from_parts(id: IngredientId, attrs: NewIngredient) -> Self {
        Self {
            id,
            description: attrs.description,
            category: attrs.category,
            portion_quantity: attrs.portion_quantity,
            portion_price: attrs.portion_price,
            percentage_discount: attrs.percentage_discount,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn portion_quantity(&self) -> i64 {
        self.portion_quantity
    }

    pub fn portion_price(&self) -> Decimal {
        self.portion_price
    }

    pub fn percentage_discount(&self) -> Option<Decimal> {
        self.percentage_discount
    }

    /// Unit price after applying the current discount.
    ///
    /// A missing or non-positive discount leaves the price untouched.
    pub fn discounted_unit_price(&self) -> DomainResult<Decimal> {
        match self.percentage_discount {
            Some(discount) if discount > Decimal::ZERO => ONE_HUNDRED
                .checked_sub(discount)
                .and_then(|share| self.portion_price.checked_mul(share))
                .and_then(|scaled| scaled.checked_div(ONE_HUNDRED))
                .ok_or_else(|| self.overflow("discounted price")),
            _ => Ok(self.portion_price),
        }
    }

    /// Take `portions` out of stock.
    pub fn withdraw(&mut self, portions: i64) -> DomainResult<()> {
        self.portion_quantity = self
            .portion_quantity
            .checked_sub(portions)
            .ok_or_else(|| self.overflow("stock"))?;
        Ok(())
    }

    /// Put `portions` back into stock.
    pub fn restock(&mut self, portions: i64) -> DomainResult<()> {
        self.portion_quantity = self
            .portion_quantity
            .checked_add(portions)
            .ok_or_else(|| self.overflow("stock"))?;
        Ok(())
    }

    /// Accumulate a deal's percentage on top of the current discount.
    ///
    /// No upper clamp: stacking deals past 100 inverts the discounted price.
    pub fn add_discount(&mut self, percentage: Decimal) -> DomainResult<()> {
        let current = self.percentage_discount.unwrap_or(Decimal::ZERO);
        let updated = current
            .checked_add(percentage)
            .ok_or_else(|| self.overflow("discount"))?;
        self.percentage_discount = Some(updated);
        Ok(())
    }

    /// Withdraw a deal's percentage from the current discount.
    ///
    /// Only applies while the stored discount is strictly positive; returns
    /// whether the record changed. No floor clamp at zero.
    pub fn remove_discount(&mut self, percentage: Decimal) -> DomainResult<bool> {
        match self.percentage_discount {
            Some(current) if current > Decimal::ZERO => {
                let updated = current
                    .checked_sub(percentage)
                    .ok_or_else(|| self.overflow("discount"))?;
                self.percentage_discount = Some(updated);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn overflow(&self, what: &str) -> DomainError {
        DomainError::overflow(format!("{what} of ingredient {}", self.id))
    }

    /// Whether the discount lies in `[0, 100]` (or is unset).
    pub fn discount_in_range(&self) -> bool {
        match self.percentage_discount {
            Some(d) => d >= Decimal::ZERO && d <= ONE_HUNDRED,
            None => true,
        }
    }
}

impl Entity for Ingredient {
    type Id = IngredientId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
