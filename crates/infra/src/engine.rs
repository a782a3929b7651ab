//! Pricing & inventory engine.
//!
//! Orchestrates the recipe lookup and the ingredient store around the pure
//! consumption plan. The engine holds no state; every mutation is persisted
//! ingredient by ingredient as it happens.
//!
//! ## Consistency
//!
//! Nothing here is transactional. If the store fails half-way through an
//! order, the ingredients already saved stay saved and the error is returned
//! to the caller; there is no compensation and no retry.

use rust_decimal::Decimal;
use thiserror::Error;

use pizzeria_core::{DomainError, Entity, IngredientId};
use pizzeria_inventory::Ingredient;
use pizzeria_pricing::{ConsumptionPlan, Deal, Order, Recipe, round_price};

use crate::recipes::{RecipeLookup, RecipeLookupError};
use crate::store::{IngredientStore, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Recipe(#[from] RecipeLookupError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EngineError::Store(StoreError::NotFound(_))
                | EngineError::Recipe(RecipeLookupError::NotFound(_))
        )
    }
}

pub struct PricingEngine<S, R> {
    store: S,
    recipes: R,
}

impl<S, R> PricingEngine<S, R>
where
    S: IngredientStore,
    R: RecipeLookup,
{
    pub fn new(store: S, recipes: R) -> Self {
        Self { store, recipes }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the order's recipe (if any) and build its consumption plan.
    pub fn plan(&self, order: &Order) -> Result<ConsumptionPlan, EngineError> {
        let recipe: Option<Recipe> = match order.recipe_id {
            Some(recipe_id) => Some(self.recipes.fetch_recipe(recipe_id)?),
            None => None,
        };
        Ok(ConsumptionPlan::for_order(order, recipe.as_ref()))
    }

    /// Price an order and withdraw its ingredients from stock.
    ///
    /// Returns the total rounded to two fractional digits.
    #[tracing::instrument(skip_all, fields(recipe_id = ?order.recipe_id, size = %order.size.code()))]
    pub fn calculate_order_price(&self, order: &Order) -> Result<Decimal, EngineError> {
        let plan = self.plan(order)?;
        let mut total = Decimal::ZERO;

        for line in plan.lines() {
            let mut ingredient = self.store.get(line.ingredient_id)?;
            let unit_price = ingredient.discounted_unit_price()?;
            let line_total = unit_price
                .checked_mul(Decimal::from(line.portions))
                .ok_or_else(|| {
                    DomainError::overflow(format!("price of ingredient {}", line.ingredient_id))
                })?;
            total = total
                .checked_add(line_total)
                .ok_or_else(|| DomainError::overflow("order total"))?;

            ingredient.withdraw(line.portions)?;
            tracing::debug!(
                ingredient_id = %line.ingredient_id,
                portions = line.portions,
                source = ?line.source,
                %unit_price,
                remaining = ingredient.portion_quantity(),
                "ingredient consumed"
            );
            self.store.save(ingredient)?;
        }

        let total = round_price(total);
        tracing::info!(%total, lines = plan.lines().len(), "order priced");
        Ok(total)
    }

    /// Put back into stock everything `calculate_order_price` withdrew for
    /// the same order.
    #[tracing::instrument(skip_all, fields(recipe_id = ?order.recipe_id, size = %order.size.code()))]
    pub fn reverse_order_ingredients(&self, order: &Order) -> Result<(), EngineError> {
        let plan = self.plan(order)?;

        for line in plan.lines() {
            let mut ingredient = self.store.get(line.ingredient_id)?;
            ingredient.restock(line.portions)?;
            tracing::debug!(
                ingredient_id = %line.ingredient_id,
                portions = line.portions,
                source = ?line.source,
                remaining = ingredient.portion_quantity(),
                "ingredient restocked"
            );
            self.store.save(ingredient)?;
        }

        tracing::info!(lines = plan.lines().len(), "order reversed");
        Ok(())
    }

    /// Stack the deal's percentages onto each listed ingredient.
    #[tracing::instrument(skip_all, fields(deal_id = %deal.id))]
    pub fn add_ingredient_discount(&self, deal: &Deal) -> Result<(), EngineError> {
        for (&ingredient_id, &percentage) in &deal.discounts {
            let mut ingredient = self.store.get(ingredient_id)?;
            ingredient.add_discount(percentage)?;
            warn_if_out_of_range(&ingredient);
            self.store.save(ingredient)?;
        }
        Ok(())
    }

    /// Withdraw the deal's percentages from each listed ingredient.
    ///
    /// Ingredients whose discount is unset or not positive are left alone.
    #[tracing::instrument(skip_all, fields(deal_id = %deal.id))]
    pub fn delete_ingredient_discount(&self, deal: &Deal) -> Result<(), EngineError> {
        for (&ingredient_id, &percentage) in &deal.discounts {
            let mut ingredient = self.store.get(ingredient_id)?;
            if ingredient.remove_discount(percentage)? {
                warn_if_out_of_range(&ingredient);
                self.store.save(ingredient)?;
            } else {
                tracing::debug!(%ingredient_id, "no positive discount to remove");
            }
        }
        Ok(())
    }
}

fn warn_if_out_of_range(ingredient: &Ingredient) {
    if !ingredient.discount_in_range() {
        let id: IngredientId = ingredient.id();
        tracing::warn!(
            ingredient_id = %id,
            discount = ?ingredient.percentage_discount(),
            "ingredient discount outside 0..=100"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::recipes::InMemoryRecipeBook;
    use crate::store::InMemoryIngredientStore;
    use pizzeria_core::{DealId, RecipeId};
    use pizzeria_inventory::NewIngredient;
    use pizzeria_pricing::{Customization, PizzaSize};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    type TestEngine = PricingEngine<Arc<InMemoryIngredientStore>, Arc<InMemoryRecipeBook>>;

    fn id(v: i64) -> IngredientId {
        IngredientId::new(v)
    }

    fn ingredient(v: i64, description: &str, price: Decimal) -> Ingredient {
        Ingredient::from_parts(
            id(v),
            NewIngredient {
                description: description.to_string(),
                category: "T".to_string(),
                portion_quantity: 500,
                portion_price: price,
                percentage_discount: None,
            },
        )
    }

    fn pepperoni_recipe() -> Recipe {
        Recipe::new(RecipeId::new(1), "Pepperoni")
            .with_ingredient(id(1), 3)
            .with_ingredient(id(2), 5)
    }

    fn test_engine() -> TestEngine {
        let store = Arc::new(InMemoryIngredientStore::with_ingredients([
            ingredient(1, "Pepperoni", dec!(3.00)),
            ingredient(2, "Provolone", dec!(1.50)),
            ingredient(3, "Mushroom", dec!(1.00)),
        ]));
        let recipes = Arc::new(InMemoryRecipeBook::with_recipes([pepperoni_recipe()]));
        PricingEngine::new(store, recipes)
    }

    fn stock(engine: &TestEngine, v: i64) -> i64 {
        engine.store().get(id(v)).unwrap().portion_quantity()
    }

    #[test]
    fn recipe_only_order() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Medium).with_recipe(RecipeId::new(1));

        let total = engine.calculate_order_price(&order).unwrap();
        assert_eq!(total, dec!(33.00));
        assert_eq!(stock(&engine, 1), 500 - 6);
        assert_eq!(stock(&engine, 2), 500 - 10);
        assert_eq!(stock(&engine, 3), 500);
    }

    #[test]
    fn customization_only_order() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Medium)
            .customize(id(1), Customization::add(6).with_note("Pepperoni tastes good."))
            .customize(id(2), Customization::add(2).with_note("Just a little bit of cheese."));

        let total = engine.calculate_order_price(&order).unwrap();
        assert_eq!(total, dec!(42.00));
        assert_eq!(stock(&engine, 1), 500 - 12);
        assert_eq!(stock(&engine, 2), 500 - 4);
    }

    #[test]
    fn recipe_with_addition_and_partial_removal() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Medium)
            .with_recipe(RecipeId::new(1))
            .customize(id(3), Customization::add(6))
            .customize(id(2), Customization::remove(2));

        let total = engine.calculate_order_price(&order).unwrap();
        assert_eq!(total, dec!(39.00));
        assert_eq!(stock(&engine, 1), 500 - 6);
        assert_eq!(stock(&engine, 2), 500 - 6);
        assert_eq!(stock(&engine, 3), 500 - 12);
    }

    #[test]
    fn full_removal_skips_price_and_stock() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Medium)
            .with_recipe(RecipeId::new(1))
            .customize(id(2), Customization::remove(5));

        let total = engine.calculate_order_price(&order).unwrap();
        assert_eq!(total, dec!(18.00));
        assert_eq!(stock(&engine, 2), 500);
    }

    #[test]
    fn full_removal_of_unknown_ingredient_never_touches_store() {
        let store = Arc::new(InMemoryIngredientStore::with_ingredients([ingredient(
            1,
            "Pepperoni",
            dec!(3.00),
        )]));
        // Ingredient 2 is in the recipe but not in the store; fully removing it
        // means it is never fetched.
        let recipes = Arc::new(InMemoryRecipeBook::with_recipes([pepperoni_recipe()]));
        let engine = PricingEngine::new(store, recipes);
        let order = Order::new(PizzaSize::Small)
            .with_recipe(RecipeId::new(1))
            .customize(id(2), Customization::remove(5));

        assert_eq!(engine.calculate_order_price(&order).unwrap(), dec!(9.00));
    }

    #[test]
    fn discounts_apply_to_unit_price() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(1), "Pepperoni week").with_discount(id(1), dec!(10));
        engine.add_ingredient_discount(&deal).unwrap();

        let order = Order::new(PizzaSize::Small).customize(id(1), Customization::add(1));
        assert_eq!(engine.calculate_order_price(&order).unwrap(), dec!(2.70));
    }

    #[test]
    fn totals_always_carry_two_digits() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(1), "Odd").with_discount(id(2), dec!(33.3));
        engine.add_ingredient_discount(&deal).unwrap();

        let order = Order::new(PizzaSize::Small).customize(id(2), Customization::add(1));
        let total = engine.calculate_order_price(&order).unwrap();
        assert_eq!(total.scale(), 2);
        assert_eq!(total.to_string(), "1.00");

        let empty = engine.calculate_order_price(&Order::new(PizzaSize::Big)).unwrap();
        assert_eq!(empty.to_string(), "0.00");
    }

    #[test]
    fn reversal_restores_stock() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Big)
            .with_recipe(RecipeId::new(1))
            .customize(id(1), Customization::add(2))
            .customize(id(2), Customization::remove(1))
            .customize(id(3), Customization::add(4));

        engine.calculate_order_price(&order).unwrap();
        assert_ne!(stock(&engine, 1), 500);

        engine.reverse_order_ingredients(&order).unwrap();
        for v in 1..=3 {
            assert_eq!(stock(&engine, v), 500);
        }
    }

    #[test]
    fn unknown_recipe_fails_before_any_mutation() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Small)
            .with_recipe(RecipeId::new(9))
            .customize(id(3), Customization::add(1));

        let err = engine.calculate_order_price(&order).unwrap_err();
        assert_eq!(err, EngineError::Recipe(RecipeLookupError::NotFound(RecipeId::new(9))));
        assert!(err.is_not_found());
        assert_eq!(stock(&engine, 3), 500);
    }

    #[test]
    fn missing_ingredient_mid_order_keeps_earlier_mutations() {
        let engine = test_engine();
        let order = Order::new(PizzaSize::Small)
            .customize(id(1), Customization::add(2))
            .customize(id(42), Customization::add(1));

        let err = engine.calculate_order_price(&order).unwrap_err();
        assert_eq!(err, EngineError::Store(StoreError::NotFound(id(42))));
        assert_eq!(stock(&engine, 1), 498);
    }

    #[test]
    fn deal_discounts_accumulate_and_unwind() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(7), "Ten off").with_discount(id(1), dec!(10));
        let discount = |e: &TestEngine| e.store().get(id(1)).unwrap().percentage_discount();

        engine.add_ingredient_discount(&deal).unwrap();
        engine.add_ingredient_discount(&deal).unwrap();
        assert_eq!(discount(&engine), Some(dec!(20)));

        engine.delete_ingredient_discount(&deal).unwrap();
        assert_eq!(discount(&engine), Some(dec!(10)));

        engine.delete_ingredient_discount(&deal).unwrap();
        assert_eq!(discount(&engine), Some(dec!(0)));

        // Guarded: nothing left to remove.
        engine.delete_ingredient_discount(&deal).unwrap();
        assert_eq!(discount(&engine), Some(dec!(0)));
    }

    #[test]
    fn deleting_deal_on_undiscounted_ingredient_is_noop() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(1), "Nothing").with_discount(id(3), dec!(5));
        engine.delete_ingredient_discount(&deal).unwrap();
        assert_eq!(engine.store().get(id(3)).unwrap().percentage_discount(), None);
    }

    #[test]
    fn discounts_are_not_clamped() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(1), "Too much").with_discount(id(2), dec!(60));
        engine.add_ingredient_discount(&deal).unwrap();
        engine.add_ingredient_discount(&deal).unwrap();
        assert_eq!(
            engine.store().get(id(2)).unwrap().percentage_discount(),
            Some(dec!(120))
        );
    }

    fn engine_with(ingredients: impl IntoIterator<Item = Ingredient>) -> TestEngine {
        PricingEngine::new(
            Arc::new(InMemoryIngredientStore::with_ingredients(ingredients)),
            Arc::new(InMemoryRecipeBook::new()),
        )
    }

    fn with_stock(v: i64, price: Decimal, portion_quantity: i64) -> Ingredient {
        Ingredient::from_parts(
            id(v),
            NewIngredient {
                description: format!("ingredient-{v}"),
                category: "T".to_string(),
                portion_quantity,
                portion_price: price,
                percentage_discount: None,
            },
        )
    }

    fn is_overflow(err: &EngineError) -> bool {
        matches!(err, EngineError::Domain(DomainError::Overflow(_)))
    }

    #[test]
    fn line_price_overflow_is_an_error() {
        let engine = engine_with([with_stock(1, Decimal::MAX, 500)]);
        let order = Order::new(PizzaSize::Small).customize(id(1), Customization::add(2));

        let err = engine.calculate_order_price(&order).unwrap_err();
        assert!(is_overflow(&err), "{err:?}");
        assert_eq!(stock(&engine, 1), 500);
    }

    #[test]
    fn order_total_overflow_is_an_error() {
        let engine = engine_with([
            with_stock(1, Decimal::MAX, 500),
            with_stock(2, Decimal::MAX, 500),
        ]);
        let order = Order::new(PizzaSize::Small)
            .customize(id(1), Customization::add(1))
            .customize(id(2), Customization::add(1));

        let err = engine.calculate_order_price(&order).unwrap_err();
        assert!(is_overflow(&err), "{err:?}");
        // Not transactional: the first line was already withdrawn.
        assert_eq!(stock(&engine, 1), 499);
        assert_eq!(stock(&engine, 2), 500);
    }

    #[test]
    fn stock_overflow_is_an_error() {
        let engine = engine_with([
            with_stock(1, dec!(1.00), i64::MIN),
            with_stock(2, dec!(1.00), i64::MAX),
        ]);

        let withdraw = Order::new(PizzaSize::Small).customize(id(1), Customization::add(1));
        let err = engine.calculate_order_price(&withdraw).unwrap_err();
        assert!(is_overflow(&err), "{err:?}");
        assert_eq!(stock(&engine, 1), i64::MIN);

        let restock = Order::new(PizzaSize::Small).customize(id(2), Customization::add(1));
        let err = engine.reverse_order_ingredients(&restock).unwrap_err();
        assert!(is_overflow(&err), "{err:?}");
        assert_eq!(stock(&engine, 2), i64::MAX);
    }

    /// Log sink shared between the test and a scoped subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with warnings captured; returns what was logged.
    fn warnings_during(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn discount_above_one_hundred_is_logged() {
        let engine = test_engine();
        let deal = Deal::new(DealId::new(1), "Too much").with_discount(id(2), dec!(60));

        let first = warnings_during(|| engine.add_ingredient_discount(&deal).unwrap());
        assert!(first.is_empty(), "unexpected warning: {first}");

        let second = warnings_during(|| engine.add_ingredient_discount(&deal).unwrap());
        assert!(second.contains("ingredient discount outside 0..=100"), "{second}");
        assert!(second.contains("ingredient_id=2"), "{second}");
        assert!(!engine.store().get(id(2)).unwrap().discount_in_range());
    }

    #[test]
    fn discount_below_zero_is_logged() {
        let engine = test_engine();
        engine
            .add_ingredient_discount(&Deal::new(DealId::new(1), "Five").with_discount(id(1), dec!(5)))
            .unwrap();
        let revoke = Deal::new(DealId::new(2), "Ten").with_discount(id(1), dec!(10));

        let logged = warnings_during(|| engine.delete_ingredient_discount(&revoke).unwrap());
        assert!(logged.contains("ingredient discount outside 0..=100"), "{logged}");

        let ingredient = engine.store().get(id(1)).unwrap();
        assert_eq!(ingredient.percentage_discount(), Some(dec!(-5)));
        assert!(!ingredient.discount_in_range());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: pricing followed by reversal of the same order leaves stock unchanged.
        #[test]
        fn reversal_is_inverse_of_pricing(
            size_idx in 0usize..3,
            with_recipe in any::<bool>(),
            custom in prop::collection::btree_map(1i64..=3, (any::<bool>(), 0u32..12), 0..3),
        ) {
            let engine = test_engine();
            let mut order = Order::new(PizzaSize::ALL[size_idx]);
            if with_recipe {
                order = order.with_recipe(RecipeId::new(1));
            }
            for (ingredient_id, (is_add, qty)) in custom {
                let c = if is_add { Customization::add(qty) } else { Customization::remove(qty) };
                order = order.customize(id(ingredient_id), c);
            }

            let before: Vec<i64> = (1..=3).map(|v| stock(&engine, v)).collect();
            let total = engine.calculate_order_price(&order).unwrap();
            prop_assert!(total >= Decimal::ZERO);
            engine.reverse_order_ingredients(&order).unwrap();
            let after: Vec<i64> = (1..=3).map(|v| stock(&engine, v)).collect();

            prop_assert_eq!(before, after);
        }
    }
}
