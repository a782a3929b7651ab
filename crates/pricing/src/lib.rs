//! Pricing domain module.
//!
//! Orders, recipes, deals, the size multiplier, and the consumption plan that
//! drives both pricing and inventory reversal. Pure domain logic: stores and
//! the recipe service live in `pizzeria-infra`.

pub mod deal;
pub mod money;
pub mod order;
pub mod plan;
pub mod recipe;
pub mod size;

pub use deal::Deal;
pub use money::round_price;
pub use order::{Customization, CustomizationKind, Order};
pub use plan::{Consumption, ConsumptionPlan, ConsumptionSource};
pub use recipe::Recipe;
pub use size::PizzaSize;
