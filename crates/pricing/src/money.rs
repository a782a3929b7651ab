use rust_decimal::{Decimal, RoundingStrategy};

/// Fractional digits carried by every returned price.
const PRICE_SCALE: u32 = 2;

/// Round a price to two fractional digits (half away from zero), always
/// keeping exactly two digits (`33` becomes `33.00`).
pub fn round_price(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}
