//! Fixed-point money helpers
//!
//! All monetary and quantity arithmetic in this system is done on
//! `rust_decimal::Decimal` so that chains like quantity x scrap multiplier x
//! unit cost never accumulate binary-float rounding error. Conversion to a
//! plain `f64` happens once, at the presentation boundary, with a single
//! documented rounding rule: round half away from zero at 2 decimal places.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for money at the presentation boundary.
pub const MONEY_SCALE: u32 = 2;

/// Round a monetary value for display. Never call this mid-calculation;
/// intermediate values keep full precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a monetary value to a plain number for transport to the boundary.
pub fn to_amount(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Percentage for display: full precision in, 2 decimal places out.
pub fn to_percentage(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
