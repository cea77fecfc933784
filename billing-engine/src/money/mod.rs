//! Money calculation utilities using rust_decimal for precision
//!
//! All calculations are done using `Decimal` internally, then converted to
//! `f64` (rounded to 2 decimal places, half away from zero) for the wire
//! and the view-models.
//!
//! Inputs are coerced the way form fields behave: anything non-finite is
//! `0`, and amounts, quantities and discount values are never negative.
//! Inputs are capped at [`MAX_AMOUNT`] and sums saturate, so the
//! calculators never overflow `Decimal`.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Upper bound for a quantity, price or discount value
pub const MAX_AMOUNT: f64 = 1_000_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// NaN/inf → 0; finite values beyond `Decimal`'s range saturate.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    match Decimal::from_f64(value) {
        Some(decimal) => decimal,
        None if !value.is_finite() => Decimal::ZERO,
        None if value > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    }
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero
#[inline]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamp at zero
#[inline]
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Clean a form input in place: non-finite or negative → 0, capped at
/// [`MAX_AMOUNT`]
#[inline]
pub fn clean(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value.min(MAX_AMOUNT)
    } else {
        0.0
    }
}

/// Coerce a form input to a calculation value (see [`clean`])
#[inline]
pub fn coerce(value: f64) -> Decimal {
    non_negative(to_decimal(clean(value)))
}

/// `value` percent of `base`
#[inline]
pub fn percent_of(base: Decimal, value: Decimal) -> Decimal {
    match base.checked_mul(value) {
        Some(product) => product / Decimal::ONE_HUNDRED,
        None => base.saturating_mul(value / Decimal::ONE_HUNDRED),
    }
}

/// Whether two amounts are equal within one cent
pub fn approx_eq(a: f64, b: f64) -> bool {
    to_decimal(a).saturating_sub(to_decimal(b)).abs() < MONEY_TOLERANCE
}

/// Format an amount for display with the configured currency sign,
/// e.g. `format_money(1250.0, "Rs")` → `"Rs 1,250.00"`
pub fn format_money(amount: f64, currency_sign: &str) -> String {
    let rounded = round2(to_decimal(amount));
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut magnitude = rounded.abs();
    magnitude.rescale(DECIMAL_PLACES);
    let text = magnitude.to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if currency_sign.is_empty() {
        format!("{sign}{grouped}.{frac_part}")
    } else {
        format!("{sign}{currency_sign} {grouped}.{frac_part}")
    }
}
