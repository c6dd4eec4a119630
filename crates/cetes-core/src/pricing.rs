//! Discount pricing on the 360-day basis and the whole-title holding that a
//! given amount of capital buys.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CetesError;
use crate::types::{Days, Money, Rate};
use crate::validate;
use crate::CetesResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Money-market day-count basis used for discount instruments.
pub const DAY_COUNT_BASIS: Decimal = dec!(360);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Whole titles bought with the available capital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Number of titles purchased. Only whole titles can be bought.
    pub titles: u64,
    /// Capital actually spent: `titles * price`.
    pub invested: Money,
    /// Capital left over, always in `[0, price)`.
    pub remainder: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Price per title of a discount instrument:
/// `face_value * (1 - discount_rate / 360 * days)`.
///
/// A discount that consumes the whole face value is rejected rather than
/// returned as a zero or negative price.
pub fn compute_purchase_price(face_value: Money, discount_rate: Rate, days: Days) -> CetesResult<Money> {
    validate::positive(face_value, "face_value")?;
    validate::non_negative(discount_rate, "discount_rate")?;

    let fraction = discount_fraction(discount_rate, days)?;
    let price = validate::in_range(
        face_value.checked_mul(Decimal::ONE - fraction),
        "discount_rate",
    )?;
    if price <= Decimal::ZERO {
        return Err(CetesError::invalid(
            "discount_rate",
            format!(
                "a {discount_rate} discount over {days} days leaves a non-positive price ({price})"
            ),
        ));
    }
    Ok(price)
}

/// Discount rate implied by a quoted price:
/// `(1 - price / face_value) * 360 / days`.
pub fn implied_discount_rate(face_value: Money, price: Money, days: Days) -> CetesResult<Rate> {
    validate::positive(face_value, "face_value")?;
    validate::positive(price, "price")?;
    validate::positive_days(days, "days")?;

    let ratio = validate::in_range(price.checked_div(face_value), "price")?;
    let annual = validate::in_range((Decimal::ONE - ratio).checked_mul(DAY_COUNT_BASIS), "price")?;
    Ok(annual / Decimal::from(days))
}

/// Buy as many whole titles as `total_amount` allows at `price`.
///
/// Capital below one title is not an error: it yields zero titles and the
/// whole amount as remainder.
pub fn compute_holding(total_amount: Money, price: Money) -> CetesResult<Holding> {
    validate::positive(price, "price")?;
    validate::non_negative(total_amount, "total_amount")?;

    let mut titles = validate::in_range(total_amount.checked_div(price), "total_amount")?.floor();
    let cost = |titles: Decimal| validate::in_range(titles.checked_mul(price), "total_amount");

    // The quotient is rounded at 28 digits, so an exact multiple can land a
    // hair under the integer. Nudge the count until the remainder is in range.
    while total_amount - cost(titles)? >= price {
        titles += Decimal::ONE;
    }
    while titles > Decimal::ZERO && total_amount - cost(titles)? < Decimal::ZERO {
        titles -= Decimal::ONE;
    }

    let count = titles.to_u64().ok_or_else(|| {
        CetesError::invalid("total_amount", "title count does not fit in a u64")
    })?;
    let invested = cost(titles)?;

    Ok(Holding {
        titles: count,
        invested,
        remainder: total_amount - invested,
    })
}

/// Fraction of face value given up as discount: `rate * days / 360`.
fn discount_fraction(rate: Rate, days: Days) -> CetesResult<Decimal> {
    let scaled = validate::in_range(rate.checked_mul(Decimal::from(days)), "discount_rate")?;
    Ok(scaled / DAY_COUNT_BASIS)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
