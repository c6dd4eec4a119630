use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};
use crate::validate;
use crate::CetesResult;

/// Interest earned on a holding and the tax withheld from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestBreakdown {
    /// `titles * gain_per_title`. Negative only for an early sale at a loss.
    pub gross_interest: Money,
    /// Withholding (ISR) on a positive gain; zero on a loss.
    pub tax: Money,
    pub net_interest: Money,
}

/// End-of-period totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proceeds {
    /// Capital plus gross interest.
    pub gross_proceeds: Money,
    /// Gross proceeds less tax.
    pub net_proceeds: Money,
    /// Net proceeds less the original capital.
    pub net_profit: Money,
}

/// Interest held to maturity: `titles * (face_value - price)`, taxed at
/// `tax_rate`.
pub fn compute_interest_and_tax(
    titles: u64,
    face_value: Money,
    price: Money,
    tax_rate: Rate,
) -> CetesResult<InterestBreakdown> {
    validate::positive(face_value, "face_value")?;
    validate::positive(price, "price")?;
    interest_on_gain(titles, face_value - price, tax_rate)
}

/// Interest for an arbitrary per-title gain, which may be negative.
pub fn interest_on_gain(
    titles: u64,
    gain_per_title: Money,
    tax_rate: Rate,
) -> CetesResult<InterestBreakdown> {
    validate::unit_fraction(tax_rate, "tax_rate")?;

    let gross_interest = validate::in_range(
        Decimal::from(titles).checked_mul(gain_per_title),
        "total_amount",
    )?;
    let tax = if gross_interest > Decimal::ZERO {
        gross_interest * tax_rate
    } else {
        Decimal::ZERO
    };

    Ok(InterestBreakdown {
        gross_interest,
        tax,
        net_interest: gross_interest - tax,
    })
}

pub fn compute_proceeds(total_amount: Money, interest: &InterestBreakdown) -> CetesResult<Proceeds> {
    let gross_proceeds = validate::in_range(
        total_amount.checked_add(interest.gross_interest),
        "total_amount",
    )?;
    let net_proceeds = validate::in_range(gross_proceeds.checked_sub(interest.tax), "total_amount")?;
    let net_profit = validate::in_range(net_proceeds.checked_sub(total_amount), "total_amount")?;
    Ok(Proceeds {
        gross_proceeds,
        net_proceeds,
        net_profit,
    })
}
