//! Selling a discount title before maturity at the discount rate prevailing
//! on the sale date.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CetesError;
use crate::interest::{interest_on_gain, InterestBreakdown};
use crate::pricing::compute_purchase_price;
use crate::types::{Days, Money, Percent, Rate};
use crate::validate;
use crate::yields::{annualize_compound, annualize_simple, YieldConvention, YieldSet};
use crate::CetesResult;

/// How the early-sale period yield is scaled to a year over the days
/// actually held. Both appear in practice and give different figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualizationBasis {
    /// `period * 360 / elapsed_days`, i.e. `gain * 360 / (purchase_price * elapsed_days) * 100`
    #[default]
    SimpleInterest,
    /// `((1 + period / 100) ^ (360 / elapsed_days) - 1) * 100`
    Compounding,
}

/// Everything needed to value a sale before maturity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlySaleInput {
    pub face_value: Money,
    /// Discount rate quoted on the sale date (decimal).
    pub current_discount_rate: Rate,
    /// Original term of the title.
    pub term_days: Days,
    /// Days held before selling. Must satisfy `1 <= elapsed_days < term_days`.
    pub elapsed_days: Days,
    pub purchase_price: Money,
    pub titles: u64,
    pub tax_rate: Rate,
    pub inflation_rate: Rate,
    #[serde(default)]
    pub convention: YieldConvention,
    #[serde(default)]
    pub annualization: AnnualizationBasis,
}

/// Outcome of an early sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlySaleResult {
    pub elapsed_days: Days,
    pub days_remaining: Days,
    pub sale_price: Money,
    /// `sale_price - purchase_price`; negative when rates rose enough.
    pub gain_per_title: Money,
    #[serde(flatten)]
    pub interest: InterestBreakdown,
    #[serde(flatten)]
    pub yields: YieldSet,
    pub annualization: AnnualizationBasis,
}

pub fn compute_early_sale(input: &EarlySaleInput) -> CetesResult<EarlySaleResult> {
    validate_early_sale_input(input)?;

    let days_remaining = input.term_days - input.elapsed_days;
    let sale_price =
        compute_purchase_price(input.face_value, input.current_discount_rate, days_remaining)
            .map_err(|_| {
                CetesError::invalid(
                    "current_discount_rate",
                    format!(
                        "a {} discount over the remaining {days_remaining} days leaves a non-positive sale price",
                        input.current_discount_rate
                    ),
                )
            })?;

    let gain_per_title = sale_price - input.purchase_price;
    let interest = interest_on_gain(input.titles, gain_per_title, input.tax_rate)?;

    let yields = if input.titles == 0 {
        YieldSet::zero()
    } else {
        let nominal_period = sale_period_yield(sale_price, input.purchase_price)?;
        let nominal_annual = match input.annualization {
            AnnualizationBasis::SimpleInterest => {
                annualize_simple(nominal_period, input.elapsed_days)?
            }
            AnnualizationBasis::Compounding => {
                annualize_compound(nominal_period, input.elapsed_days)?
            }
        };
        YieldSet::from_nominal(
            nominal_period,
            nominal_annual,
            input.tax_rate,
            input.inflation_rate,
            input.convention,
        )?
    };

    Ok(EarlySaleResult {
        elapsed_days: input.elapsed_days,
        days_remaining,
        sale_price,
        gain_per_title,
        interest,
        yields,
        annualization: input.annualization,
    })
}

/// Per-title period yield of an early sale, without tax or inflation.
pub fn sale_period_yield(sale_price: Money, purchase_price: Money) -> CetesResult<Percent> {
    validate::positive(purchase_price, "purchase_price")?;
    let gain = sale_price - purchase_price;
    validate::in_range(
        gain.checked_div(purchase_price)
            .and_then(|ratio| ratio.checked_mul(dec!(100))),
        "purchase_price",
    )
}

fn validate_early_sale_input(input: &EarlySaleInput) -> CetesResult<()> {
    validate::positive(input.face_value, "face_value")?;
    validate::positive(input.purchase_price, "purchase_price")?;
    validate::non_negative(input.current_discount_rate, "current_discount_rate")?;
    validate::unit_fraction(input.tax_rate, "tax_rate")?;
    validate::non_negative(input.inflation_rate, "inflation_rate")?;

    if input.elapsed_days == 0 || input.elapsed_days >= input.term_days {
        return Err(CetesError::invalid(
            "elapsed_days",
            format!(
                "must satisfy 1 <= elapsed_days < term_days ({}), got {}",
                input.term_days, input.elapsed_days
            ),
        ));
    }
    Ok(())
}
