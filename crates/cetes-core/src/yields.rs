//! Nominal, net and real yields for a holding period and their annualized
//! equivalents.
//!
//! Two conventions for the tax and inflation adjustment are in circulation
//! and they do not agree, so both are exposed explicitly:
//!
//! - `Compounding`: tax scales the yield, inflation deflates it
//!   multiplicatively.
//! - `Additive`: tax and inflation are subtracted as percentage points.
//!
//! All yields are percentage points (5.0 = 5%); all input rates are decimal
//! fractions.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CetesError;
use crate::pricing::DAY_COUNT_BASIS;
use crate::types::{Days, Money, Percent, Rate};
use crate::validate;
use crate::CetesResult;

const HUNDRED: Decimal = dec!(100);

/// How withholding tax and inflation are taken out of a nominal yield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldConvention {
    /// `net = nominal * (1 - tax)`, `real = ((1 + net) / (1 + inflation) - 1)`.
    #[default]
    Compounding,
    /// `net = nominal - tax`, `real = net - inflation`, in percentage points.
    Additive,
}

impl YieldConvention {
    /// Net-of-tax yield from a nominal yield. `tax_rate` must be in `[0, 1)`.
    pub fn net(&self, nominal: Percent, tax_rate: Rate) -> Percent {
        match self {
            YieldConvention::Compounding => nominal * (Decimal::ONE - tax_rate),
            YieldConvention::Additive => nominal - tax_rate * HUNDRED,
        }
    }

    /// Inflation-adjusted yield from a net yield. `inflation_rate` must be
    /// non-negative.
    pub fn real(&self, net: Percent, inflation_rate: Rate) -> CetesResult<Percent> {
        let real = match self {
            YieldConvention::Compounding => Decimal::ONE
                .checked_add(inflation_rate)
                .map(|deflator| (Decimal::ONE + net / HUNDRED) / deflator - Decimal::ONE)
                .and_then(|growth| growth.checked_mul(HUNDRED)),
            YieldConvention::Additive => inflation_rate
                .checked_mul(HUNDRED)
                .and_then(|points| net.checked_sub(points)),
        };
        validate::in_range(real, "inflation_rate")
    }

    pub fn describe(&self) -> &'static str {
        match self {
            YieldConvention::Compounding => "compounding tax and inflation adjustment",
            YieldConvention::Additive => "additive (percentage-point) tax and inflation adjustment",
        }
    }
}

/// Period and annualized yields, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldSet {
    pub nominal_period_pct: Percent,
    pub net_period_pct: Percent,
    pub real_period_pct: Percent,
    pub nominal_annual_pct: Percent,
    pub net_annual_pct: Percent,
    pub real_annual_pct: Percent,
}

impl YieldSet {
    /// Yields of a position that holds no titles.
    pub fn zero() -> Self {
        YieldSet {
            nominal_period_pct: Decimal::ZERO,
            net_period_pct: Decimal::ZERO,
            real_period_pct: Decimal::ZERO,
            nominal_annual_pct: Decimal::ZERO,
            net_annual_pct: Decimal::ZERO,
            real_annual_pct: Decimal::ZERO,
        }
    }

    /// Derive net and real legs from the two nominal yields.
    pub fn from_nominal(
        nominal_period: Percent,
        nominal_annual: Percent,
        tax_rate: Rate,
        inflation_rate: Rate,
        convention: YieldConvention,
    ) -> CetesResult<Self> {
        let net_period = convention.net(nominal_period, tax_rate);
        let net_annual = convention.net(nominal_annual, tax_rate);
        Ok(YieldSet {
            nominal_period_pct: nominal_period,
            net_period_pct: net_period,
            real_period_pct: convention.real(net_period, inflation_rate)?,
            nominal_annual_pct: nominal_annual,
            net_annual_pct: net_annual,
            real_annual_pct: convention.real(net_annual, inflation_rate)?,
        })
    }
}

/// Yields of a title bought at `price` and held `days` to a `face_value`
/// redemption.
pub fn compute_yields(
    face_value: Money,
    price: Money,
    days: Days,
    tax_rate: Rate,
    inflation_rate: Rate,
    convention: YieldConvention,
) -> CetesResult<YieldSet> {
    validate::positive(face_value, "face_value")?;
    validate::positive(price, "price")?;
    validate::positive_days(days, "days")?;
    validate::unit_fraction(tax_rate, "tax_rate")?;
    validate::non_negative(inflation_rate, "inflation_rate")?;

    let nominal_period = validate::in_range(
        face_value
            .checked_div(price)
            .and_then(|ratio| (ratio - Decimal::ONE).checked_mul(HUNDRED)),
        "price",
    )?;
    let nominal_annual = annualize_compound(nominal_period, days)?;

    YieldSet::from_nominal(
        nominal_period,
        nominal_annual,
        tax_rate,
        inflation_rate,
        convention,
    )
}

/// `((1 + period / 100) ^ (360 / days) - 1) * 100`
pub fn annualize_compound(period: Percent, days: Days) -> CetesResult<Percent> {
    validate::positive_days(days, "days")?;

    let growth = Decimal::ONE + period / HUNDRED;
    if growth <= Decimal::ZERO {
        return Err(CetesError::invalid(
            "days",
            format!("a {period}% period yield cannot be compounded"),
        ));
    }

    let exponent = DAY_COUNT_BASIS / Decimal::from(days);
    let compounded = growth.checked_powd(exponent).ok_or_else(|| {
        CetesError::invalid(
            "days",
            format!("annualizing {period}% over {days} days overflows decimal range"),
        )
    })?;

    validate::in_range((compounded - Decimal::ONE).checked_mul(HUNDRED), "days")
}

/// `period * 360 / days`
pub fn annualize_simple(period: Percent, days: Days) -> CetesResult<Percent> {
    validate::positive_days(days, "days")?;
    let scaled = validate::in_range(period.checked_mul(DAY_COUNT_BASIS), "days")?;
    Ok(scaled / Decimal::from(days))
}
