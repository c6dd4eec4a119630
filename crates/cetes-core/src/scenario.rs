//! Investment scenario: the full purchase, hold and optional early-sale
//! simulation.
//!
//! The scenario is a plain value. `simulate` recomputes every figure from it
//! on each call; nothing is cached between calls.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::early_sale::{compute_early_sale, AnnualizationBasis, EarlySaleInput, EarlySaleResult};
use crate::error::CetesError;
use crate::instrument::InstrumentKind;
use crate::interest::{compute_interest_and_tax, compute_proceeds, InterestBreakdown, Proceeds};
use crate::pricing::{compute_holding, compute_purchase_price, Holding};
use crate::types::{with_metadata, ComputationOutput, Days, Money, Rate};
use crate::validate;
use crate::yields::{compute_yields, YieldConvention, YieldSet};
use crate::CetesResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Terms of a sale before maturity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlySaleTerms {
    /// Days held before selling. Must satisfy `1 <= elapsed_days < term_days`.
    pub elapsed_days: Days,
    /// Discount rate quoted on the sale date (decimal).
    pub current_discount_rate: Rate,
    #[serde(default)]
    pub annualization: AnnualizationBasis,
}

/// A purchase of discount titles, held to maturity or sold early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentScenario {
    #[serde(default)]
    pub instrument: InstrumentKind,
    /// Capital available to invest.
    pub total_amount: Money,
    /// Days to maturity at purchase.
    pub term_days: Days,
    /// Annualized discount rate at purchase (decimal, e.g. 0.092015).
    pub discount_rate: Rate,
    /// Withholding tax rate on gains (decimal).
    pub tax_rate: Rate,
    /// Reference inflation for the real yield (decimal).
    #[serde(default)]
    pub inflation_rate: Rate,
    #[serde(default)]
    pub convention: YieldConvention,
    /// Settlement date of the purchase. Enables maturity and sale dates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_sale: Option<EarlySaleTerms>,
}

impl InvestmentScenario {
    pub fn face_value(&self) -> Money {
        self.instrument.face_value()
    }

    /// Reject economically meaningless scenarios before computing anything.
    pub fn validate(&self) -> CetesResult<()> {
        self.instrument.validate()?;
        validate::positive(self.total_amount, "total_amount")?;
        validate::positive_days(self.term_days, "term_days")?;
        validate::positive(self.discount_rate, "discount_rate")?;
        if self.discount_rate >= Decimal::ONE {
            return Err(CetesError::invalid(
                "discount_rate",
                format!("must be below 1 (100%), got {}", self.discount_rate),
            ));
        }
        validate::unit_fraction(self.tax_rate, "tax_rate")?;
        validate::non_negative(self.inflation_rate, "inflation_rate")?;

        if let Some(sale) = &self.early_sale {
            if sale.elapsed_days == 0 || sale.elapsed_days >= self.term_days {
                return Err(CetesError::invalid(
                    "elapsed_days",
                    format!(
                        "must satisfy 1 <= elapsed_days < term_days ({}), got {}",
                        self.term_days, sale.elapsed_days
                    ),
                ));
            }
            validate::non_negative(sale.current_discount_rate, "current_discount_rate")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Early sale figures plus the totals they lead to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarlySaleOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub sale: EarlySaleResult,
    #[serde(flatten)]
    pub proceeds: Proceeds,
}

/// Everything computed for a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub instrument: String,
    pub face_value: Money,
    pub term_days: Days,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    pub purchase_price: Money,
    #[serde(flatten)]
    pub holding: Holding,
    #[serde(flatten)]
    pub interest: InterestBreakdown,
    #[serde(flatten)]
    pub yields: YieldSet,
    #[serde(flatten)]
    pub proceeds: Proceeds,
    pub convention: YieldConvention,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub early_sale: Option<EarlySaleOutcome>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the purchase, hold and optional early-sale pipeline for a scenario.
pub fn simulate(
    scenario: &InvestmentScenario,
) -> CetesResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    scenario.validate()?;

    let face_value = scenario.face_value();
    let purchase_price =
        compute_purchase_price(face_value, scenario.discount_rate, scenario.term_days)?;
    let holding = compute_holding(scenario.total_amount, purchase_price)?;
    debug!(
        %purchase_price,
        titles = holding.titles,
        remainder = %holding.remainder,
        "priced discount titles"
    );

    let interest = compute_interest_and_tax(
        holding.titles,
        face_value,
        purchase_price,
        scenario.tax_rate,
    )?;

    let yields = if holding.titles == 0 {
        warnings.push(format!(
            "Capital of {} is below one title at {}; no titles purchased",
            scenario.total_amount, purchase_price
        ));
        YieldSet::zero()
    } else {
        compute_yields(
            face_value,
            purchase_price,
            scenario.term_days,
            scenario.tax_rate,
            scenario.inflation_rate,
            scenario.convention,
        )?
    };

    let proceeds = compute_proceeds(scenario.total_amount, &interest)?;

    if holding.titles > 0 && holding.remainder > Decimal::ZERO {
        warnings.push(format!(
            "{} left uninvested after buying {} whole titles",
            holding.remainder.round_dp(2),
            holding.titles
        ));
    }
    if yields.real_annual_pct < Decimal::ZERO {
        warnings.push("Real annualized yield is negative: inflation outpaces the net return".into());
    }
    let standard_terms = scenario.instrument.standard_terms();
    if !standard_terms.is_empty() && !standard_terms.contains(&scenario.term_days) {
        warnings.push(format!(
            "{} are normally issued at {:?} days; {} days is off-calendar",
            scenario.instrument.label(),
            standard_terms,
            scenario.term_days
        ));
    }
    if scenario.convention == YieldConvention::Additive {
        warnings.push(
            "Additive tax/inflation adjustment in use; it disagrees with the compounding convention"
                .into(),
        );
    }

    let maturity_date = offset_date(scenario.settlement_date, scenario.term_days)?;

    let early_sale = match &scenario.early_sale {
        Some(terms) => {
            let outcome = simulate_early_sale(scenario, terms, purchase_price, &holding)?;
            if outcome.sale.gain_per_title < Decimal::ZERO {
                warnings.push(
                    "Early sale realises a capital loss; no tax is withheld on a loss".into(),
                );
            }
            Some(outcome)
        }
        None => None,
    };

    let output = SimulationResult {
        instrument: scenario.instrument.label().to_string(),
        face_value,
        term_days: scenario.term_days,
        maturity_date,
        purchase_price,
        holding,
        interest,
        yields,
        proceeds,
        convention: scenario.convention,
        early_sale,
    };

    for w in &warnings {
        warn!(warning = %w, "scenario warning");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "day_count": "360",
        "price_formula": "face_value * (1 - rate / 360 * days)",
        "titles": "whole titles only (floor)",
        "yield_convention": scenario.convention.describe(),
        "early_sale_annualization": scenario
            .early_sale
            .as_ref()
            .map(|s| format!("{:?}", s.annualization)),
    });

    Ok(with_metadata(
        "Discount instrument purchase simulation, 360-day money-market basis",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn simulate_early_sale(
    scenario: &InvestmentScenario,
    terms: &EarlySaleTerms,
    purchase_price: Money,
    holding: &Holding,
) -> CetesResult<EarlySaleOutcome> {
    let sale = compute_early_sale(&EarlySaleInput {
        face_value: scenario.face_value(),
        current_discount_rate: terms.current_discount_rate,
        term_days: scenario.term_days,
        elapsed_days: terms.elapsed_days,
        purchase_price,
        titles: holding.titles,
        tax_rate: scenario.tax_rate,
        inflation_rate: scenario.inflation_rate,
        convention: scenario.convention,
        annualization: terms.annualization,
    })?;
    debug!(
        sale_price = %sale.sale_price,
        gain_per_title = %sale.gain_per_title,
        "priced early sale"
    );

    Ok(EarlySaleOutcome {
        sale_date: offset_date(scenario.settlement_date, terms.elapsed_days)?,
        proceeds: compute_proceeds(scenario.total_amount, &sale.interest)?,
        sale,
    })
}

fn offset_date(start: Option<NaiveDate>, days: Days) -> CetesResult<Option<NaiveDate>> {
    start
        .map(|date| {
            date.checked_add_signed(Duration::days(i64::from(days)))
                .ok_or_else(|| {
                    CetesError::invalid("settlement_date", "date arithmetic out of range")
                })
        })
        .transpose()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn base_scenario() -> InvestmentScenario {
        InvestmentScenario {
            instrument: InstrumentKind::Cetes,
            total_amount: dec!(40000),
            term_days: 28,
            discount_rate: dec!(0.092015),
            tax_rate: dec!(0.05),
            inflation_rate: dec!(0.0377),
            convention: YieldConvention::Compounding,
            settlement_date: None,
            early_sale: None,
        }
    }

    #[test]
    fn test_hold_to_maturity() {
        let out = simulate(&base_scenario()).unwrap();
        let r = &out.result;

        assert_eq!(r.face_value, dec!(10));
        assert!(r.purchase_price < dec!(10));
        assert_eq!(
            Decimal::from(r.holding.titles),
            (dec!(40000) / r.purchase_price).floor()
        );
        assert_eq!(
            r.interest.gross_interest,
            Decimal::from(r.holding.titles) * (dec!(10) - r.purchase_price)
        );
        assert_eq!(r.proceeds.gross_proceeds, dec!(40000) + r.interest.gross_interest);
        assert!(r.yields.nominal_annual_pct > r.yields.net_annual_pct);
        assert!(r.yields.net_annual_pct > r.yields.real_annual_pct);
        assert!(r.early_sale.is_none());
        assert!(out.methodology.contains("360-day"));
    }

    #[test]
    fn test_zero_titles_scenario() {
        let mut scenario = base_scenario();
        scenario.total_amount = dec!(5);
        let out = simulate(&scenario).unwrap();
        let r = &out.result;
        assert_eq!(r.holding.titles, 0);
        assert!(r.holding.invested.is_zero());
        assert_eq!(r.holding.remainder, dec!(5));
        assert_eq!(r.yields, YieldSet::zero());
        assert!(out.warnings.iter().any(|w| w.contains("no titles purchased")));
    }

    #[test]
    fn test_early_sale_attached() {
        let mut scenario = base_scenario();
        scenario.early_sale = Some(EarlySaleTerms {
            elapsed_days: 14,
            current_discount_rate: dec!(0.092015),
            annualization: AnnualizationBasis::SimpleInterest,
        });
        let out = simulate(&scenario).unwrap();
        let sale = out.result.early_sale.as_ref().unwrap();
        assert_eq!(sale.sale.days_remaining, 14);
        assert!(sale.sale.gain_per_title > Decimal::ZERO);
        assert!(sale.sale.interest.gross_interest < out.result.interest.gross_interest);
        assert_eq!(
            sale.proceeds.gross_proceeds,
            dec!(40000) + sale.sale.interest.gross_interest
        );
    }

    #[test]
    fn test_invalid_elapsed_days() {
        let mut scenario = base_scenario();
        scenario.early_sale = Some(EarlySaleTerms {
            elapsed_days: 28,
            current_discount_rate: dec!(0.09),
            annualization: AnnualizationBasis::SimpleInterest,
        });
        match simulate(&scenario).unwrap_err() {
            CetesError::InvalidInput { field, .. } => assert_eq!(field, "elapsed_days"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_rates() {
        let mut scenario = base_scenario();
        scenario.discount_rate = dec!(0);
        assert!(simulate(&scenario).is_err());

        let mut scenario = base_scenario();
        scenario.tax_rate = dec!(1);
        assert!(simulate(&scenario).is_err());

        let mut scenario = base_scenario();
        scenario.inflation_rate = dec!(-0.01);
        assert!(simulate(&scenario).is_err());
    }

    #[test]
    fn test_discount_too_deep_for_term() {
        let mut scenario = base_scenario();
        scenario.term_days = 365;
        scenario.discount_rate = dec!(0.99);
        assert!(simulate(&scenario).is_err());
    }

    #[test]
    fn test_dates_from_settlement() {
        let mut scenario = base_scenario();
        scenario.settlement_date = NaiveDate::from_ymd_opt(2025, 3, 28);
        scenario.early_sale = Some(EarlySaleTerms {
            elapsed_days: 10,
            current_discount_rate: dec!(0.09),
            annualization: AnnualizationBasis::Compounding,
        });
        let out = simulate(&scenario).unwrap();
        assert_eq!(out.result.maturity_date, NaiveDate::from_ymd_opt(2025, 4, 25));
        assert_eq!(
            out.result.early_sale.unwrap().sale_date,
            NaiveDate::from_ymd_opt(2025, 4, 7)
        );
    }

    #[test]
    fn test_off_calendar_and_additive_warnings() {
        let mut scenario = base_scenario();
        scenario.term_days = 30;
        scenario.convention = YieldConvention::Additive;
        let out = simulate(&scenario).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("off-calendar")));
        assert!(out.warnings.iter().any(|w| w.contains("Additive")));
    }

    #[test]
    fn test_scenario_from_json_defaults() {
        let scenario: InvestmentScenario = serde_json::from_str(
            r#"{
                "total_amount": "10000",
                "term_days": 91,
                "discount_rate": "0.10",
                "tax_rate": "0.05"
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.instrument, InstrumentKind::Cetes);
        assert_eq!(scenario.convention, YieldConvention::Compounding);
        assert!(scenario.inflation_rate.is_zero());
        assert!(scenario.early_sale.is_none());
    }

    #[test]
    fn test_result_serializes_flat_fields() {
        let out = simulate(&base_scenario()).unwrap();
        let json = serde_json::to_value(&out.result).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["purchase_price", "titles", "remainder", "gross_interest", "net_annual_pct", "net_profit"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
    }
}
