//! Ordered label/value summary of a simulation, ready for a two-column
//! document or table.
//!
//! Row order is fixed: inputs, purchase, annualized yields, period yields,
//! interest, totals, then the early sale when one was simulated.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::scenario::{InvestmentScenario, SimulationResult};
use crate::types::{Money, Percent, Rate};
use crate::yields::{YieldConvention, YieldSet};

/// Decimal places for every formatted amount and percentage.
const DISPLAY_DP: u32 = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.label.as_str())
    }

    /// `{"title": ..., "result": {label: value, ...}}` with row order kept.
    pub fn to_value(&self) -> serde_json::Value {
        let result: serde_json::Map<String, serde_json::Value> = self
            .rows
            .iter()
            .map(|row| (row.label.clone(), serde_json::Value::String(row.value.clone())))
            .collect();
        serde_json::json!({
            "title": self.title,
            "result": result,
        })
    }
}

struct Rows(Vec<ReportRow>);

impl Rows {
    fn text(&mut self, label: &str, value: impl Into<String>) -> &mut Self {
        self.0.push(ReportRow {
            label: label.to_string(),
            value: value.into(),
        });
        self
    }

    fn money(&mut self, label: &str, value: Money) -> &mut Self {
        self.text(label, format_money(value))
    }

    fn percent(&mut self, label: &str, value: Percent) -> &mut Self {
        self.text(label, format_percent(value))
    }

    fn rate(&mut self, label: &str, value: Rate) -> &mut Self {
        self.text(label, format_rate(value))
    }

    fn yields(&mut self, suffix: &str, y: &YieldSet) -> &mut Self {
        self.percent(&format!("Nominal Yield (Annual{suffix})"), y.nominal_annual_pct)
            .percent(&format!("Net Yield (Annual{suffix})"), y.net_annual_pct)
            .percent(&format!("Real Yield (Annual{suffix})"), y.real_annual_pct)
            .percent(&format!("Nominal Yield (Period{suffix})"), y.nominal_period_pct)
            .percent(&format!("Net Yield (Period{suffix})"), y.net_period_pct)
            .percent(&format!("Real Yield (Period{suffix})"), y.real_period_pct)
    }
}

/// Build the export summary for a simulated scenario.
pub fn build_report(scenario: &InvestmentScenario, result: &SimulationResult) -> Report {
    let mut rows = Rows(Vec::new());

    rows.text("Instrument", result.instrument.as_str())
        .money("Face Value", result.face_value)
        .money("Total Amount", scenario.total_amount)
        .text("Term", format!("{} days", result.term_days))
        .rate("Original Discount Rate", scenario.discount_rate)
        .rate("Withholding Tax Rate", scenario.tax_rate)
        .rate("Inflation Rate", scenario.inflation_rate)
        .text("Yield Convention", convention_label(result.convention))
        .money("Purchase Price", result.purchase_price)
        .text("Titles Purchased", group_thousands(&result.holding.titles.to_string()))
        .money("Invested Capital", result.holding.invested)
        .money("Remainder", result.holding.remainder)
        .yields("", &result.yields)
        .money("Gross Interest", result.interest.gross_interest)
        .money("Tax Withheld", result.interest.tax)
        .money("Net Interest", result.interest.net_interest)
        .money("Gross Proceeds", result.proceeds.gross_proceeds)
        .money("Net Proceeds", result.proceeds.net_proceeds)
        .money("Net Profit", result.proceeds.net_profit);

    if let Some(date) = result.maturity_date {
        rows.text("Maturity Date", date.to_string());
    }

    if let (Some(terms), Some(outcome)) = (&scenario.early_sale, &result.early_sale) {
        let sale = &outcome.sale;
        rows.text("Days Held", format!("{} days", sale.elapsed_days))
            .text("Days Remaining", format!("{} days", sale.days_remaining))
            .rate("Current Discount Rate", terms.current_discount_rate)
            .money("Sale Price", sale.sale_price)
            .money("Gain per Title", sale.gain_per_title)
            .money("Gross Interest (Early Sale)", sale.interest.gross_interest)
            .money("Tax Withheld (Early Sale)", sale.interest.tax)
            .money("Net Interest (Early Sale)", sale.interest.net_interest)
            .yields(", Early Sale", &sale.yields)
            .money("Gross Proceeds (Early Sale)", outcome.proceeds.gross_proceeds)
            .money("Net Proceeds (Early Sale)", outcome.proceeds.net_proceeds)
            .money("Net Profit (Early Sale)", outcome.proceeds.net_profit);
        if let Some(date) = outcome.sale_date {
            rows.text("Sale Date", date.to_string());
        }
    }

    Report {
        title: format!("{} Investment Simulation", result.instrument),
        rows: rows.0,
    }
}

/// `$1,234.56000000`, sign before the currency symbol.
pub fn format_money(value: Money) -> String {
    let fixed = fixed_dp(value.abs());
    let sign = if value < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}", group_thousands(&fixed))
}

/// Percentage points with a `%` suffix: `9.31000000%`.
pub fn format_percent(value: Percent) -> String {
    format!("{}%", fixed_dp(value))
}

/// A decimal rate shown as a percentage: `0.05` becomes `5.00000000%`.
/// Rates too large to scale by 100 are shown as the raw fraction.
pub fn format_rate(value: Rate) -> String {
    match value.checked_mul(dec!(100)) {
        Some(points) => format_percent(points),
        None => fixed_dp(value),
    }
}

fn fixed_dp(value: Decimal) -> String {
    format!("{:.*}", DISPLAY_DP as usize, value.round_dp(DISPLAY_DP))
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

fn convention_label(convention: YieldConvention) -> &'static str {
    match convention {
        YieldConvention::Compounding => "Compounding",
        YieldConvention::Additive => "Additive",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::early_sale::AnnualizationBasis;
    use crate::instrument::InstrumentKind;
    use crate::scenario::{simulate, EarlySaleTerms};
    use pretty_assertions::assert_eq;

    fn scenario() -> InvestmentScenario {
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
    fn test_format_money() {
        assert_eq!(format_money(dec!(40000)), "$40,000.00000000");
        assert_eq!(format_money(dec!(1234567.5)), "$1,234,567.50000000");
        assert_eq!(format_money(dec!(-12.3456789012)), "-$12.34567890");
        assert_eq!(format_money(dec!(999)), "$999.00000000");
    }

    #[test]
    fn test_format_percent_and_rate() {
        assert_eq!(format_percent(dec!(9.5)), "9.50000000%");
        assert_eq!(format_rate(dec!(0.0377)), "3.77000000%");
        assert_eq!(format_percent(dec!(-1.25)), "-1.25000000%");
    }

    #[test]
    fn test_format_rate_outside_percent_range() {
        let huge = dec!(1000000000000000000000000000);
        assert_eq!(format_rate(huge), "1000000000000000000000000000.00000000");
    }

    #[test]
    fn test_report_with_extreme_inflation() {
        let mut s = scenario();
        s.inflation_rate = dec!(1000000000000000000000000000);
        let out = simulate(&s).unwrap();
        let report = build_report(&s, &out.result);
        assert!(report.get("Inflation Rate").is_some());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("4023"), "4,023");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("-1234567.89"), "-1,234,567.89");
    }

    #[test]
    fn test_row_order_is_stable() {
        let s = scenario();
        let out = simulate(&s).unwrap();
        let report = build_report(&s, &out.result);
        let labels: Vec<&str> = report.labels().take(12).collect();
        assert_eq!(
            labels,
            vec![
                "Instrument",
                "Face Value",
                "Total Amount",
                "Term",
                "Original Discount Rate",
                "Withholding Tax Rate",
                "Inflation Rate",
                "Yield Convention",
                "Purchase Price",
                "Titles Purchased",
                "Invested Capital",
                "Remainder",
            ]
        );
        assert_eq!(report.get("Term"), Some("28 days"));
        assert!(report.get("Sale Price").is_none());
    }

    #[test]
    fn test_early_sale_rows_appended() {
        let mut s = scenario();
        s.early_sale = Some(EarlySaleTerms {
            elapsed_days: 14,
            current_discount_rate: dec!(0.09002),
            annualization: AnnualizationBasis::SimpleInterest,
        });
        let out = simulate(&s).unwrap();
        let report = build_report(&s, &out.result);
        assert_eq!(report.get("Days Remaining"), Some("14 days"));
        assert!(report.get("Net Yield (Annual, Early Sale)").is_some());
        assert_eq!(report.labels().last(), Some("Net Profit (Early Sale)"));
    }

    #[test]
    fn test_to_value_keeps_order() {
        let s = scenario();
        let out = simulate(&s).unwrap();
        let report = build_report(&s, &out.result);
        let value = report.to_value();
        let keys: Vec<&String> = value["result"].as_object().unwrap().keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("Instrument"));
        assert_eq!(keys.len(), report.rows.len());
        assert_eq!(value["title"], "CETES Investment Simulation");
    }
}
