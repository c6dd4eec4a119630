use cetes_core::early_sale::AnnualizationBasis;
use cetes_core::pricing::{compute_purchase_price, implied_discount_rate};
use cetes_core::report::build_report;
use cetes_core::{
    simulate, CetesError, EarlySaleTerms, InstrumentKind, InvestmentScenario, YieldConvention,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cetes_28_day() -> InvestmentScenario {
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

// ===========================================================================
// Hold to maturity
// ===========================================================================

#[test]
fn test_default_page_scenario() {
    // 10 * (1 - 0.092015 * 28 / 360) = 9.92843277...
    let out = simulate(&cetes_28_day()).unwrap();
    let r = &out.result;
    assert!(
        (r.purchase_price - dec!(9.9284327778)).abs() < dec!(0.0000001),
        "price {}",
        r.purchase_price
    );
    // floor(40000 / 9.92843277) = 4028
    assert_eq!(r.holding.titles, 4028);
    assert!(r.holding.remainder >= Decimal::ZERO && r.holding.remainder < r.purchase_price);
    assert!(r.interest.tax > Decimal::ZERO);
    assert_eq!(
        r.interest.net_interest,
        r.interest.gross_interest - r.interest.tax
    );
    assert!((r.proceeds.net_profit - r.interest.net_interest).abs() < dec!(0.00000001));
}

#[test]
fn test_bondes_face_value_drives_title_count() {
    let mut scenario = cetes_28_day();
    scenario.instrument = InstrumentKind::Bondes;
    let bondes = simulate(&scenario).unwrap();
    let cetes = simulate(&cetes_28_day()).unwrap();

    assert_eq!(bondes.result.face_value, dec!(100));
    assert!(bondes.result.holding.titles < cetes.result.holding.titles);
    // Same rate and term: identical period yield regardless of face value.
    assert!(
        (bondes.result.yields.nominal_period_pct - cetes.result.yields.nominal_period_pct).abs()
            < dec!(0.0000000001)
    );
}

#[test]
fn test_price_strictly_decreasing_in_rate_and_days() {
    let mut last = dec!(10);
    for bps in [10, 50, 100, 425, 920, 1500] {
        let rate = Decimal::from(bps) / dec!(10000);
        let price = compute_purchase_price(dec!(10), rate, 91).unwrap();
        assert!(price < last, "{price} !< {last}");
        last = price;
    }

    let mut last = dec!(10);
    for days in [28, 91, 182, 364] {
        let price = compute_purchase_price(dec!(10), dec!(0.10), days).unwrap();
        assert!(price < last);
        last = price;
    }
}

#[test]
fn test_rate_round_trip() {
    for (rate, days) in [(dec!(0.0425), 139), (dec!(0.092015), 28), (dec!(0.15), 364)] {
        let price = compute_purchase_price(dec!(10), rate, days).unwrap();
        let recovered = implied_discount_rate(dec!(10), price, days).unwrap();
        assert!((recovered - rate).abs() < dec!(0.000000000001), "{recovered} vs {rate}");
    }
}

// ===========================================================================
// Decimal range
// ===========================================================================

#[test]
fn test_near_unit_discount_rate_is_rejected_not_panicking() {
    // Leaves a positive price around 1e-27, far too many titles for 40,000.
    let mut scenario = cetes_28_day();
    scenario.discount_rate = dec!(0.9999999999999999999999999999);
    scenario.term_days = 360;
    match simulate(&scenario) {
        Err(CetesError::InvalidInput { field, .. }) => {
            assert!(field == "total_amount" || field == "discount_rate", "field {field}")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_proceeds_past_decimal_max_are_rejected() {
    let mut scenario = cetes_28_day();
    scenario.instrument = InstrumentKind::Custom {
        face_value: dec!(70000000000000000000000000000),
    };
    scenario.total_amount = dec!(79000000000000000000000000000);
    scenario.discount_rate = dec!(0.09);
    let err = simulate(&scenario).unwrap_err();
    assert!(err.to_string().contains("decimal range"), "{err}");
}

// ===========================================================================
// Early sale
// ===========================================================================

#[test]
fn test_early_sale_lower_rate_beats_hold_yield() {
    // Rates fell after purchase: selling early locks in a higher annualized yield.
    let mut scenario = cetes_28_day();
    scenario.early_sale = Some(EarlySaleTerms {
        elapsed_days: 14,
        current_discount_rate: dec!(0.07),
        annualization: AnnualizationBasis::SimpleInterest,
    });
    let out = simulate(&scenario).unwrap();
    let sale = out.result.early_sale.as_ref().unwrap();
    assert!(sale.sale.yields.nominal_period_pct > Decimal::ZERO);
    assert!(
        sale.sale.yields.nominal_annual_pct > out.result.yields.nominal_annual_pct,
        "{} vs {}",
        sale.sale.yields.nominal_annual_pct,
        out.result.yields.nominal_annual_pct
    );
}

#[test]
fn test_early_sale_at_loss_is_flagged() {
    let mut scenario = cetes_28_day();
    scenario.term_days = 364;
    scenario.early_sale = Some(EarlySaleTerms {
        elapsed_days: 7,
        current_discount_rate: dec!(0.20),
        annualization: AnnualizationBasis::Compounding,
    });
    let out = simulate(&scenario).unwrap();
    let sale = out.result.early_sale.as_ref().unwrap();
    assert!(sale.sale.gain_per_title < Decimal::ZERO);
    assert!(sale.sale.interest.tax.is_zero());
    assert!(sale.proceeds.net_profit < Decimal::ZERO);
    assert!(out.warnings.iter().any(|w| w.contains("capital loss")));
}

#[test]
fn test_early_sale_out_of_range_is_rejected() {
    let mut scenario = cetes_28_day();
    scenario.early_sale = Some(EarlySaleTerms {
        elapsed_days: 35,
        current_discount_rate: dec!(0.09002),
        annualization: AnnualizationBasis::SimpleInterest,
    });
    let err = simulate(&scenario).unwrap_err();
    assert!(matches!(err, CetesError::InvalidInput { ref field, .. } if field == "elapsed_days"));
}

// ===========================================================================
// JSON boundary and report
// ===========================================================================

#[test]
fn test_json_scenario_to_report() {
    let scenario: InvestmentScenario = serde_json::from_str(
        r#"{
            "instrument": { "kind": "bondes" },
            "total_amount": "100000",
            "term_days": 182,
            "discount_rate": "0.10",
            "tax_rate": "0.0",
            "inflation_rate": "0.04",
            "convention": "additive",
            "settlement_date": "2025-01-02",
            "early_sale": {
                "elapsed_days": 91,
                "current_discount_rate": "0.095",
                "annualization": "compounding"
            }
        }"#,
    )
    .unwrap();

    let out = simulate(&scenario).unwrap();
    let report = build_report(&scenario, &out.result);

    assert_eq!(report.get("Instrument"), Some("BONDES"));
    assert_eq!(report.get("Face Value"), Some("$100.00000000"));
    assert_eq!(report.get("Total Amount"), Some("$100,000.00000000"));
    assert_eq!(report.get("Yield Convention"), Some("Additive"));
    assert_eq!(report.get("Maturity Date"), Some("2025-07-03"));
    assert_eq!(report.get("Sale Date"), Some("2025-04-03"));
    assert_eq!(report.get("Tax Withheld"), Some("$0.00000000"));
}
