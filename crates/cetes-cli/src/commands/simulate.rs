use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use cetes_core::early_sale::AnnualizationBasis;
use cetes_core::report::build_report;
use cetes_core::{simulate, EarlySaleTerms, InstrumentKind, InvestmentScenario, YieldConvention};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InstrumentArg {
    Cetes,
    Bondes,
    Prlv,
    BankAcceptance,
    Custom,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConventionArg {
    Compounding,
    Additive,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AnnualizationArg {
    Simple,
    Compounding,
}

/// Scenario parameters, shared by `simulate` and `report`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScenarioArgs {
    /// Capital available to invest
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Days to maturity (e.g. 28, 91, 182, 364)
    #[arg(long)]
    pub term_days: Option<u32>,

    /// Annualized discount rate at purchase (e.g. 0.092015 for 9.2015%)
    #[arg(long)]
    pub discount_rate: Option<Decimal>,

    /// Withholding tax rate on gains (e.g. 0.05 for 5%)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Reference inflation rate (e.g. 0.0377 for 3.77%)
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,

    /// Instrument class, which fixes the face value
    #[arg(long, value_enum, default_value = "cetes")]
    pub instrument: InstrumentArg,

    /// Face value per title, only with --instrument custom
    #[arg(long)]
    pub face_value: Option<Decimal>,

    /// Tax and inflation adjustment convention
    #[arg(long, value_enum, default_value = "compounding")]
    pub convention: ConventionArg,

    /// Purchase settlement date (YYYY-MM-DD)
    #[arg(long)]
    pub settlement_date: Option<NaiveDate>,

    /// Days held before an early sale
    #[arg(long)]
    pub elapsed_days: Option<u32>,

    /// Discount rate prevailing on the early-sale date
    #[arg(long)]
    pub current_discount_rate: Option<Decimal>,

    /// How the early-sale yield is annualized
    #[arg(long, value_enum, default_value = "simple")]
    pub annualization: AnnualizationArg,

    /// Path to JSON scenario file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simulate(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = load_scenario(args)?;
    let result = simulate(&scenario)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_report(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario = load_scenario(args)?;
    let output = simulate(&scenario)?;
    let report = build_report(&scenario, &output.result);

    let mut value = report.to_value();
    value["warnings"] = serde_json::json!(output.warnings);
    Ok(value)
}

fn load_scenario(args: ScenarioArgs) -> Result<InvestmentScenario, Box<dyn std::error::Error>> {
    if let Some(scenario) = input::read_typed::<InvestmentScenario>(args.input.as_deref())? {
        return Ok(scenario);
    }

    let instrument = match (args.instrument, args.face_value) {
        (InstrumentArg::Custom, Some(face_value)) => InstrumentKind::Custom { face_value },
        (InstrumentArg::Custom, None) => {
            return Err("--face-value is required with --instrument custom".into())
        }
        (_, Some(_)) => return Err("--face-value only applies to --instrument custom".into()),
        (InstrumentArg::Cetes, None) => InstrumentKind::Cetes,
        (InstrumentArg::Bondes, None) => InstrumentKind::Bondes,
        (InstrumentArg::Prlv, None) => InstrumentKind::Prlv,
        (InstrumentArg::BankAcceptance, None) => InstrumentKind::BankAcceptance,
    };

    let early_sale = match (args.elapsed_days, args.current_discount_rate) {
        (Some(elapsed_days), Some(current_discount_rate)) => Some(EarlySaleTerms {
            elapsed_days,
            current_discount_rate,
            annualization: match args.annualization {
                AnnualizationArg::Simple => AnnualizationBasis::SimpleInterest,
                AnnualizationArg::Compounding => AnnualizationBasis::Compounding,
            },
        }),
        (None, None) => None,
        _ => {
            return Err(
                "--elapsed-days and --current-discount-rate must be given together".into(),
            )
        }
    };

    Ok(InvestmentScenario {
        instrument,
        total_amount: args
            .amount
            .ok_or("--amount is required (or provide --input)")?,
        term_days: args
            .term_days
            .ok_or("--term-days is required (or provide --input)")?,
        discount_rate: args
            .discount_rate
            .ok_or("--discount-rate is required (or provide --input)")?,
        tax_rate: args
            .tax_rate
            .ok_or("--tax-rate is required (or provide --input)")?,
        inflation_rate: args.inflation_rate.unwrap_or(Decimal::ZERO),
        convention: match args.convention {
            ConventionArg::Compounding => YieldConvention::Compounding,
            ConventionArg::Additive => YieldConvention::Additive,
        },
        settlement_date: args.settlement_date,
        early_sale,
    })
}
