use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use cetes_core::pricing::{compute_purchase_price, implied_discount_rate};

/// Arguments for pricing a title from its discount rate
#[derive(Args)]
pub struct PriceArgs {
    /// Face value per title (10 for CETES)
    #[arg(long, default_value = "10")]
    pub face_value: Decimal,

    /// Annualized discount rate (e.g. 0.0425 for 4.25%)
    #[arg(long)]
    pub discount_rate: Decimal,

    /// Days to maturity
    #[arg(long)]
    pub days: u32,
}

pub fn run_price(args: PriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price = compute_purchase_price(args.face_value, args.discount_rate, args.days)?;
    Ok(serde_json::json!({
        "purchase_price": price,
        "discount_per_title": args.face_value - price,
        "face_value": args.face_value,
        "discount_rate": args.discount_rate,
        "days": args.days,
    }))
}

/// Arguments for inferring the discount rate from a price
#[derive(Args)]
pub struct ImpliedRateArgs {
    /// Face value per title
    #[arg(long, default_value = "10")]
    pub face_value: Decimal,

    /// Price paid per title
    #[arg(long)]
    pub price: Decimal,

    /// Days to maturity
    #[arg(long)]
    pub days: u32,
}

pub fn run_implied_rate(args: ImpliedRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = implied_discount_rate(args.face_value, args.price, args.days)?;
    Ok(serde_json::json!({
        "implied_discount_rate": rate,
        "face_value": args.face_value,
        "price": args.price,
        "days": args.days,
    }))
}
