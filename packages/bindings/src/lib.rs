use cetes_core::exercises::{solve_all, ExerciseSolution};
use cetes_core::pricing::{compute_purchase_price, implied_discount_rate as implied_rate};
use cetes_core::report::build_report as build_summary;
use cetes_core::InvestmentScenario;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate(input_json: String) -> NapiResult<String> {
    let scenario: InvestmentScenario = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cetes_core::simulate(&scenario).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_report(input_json: String) -> NapiResult<String> {
    let scenario: InvestmentScenario = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = cetes_core::simulate(&scenario).map_err(to_napi_error)?;
    let mut value = build_summary(&scenario, &output.result).to_value();
    value["warnings"] = serde_json::json!(output.warnings);
    serde_json::to_string(&value).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PriceRequest {
    face_value: Decimal,
    discount_rate: Decimal,
    days: u32,
}

#[derive(Serialize)]
struct PriceResponse {
    purchase_price: Decimal,
    discount_per_title: Decimal,
}

#[napi]
pub fn purchase_price(input_json: String) -> NapiResult<String> {
    let req: PriceRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let price = compute_purchase_price(req.face_value, req.discount_rate, req.days)
        .map_err(to_napi_error)?;
    let response = PriceResponse {
        purchase_price: price,
        discount_per_title: req.face_value - price,
    };
    serde_json::to_string(&response).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct ImpliedRateRequest {
    face_value: Decimal,
    price: Decimal,
    days: u32,
}

#[derive(Serialize)]
struct ImpliedRateResponse {
    implied_discount_rate: Decimal,
}

#[napi]
pub fn implied_discount_rate(input_json: String) -> NapiResult<String> {
    let req: ImpliedRateRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let rate = implied_rate(req.face_value, req.price, req.days).map_err(to_napi_error)?;
    serde_json::to_string(&ImpliedRateResponse {
        implied_discount_rate: rate,
    })
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Exercises
// ---------------------------------------------------------------------------

#[napi]
pub fn worked_exercises() -> NapiResult<String> {
    let solutions: Vec<ExerciseSolution> = solve_all().map_err(to_napi_error)?;
    serde_json::to_string(&solutions).map_err(to_napi_error)
}
