use napi::Result as NapiResult;
use napi_derive::napi;
use serde::{de::DeserializeOwned, Serialize};

use loan_calc_core::LoanCalcResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse the JSON input, run the calculation and serialize its envelope.
fn run_json<I, O>(
    input_json: &str,
    calc: impl FnOnce(&I) -> LoanCalcResult<O>,
) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calc(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Payment & schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_payment(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::payment::calculate_payment)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::amortization::schedule::amortize)
}

#[napi]
pub fn yearly_summary(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::amortization::summary::summarize)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn refinance_analysis(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::analysis::refinance::analyze_refinance)
}

#[napi]
pub fn compare_loans(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::analysis::comparison::compare_loans)
}

#[napi]
pub fn extra_payment_analysis(input_json: String) -> NapiResult<String> {
    run_json(
        &input_json,
        loan_calc_core::analysis::extra_payment::analyze_extra_payment,
    )
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn housing_cost(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::mortgage::housing_cost::housing_cost)
}

#[napi]
pub fn mortgage_affordability(input_json: String) -> NapiResult<String> {
    run_json(&input_json, loan_calc_core::mortgage::affordability::affordability)
}
