use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use loan_calc_core::amortization::schedule::{self, AmortizationInput};
use loan_calc_core::amortization::summary;

use super::payment::LoanArgs;
use crate::input;

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Due date of the first payment (YYYY-MM-DD); dates every row
    #[arg(long)]
    pub first_payment_date: Option<NaiveDate>,
}

/// Arguments for the yearly amortization summary
#[derive(Args)]
pub struct YearlyArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

fn amortization_input(
    path: Option<&str>,
    loan: &LoanArgs,
    first_payment_date: Option<NaiveDate>,
) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
    match input::file_or_stdin(path)? {
        Some(parsed) => Ok(parsed),
        None => Ok(AmortizationInput {
            loan: loan.to_params()?,
            first_payment_date,
        }),
    }
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let am_input = amortization_input(
        args.input.as_deref(),
        &args.loan,
        args.first_payment_date,
    )?;
    let result = schedule::amortize(&am_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_yearly(args: YearlyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let am_input = amortization_input(args.input.as_deref(), &args.loan, None)?;
    let result = summary::summarize(&am_input)?;
    Ok(serde_json::to_value(result)?)
}
