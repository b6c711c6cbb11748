use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::payment;
use loan_calc_core::LoanParameters;

use crate::input;

/// Loan terms shared by every single-loan command
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage (e.g. 6.5 for 6.5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long, conflicts_with = "term_years")]
    pub term_months: Option<u32>,

    /// Term in years (converted to months)
    #[arg(long)]
    pub term_years: Option<u32>,
}

impl LoanArgs {
    pub fn to_params(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let term_months = match (self.term_months, self.term_years) {
            (Some(months), _) => months,
            (None, Some(years)) => years
                .checked_mul(12)
                .ok_or("--term-years is too large")?,
            (None, None) => {
                return Err("--term-months or --term-years is required (or provide --input)".into())
            }
        };
        Ok(LoanParameters::new(principal, rate, term_months))
    }
}

/// Arguments for the monthly payment calculation
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan: LoanParameters = match input::file_or_stdin(args.input.as_deref())? {
        Some(loan) => loan,
        None => args.loan.to_params()?,
    };
    let result = payment::calculate_payment(&loan)?;
    Ok(serde_json::to_value(result)?)
}
