use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::analysis::comparison::{self, LoanComparisonInput};
use loan_calc_core::analysis::extra_payment::{self, ExtraPaymentInput};
use loan_calc_core::analysis::refinance::{self, CurrentLoan, ProposedLoan, RefinanceInput};

use super::payment::LoanArgs;
use crate::input;

/// Arguments for refinance break-even analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RefinanceArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Outstanding balance on the current loan
    #[arg(long)]
    pub balance: Option<Decimal>,

    /// Current annual rate as a percentage
    #[arg(long)]
    pub current_rate: Option<Decimal>,

    /// Months left on the current loan
    #[arg(long)]
    pub remaining_months: Option<u32>,

    /// Proposed annual rate as a percentage
    #[arg(long)]
    pub new_rate: Option<Decimal>,

    /// Proposed term in months
    #[arg(long)]
    pub new_term_months: Option<u32>,

    /// One-time refinancing costs
    #[arg(long, default_value = "0")]
    pub closing_costs: Decimal,

    /// Include the month-by-month cumulative savings series
    #[arg(long)]
    pub timeline: bool,
}

pub fn run_refinance(args: RefinanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input: RefinanceInput = match input::file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RefinanceInput {
            current: CurrentLoan {
                balance: args
                    .balance
                    .ok_or("--balance is required (or provide --input)")?,
                annual_rate_percent: args
                    .current_rate
                    .ok_or("--current-rate is required (or provide --input)")?,
                remaining_months: args
                    .remaining_months
                    .ok_or("--remaining-months is required (or provide --input)")?,
            },
            proposed: ProposedLoan {
                annual_rate_percent: args
                    .new_rate
                    .ok_or("--new-rate is required (or provide --input)")?,
                term_months: args
                    .new_term_months
                    .ok_or("--new-term-months is required (or provide --input)")?,
                closing_costs: args.closing_costs,
            },
            include_timeline: args.timeline,
        },
    };
    let result = refinance::analyze_refinance(&refi_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for loan offer comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON/YAML input file with loan_amount, loan_term_years and options
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cmp_input: LoanComparisonInput = input::file_or_stdin(args.input.as_deref())?
        .ok_or("--input <file.json|file.yaml> or stdin required for loan comparison")?;
    let result = comparison::compare_loans(&cmp_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for extra-payment payoff analysis
#[derive(Args)]
pub struct ExtraPaymentArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra principal paid every month
    #[arg(long, allow_hyphen_values = true)]
    pub extra: Option<Decimal>,
}

pub fn run_extra_payment(args: ExtraPaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let xp_input: ExtraPaymentInput = match input::file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ExtraPaymentInput {
            loan: args.loan.to_params()?,
            monthly_extra_payment: args
                .extra
                .ok_or("--extra is required (or provide --input)")?,
        },
    };
    let result = extra_payment::analyze_extra_payment(&xp_input)?;
    Ok(serde_json::to_value(result)?)
}
