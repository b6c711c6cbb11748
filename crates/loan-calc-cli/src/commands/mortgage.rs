use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::mortgage::affordability::{self, AffordabilityInput};
use loan_calc_core::mortgage::housing_cost::{self, HousingCostInput};

use crate::input;

/// Arguments for the monthly housing cost breakdown
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct HousingCostArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Cash paid up front
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Mortgage term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub property_tax: Decimal,

    /// Annual homeowner's insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual PMI as a percentage of the loan amount
    #[arg(long, default_value = "0")]
    pub pmi_rate: Decimal,

    /// Monthly HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,
}

pub fn run_housing_cost(args: HousingCostArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let hc_input: HousingCostInput = match input::file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => HousingCostInput {
            home_price: args
                .home_price
                .ok_or("--home-price is required (or provide --input)")?,
            down_payment: args.down_payment,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term_years,
            property_tax_annual: args.property_tax,
            insurance_annual: args.insurance,
            pmi_rate_percent: args.pmi_rate,
            hoa_monthly: args.hoa,
        },
    };
    let result = housing_cost::housing_cost(&hc_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for mortgage affordability
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AffordabilityArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Gross monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// Other monthly debt payments
    #[arg(long, default_value = "0")]
    pub debts: Decimal,

    /// Maximum debt-to-income ratio as a percentage
    #[arg(long, default_value = "36")]
    pub max_dti: Decimal,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Mortgage term in years
    #[arg(long, default_value = "30")]
    pub term_years: u32,

    /// Expected monthly taxes, insurance and dues
    #[arg(long, default_value = "0")]
    pub escrow: Decimal,

    /// Cash available for the down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let aff_input: AffordabilityInput = match input::file_or_stdin(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AffordabilityInput {
            monthly_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            monthly_debts: args.debts,
            max_dti_percent: args.max_dti,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.term_years,
            monthly_escrow: args.escrow,
            down_payment: args.down_payment,
        },
    };
    let result = affordability::affordability(&aff_input)?;
    Ok(serde_json::to_value(result)?)
}
