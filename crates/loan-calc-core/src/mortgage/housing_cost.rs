//! Full monthly housing cost for a home purchase: principal and interest
//! plus property tax, insurance, PMI and HOA dues.
//!
//! Only the loan amount (price less down payment) is financed. Escrow items
//! are added on top of the core payment and never change it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::build_schedule;
use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Loan-to-value at or below which PMI is no longer charged.
const PMI_LTV_THRESHOLD: Decimal = dec!(0.80);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingCostInput {
    pub home_price: Money,
    #[serde(default)]
    pub down_payment: Money,
    pub annual_rate_percent: Rate,
    pub term_years: u32,
    #[serde(default)]
    pub property_tax_annual: Money,
    #[serde(default)]
    pub insurance_annual: Money,
    /// Annual PMI premium as a percentage of the loan amount.
    #[serde(default)]
    pub pmi_rate_percent: Rate,
    #[serde(default)]
    pub hoa_monthly: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HousingCostOutput {
    pub loan_amount: Money,
    pub loan_to_value_percent: Rate,
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub pmi: Money,
    pub hoa: Money,
    pub total_monthly_payment: Money,
    pub total_interest: Money,
    /// First period whose closing balance is at or below 80% of the price.
    pub pmi_removal_period: Option<u32>,
}

/// Monthly cost breakdown for a purchase financed with a fixed-rate mortgage.
pub fn housing_cost(
    input: &HousingCostInput,
) -> LoanCalcResult<ComputationOutput<HousingCostOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let term_months = input.term_years.checked_mul(12).ok_or_else(|| {
        LoanCalcError::invalid("term_years", "Term is too long to express in months")
    })?;
    let loan_amount = input.home_price - input.down_payment;
    let loan = LoanParameters::new(loan_amount, input.annual_rate_percent, term_months);
    let schedule = build_schedule(&loan)?;

    let ltv = loan_amount / input.home_price;
    let pmi_balance_limit = input.home_price * PMI_LTV_THRESHOLD;

    let (pmi, pmi_removal_period) = if ltv > PMI_LTV_THRESHOLD {
        let removal = schedule
            .rows
            .iter()
            .find(|r| r.remaining_balance <= pmi_balance_limit)
            .map(|r| r.period);
        let monthly_pmi =
            mul_or_overflow(loan_amount, input.pmi_rate_percent, "PMI")? / dec!(100) / dec!(12);
        if input.pmi_rate_percent.is_zero() {
            warnings.push(format!(
                "Down payment is below 20% (LTV {}%) but no PMI rate was given",
                (ltv * dec!(100)).round_dp(2)
            ));
        }
        (monthly_pmi, removal)
    } else {
        (Decimal::ZERO, None)
    };

    let property_tax = input.property_tax_annual / dec!(12);
    let insurance = input.insurance_annual / dec!(12);
    let total_monthly_payment = [property_tax, insurance, pmi, input.hoa_monthly]
        .into_iter()
        .try_fold(schedule.monthly_payment, |acc, item| {
            add_or_overflow(acc, item, "total monthly housing cost")
        })?;

    let output = HousingCostOutput {
        loan_amount,
        loan_to_value_percent: ltv * dec!(100),
        principal_and_interest: schedule.monthly_payment,
        property_tax,
        insurance,
        pmi,
        hoa: input.hoa_monthly,
        total_monthly_payment,
        total_interest: schedule.total_interest,
        pmi_removal_period,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage housing cost (PITI + PMI + HOA)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate_input(input: &HousingCostInput) -> LoanCalcResult<()> {
    if input.home_price <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "home_price",
            "Home price must be positive",
        ));
    }
    validate_non_negative("down_payment", input.down_payment)?;
    if input.down_payment >= input.home_price {
        return Err(LoanCalcError::invalid(
            "down_payment",
            "Down payment must be less than the home price",
        ));
    }
    validate_non_negative("property_tax_annual", input.property_tax_annual)?;
    validate_non_negative("insurance_annual", input.insurance_annual)?;
    validate_non_negative("pmi_rate_percent", input.pmi_rate_percent)?;
    validate_non_negative("hoa_monthly", input.hoa_monthly)
}
