//! How much house a monthly budget supports under a debt-to-income cap.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::payment::max_principal;
use crate::types::*;
use crate::LoanCalcResult;

fn default_max_dti() -> Rate {
    dec!(36)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    /// Gross monthly income.
    pub monthly_income: Money,
    /// Other recurring debt payments.
    #[serde(default)]
    pub monthly_debts: Money,
    /// Back-end debt-to-income cap as a percentage.
    #[serde(default = "default_max_dti")]
    pub max_dti_percent: Rate,
    pub annual_rate_percent: Rate,
    pub term_years: u32,
    /// Taxes, insurance and dues expected on top of principal and interest.
    #[serde(default)]
    pub monthly_escrow: Money,
    #[serde(default)]
    pub down_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    /// Housing payment the DTI cap leaves room for.
    pub max_housing_payment: Money,
    /// Portion of it available for principal and interest.
    pub principal_and_interest_budget: Money,
    pub max_loan_amount: Money,
    pub max_home_price: Money,
}

pub fn affordability(
    input: &AffordabilityInput,
) -> LoanCalcResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_income <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "monthly_income",
            "Income must be positive",
        ));
    }
    validate_non_negative("monthly_debts", input.monthly_debts)?;
    validate_non_negative("monthly_escrow", input.monthly_escrow)?;
    validate_non_negative("down_payment", input.down_payment)?;
    if input.max_dti_percent <= Decimal::ZERO || input.max_dti_percent > dec!(100) {
        return Err(LoanCalcError::invalid(
            "max_dti_percent",
            "Debt-to-income cap must be in (0, 100]",
        ));
    }
    validate_rate("annual_rate_percent", input.annual_rate_percent)?;
    let term_months = input.term_years.checked_mul(12).ok_or_else(|| {
        LoanCalcError::invalid("term_years", "Term is too long to express in months")
    })?;
    validate_term("term_years", term_months)?;

    let dti_allowance =
        mul_or_overflow(input.monthly_income, input.max_dti_percent, "DTI allowance")? / dec!(100);
    let max_housing_payment = (dti_allowance - input.monthly_debts).max(Decimal::ZERO);
    let pi_budget = (max_housing_payment - input.monthly_escrow).max(Decimal::ZERO);

    let max_loan_amount = if pi_budget.is_zero() {
        warnings.push(
            "Existing debts and escrow use the whole debt-to-income allowance".into(),
        );
        Decimal::ZERO
    } else {
        max_principal(pi_budget, input.annual_rate_percent, term_months)?
    };

    let output = AffordabilityOutput {
        max_housing_payment,
        principal_and_interest_budget: pi_budget,
        max_loan_amount,
        max_home_price: add_or_overflow(max_loan_amount, input.down_payment, "max home price")?,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt-to-income affordability",
        input,
        warnings,
        elapsed,
        output,
    ))
}
