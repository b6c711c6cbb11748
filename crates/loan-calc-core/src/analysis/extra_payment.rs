//! Accelerated payoff from a constant extra principal payment each month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::schedule::build_schedule;
use crate::types::*;
use crate::LoanCalcResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentInput {
    #[serde(flatten)]
    pub loan: LoanParameters,
    /// Additional principal paid on top of the scheduled payment.
    pub monthly_extra_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentRow {
    pub period: u32,
    pub interest_payment: Money,
    /// Scheduled principal portion.
    pub principal_payment: Money,
    /// Extra principal actually applied (capped at the balance).
    pub extra_payment: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtraPaymentOutput {
    pub monthly_payment: Money,
    pub monthly_extra_payment: Money,
    /// Periods until the balance reaches zero.
    pub actual_term_months: u32,
    pub months_saved: u32,
    pub total_interest: Money,
    /// Interest over the full term without extra payments.
    pub baseline_total_interest: Money,
    pub interest_saved: Money,
    pub rows: Vec<ExtraPaymentRow>,
}

/// Simulate paydown with `monthly_extra_payment` added every period,
/// stopping as soon as the balance is cleared.
pub fn analyze_extra_payment(
    input: &ExtraPaymentInput,
) -> LoanCalcResult<ComputationOutput<ExtraPaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = &input.loan;
    loan.validate()?;
    validate_non_negative("monthly_extra_payment", input.monthly_extra_payment)?;

    let baseline = build_schedule(loan)?;
    let payment = baseline.monthly_payment;
    let monthly_rate = loan.monthly_rate();

    let mut rows = Vec::new();
    let mut balance = loan.principal;
    let mut total_interest = Decimal::ZERO;

    for period in 1..=loan.term_months {
        let interest = balance * monthly_rate;

        let mut principal = (payment - interest).max(Decimal::ZERO);
        if period == loan.term_months || principal > balance {
            principal = balance;
        }
        let remaining = balance - principal;
        let extra = input.monthly_extra_payment.min(remaining);
        balance = remaining - extra;
        total_interest = add_or_overflow(total_interest, interest, "accelerated total interest")?;

        rows.push(ExtraPaymentRow {
            period,
            interest_payment: interest,
            principal_payment: principal,
            extra_payment: extra,
            remaining_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    let actual_term_months = rows.len() as u32;
    if input.monthly_extra_payment >= loan.principal {
        warnings.push("Extra payment covers the full principal in the first period".into());
    }

    let output = ExtraPaymentOutput {
        monthly_payment: payment,
        monthly_extra_payment: input.monthly_extra_payment,
        actual_term_months,
        months_saved: loan.term_months - actual_term_months,
        total_interest,
        baseline_total_interest: baseline.total_interest,
        interest_saved: baseline.total_interest - total_interest,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Accelerated payoff with constant extra principal",
        input,
        warnings,
        elapsed,
        output,
    ))
}
