//! Rank competing loan offers for the same amount and term by total cost.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::payment::monthly_payment;
use crate::types::*;
use crate::LoanCalcResult;

/// A single offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOption {
    pub name: String,
    /// Annual rate as a percentage.
    pub rate: Rate,
    /// Discount points, each 1% of the loan amount.
    #[serde(default)]
    pub points: Decimal,
    /// Flat up-front fees.
    #[serde(default)]
    pub fees: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonInput {
    pub loan_amount: Money,
    pub loan_term_years: u32,
    pub options: Vec<LoanOption>,
}

/// An offer with its derived costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedLoanOption {
    pub name: String,
    pub rate: Rate,
    pub points: Decimal,
    pub fees: Money,
    pub monthly_payment: Money,
    pub points_cost: Money,
    /// All payments plus points and fees.
    pub total_cost: Money,
    /// Total cost less the amount borrowed and fees.
    pub total_interest: Money,
    /// Excess total cost over the best offer.
    pub cost_above_best: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparisonOutput {
    pub term_months: u32,
    /// Cheapest first.
    pub ranked: Vec<RankedLoanOption>,
    pub best_option: String,
}

/// Price every offer and rank them by ascending total cost, then ascending
/// monthly payment. Equal offers keep their input order.
pub fn compare_loans(
    input: &LoanComparisonInput,
) -> LoanCalcResult<ComputationOutput<LoanComparisonOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.options.is_empty() {
        return Err(LoanCalcError::EmptyInput(
            "Loan comparison requires at least one option".into(),
        ));
    }
    let term_months = input.loan_term_years.checked_mul(12).ok_or_else(|| {
        LoanCalcError::invalid("loan_term_years", "Term is too long to express in months")
    })?;

    let mut ranked = input
        .options
        .iter()
        .map(|opt| price_option(input.loan_amount, term_months, opt))
        .collect::<LoanCalcResult<Vec<_>>>()?;

    ranked.sort_by(|a, b| {
        a.total_cost
            .cmp(&b.total_cost)
            .then_with(|| a.monthly_payment.cmp(&b.monthly_payment))
    });

    let best_cost = ranked[0].total_cost;
    for opt in ranked.iter_mut() {
        opt.cost_above_best = opt.total_cost - best_cost;
    }

    if ranked.len() > 1 && ranked[0].total_cost == ranked[1].total_cost {
        warnings.push(format!(
            "'{}' and '{}' cost the same in total; ranked by monthly payment",
            ranked[0].name, ranked[1].name
        ));
    }

    let output = LoanComparisonOutput {
        term_months,
        best_option: ranked[0].name.clone(),
        ranked,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Total cost of borrowing comparison",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn price_option(
    loan_amount: Money,
    term_months: u32,
    opt: &LoanOption,
) -> LoanCalcResult<RankedLoanOption> {
    validate_non_negative("points", opt.points)?;
    validate_non_negative("fees", opt.fees)?;

    let payment = monthly_payment(&LoanParameters::new(loan_amount, opt.rate, term_months))?;
    let context = format!("total cost of '{}'", opt.name);
    let points_cost = mul_or_overflow(loan_amount, opt.points, &context)? / dec!(100);
    let total_payments = mul_or_overflow(payment, Decimal::from(term_months), &context)?;
    let total_cost = add_or_overflow(
        add_or_overflow(total_payments, points_cost, &context)?,
        opt.fees,
        &context,
    )?;

    Ok(RankedLoanOption {
        name: opt.name.clone(),
        rate: opt.rate,
        points: opt.points,
        fees: opt.fees,
        monthly_payment: payment,
        points_cost,
        total_cost,
        total_interest: total_cost - loan_amount - opt.fees,
        cost_above_best: Decimal::ZERO,
    })
}
