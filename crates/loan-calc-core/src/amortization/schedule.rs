use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::payment::annuity_payment;
use crate::types::*;
use crate::LoanCalcResult;

/// Schedule request: loan terms plus an optional first due date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    #[serde(flatten)]
    pub loan: LoanParameters,
    /// When set, every row carries its due date (one month apart).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// One period of the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based period index.
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Interest plus principal actually paid this period.
    pub payment: Money,
    pub interest_payment: Money,
    pub principal_payment: Money,
    /// Balance after this period's payment.
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub rows: Vec<AmortizationRow>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_date: Option<NaiveDate>,
}

/// Expand a loan into its period-by-period ledger.
pub fn build_schedule(loan: &LoanParameters) -> LoanCalcResult<AmortizationSchedule> {
    build_dated_schedule(loan, None)
}

/// Full amortization schedule, wrapped in the standard envelope.
pub fn amortize(
    input: &AmortizationInput,
) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();

    let schedule = build_dated_schedule(&input.loan, input.first_payment_date)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization schedule (residue absorbed in final period)",
        input,
        Vec::new(),
        elapsed,
        schedule,
    ))
}

fn build_dated_schedule(
    loan: &LoanParameters,
    first_payment_date: Option<NaiveDate>,
) -> LoanCalcResult<AmortizationSchedule> {
    loan.validate()?;

    let monthly_rate = loan.monthly_rate();
    let payment = annuity_payment(loan.principal, monthly_rate, loan.term_months)?;

    let mut rows = Vec::with_capacity(loan.term_months as usize);
    let mut balance = loan.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for period in 1..=loan.term_months {
        let interest = balance * monthly_rate;

        // Never negative, never more than what is owed; the final period
        // takes whatever drift is left so the balance lands on zero.
        let mut principal = (payment - interest).max(Decimal::ZERO);
        if period == loan.term_months || principal > balance {
            principal = balance;
        }
        balance -= principal;

        total_interest = add_or_overflow(total_interest, interest, "schedule total interest")?;
        total_principal += principal;

        let payment_date = match first_payment_date {
            Some(first) => Some(due_date(first, period)?),
            None => None,
        };

        rows.push(AmortizationRow {
            period,
            payment_date,
            payment: principal + interest,
            interest_payment: interest,
            principal_payment: principal,
            remaining_balance: balance,
        });
    }

    let payoff_date = rows.last().and_then(|r| r.payment_date);
    let total_payment = add_or_overflow(total_interest, total_principal, "schedule total")?;

    Ok(AmortizationSchedule {
        monthly_payment: payment,
        total_payment,
        total_interest,
        total_principal,
        rows,
        payoff_date,
    })
}

/// Due date of `period` given the first due date.
pub(crate) fn due_date(first: NaiveDate, period: u32) -> LoanCalcResult<NaiveDate> {
    first
        .checked_add_months(Months::new(period - 1))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: format!("due date of period {period}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn mortgage() -> LoanParameters {
        LoanParameters::new(dec!(200000), dec!(6), 360)
    }

    #[test]
    fn test_schedule_length_and_first_row() {
        let sched = build_schedule(&mortgage()).unwrap();
        assert_eq!(sched.rows.len(), 360);

        let first = &sched.rows[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.interest_payment, dec!(1000));
        assert!((first.principal_payment - dec!(199.10)).abs() < dec!(0.01));
    }

    #[test]
    fn test_final_balance_exactly_zero() {
        let sched = build_schedule(&mortgage()).unwrap();
        let last = sched.rows.last().unwrap();
        assert_eq!(last.period, 360);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_rows_split_payment_exactly_except_last() {
        let sched = build_schedule(&mortgage()).unwrap();
        for row in &sched.rows[..359] {
            let diff = row.interest_payment + row.principal_payment - sched.monthly_payment;
            assert!(diff.abs() < dec!(0.0000000001), "period {}: {diff}", row.period);
        }
        let last = sched.rows.last().unwrap();
        assert!((last.payment - sched.monthly_payment).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_rate_thirds() {
        let loan = LoanParameters::new(dec!(1000), Decimal::ZERO, 3);
        let sched = build_schedule(&loan).unwrap();
        assert!(sched.rows.iter().all(|r| r.interest_payment.is_zero()));
        assert_eq!(sched.rows[2].remaining_balance, Decimal::ZERO);
        assert_eq!(sched.total_principal, dec!(1000));
    }

    #[test]
    fn test_dated_rows() {
        let input = AmortizationInput {
            loan: LoanParameters::new(dec!(1200), dec!(5), 3),
            first_payment_date: NaiveDate::from_ymd_opt(2024, 1, 31),
        };
        let out = amortize(&input).unwrap();
        let dates: Vec<_> = out.result.rows.iter().map(|r| r.payment_date).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 1, 31),
                NaiveDate::from_ymd_opt(2024, 2, 29),
                NaiveDate::from_ymd_opt(2024, 3, 31),
            ]
        );
        assert_eq!(out.result.payoff_date, NaiveDate::from_ymd_opt(2024, 3, 31));
    }

    #[test]
    fn test_huge_principal_reports_overflow() {
        let loan = LoanParameters::new(dec!(70000000000000000000000000000), dec!(6), 360);
        assert!(matches!(
            build_schedule(&loan),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_term_beyond_limit_is_rejected_before_allocating() {
        let loan = LoanParameters::new(dec!(1000), Decimal::ZERO, 4_000_000_000);
        assert!(matches!(
            build_schedule(&loan),
            Err(LoanCalcError::InvalidArgument { .. })
        ));
        let longest = LoanParameters::new(dec!(1000), Decimal::ZERO, MAX_TERM_MONTHS);
        assert_eq!(build_schedule(&longest).unwrap().rows.len(), 1200);
    }

    #[test]
    fn test_invalid_loan_propagates() {
        let loan = LoanParameters::new(dec!(-5), dec!(5), 12);
        assert!(matches!(
            build_schedule(&loan),
            Err(LoanCalcError::InvalidArgument { .. })
        ));
    }
}
