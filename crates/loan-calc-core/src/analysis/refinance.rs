//! Refinance analysis: monthly savings, break-even month and lifetime cost
//! of replacing an existing loan balance with a new loan.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::payment::monthly_payment;
use crate::types::*;
use crate::LoanCalcResult;

/// The loan being replaced, as it stands today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentLoan {
    /// Outstanding balance.
    pub balance: Money,
    pub annual_rate_percent: Rate,
    pub remaining_months: u32,
}

/// The replacement loan. It refinances the current balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedLoan {
    pub annual_rate_percent: Rate,
    pub term_months: u32,
    /// One-time cost of refinancing, paid up front.
    #[serde(default)]
    pub closing_costs: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current: CurrentLoan,
    pub proposed: ProposedLoan,
    /// Also produce the month-by-month cumulative savings series.
    #[serde(default)]
    pub include_timeline: bool,
}

/// Cumulative position `month` periods after refinancing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeSavingsPoint {
    pub month: u32,
    pub cumulative_savings: Money,
    /// Cumulative savings less closing costs.
    pub net_position: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub current_monthly_payment: Money,
    pub new_monthly_payment: Money,
    /// Current minus new payment; negative when refinancing costs more monthly.
    pub monthly_savings: Money,
    pub closing_costs: Money,
    /// Months until savings cover closing costs; `None` means never.
    pub break_even_months: Option<u32>,
    /// Remaining payments on the current loan less all payments on the new
    /// loan less closing costs.
    pub lifetime_savings: Money,
    pub current_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_savings: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_savings: Option<Vec<CumulativeSavingsPoint>>,
    /// Break-even month if it falls within the new loan's term.
    pub break_even_within_term: Option<u32>,
}

/// Compare keeping the current loan with refinancing it.
pub fn analyze_refinance(
    input: &RefinanceInput,
) -> LoanCalcResult<ComputationOutput<RefinanceComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_non_negative("closing_costs", input.proposed.closing_costs)?;

    let current = LoanParameters::new(
        input.current.balance,
        input.current.annual_rate_percent,
        input.current.remaining_months,
    );
    let proposed = LoanParameters::new(
        input.current.balance,
        input.proposed.annual_rate_percent,
        input.proposed.term_months,
    );

    let current_payment = monthly_payment(&current)?;
    let new_payment = monthly_payment(&proposed)?;

    let monthly_savings = current_payment - new_payment;
    let closing_costs = input.proposed.closing_costs;

    let current_total = mul_or_overflow(
        current_payment,
        Decimal::from(current.term_months),
        "current loan total payments",
    )?;
    let new_total = mul_or_overflow(
        new_payment,
        Decimal::from(proposed.term_months),
        "new loan total payments",
    )?;
    let current_total_interest = current_total - current.principal;
    let new_total_interest = new_total - proposed.principal;
    let lifetime_savings = sub_or_overflow(
        current_total - new_total,
        closing_costs,
        "lifetime savings",
    )?;

    let break_even = break_even_months(monthly_savings, closing_costs)?;

    let (cumulative_savings, break_even_within_term) = if input.include_timeline {
        let (points, month) =
            savings_timeline(monthly_savings, closing_costs, proposed.term_months)?;
        (Some(points), month)
    } else {
        (
            None,
            break_even.filter(|n| *n <= proposed.term_months),
        )
    };

    if monthly_savings <= Decimal::ZERO {
        warnings.push(format!(
            "New payment is not lower than the current payment (savings {monthly_savings}); refinancing never breaks even"
        ));
    }
    if proposed.term_months > current.term_months {
        warnings.push(format!(
            "New term of {} months extends the payoff horizon by {} months",
            proposed.term_months,
            proposed.term_months - current.term_months
        ));
    }
    if monthly_savings > Decimal::ZERO && lifetime_savings < Decimal::ZERO {
        warnings.push(
            "Monthly payment falls but total cost over the life of the loan rises".into(),
        );
    }
    if break_even.is_some() && break_even_within_term.is_none() {
        warnings.push("Break-even falls after the new loan is repaid".into());
    }

    let output = RefinanceComparison {
        current_monthly_payment: current_payment,
        new_monthly_payment: new_payment,
        monthly_savings,
        closing_costs,
        break_even_months: break_even,
        lifetime_savings,
        current_total_interest,
        new_total_interest,
        interest_savings: current_total_interest - new_total_interest,
        cumulative_savings,
        break_even_within_term,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Refinance break-even analysis",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Smallest `n` with `n * monthly_savings >= closing_costs`. `None` only when
/// savings are not positive; a month count past `u32` is an `Overflow` error.
pub fn break_even_months(
    monthly_savings: Money,
    closing_costs: Money,
) -> LoanCalcResult<Option<u32>> {
    if monthly_savings <= Decimal::ZERO {
        return Ok(None);
    }
    if closing_costs <= Decimal::ZERO {
        return Ok(Some(0));
    }

    const CONTEXT: &str = "break-even month";
    let mut n = closing_costs
        .checked_div(monthly_savings)
        .ok_or_else(|| LoanCalcError::overflow(CONTEXT))?
        .ceil();
    // Division rounds at the 28th digit; settle on the exact boundary.
    while mul_or_overflow(n, monthly_savings, CONTEXT)? < closing_costs {
        n += Decimal::ONE;
    }
    while n > Decimal::ZERO
        && mul_or_overflow(n - Decimal::ONE, monthly_savings, CONTEXT)? >= closing_costs
    {
        n -= Decimal::ONE;
    }
    n.to_u32().map(Some).ok_or_else(|| LoanCalcError::overflow(CONTEXT))
}

/// Walk month by month (starting at month 0) accumulating savings, up to
/// `term_months`. Returns the series and the first month where cumulative
/// savings meet the closing costs.
fn savings_timeline(
    monthly_savings: Money,
    closing_costs: Money,
    term_months: u32,
) -> LoanCalcResult<(Vec<CumulativeSavingsPoint>, Option<u32>)> {
    let mut points = Vec::with_capacity(term_months as usize + 1);
    let mut cumulative = Decimal::ZERO;
    let mut break_even = None;

    for month in 0..=term_months {
        if month > 0 {
            cumulative = add_or_overflow(cumulative, monthly_savings, "cumulative savings")?;
        }
        if break_even.is_none() && monthly_savings > Decimal::ZERO && cumulative >= closing_costs
        {
            break_even = Some(month);
        }
        points.push(CumulativeSavingsPoint {
            month,
            cumulative_savings: cumulative,
            net_position: sub_or_overflow(cumulative, closing_costs, "net position")?,
        });
    }

    Ok((points, break_even))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn refi_input() -> RefinanceInput {
        RefinanceInput {
            current: CurrentLoan {
                balance: dec!(200000),
                annual_rate_percent: dec!(7),
                remaining_months: 300,
            },
            proposed: ProposedLoan {
                annual_rate_percent: dec!(5.5),
                term_months: 360,
                closing_costs: dec!(3000),
            },
            include_timeline: false,
        }
    }

    #[test]
    fn test_break_even_exact_division() {
        assert_eq!(break_even_months(dec!(100), dec!(3000)).unwrap(), Some(30));
    }

    #[test]
    fn test_break_even_rounds_up() {
        assert_eq!(break_even_months(dec!(100), dec!(3001)).unwrap(), Some(31));
    }

    #[test]
    fn test_break_even_never() {
        assert_eq!(break_even_months(Decimal::ZERO, dec!(3000)).unwrap(), None);
        assert_eq!(break_even_months(dec!(-10), dec!(3000)).unwrap(), None);
    }

    #[test]
    fn test_break_even_past_month_range_is_overflow() {
        // Positive savings always break even eventually; an unrepresentable
        // month count is an error rather than "never".
        assert!(matches!(
            break_even_months(dec!(1), dec!(1000000000000)),
            Err(LoanCalcError::Overflow { .. })
        ));
        assert!(matches!(
            break_even_months(dec!(0.0000000000000000000000000001), dec!(10000000000)),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_huge_balance_reports_overflow() {
        let mut input = refi_input();
        input.current.balance = dec!(70000000000000000000000000000);
        assert!(matches!(
            analyze_refinance(&input),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_break_even_without_costs() {
        assert_eq!(break_even_months(dec!(50), Decimal::ZERO).unwrap(), Some(0));
    }

    #[test]
    fn test_refinance_lower_rate_saves() {
        let out = analyze_refinance(&refi_input()).unwrap();
        let r = &out.result;
        assert!(r.monthly_savings > Decimal::ZERO);
        let n = r.break_even_months.unwrap();
        assert!(Decimal::from(n) * r.monthly_savings >= r.closing_costs);
        assert!(Decimal::from(n - 1) * r.monthly_savings < r.closing_costs);
        assert_eq!(r.break_even_within_term, Some(n));
        // Longer term triggers the horizon warning.
        assert!(out.warnings.iter().any(|w| w.contains("extends")));
    }

    #[test]
    fn test_timeline_matches_arithmetic() {
        let mut input = refi_input();
        input.include_timeline = true;
        let r = analyze_refinance(&input).unwrap().result;
        let points = r.cumulative_savings.as_ref().unwrap();
        assert_eq!(points.len(), 361);
        assert_eq!(points[0].net_position, dec!(-3000));
        assert_eq!(r.break_even_within_term, r.break_even_months);
    }

    #[test]
    fn test_higher_rate_never_breaks_even() {
        let mut input = refi_input();
        input.proposed.annual_rate_percent = dec!(8);
        input.proposed.term_months = 300;
        input.include_timeline = true;
        let out = analyze_refinance(&input).unwrap();
        assert!(out.result.monthly_savings < Decimal::ZERO);
        assert_eq!(out.result.break_even_months, None);
        assert_eq!(out.result.break_even_within_term, None);
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn test_negative_closing_costs_rejected() {
        let mut input = refi_input();
        input.proposed.closing_costs = dec!(-1);
        assert!(analyze_refinance(&input).is_err());
    }

    #[test]
    fn test_invalid_current_loan_rejected() {
        let mut input = refi_input();
        input.current.remaining_months = 0;
        assert!(analyze_refinance(&input).is_err());
    }
}
