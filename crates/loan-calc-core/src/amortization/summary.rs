//! Year-by-year roll-up of an amortization schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{self, AmortizationInput, AmortizationSchedule};
use crate::types::*;
use crate::LoanCalcResult;

const PERIODS_PER_YEAR: usize = 12;

/// Twelve consecutive periods (the last bucket may be shorter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlySummary {
    /// 1-based loan year.
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    pub ending_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlySummaryOutput {
    pub monthly_payment: Money,
    pub years: Vec<YearlySummary>,
    pub total_interest: Money,
}

/// Group schedule rows into loan years.
pub fn yearly_summary(schedule: &AmortizationSchedule) -> Vec<YearlySummary> {
    schedule
        .rows
        .chunks(PERIODS_PER_YEAR)
        .enumerate()
        .map(|(idx, rows)| YearlySummary {
            year: idx as u32 + 1,
            interest: rows.iter().map(|r| r.interest_payment).sum(),
            principal: rows.iter().map(|r| r.principal_payment).sum(),
            ending_balance: rows
                .last()
                .map(|r| r.remaining_balance)
                .unwrap_or(Decimal::ZERO),
        })
        .collect()
}

/// Build the schedule and return only its yearly roll-up.
pub fn summarize(
    input: &AmortizationInput,
) -> LoanCalcResult<ComputationOutput<YearlySummaryOutput>> {
    let start = Instant::now();

    let sched = schedule::build_schedule(&input.loan)?;
    let output = YearlySummaryOutput {
        monthly_payment: sched.monthly_payment,
        years: yearly_summary(&sched),
        total_interest: sched.total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Yearly amortization summary",
        input,
        Vec::new(),
        elapsed,
        output,
    ))
}
