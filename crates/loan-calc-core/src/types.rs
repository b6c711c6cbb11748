use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates. Annual rates on the public API are percentages (6.5 = 6.5%);
/// periodic rates derived from them are decimals (0.005 = 0.5%).
pub type Rate = Decimal;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Longest accepted term: 100 years of monthly periods. Schedules hold one
/// row per period, so the term also bounds their size.
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Inputs shared by every amortizing-loan calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed, already including anything the caller chose to finance.
    pub principal: Money,
    /// Nominal annual rate as a percentage (6.5 = 6.5%).
    pub annual_rate_percent: Rate,
    /// Number of monthly periods.
    pub term_months: u32,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Rate, term_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
        }
    }

    /// Range checks. Values are never coerced into range.
    pub fn validate(&self) -> LoanCalcResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanCalcError::invalid(
                "principal",
                "Principal must be positive",
            ));
        }
        validate_rate("annual_rate_percent", self.annual_rate_percent)?;
        validate_term("term_months", self.term_months)
    }

    /// Periodic (monthly) rate as a decimal.
    pub fn monthly_rate(&self) -> Rate {
        monthly_rate(self.annual_rate_percent)
    }
}

/// Convert an annual percentage rate into a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Rate) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

pub(crate) fn validate_rate(field: &str, annual_rate_percent: Rate) -> LoanCalcResult<()> {
    if annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::invalid(field, "Rate must be non-negative"));
    }
    Ok(())
}

pub(crate) fn validate_term(field: &str, term_months: u32) -> LoanCalcResult<()> {
    if term_months == 0 {
        return Err(LoanCalcError::invalid(
            field,
            "Term must be at least one month",
        ));
    }
    if term_months > MAX_TERM_MONTHS {
        return Err(LoanCalcError::invalid(
            field,
            format!("Term must not exceed {MAX_TERM_MONTHS} months"),
        ));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(field: &str, value: Decimal) -> LoanCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(LoanCalcError::invalid(field, "Value must be non-negative"));
    }
    Ok(())
}

// Decimal's operators panic outside the 96-bit range; these report it instead.

pub(crate) fn mul_or_overflow(
    lhs: Decimal,
    rhs: Decimal,
    context: &str,
) -> LoanCalcResult<Decimal> {
    lhs.checked_mul(rhs).ok_or_else(|| LoanCalcError::overflow(context))
}

pub(crate) fn add_or_overflow(
    lhs: Decimal,
    rhs: Decimal,
    context: &str,
) -> LoanCalcResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| LoanCalcError::overflow(context))
}

pub(crate) fn sub_or_overflow(
    lhs: Decimal,
    rhs: Decimal,
    context: &str,
) -> LoanCalcResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| LoanCalcError::overflow(context))
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
