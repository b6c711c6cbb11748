//! Fixed monthly payment for a fully amortizing loan.
//!
//! `payment = P·r·(1+r)^n / ((1+r)^n − 1)` with `r` the monthly rate, and the
//! degenerate `P / n` when the rate is zero. The inverse (largest principal a
//! given payment can service) lives here as well since it shares the same
//! compounding factor.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Output of the payment calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Constant payment due every period.
    pub monthly_payment: Money,
    /// Monthly payment times the number of periods.
    pub total_payment: Money,
    /// Total payment less the principal.
    pub total_interest: Money,
    /// Periodic rate used, as a decimal.
    pub monthly_rate: Rate,
}

/// `(1 + r)^n`, failing instead of panicking when it leaves the decimal range.
pub(crate) fn compound_factor(monthly_rate: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: format!("compound factor over {periods} periods"),
        })
}

/// Annuity payment without input validation. Callers validate first.
pub(crate) fn annuity_payment(
    principal: Money,
    monthly_rate: Rate,
    periods: u32,
) -> LoanCalcResult<Money> {
    let n = Decimal::from(periods);
    if monthly_rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = compound_factor(monthly_rate, periods)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        // Rate too small to register over the term at 28 digits.
        return Ok(principal / n);
    }

    principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(factor))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| LoanCalcError::Overflow {
            context: "annuity payment".into(),
        })
}

/// Monthly payment for a validated loan.
pub fn monthly_payment(loan: &LoanParameters) -> LoanCalcResult<Money> {
    loan.validate()?;
    annuity_payment(loan.principal, loan.monthly_rate(), loan.term_months)
}

/// Payment plus lifetime totals, wrapped in the standard envelope.
pub fn calculate_payment(
    loan: &LoanParameters,
) -> LoanCalcResult<ComputationOutput<PaymentResult>> {
    let start = Instant::now();

    let payment = monthly_payment(loan)?;
    let total_payment =
        mul_or_overflow(payment, Decimal::from(loan.term_months), "total payment")?;

    let output = PaymentResult {
        monthly_payment: payment,
        total_payment,
        total_interest: total_payment - loan.principal,
        monthly_rate: loan.monthly_rate(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate annuity payment",
        loan,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Largest principal that `payment` fully amortizes over `term_months`
/// (present value of the payment stream).
pub fn max_principal(
    payment: Money,
    annual_rate_percent: Rate,
    term_months: u32,
) -> LoanCalcResult<Money> {
    if payment <= Decimal::ZERO {
        return Err(LoanCalcError::invalid("payment", "Payment must be positive"));
    }
    validate_rate("annual_rate_percent", annual_rate_percent)?;
    validate_term("term_months", term_months)?;

    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return mul_or_overflow(payment, Decimal::from(term_months), "maximum principal");
    }

    let factor = compound_factor(r, term_months)?;
    let discount = Decimal::ONE - Decimal::ONE / factor;
    payment
        .checked_mul(discount)
        .and_then(|v| v.checked_div(r))
        .ok_or_else(|| LoanCalcError::overflow("maximum principal"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty_year_mortgage_payment() {
        let loan = LoanParameters::new(dec!(200000), dec!(6), 360);
        let pmt = monthly_payment(&loan).unwrap();
        assert!((pmt - dec!(1199.10)).abs() < dec!(0.01), "got {pmt}");
    }

    #[test]
    fn test_zero_rate_is_straight_division() {
        let loan = LoanParameters::new(dec!(12000), Decimal::ZERO, 12);
        assert_eq!(monthly_payment(&loan).unwrap(), dec!(1000));
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        let loan = LoanParameters::new(dec!(1000), dec!(12), 1);
        let pmt = monthly_payment(&loan).unwrap();
        assert!((pmt - dec!(1010)).abs() < dec!(0.0000001));
    }

    #[test]
    fn test_totals() {
        let loan = LoanParameters::new(dec!(12000), Decimal::ZERO, 12);
        let out = calculate_payment(&loan).unwrap();
        assert_eq!(out.result.total_payment, dec!(12000));
        assert_eq!(out.result.total_interest, Decimal::ZERO);
        assert_eq!(out.result.monthly_rate, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(monthly_payment(&LoanParameters::new(dec!(0), dec!(5), 12)).is_err());
        assert!(monthly_payment(&LoanParameters::new(dec!(100), dec!(-5), 12)).is_err());
        assert!(monthly_payment(&LoanParameters::new(dec!(100), dec!(5), 0)).is_err());
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        let loan = LoanParameters::new(dec!(1000), dec!(1000000), MAX_TERM_MONTHS);
        assert!(matches!(
            monthly_payment(&loan),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_lifetime_total_overflow_is_an_error() {
        // The payment itself fits; payment * 360 does not.
        let loan = LoanParameters::new(dec!(70000000000000000000000000000), dec!(6), 360);
        assert!(monthly_payment(&loan).is_ok());
        assert!(matches!(
            calculate_payment(&loan),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_term_above_limit_rejected() {
        let loan = LoanParameters::new(dec!(1000), Decimal::ZERO, MAX_TERM_MONTHS + 1);
        assert!(matches!(
            monthly_payment(&loan),
            Err(LoanCalcError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_max_principal_overflow_is_an_error() {
        assert!(matches!(
            max_principal(Decimal::MAX, Decimal::ZERO, 360),
            Err(LoanCalcError::Overflow { .. })
        ));
    }

    #[test]
    fn test_max_principal_inverts_payment() {
        let loan = LoanParameters::new(dec!(250000), dec!(6.5), 360);
        let pmt = monthly_payment(&loan).unwrap();
        let principal = max_principal(pmt, dec!(6.5), 360).unwrap();
        assert!((principal - dec!(250000)).abs() < dec!(0.0001), "got {principal}");
    }

    #[test]
    fn test_max_principal_zero_rate() {
        assert_eq!(
            max_principal(dec!(500), Decimal::ZERO, 24).unwrap(),
            dec!(12000)
        );
    }
}
