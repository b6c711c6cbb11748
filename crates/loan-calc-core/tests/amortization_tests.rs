use loan_calc_core::amortization::{schedule, summary};
use loan_calc_core::payment;
use loan_calc_core::{LoanCalcError, LoanParameters};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loans exercised by the property checks below
// ===========================================================================

fn loan_grid() -> Vec<LoanParameters> {
    let principals = [dec!(1), dec!(999.99), dec!(12000), dec!(200000), dec!(1_250_000)];
    let rates = [dec!(0), dec!(0.01), dec!(3.25), dec!(6), dec!(19.99), dec!(36)];
    let terms = [1u32, 2, 7, 12, 60, 180, 360, 480];

    let mut grid = Vec::new();
    for p in principals {
        for r in rates {
            for n in terms {
                grid.push(LoanParameters::new(p, r, n));
            }
        }
    }
    grid
}

// ===========================================================================
// Payment
// ===========================================================================

#[test]
fn test_payment_positive_for_all_valid_loans() {
    for loan in loan_grid() {
        let pmt = payment::monthly_payment(&loan).unwrap();
        assert!(pmt > Decimal::ZERO, "{loan:?} gave {pmt}");
    }
}

#[test]
fn test_standard_thirty_year_payment() {
    let loan = LoanParameters::new(dec!(200000), dec!(6), 360);
    let out = payment::calculate_payment(&loan).unwrap();
    let pmt = out.result.monthly_payment;
    assert!(
        (pmt - dec!(1199.10)).abs() < dec!(0.005),
        "Expected ~1199.10, got {}",
        pmt
    );
    assert_eq!(out.methodology, "Fixed-rate annuity payment");
}

#[test]
fn test_zero_rate_payment() {
    let loan = LoanParameters::new(dec!(12000), dec!(0), 12);
    assert_eq!(payment::monthly_payment(&loan).unwrap(), dec!(1000));
}

#[test]
fn test_invalid_arguments() {
    let bad = [
        LoanParameters::new(dec!(0), dec!(5), 12),
        LoanParameters::new(dec!(-100), dec!(5), 12),
        LoanParameters::new(dec!(100), dec!(-1), 12),
        LoanParameters::new(dec!(100), dec!(5), 0),
    ];
    for loan in bad {
        assert!(matches!(
            payment::monthly_payment(&loan),
            Err(LoanCalcError::InvalidArgument { .. })
        ));
        assert!(matches!(
            schedule::build_schedule(&loan),
            Err(LoanCalcError::InvalidArgument { .. })
        ));
    }
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_schedule_principal_sums_to_loan() {
    for loan in loan_grid() {
        let sched = schedule::build_schedule(&loan).unwrap();
        let sum: Decimal = sched.rows.iter().map(|r| r.principal_payment).sum();
        let rel = ((sum - loan.principal) / loan.principal).abs();
        assert!(rel < dec!(0.000001), "{loan:?}: principal sum {sum}");
    }
}

#[test]
fn test_schedule_length_and_terminal_balance() {
    for loan in loan_grid() {
        let sched = schedule::build_schedule(&loan).unwrap();
        assert_eq!(sched.rows.len(), loan.term_months as usize);
        let last = sched.rows.last().unwrap();
        assert_eq!(last.period, loan.term_months);
        assert_eq!(last.remaining_balance, Decimal::ZERO, "{loan:?}");
    }
}

#[test]
fn test_balance_never_increases_and_never_negative() {
    for loan in loan_grid() {
        let sched = schedule::build_schedule(&loan).unwrap();
        let mut prev = loan.principal;
        for row in &sched.rows {
            assert!(row.remaining_balance <= prev, "{loan:?} period {}", row.period);
            assert!(row.remaining_balance >= Decimal::ZERO);
            assert!(row.principal_payment >= Decimal::ZERO);
            assert!(row.interest_payment >= Decimal::ZERO);
            prev = row.remaining_balance;
        }
    }
}

#[test]
fn test_periods_are_one_based_and_sequential() {
    let loan = LoanParameters::new(dec!(5000), dec!(4), 24);
    let sched = schedule::build_schedule(&loan).unwrap();
    let periods: Vec<u32> = sched.rows.iter().map(|r| r.period).collect();
    assert_eq!(periods, (1..=24).collect::<Vec<_>>());
}

#[test]
fn test_zero_rate_schedule_has_no_interest() {
    let loan = LoanParameters::new(dec!(12000), dec!(0), 12);
    let sched = schedule::build_schedule(&loan).unwrap();
    assert_eq!(sched.monthly_payment, dec!(1000));
    assert!(sched.rows.iter().all(|r| r.interest_payment == Decimal::ZERO));
    assert_eq!(sched.total_interest, Decimal::ZERO);
}

#[test]
fn test_first_row_of_thirty_year_mortgage() {
    let loan = LoanParameters::new(dec!(200000), dec!(6), 360);
    let sched = schedule::build_schedule(&loan).unwrap();
    let first = &sched.rows[0];
    assert_eq!(first.interest_payment, dec!(1000));
    assert!((first.principal_payment - dec!(199.10)).abs() < dec!(0.005));
}

#[test]
fn test_schedule_totals_consistent_with_payment() {
    let loan = LoanParameters::new(dec!(200000), dec!(6), 360);
    let pmt = payment::calculate_payment(&loan).unwrap().result;
    let sched = schedule::build_schedule(&loan).unwrap();
    assert!((sched.total_interest - pmt.total_interest).abs() < dec!(0.000001));
    assert!((sched.total_payment - pmt.total_payment).abs() < dec!(0.000001));
}

// ===========================================================================
// Yearly summary
// ===========================================================================

#[test]
fn test_yearly_summary_principal_sums_to_loan() {
    let loan = LoanParameters::new(dec!(150000), dec!(4.5), 180);
    let sched = schedule::build_schedule(&loan).unwrap();
    let years = summary::yearly_summary(&sched);

    assert_eq!(years.len(), 15);
    let principal: Decimal = years.iter().map(|y| y.principal).sum();
    assert!((principal - dec!(150000)).abs() < dec!(0.000001));
    assert_eq!(years.last().unwrap().ending_balance, Decimal::ZERO);
}
