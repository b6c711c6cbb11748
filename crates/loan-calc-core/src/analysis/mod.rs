pub mod comparison;
pub mod extra_payment;
pub mod refinance;
