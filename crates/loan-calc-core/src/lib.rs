pub mod amortization;
pub mod error;
pub mod payment;
pub mod types;

#[cfg(feature = "analysis")]
pub mod analysis;

#[cfg(feature = "mortgage")]
pub mod mortgage;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
