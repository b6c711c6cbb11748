pub mod amortization;
pub mod analysis;
pub mod mortgage;
pub mod payment;
