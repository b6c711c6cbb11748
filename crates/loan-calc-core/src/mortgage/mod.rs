pub mod affordability;
pub mod housing_cost;
