//! Calculation engine
//!
//! One [`CountryCalculator`] strategy per supported origin country, a
//! registry resolving country codes to strategies, and the cost breakdown
//! they produce. Strategies are pure: given a price, a delivery choice and
//! a parameter snapshot they always return the same numbers and never
//! mutate the parameters.

pub mod breakdown;
pub mod calculator;
pub mod countries;
pub mod registry;

pub use breakdown::CalculationBreakdown;
pub use calculator::CountryCalculator;
pub use registry::{CalculatorRegistry, DEFAULT_COUNTRY};
