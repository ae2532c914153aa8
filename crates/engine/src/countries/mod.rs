//! Per-country calculation strategies

pub mod china;
pub mod europe;
pub mod usa;

pub use china::ChinaCalculator;
pub use europe::EuropeCalculator;
pub use usa::UsaCalculator;
