//! Strategy registry

use std::collections::HashMap;
use std::sync::Arc;

use crate::calculator::CountryCalculator;
use crate::countries::{ChinaCalculator, EuropeCalculator, UsaCalculator};

/// Country every unresolved code degrades to
pub const DEFAULT_COUNTRY: &str = "china";

/// Maps country codes to their calculation strategy.
///
/// Exactly one instance per supported country; lookup is case-insensitive
/// and an unknown code resolves to the default strategy rather than
/// erroring, so a stale or placeholder country still yields a working
/// estimate.
pub struct CalculatorRegistry {
    calculators: HashMap<&'static str, Arc<dyn CountryCalculator>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        let mut calculators: HashMap<&'static str, Arc<dyn CountryCalculator>> = HashMap::new();
        for calculator in [
            Arc::new(ChinaCalculator) as Arc<dyn CountryCalculator>,
            Arc::new(UsaCalculator),
            Arc::new(EuropeCalculator),
        ] {
            calculators.insert(calculator.code(), calculator);
        }
        Self { calculators }
    }

    /// Resolve a country code to its strategy, defaulting on unknown codes
    pub fn get(&self, code: &str) -> Arc<dyn CountryCalculator> {
        let code = code.trim().to_ascii_lowercase();
        self.calculators
            .get(code.as_str())
            .or_else(|| self.calculators.get(DEFAULT_COUNTRY))
            .cloned()
            .expect("default calculator is always registered")
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.calculators
            .contains_key(code.trim().to_ascii_lowercase().as_str())
    }

    /// All registered strategies, in stable order for keyboard building
    pub fn all(&self) -> Vec<Arc<dyn CountryCalculator>> {
        let mut calculators: Vec<_> = self.calculators.values().cloned().collect();
        calculators.sort_by_key(|c| c.code());
        calculators
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
