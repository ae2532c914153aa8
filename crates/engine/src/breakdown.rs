//! Itemized cost breakdown

use carcost_core::DeliveryKind;
use rust_decimal::Decimal;

/// Itemized costs plus total for one calculation.
///
/// Derived, never persisted. `total` is always the car price plus every
/// named component including customs; [`CalculationBreakdown::components`]
/// is the single source both for that sum and for rendering, so no
/// component can silently fall out of either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationBreakdown {
    pub car_price: Decimal,
    pub docs: Decimal,
    pub delivery: Decimal,
    pub port_fee: Decimal,
    pub customs: Decimal,
    pub evacuator: Decimal,
    pub euro_registration: Decimal,
    pub services_fee: Decimal,
    pub delivery_kind: DeliveryKind,
    pub total: Decimal,
}

impl CalculationBreakdown {
    /// Named cost components, in rendering order, without the car price
    pub fn components(&self) -> [(&'static str, Decimal); 7] {
        [
            ("documents", self.docs),
            ("delivery", self.delivery),
            ("port", self.port_fee),
            ("customs", self.customs),
            ("evacuator", self.evacuator),
            ("EU registration", self.euro_registration),
            ("import services", self.services_fee),
        ]
    }

    /// Sum of every named component
    pub fn component_sum(&self) -> Decimal {
        self.components().iter().map(|(_, value)| *value).sum()
    }

    /// Finalize the record by deriving the total from the components
    pub(crate) fn totaled(mut self) -> Self {
        self.total = self.car_price + self.component_sum();
        self
    }
}
