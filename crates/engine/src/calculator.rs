//! Country calculation strategy contract

use carcost_config::PricingParameters;
use carcost_core::DeliveryKind;
use rust_decimal::Decimal;

use crate::breakdown::CalculationBreakdown;

/// A pluggable policy computing the cost breakdown for one origin country.
///
/// Implementations must be stateless and must not mutate the parameter
/// snapshot they are given.
pub trait CountryCalculator: Send + Sync {
    /// Stable lowercase country code
    fn code(&self) -> &'static str;

    /// Display name
    fn name(&self) -> &'static str;

    /// Flag emoji for rendering
    fn flag(&self) -> &'static str;

    /// When `Some`, the strategy fixes the delivery mode and the dialog
    /// skips the delivery-selection step.
    fn fixed_delivery(&self) -> Option<DeliveryKind> {
        None
    }

    /// Non-empty for placeholder strategies whose numbers are best-effort
    /// approximations of another country's constants.
    fn advisory(&self) -> Option<&'static str> {
        None
    }

    /// Compute the itemized breakdown
    fn breakdown(
        &self,
        car_price: Decimal,
        delivery: DeliveryKind,
        params: &PricingParameters,
    ) -> CalculationBreakdown;

    /// Total turnkey price, defined as the breakdown's total
    fn total(
        &self,
        car_price: Decimal,
        delivery: DeliveryKind,
        params: &PricingParameters,
    ) -> Decimal {
        self.breakdown(car_price, delivery, params).total
    }
}
