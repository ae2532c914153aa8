//! Calculator for cars imported from the USA

use carcost_config::PricingParameters;
use carcost_core::DeliveryKind;
use rust_decimal::Decimal;

use crate::breakdown::CalculationBreakdown;
use crate::calculator::CountryCalculator;

/// Placeholder strategy: reuses the China constants with a fixed sea
/// freight leg until dedicated USA tariffs exist. The advisory note flags
/// the reduced accuracy to the user.
pub struct UsaCalculator;

impl CountryCalculator for UsaCalculator {
    fn code(&self) -> &'static str {
        "usa"
    }

    fn name(&self) -> &'static str {
        "USA"
    }

    fn flag(&self) -> &'static str {
        "\u{1F1FA}\u{1F1F8}"
    }

    fn fixed_delivery(&self) -> Option<DeliveryKind> {
        // USA cars arrive by sea only
        Some(DeliveryKind::Ship)
    }

    fn advisory(&self) -> Option<&'static str> {
        Some("USA rates are still in development; this estimate reuses the China tariffs and may be less accurate.")
    }

    fn breakdown(
        &self,
        car_price: Decimal,
        _delivery: DeliveryKind,
        params: &PricingParameters,
    ) -> CalculationBreakdown {
        CalculationBreakdown {
            car_price,
            docs: params.docs,
            delivery: params.delivery_ship,
            port_fee: params.port_fee,
            customs: car_price * params.customs_percent,
            evacuator: params.evacuator,
            euro_registration: params.euro_registration,
            services_fee: params.services_fee,
            delivery_kind: DeliveryKind::Ship,
            total: Decimal::ZERO,
        }
        .totaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_delivery_is_always_ship() {
        let params = PricingParameters::default();
        let breakdown = UsaCalculator.breakdown(dec!(15000), DeliveryKind::Train, &params);

        assert_eq!(breakdown.delivery_kind, DeliveryKind::Ship);
        assert_eq!(breakdown.delivery, params.delivery_ship);
        assert_eq!(UsaCalculator.fixed_delivery(), Some(DeliveryKind::Ship));
    }

    #[test]
    fn test_placeholder_carries_advisory() {
        assert!(UsaCalculator.advisory().is_some_and(|note| !note.is_empty()));
    }

    #[test]
    fn test_total_matches_component_sum() {
        let params = PricingParameters::default();
        let breakdown = UsaCalculator.breakdown(dec!(15000), DeliveryKind::Ship, &params);
        assert_eq!(
            breakdown.total,
            breakdown.car_price + breakdown.component_sum()
        );
    }
}
