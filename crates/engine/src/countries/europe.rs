//! Calculator for cars sourced within Europe

use carcost_config::PricingParameters;
use carcost_core::DeliveryKind;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::breakdown::CalculationBreakdown;
use crate::calculator::CountryCalculator;

/// Placeholder strategy for intra-EU purchases: no customs, halved
/// paperwork, the evacuator constant priced as the road leg.
pub struct EuropeCalculator;

impl CountryCalculator for EuropeCalculator {
    fn code(&self) -> &'static str {
        "europe"
    }

    fn name(&self) -> &'static str {
        "Europe"
    }

    fn flag(&self) -> &'static str {
        "\u{1F1EA}\u{1F1FA}"
    }

    fn fixed_delivery(&self) -> Option<DeliveryKind> {
        Some(DeliveryKind::Road)
    }

    fn advisory(&self) -> Option<&'static str> {
        Some("Europe rates are still in development; this estimate approximates the route with simplified constants.")
    }

    fn breakdown(
        &self,
        car_price: Decimal,
        _delivery: DeliveryKind,
        params: &PricingParameters,
    ) -> CalculationBreakdown {
        CalculationBreakdown {
            car_price,
            docs: params.docs * dec!(0.5),
            delivery: params.evacuator,
            port_fee: Decimal::ZERO,
            // No customs within the EU
            customs: Decimal::ZERO,
            evacuator: Decimal::ZERO,
            euro_registration: params.euro_registration,
            services_fee: params.services_fee,
            delivery_kind: DeliveryKind::Road,
            total: Decimal::ZERO,
        }
        .totaled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_customs_within_eu() {
        let params = PricingParameters::default();
        let breakdown = EuropeCalculator.breakdown(dec!(30000), DeliveryKind::Road, &params);

        assert_eq!(breakdown.customs, Decimal::ZERO);
        assert_eq!(breakdown.port_fee, Decimal::ZERO);
        assert_eq!(breakdown.docs, params.docs * dec!(0.5));
        assert_eq!(
            breakdown.total,
            breakdown.car_price + breakdown.component_sum()
        );
    }

    #[test]
    fn test_placeholder_carries_advisory() {
        assert!(EuropeCalculator
            .advisory()
            .is_some_and(|note| !note.is_empty()));
        assert_eq!(EuropeCalculator.fixed_delivery(), Some(DeliveryKind::Road));
    }
}
