//! Calculator for cars imported from China

use carcost_config::PricingParameters;
use carcost_core::DeliveryKind;
use rust_decimal::Decimal;

use crate::breakdown::CalculationBreakdown;
use crate::calculator::CountryCalculator;

/// The fully supported route: interactive ship/train delivery, customs
/// levied on the car price alone.
pub struct ChinaCalculator;

impl CountryCalculator for ChinaCalculator {
    fn code(&self) -> &'static str {
        "china"
    }

    fn name(&self) -> &'static str {
        "China"
    }

    fn flag(&self) -> &'static str {
        "\u{1F1E8}\u{1F1F3}"
    }

    fn breakdown(
        &self,
        car_price: Decimal,
        delivery: DeliveryKind,
        params: &PricingParameters,
    ) -> CalculationBreakdown {
        let delivery_cost = match delivery {
            DeliveryKind::Ship => params.delivery_ship,
            // Road is not offered from China; price the rail leg instead
            DeliveryKind::Train | DeliveryKind::Road => params.delivery_train,
        };

        CalculationBreakdown {
            car_price,
            docs: params.docs,
            delivery: delivery_cost,
            port_fee: params.port_fee,
            customs: car_price * params.customs_percent,
            evacuator: params.evacuator,
            euro_registration: params.euro_registration,
            services_fee: params.services_fee,
            delivery_kind: delivery,
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
    fn test_total_includes_every_component() {
        let params = PricingParameters::default();
        let breakdown =
            ChinaCalculator.breakdown(dec!(20000), DeliveryKind::Ship, &params);

        assert_eq!(
            breakdown.total,
            breakdown.car_price + breakdown.component_sum()
        );
        assert_eq!(breakdown.customs, dec!(20000) * dec!(0.31));
        assert_eq!(breakdown.delivery, params.delivery_ship);
    }

    #[test]
    fn test_example_scenario_to_the_cent() {
        // Price 93285, defaults, rail delivery: total must equal the car
        // price, the fixed fees and 31% customs exactly.
        let params = PricingParameters::default();
        let breakdown =
            ChinaCalculator.breakdown(dec!(93285), DeliveryKind::Train, &params);

        let expected = dec!(93285)
            + dec!(1500)   // documents
            + dec!(3500)   // rail delivery
            + dec!(700)    // port
            + dec!(28918.35) // customs: 93285 * 0.31
            + dec!(3050)   // evacuator
            + dec!(1500)   // EU registration
            + dec!(1600); // import services
        assert_eq!(breakdown.total, expected);
        assert_eq!(breakdown.customs, dec!(28918.35));
    }

    #[test]
    fn test_train_and_ship_differ_only_in_delivery() {
        let params = PricingParameters::default();
        let ship = ChinaCalculator.breakdown(dec!(10000), DeliveryKind::Ship, &params);
        let train = ChinaCalculator.breakdown(dec!(10000), DeliveryKind::Train, &params);

        assert_eq!(
            train.total - ship.total,
            params.delivery_train - params.delivery_ship
        );
    }
}
