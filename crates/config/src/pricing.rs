//! Pricing Parameters
//!
//! The admin-editable cost constants driving every country strategy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cost constants for an import calculation, all in USD except
/// `customs_percent` which is stored as a fraction (0.31 = 31%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParameters {
    /// Export paperwork in the origin country
    #[serde(default = "default_docs")]
    pub docs: Decimal,

    /// Port handling fee
    #[serde(default = "default_port_fee")]
    pub port_fee: Decimal,

    /// Evacuator from the port to the yard
    #[serde(default = "default_evacuator")]
    pub evacuator: Decimal,

    /// Registration in the destination market
    #[serde(default = "default_euro_registration")]
    pub euro_registration: Decimal,

    /// Brokerage and service fee
    #[serde(default = "default_services_fee")]
    pub services_fee: Decimal,

    /// Sea freight leg
    #[serde(default = "default_delivery_ship")]
    pub delivery_ship: Decimal,

    /// Rail freight leg
    #[serde(default = "default_delivery_train")]
    pub delivery_train: Decimal,

    /// Customs duty as a fraction of the car price
    #[serde(default = "default_customs_percent")]
    pub customs_percent: Decimal,
}

// Default values
fn default_docs() -> Decimal {
    dec!(1500)
}

fn default_port_fee() -> Decimal {
    dec!(700)
}

fn default_evacuator() -> Decimal {
    dec!(3050)
}

fn default_euro_registration() -> Decimal {
    dec!(1500)
}

fn default_services_fee() -> Decimal {
    dec!(1600)
}

fn default_delivery_ship() -> Decimal {
    dec!(1500)
}

fn default_delivery_train() -> Decimal {
    dec!(3500)
}

fn default_customs_percent() -> Decimal {
    dec!(0.31) // 31%
}

impl Default for PricingParameters {
    fn default() -> Self {
        Self {
            docs: default_docs(),
            port_fee: default_port_fee(),
            evacuator: default_evacuator(),
            euro_registration: default_euro_registration(),
            services_fee: default_services_fee(),
            delivery_ship: default_delivery_ship(),
            delivery_train: default_delivery_train(),
            customs_percent: default_customs_percent(),
        }
    }
}

impl PricingParameters {
    /// Check the record invariants: monetary fields non-negative,
    /// `customs_percent` within [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in SettingKey::ALL {
            let value = key.raw_value(self);
            if value < Decimal::ZERO {
                return Err(ConfigError::InvalidValue {
                    field: key.token().to_string(),
                    message: "must be non-negative".to_string(),
                });
            }
        }
        if self.customs_percent > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "customs_percent".to_string(),
                message: "must be a fraction within [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// True when a loaded record is unusable even though it deserialized:
    /// every monetary field zero means the file was wiped or hand-edited
    /// into a degenerate state.
    pub fn is_degenerate(&self) -> bool {
        SettingKey::ALL
            .iter()
            .filter(|k| !matches!(k, SettingKey::CustomsPercent))
            .all(|k| k.raw_value(self) == Decimal::ZERO)
    }
}

/// The editable fields of [`PricingParameters`].
///
/// Tokens are stable: they appear in `admin_edit_<token>` button tokens and
/// must not change between versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Docs,
    PortFee,
    Evacuator,
    EuroRegistration,
    ServicesFee,
    DeliveryShip,
    DeliveryTrain,
    CustomsPercent,
}

impl SettingKey {
    pub const ALL: &'static [SettingKey] = &[
        SettingKey::Docs,
        SettingKey::PortFee,
        SettingKey::Evacuator,
        SettingKey::EuroRegistration,
        SettingKey::ServicesFee,
        SettingKey::DeliveryShip,
        SettingKey::DeliveryTrain,
        SettingKey::CustomsPercent,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            SettingKey::Docs => "docs",
            SettingKey::PortFee => "port_fee",
            SettingKey::Evacuator => "evacuator",
            SettingKey::EuroRegistration => "euro_registration",
            SettingKey::ServicesFee => "services_fee",
            SettingKey::DeliveryShip => "delivery_ship",
            SettingKey::DeliveryTrain => "delivery_train",
            SettingKey::CustomsPercent => "customs_percent",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.token() == token)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SettingKey::Docs => "Documents",
            SettingKey::PortFee => "Port fee",
            SettingKey::Evacuator => "Evacuator",
            SettingKey::EuroRegistration => "EU registration",
            SettingKey::ServicesFee => "Import services",
            SettingKey::DeliveryShip => "Delivery (ship)",
            SettingKey::DeliveryTrain => "Delivery (train)",
            SettingKey::CustomsPercent => "Customs %",
        }
    }

    /// The value as stored
    pub fn raw_value(&self, params: &PricingParameters) -> Decimal {
        match self {
            SettingKey::Docs => params.docs,
            SettingKey::PortFee => params.port_fee,
            SettingKey::Evacuator => params.evacuator,
            SettingKey::EuroRegistration => params.euro_registration,
            SettingKey::ServicesFee => params.services_fee,
            SettingKey::DeliveryShip => params.delivery_ship,
            SettingKey::DeliveryTrain => params.delivery_train,
            SettingKey::CustomsPercent => params.customs_percent,
        }
    }

    /// The value as shown to the admin: customs is displayed in percent
    pub fn display_value(&self, params: &PricingParameters) -> Decimal {
        match self {
            SettingKey::CustomsPercent => params.customs_percent * dec!(100),
            _ => self.raw_value(params),
        }
    }

    /// Apply an admin-entered value. `value` is the displayed representation
    /// (customs entered in percent, stored divided by 100).
    pub fn apply(&self, params: &mut PricingParameters, value: Decimal) -> Result<(), ConfigError> {
        if value < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: self.token().to_string(),
                message: "must be non-negative".to_string(),
            });
        }
        match self {
            SettingKey::Docs => params.docs = value,
            SettingKey::PortFee => params.port_fee = value,
            SettingKey::Evacuator => params.evacuator = value,
            SettingKey::EuroRegistration => params.euro_registration = value,
            SettingKey::ServicesFee => params.services_fee = value,
            SettingKey::DeliveryShip => params.delivery_ship = value,
            SettingKey::DeliveryTrain => params.delivery_train = value,
            SettingKey::CustomsPercent => {
                if value > dec!(100) {
                    return Err(ConfigError::InvalidValue {
                        field: self.token().to_string(),
                        message: "percent must not exceed 100".to_string(),
                    });
                }
                params.customs_percent = value / dec!(100);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PricingParameters::default();
        assert_eq!(params.docs, dec!(1500));
        assert_eq!(params.delivery_train, dec!(3500));
        assert_eq!(params.customs_percent, dec!(0.31));
        assert!(params.validate().is_ok());
        assert!(!params.is_degenerate());
    }

    #[test]
    fn test_degenerate_detection() {
        let zeroed = PricingParameters {
            docs: Decimal::ZERO,
            port_fee: Decimal::ZERO,
            evacuator: Decimal::ZERO,
            euro_registration: Decimal::ZERO,
            services_fee: Decimal::ZERO,
            delivery_ship: Decimal::ZERO,
            delivery_train: Decimal::ZERO,
            customs_percent: dec!(0.31),
        };
        assert!(zeroed.is_degenerate());
    }

    #[test]
    fn test_customs_percent_stored_as_fraction() {
        let mut params = PricingParameters::default();
        SettingKey::CustomsPercent.apply(&mut params, dec!(45)).unwrap();
        assert_eq!(params.customs_percent, dec!(0.45));
        assert_eq!(
            SettingKey::CustomsPercent.display_value(&params),
            dec!(45)
        );
    }

    #[test]
    fn test_apply_rejects_negative_and_oversized_percent() {
        let mut params = PricingParameters::default();
        assert!(SettingKey::PortFee.apply(&mut params, dec!(-5)).is_err());
        assert!(SettingKey::CustomsPercent
            .apply(&mut params, dec!(101))
            .is_err());
        assert_eq!(params, PricingParameters::default());
    }

    #[test]
    fn test_setting_token_round_trip() {
        for key in SettingKey::ALL {
            assert_eq!(SettingKey::parse(key.token()), Some(*key));
        }
        assert_eq!(SettingKey::parse("broker"), None);
    }

    #[test]
    fn test_partial_file_falls_back_per_field() {
        let params: PricingParameters = serde_json::from_str(r#"{"docs": "2000"}"#).unwrap();
        assert_eq!(params.docs, dec!(2000));
        assert_eq!(params.port_fee, dec!(700));
        assert_eq!(params.customs_percent, dec!(0.31));
    }
}
