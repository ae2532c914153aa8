//! Per-chat session state for the two conversation flows

use rust_decimal::Decimal;

use crate::country::CountryCode;

/// Steps of the price-estimate dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserStep {
    #[default]
    AwaitingCountry,
    AwaitingPrice,
    AwaitingDelivery,
    Complete,
}

impl UserStep {
    /// Get allowed transitions from the current step.
    ///
    /// `AwaitingPrice` may jump straight to `Complete` for countries whose
    /// strategy fixes the delivery mode.
    pub fn allowed_transitions(&self) -> &'static [UserStep] {
        match self {
            UserStep::AwaitingCountry => &[UserStep::AwaitingPrice],
            UserStep::AwaitingPrice => &[UserStep::AwaitingDelivery, UserStep::Complete],
            UserStep::AwaitingDelivery => &[UserStep::Complete],
            UserStep::Complete => &[],
        }
    }

    /// Check if transition to the target step is allowed
    pub fn can_transition_to(&self, target: UserStep) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

impl std::fmt::Display for UserStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserStep::AwaitingCountry => "awaiting_country",
            UserStep::AwaitingPrice => "awaiting_price",
            UserStep::AwaitingDelivery => "awaiting_delivery",
            UserStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// How the car travels on the final leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeliveryKind {
    Ship,
    Train,
    Road,
}

impl DeliveryKind {
    /// Stable token used in `delivery_<kind>` buttons
    pub fn token(&self) -> &'static str {
        match self {
            DeliveryKind::Ship => "ship",
            DeliveryKind::Train => "train",
            DeliveryKind::Road => "road",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "ship" => Some(DeliveryKind::Ship),
            "train" => Some(DeliveryKind::Train),
            "road" => Some(DeliveryKind::Road),
            _ => None,
        }
    }

    /// Human-readable name for rendering
    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryKind::Ship => "sea freight",
            DeliveryKind::Train => "rail freight",
            DeliveryKind::Road => "road transport",
        }
    }
}

/// One price-estimate dialog in progress.
///
/// Fields for not-yet-reached steps stay `None`; `step` only moves along
/// [`UserStep::allowed_transitions`]. The session store is the sole owner.
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    pub country: Option<CountryCode>,
    pub car_price: Option<Decimal>,
    pub delivery: Option<DeliveryKind>,
    pub step: UserStep,
}

impl UserSession {
    /// Fresh session at the country-selection step
    pub fn new() -> Self {
        Self::default()
    }

    /// True once every field required for a calculation is present
    pub fn is_complete(&self) -> bool {
        self.country.is_some() && self.car_price.is_some() && self.delivery.is_some()
    }

    /// Move to `target` iff [`UserStep::allowed_transitions`] permits it.
    /// Returns whether the step changed; a refused advance leaves the
    /// session untouched.
    pub fn advance_to(&mut self, target: UserStep) -> bool {
        if self.step.can_transition_to(target) {
            self.step = target;
            true
        } else {
            false
        }
    }
}

/// One admin dialog: authentication state plus the edit in progress.
///
/// Invariant: `awaiting_input` implies `authenticated` and a selected
/// setting. `setting` holds the stable token of a pricing parameter field.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    pub authenticated: bool,
    pub awaiting_input: bool,
    pub setting: Option<String>,
}

impl AdminSession {
    /// Fresh, unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear any edit in progress
    pub fn clear_edit(&mut self) {
        self.awaiting_input = false;
        self.setting = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_transitions() {
        let step = UserStep::AwaitingPrice;
        assert!(step.can_transition_to(UserStep::AwaitingDelivery));
        assert!(step.can_transition_to(UserStep::Complete));
        assert!(!step.can_transition_to(UserStep::AwaitingCountry));
        assert!(UserStep::Complete.allowed_transitions().is_empty());
    }

    #[test]
    fn test_delivery_tokens() {
        for kind in [DeliveryKind::Ship, DeliveryKind::Train, DeliveryKind::Road] {
            assert_eq!(DeliveryKind::parse(kind.token()), Some(kind));
        }
        assert_eq!(DeliveryKind::parse("teleport"), None);
    }

    #[test]
    fn test_advance_to_enforces_order() {
        let mut session = UserSession::new();

        assert!(!session.advance_to(UserStep::Complete));
        assert!(!session.advance_to(UserStep::AwaitingDelivery));
        assert_eq!(session.step, UserStep::AwaitingCountry);

        assert!(session.advance_to(UserStep::AwaitingPrice));
        // Price may jump straight to Complete for fixed-delivery countries
        assert!(session.advance_to(UserStep::Complete));
        assert!(!session.advance_to(UserStep::AwaitingCountry));
    }

    #[test]
    fn test_fresh_session_is_incomplete() {
        let session = UserSession::new();
        assert_eq!(session.step, UserStep::AwaitingCountry);
        assert!(!session.is_complete());
    }
}
