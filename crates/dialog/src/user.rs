//! The price-estimate dialog
//!
//! Drives one user session from country selection to the final itemized
//! estimate: country, price, delivery mode (unless the country fixes it),
//! then exactly one calculation, one statistics record and the result.
//! Events that do not match the current step are ignored without touching
//! session state, so stale button presses and stray text are harmless.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use carcost_config::{ConfigStore, StatsTracker};
use carcost_core::{ChatId, ChatTransport, CountryCode, DeliveryKind, OutboundMessage, UserStep};
use carcost_engine::{CalculatorRegistry, DEFAULT_COUNTRY};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::render;
use crate::store::SessionStore;

/// Car price used by the `/example` command
const EXAMPLE_PRICE: Decimal = dec!(93285);

pub struct UserFlow {
    sessions: Arc<SessionStore>,
    registry: Arc<CalculatorRegistry>,
    store: Arc<ConfigStore>,
    stats: Arc<StatsTracker>,
    transport: Arc<dyn ChatTransport>,
    /// Pause between the "calculating" notice and the result
    result_delay: Duration,
}

impl UserFlow {
    pub fn new(
        sessions: Arc<SessionStore>,
        registry: Arc<CalculatorRegistry>,
        store: Arc<ConfigStore>,
        stats: Arc<StatsTracker>,
        transport: Arc<dyn ChatTransport>,
        result_delay: Duration,
    ) -> Self {
        Self {
            sessions,
            registry,
            store,
            stats,
            transport,
            result_delay,
        }
    }

    /// Start (or restart) the estimate dialog
    pub async fn begin(&self, chat: ChatId) {
        self.sessions.start_user(chat);
        self.deliver(chat, render::country_prompt(&self.registry.all()))
            .await;
    }

    /// Country button pressed. Valid only at the country-selection step;
    /// unknown codes resolve to the default country rather than failing.
    pub async fn select_country(&self, chat: ChatId, code: &str) {
        if self.sessions.user_step(chat) != Some(UserStep::AwaitingCountry) {
            tracing::debug!(%chat, code, "country press outside country step ignored");
            return;
        }
        let calculator = self.registry.get(code);
        self.sessions.with_user(chat, |session| {
            session.country = Some(CountryCode::new(calculator.code()));
            let advanced = session.advance_to(UserStep::AwaitingPrice);
            debug_assert!(advanced);
        });
        self.deliver(chat, render::price_prompt(calculator.as_ref()))
            .await;
    }

    /// Free text while the dialog is live. Only the price step consumes
    /// text; a non-price or non-positive value re-prompts without moving.
    pub async fn submit_price(&self, chat: ChatId, text: &str) {
        if self.sessions.user_step(chat) != Some(UserStep::AwaitingPrice) {
            tracing::debug!(%chat, "text outside price step ignored");
            return;
        }
        let Some(price) = parse_price(text) else {
            self.deliver(chat, render::invalid_price()).await;
            return;
        };

        let country = self
            .sessions
            .user_snapshot(chat)
            .and_then(|s| s.country)
            .unwrap_or_else(|| CountryCode::new(DEFAULT_COUNTRY));
        let calculator = self.registry.get(country.as_str());

        // Countries with a fixed route skip the delivery question
        let fixed = calculator.fixed_delivery();
        self.sessions.with_user(chat, |session| {
            session.car_price = Some(price);
            let next = match fixed {
                Some(kind) => {
                    session.delivery = Some(kind);
                    UserStep::Complete
                }
                None => UserStep::AwaitingDelivery,
            };
            let advanced = session.advance_to(next);
            debug_assert!(advanced);
        });

        if fixed.is_some() {
            self.finish(chat).await;
        } else {
            self.deliver(chat, render::delivery_prompt()).await;
        }
    }

    /// Delivery button pressed. Valid only at the delivery step.
    pub async fn select_delivery(&self, chat: ChatId, kind: DeliveryKind) {
        if self.sessions.user_step(chat) != Some(UserStep::AwaitingDelivery) {
            tracing::debug!(%chat, "delivery press outside delivery step ignored");
            return;
        }
        self.sessions.with_user(chat, |session| {
            session.delivery = Some(kind);
            let advanced = session.advance_to(UserStep::Complete);
            debug_assert!(advanced);
        });
        self.finish(chat).await;
    }

    /// Price the canned example scenario with the live rates. Runs outside
    /// any session and records nothing.
    pub async fn show_example(&self, chat: ChatId) {
        let calculator = self.registry.get(DEFAULT_COUNTRY);
        let params = self.store.parameters();
        let breakdown = calculator.breakdown(EXAMPLE_PRICE, DeliveryKind::Train, &params);
        self.deliver(chat, render::example(&breakdown, calculator.as_ref()))
            .await;
    }

    /// Compute, record and deliver the result, then destroy the session.
    /// A session that reached here with missing fields is discarded with an
    /// apology instead of panicking.
    async fn finish(&self, chat: ChatId) {
        let Some(session) = self.sessions.user_snapshot(chat) else {
            return;
        };
        let (Some(country), Some(car_price), Some(delivery)) =
            (session.country, session.car_price, session.delivery)
        else {
            tracing::error!(%chat, step = %session.step, "estimate dialog finished with missing fields");
            self.sessions.remove_user(chat);
            self.deliver(chat, render::data_incomplete()).await;
            return;
        };

        self.deliver(chat, render::calculating()).await;
        if !self.result_delay.is_zero() {
            tokio::time::sleep(self.result_delay).await;
        }

        let calculator = self.registry.get(country.as_str());
        let params = self.store.parameters();
        let breakdown = calculator.breakdown(car_price, delivery, &params);
        self.stats.record(breakdown.total);

        self.deliver(chat, render::result(&breakdown, calculator.as_ref()))
            .await;
        self.sessions.remove_user(chat);
    }

    async fn deliver(&self, chat: ChatId, message: OutboundMessage) {
        if let Err(err) = self.transport.send(chat, message).await {
            tracing::warn!(%chat, %err, "message delivery failed");
        }
    }
}

/// Parse a user-entered price: tolerant of `$`, spaces and thousands
/// separators, strict about positivity.
fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, ' ' | ','))
        .collect();
    let price = Decimal::from_str(&cleaned).ok()?;
    (price > Decimal::ZERO).then_some(price)
}
