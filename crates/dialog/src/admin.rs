//! The admin dialog
//!
//! Password-gated panel for editing pricing parameters and inspecting
//! statistics. Authentication is single-attempt: a wrong password destroys
//! the session and the admin must send the entry command again. The inbound
//! password message is deleted best-effort so it does not linger in the
//! chat history.

use std::str::FromStr;
use std::sync::Arc;

use carcost_config::{ConfigStore, SettingKey, StatsTracker};
use carcost_core::{ChatId, ChatTransport, MessageId, OutboundMessage};
use rust_decimal::Decimal;

use crate::render;
use crate::store::SessionStore;

pub struct AdminFlow {
    sessions: Arc<SessionStore>,
    store: Arc<ConfigStore>,
    stats: Arc<StatsTracker>,
    transport: Arc<dyn ChatTransport>,
    password: String,
}

impl AdminFlow {
    pub fn new(
        sessions: Arc<SessionStore>,
        store: Arc<ConfigStore>,
        stats: Arc<StatsTracker>,
        transport: Arc<dyn ChatTransport>,
        password: String,
    ) -> Self {
        Self {
            sessions,
            store,
            stats,
            transport,
            password,
        }
    }

    /// Enter the admin flow: any estimate dialog in the chat is abandoned
    /// and a fresh unauthenticated session is created.
    pub async fn begin_auth(&self, chat: ChatId) {
        self.sessions.remove_user(chat);
        self.sessions.start_admin(chat);
        self.deliver(chat, render::password_prompt()).await;
    }

    /// One password attempt. The inbound message is deleted when the
    /// transport knows its id; failure to delete is logged and ignored.
    pub async fn submit_password(&self, chat: ChatId, text: &str, message_id: Option<MessageId>) {
        if let Some(id) = message_id {
            if let Err(err) = self.transport.delete_message(chat, id).await {
                tracing::warn!(%chat, %err, "could not delete password message");
            }
        }

        if constant_time_compare(text.trim(), &self.password) {
            self.sessions.with_admin(chat, |s| s.authenticated = true);
            tracing::info!(%chat, "admin authenticated");
            self.deliver(chat, render::access_granted()).await;
            self.show_menu(chat).await;
        } else {
            // Single attempt: back to square one
            self.sessions.remove_admin(chat);
            tracing::warn!(%chat, "admin authentication failed");
            self.deliver(chat, render::access_denied()).await;
        }
    }

    /// Render the panel menu, surfacing a pending save failure if any
    pub async fn show_menu(&self, chat: ChatId) {
        let save_error = self.store.last_save_error();
        self.deliver(chat, render::admin_menu(save_error.as_deref()))
            .await;
    }

    /// An `admin_*` button press. Presses without an authenticated session
    /// (stale menus, restarts) get a sign-in hint and change nothing.
    pub async fn handle_button(&self, chat: ChatId, action: &str) {
        let authenticated = self
            .sessions
            .admin_snapshot(chat)
            .is_some_and(|s| s.authenticated);
        if !authenticated {
            self.deliver(chat, render::stale_admin_button()).await;
            return;
        }

        if let Some(token) = action.strip_prefix("edit_") {
            match SettingKey::parse(token) {
                Some(key) => self.request_edit(chat, key).await,
                None => tracing::debug!(%chat, token, "unknown setting token ignored"),
            }
            return;
        }

        match action {
            "show_pricing" => {
                let params = self.store.parameters();
                self.deliver(chat, render::pricing_sheet(&params)).await;
            }
            "reset_all" => {
                if let Err(err) = self.store.reset_parameters() {
                    tracing::error!(%chat, %err, "reset failed to persist");
                }
                self.deliver(chat, render::rates_reset()).await;
                self.show_menu(chat).await;
            }
            "show_stats" => {
                let stats = self.stats.snapshot();
                self.deliver(chat, render::stats_report(&stats)).await;
            }
            "reset_stats" => {
                self.stats.reset();
                self.deliver(chat, render::stats_reset()).await;
                self.show_menu(chat).await;
            }
            "logout" => {
                self.sessions.remove_admin(chat);
                self.deliver(chat, render::logged_out()).await;
            }
            "back_to_menu" => {
                self.sessions.with_admin(chat, |s| s.clear_edit());
                self.show_menu(chat).await;
            }
            other => tracing::debug!(%chat, other, "unknown admin action ignored"),
        }
    }

    /// Free text from an authenticated admin with no edit in progress:
    /// nothing consumes it, so just put the menu back in front of them.
    pub async fn reshow_menu(&self, chat: ChatId) {
        self.show_menu(chat).await;
    }

    async fn request_edit(&self, chat: ChatId, key: SettingKey) {
        self.sessions.with_admin(chat, |s| {
            s.awaiting_input = true;
            s.setting = Some(key.token().to_string());
        });
        let params = self.store.parameters();
        self.deliver(chat, render::enter_value(key, &params)).await;
    }

    /// Value for the setting selected via [`AdminFlow::request_edit`].
    /// Rejection keeps the edit open; acceptance persists the full record
    /// and closes it.
    pub async fn submit_value(&self, chat: ChatId, text: &str) {
        let setting = self
            .sessions
            .admin_snapshot(chat)
            .filter(|s| s.authenticated && s.awaiting_input)
            .and_then(|s| s.setting);
        let Some(key) = setting.as_deref().and_then(SettingKey::parse) else {
            tracing::debug!(%chat, "value submitted with no edit in progress");
            self.show_menu(chat).await;
            return;
        };

        let Ok(value) = Decimal::from_str(text.trim().trim_start_matches('$')) else {
            self.deliver(chat, render::invalid_value("not a number"))
                .await;
            return;
        };

        let mut params = self.store.parameters();
        if let Err(err) = key.apply(&mut params, value) {
            self.deliver(chat, render::invalid_value(&err.to_string()))
                .await;
            return;
        }
        // In-memory state is updated even if the write fails; the menu
        // warns about the failed save.
        if let Err(err) = self.store.save_parameters(&params) {
            tracing::error!(%chat, %err, "setting change did not persist");
        }

        self.sessions.with_admin(chat, |s| s.clear_edit());
        self.deliver(chat, render::value_saved(key, &params)).await;
        self.show_menu(chat).await;
    }

    async fn deliver(&self, chat: ChatId, message: OutboundMessage) {
        if let Err(err) = self.transport.send(chat, message).await {
            tracing::warn!(%chat, %err, "message delivery failed");
        }
    }
}

/// Compare two strings without short-circuiting on the first mismatch
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use carcost_core::Result;
    use parking_lot::Mutex;
    use rust_decimal_macros::dec;

    struct RecordingTransport {
        sent: Mutex<Vec<OutboundMessage>>,
        deleted: Mutex<Vec<MessageId>>,
    }

    impl RecordingTransport {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                deleted: Mutex::new(Vec::new()),
            })
        }

        fn last_text(&self) -> String {
            self.sent.lock().last().map(|m| m.text.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ChatTransport for RecordingTransport {
        async fn send(&self, _chat: ChatId, message: OutboundMessage) -> Result<()> {
            self.sent.lock().push(message);
            Ok(())
        }

        async fn delete_message(&self, _chat: ChatId, message_id: MessageId) -> Result<()> {
            self.deleted.lock().push(message_id);
            Ok(())
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        store: Arc<ConfigStore>,
        sessions: Arc<SessionStore>,
        stats: Arc<StatsTracker>,
        transport: Arc<RecordingTransport>,
        flow: AdminFlow,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ConfigStore::new(dir.path()).unwrap());
        let sessions = Arc::new(SessionStore::new());
        let stats = Arc::new(StatsTracker::new(Arc::clone(&store)));
        let transport = RecordingTransport::new();
        let flow = AdminFlow::new(
            Arc::clone(&sessions),
            Arc::clone(&store),
            Arc::clone(&stats),
            transport.clone() as Arc<dyn ChatTransport>,
            "hunter2".to_string(),
        );
        Fixture {
            _dir: dir,
            store,
            sessions,
            stats,
            transport,
            flow,
        }
    }

    async fn sign_in(f: &Fixture, chat: ChatId) {
        f.flow.begin_auth(chat).await;
        f.flow.submit_password(chat, "hunter2", None).await;
    }

    #[tokio::test]
    async fn test_wrong_password_is_single_attempt() {
        let f = fixture();
        let chat = ChatId(20);

        f.flow.begin_auth(chat).await;
        f.flow
            .submit_password(chat, "letmein", Some(MessageId(99)))
            .await;

        // Session gone, message deleted anyway
        assert!(f.sessions.admin_snapshot(chat).is_none());
        assert_eq!(f.transport.deleted.lock().as_slice(), &[MessageId(99)]);
        assert!(f.transport.last_text().contains("Wrong password"));
    }

    #[tokio::test]
    async fn test_correct_password_authenticates_and_shows_menu() {
        let f = fixture();
        let chat = ChatId(21);

        f.flow.begin_auth(chat).await;
        f.flow
            .submit_password(chat, " hunter2 ", Some(MessageId(5)))
            .await;

        let session = f.sessions.admin_snapshot(chat).unwrap();
        assert!(session.authenticated);
        assert!(f.transport.last_text().contains("Admin panel"));
        assert_eq!(f.transport.deleted.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_begin_auth_abandons_estimate_dialog() {
        let f = fixture();
        let chat = ChatId(22);
        f.sessions.start_user(chat);

        f.flow.begin_auth(chat).await;

        assert!(!f.sessions.has_user(chat));
        assert!(f.sessions.admin_snapshot(chat).is_some());
    }

    #[tokio::test]
    async fn test_edit_customs_percent_stores_fraction() {
        let f = fixture();
        let chat = ChatId(23);
        sign_in(&f, chat).await;

        f.flow.handle_button(chat, "edit_customs_percent").await;
        assert!(f
            .sessions
            .admin_snapshot(chat)
            .unwrap()
            .awaiting_input);

        f.flow.submit_value(chat, "45").await;

        assert_eq!(f.store.parameters().customs_percent, dec!(0.45));
        let session = f.sessions.admin_snapshot(chat).unwrap();
        assert!(!session.awaiting_input);
        assert_eq!(session.setting, None);

        // Persisted, not just in memory
        let reopened = ConfigStore::new(f._dir.path()).unwrap();
        assert_eq!(reopened.parameters().customs_percent, dec!(0.45));
    }

    #[tokio::test]
    async fn test_rejected_value_keeps_edit_open() {
        let f = fixture();
        let chat = ChatId(24);
        sign_in(&f, chat).await;

        f.flow.handle_button(chat, "edit_port_fee").await;
        f.flow.submit_value(chat, "minus five").await;
        f.flow.submit_value(chat, "-5").await;

        assert_eq!(f.store.parameters().port_fee, dec!(700));
        assert!(f.sessions.admin_snapshot(chat).unwrap().awaiting_input);

        f.flow.submit_value(chat, "950").await;
        assert_eq!(f.store.parameters().port_fee, dec!(950));
    }

    #[tokio::test]
    async fn test_reset_all_restores_defaults_but_not_stats() {
        let f = fixture();
        let chat = ChatId(25);
        sign_in(&f, chat).await;
        f.stats.record(dec!(50000));

        f.flow.handle_button(chat, "edit_docs").await;
        f.flow.submit_value(chat, "9999").await;
        f.flow.handle_button(chat, "reset_all").await;

        assert_eq!(
            f.store.parameters(),
            carcost_config::PricingParameters::default()
        );
        assert_eq!(f.stats.snapshot().total_calculations, 1);
    }

    #[tokio::test]
    async fn test_stats_report_and_reset() {
        let f = fixture();
        let chat = ChatId(26);
        sign_in(&f, chat).await;
        f.stats.record(dec!(40000));
        f.stats.record(dec!(60000));

        f.flow.handle_button(chat, "show_stats").await;
        let report = f.transport.last_text();
        assert!(report.contains("Calculations: 2"));
        assert!(report.contains("Average: $50000"));

        f.flow.handle_button(chat, "reset_stats").await;
        assert_eq!(f.stats.snapshot().total_calculations, 0);
    }

    #[tokio::test]
    async fn test_stale_button_without_session() {
        let f = fixture();
        f.flow.handle_button(ChatId(27), "reset_all").await;

        assert!(f.transport.last_text().contains("expired"));
        assert_eq!(
            f.store.parameters(),
            carcost_config::PricingParameters::default()
        );
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let f = fixture();
        let chat = ChatId(28);
        sign_in(&f, chat).await;

        f.flow.handle_button(chat, "logout").await;

        assert!(f.sessions.admin_snapshot(chat).is_none());
        // Buttons from the old menu are now stale
        f.flow.handle_button(chat, "show_pricing").await;
        assert!(f.transport.last_text().contains("expired"));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(!constant_time_compare("", "x"));
    }
}
