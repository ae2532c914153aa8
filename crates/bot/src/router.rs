//! Event routing
//!
//! One entry point, [`Router::dispatch`], per inbound event. Routing
//! precedence for free text mirrors the session state: an unauthenticated
//! admin session consumes it as a password, an open edit consumes it as a
//! value, a leading slash makes it a command, an authenticated idle admin
//! gets the menu back, a live estimate dialog consumes it as a price, and
//! anything else gets a usage hint.

use std::sync::Arc;

use carcost_core::{
    ButtonAction, ChatId, ChatTransport, Command, DeliveryKind, InboundEvent, MessageId,
    OutboundMessage, UserId,
};
use carcost_dialog::{render, AdminFlow, SessionStore, UserFlow};
use dashmap::DashMap;
use tokio::sync::Mutex;

pub struct Router {
    sessions: Arc<SessionStore>,
    user: UserFlow,
    admin: AdminFlow,
    transport: Arc<dyn ChatTransport>,
    /// Per-chat locks serializing event handling end to end
    guards: DashMap<ChatId, Arc<Mutex<()>>>,
}

impl Router {
    pub fn new(
        sessions: Arc<SessionStore>,
        user: UserFlow,
        admin: AdminFlow,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            sessions,
            user,
            admin,
            transport,
            guards: DashMap::new(),
        }
    }

    /// Handle one inbound event. Events for the same chat are processed
    /// strictly one at a time; events for different chats run freely.
    pub async fn dispatch(&self, event: InboundEvent) {
        let chat = event.chat();
        let guard = self
            .guards
            .entry(chat)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let held = guard.lock().await;

        match event {
            InboundEvent::Command { chat, name, sender } => {
                self.handle_command(chat, &name, sender).await
            }
            InboundEvent::FreeText {
                chat,
                text,
                message_id,
            } => self.handle_text(chat, &text, message_id).await,
            InboundEvent::ButtonPress { chat, token } => self.handle_button(chat, &token).await,
        }

        drop(held);
        drop(guard);
        self.evict_guard(chat);
    }

    /// Drop a chat's guard once neither session exists for it, so the map
    /// does not grow with every chat ever seen. `remove_if` runs under the
    /// shard lock: a concurrent `dispatch` either holds a clone (keeping
    /// the strong count above one, so the entry stays) or comes later and
    /// creates a fresh guard.
    fn evict_guard(&self, chat: ChatId) {
        if self.sessions.has_user(chat) || self.sessions.admin_snapshot(chat).is_some() {
            return;
        }
        self.guards
            .remove_if(&chat, |_, guard| Arc::strong_count(guard) == 1);
    }

    /// Number of live per-chat guards, for diagnostics
    pub fn guard_count(&self) -> usize {
        self.guards.len()
    }

    async fn handle_command(&self, chat: ChatId, name: &str, sender: Option<UserId>) {
        let Some(command) = Command::parse(name) else {
            tracing::debug!(%chat, name, "unknown command");
            self.send(chat, render::unknown_command(name)).await;
            return;
        };
        tracing::info!(%chat, ?command, "command");

        match command {
            Command::Start => self.send(chat, render::welcome()).await,
            Command::Calculate => {
                // Starting an estimate leaves the admin panel
                self.sessions.remove_admin(chat);
                self.user.begin(chat).await;
            }
            Command::Example => self.user.show_example(chat).await,
            Command::Admin => self.admin.begin_auth(chat).await,
            Command::AdminSettings => {
                let authenticated = self
                    .sessions
                    .admin_snapshot(chat)
                    .is_some_and(|s| s.authenticated);
                if authenticated {
                    self.admin.show_menu(chat).await;
                } else {
                    self.send(chat, render::stale_admin_button()).await;
                }
            }
            Command::Help => self.send(chat, render::help()).await,
            Command::About => self.send(chat, render::about()).await,
            Command::ChatInfo => self.send(chat, render::chat_info(chat, sender)).await,
        }
    }

    async fn handle_text(&self, chat: ChatId, text: &str, message_id: Option<MessageId>) {
        let admin = self.sessions.admin_snapshot(chat);

        if let Some(session) = &admin {
            if !session.authenticated {
                self.admin.submit_password(chat, text, message_id).await;
                return;
            }
            if session.awaiting_input {
                self.admin.submit_value(chat, text).await;
                return;
            }
        }

        // Transports may deliver commands as plain text
        if let Some(name) = text.trim().strip_prefix('/') {
            self.handle_command(chat, name, None).await;
            return;
        }

        if admin.is_some() {
            // Authenticated, nothing being edited: the text is noise
            self.admin.reshow_menu(chat).await;
            return;
        }

        if self.sessions.has_user(chat) {
            self.user.submit_price(chat, text).await;
            return;
        }

        self.send(chat, render::idle_hint()).await;
    }

    async fn handle_button(&self, chat: ChatId, token: &str) {
        let Some(action) = ButtonAction::parse(token) else {
            tracing::debug!(%chat, token, "unknown button token ignored");
            return;
        };

        match action {
            ButtonAction::MainMenu => {
                self.sessions.clear_chat(chat);
                self.send(chat, render::welcome()).await;
            }
            ButtonAction::NewCalculation => {
                self.sessions.remove_admin(chat);
                self.user.begin(chat).await;
            }
            ButtonAction::Country(code) => self.user.select_country(chat, &code).await,
            ButtonAction::Delivery(kind) => match DeliveryKind::parse(&kind) {
                Some(kind) => self.user.select_delivery(chat, kind).await,
                None => tracing::debug!(%chat, kind, "unknown delivery token ignored"),
            },
            ButtonAction::Admin(action) => self.admin.handle_button(chat, &action).await,
        }
    }

    async fn send(&self, chat: ChatId, message: OutboundMessage) {
        if let Err(err) = self.transport.send(chat, message).await {
            tracing::warn!(%chat, %err, "message delivery failed");
        }
    }
}
