//! In-memory session store
//!
//! Sole owner of per-chat dialog state. Sessions live only for the duration
//! of a dialog and are never persisted; a restart simply drops them. All
//! access goes through closures so callers can never hold a session across
//! an await point.

use std::collections::HashMap;

use carcost_core::{AdminSession, ChatId, UserSession, UserStep};
use parking_lot::RwLock;

/// Per-chat sessions for both flows.
///
/// A chat holds at most one user session and at most one admin session;
/// the router makes the two mutually exclusive when it matters. Creation
/// and removal happen only through this store.
#[derive(Default)]
pub struct SessionStore {
    users: RwLock<HashMap<ChatId, UserSession>>,
    admins: RwLock<HashMap<ChatId, AdminSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the estimate dialog for a chat
    pub fn start_user(&self, chat: ChatId) {
        let mut users = self.users.write();
        if users.insert(chat, UserSession::new()).is_some() {
            tracing::debug!(%chat, "estimate dialog restarted");
        }
    }

    pub fn has_user(&self, chat: ChatId) -> bool {
        self.users.read().contains_key(&chat)
    }

    /// Current step of the chat's estimate dialog, if one is running
    pub fn user_step(&self, chat: ChatId) -> Option<UserStep> {
        self.users.read().get(&chat).map(|s| s.step)
    }

    /// Snapshot of the chat's estimate dialog
    pub fn user_snapshot(&self, chat: ChatId) -> Option<UserSession> {
        self.users.read().get(&chat).cloned()
    }

    /// Mutate the chat's user session in place. Returns `None` when the
    /// chat has no session.
    pub fn with_user<R>(&self, chat: ChatId, f: impl FnOnce(&mut UserSession) -> R) -> Option<R> {
        self.users.write().get_mut(&chat).map(f)
    }

    pub fn remove_user(&self, chat: ChatId) {
        self.users.write().remove(&chat);
    }

    /// Start the admin dialog, unauthenticated
    pub fn start_admin(&self, chat: ChatId) {
        self.admins.write().insert(chat, AdminSession::new());
    }

    /// Snapshot of the chat's admin session
    pub fn admin_snapshot(&self, chat: ChatId) -> Option<AdminSession> {
        self.admins.read().get(&chat).cloned()
    }

    /// Mutate the chat's admin session in place
    pub fn with_admin<R>(&self, chat: ChatId, f: impl FnOnce(&mut AdminSession) -> R) -> Option<R> {
        self.admins.write().get_mut(&chat).map(f)
    }

    pub fn remove_admin(&self, chat: ChatId) {
        self.admins.write().remove(&chat);
    }

    /// Drop both sessions of a chat, e.g. on return to the main menu
    pub fn clear_chat(&self, chat: ChatId) {
        self.remove_user(chat);
        self.remove_admin(chat);
    }

    /// Number of live sessions, for diagnostics
    pub fn session_counts(&self) -> (usize, usize) {
        (self.users.read().len(), self.admins.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_per_chat() {
        let store = SessionStore::new();
        store.start_user(ChatId(1));
        store.start_user(ChatId(2));

        store.with_user(ChatId(1), |s| s.step = UserStep::AwaitingPrice);

        assert_eq!(store.user_step(ChatId(1)), Some(UserStep::AwaitingPrice));
        assert_eq!(store.user_step(ChatId(2)), Some(UserStep::AwaitingCountry));
        assert_eq!(store.user_step(ChatId(3)), None);
    }

    #[test]
    fn test_restart_resets_state() {
        let store = SessionStore::new();
        store.start_user(ChatId(7));
        store.with_user(ChatId(7), |s| s.step = UserStep::AwaitingDelivery);

        store.start_user(ChatId(7));
        assert_eq!(store.user_step(ChatId(7)), Some(UserStep::AwaitingCountry));
    }

    #[test]
    fn test_clear_chat_drops_both() {
        let store = SessionStore::new();
        store.start_user(ChatId(5));
        store.start_admin(ChatId(5));

        store.clear_chat(ChatId(5));

        assert!(!store.has_user(ChatId(5)));
        assert!(store.admin_snapshot(ChatId(5)).is_none());
        assert_eq!(store.session_counts(), (0, 0));
    }
}
