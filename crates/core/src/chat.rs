//! Chat identifiers, inbound events and outbound message types
//!
//! The transport collaborator translates its own update format into
//! [`InboundEvent`]s and delivers [`OutboundMessage`]s; everything in
//! between is the core's responsibility.

/// Identifier of a chat (one dialog partner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChatId(pub i64);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the sending user, used only for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a single delivered message within a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub i64);

/// An event received from the transport collaborator
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// A slash command, e.g. `/calculate`
    Command {
        chat: ChatId,
        name: String,
        sender: Option<UserId>,
    },
    /// Plain text typed by the user
    FreeText {
        chat: ChatId,
        text: String,
        /// Transport-level id of the inbound message, when known.
        /// Needed for the best-effort deletion of password messages.
        message_id: Option<MessageId>,
    },
    /// An inline button press
    ButtonPress { chat: ChatId, token: String },
}

impl InboundEvent {
    /// Chat the event belongs to
    pub fn chat(&self) -> ChatId {
        match self {
            InboundEvent::Command { chat, .. }
            | InboundEvent::FreeText { chat, .. }
            | InboundEvent::ButtonPress { chat, .. } => *chat,
        }
    }
}

/// Recognized bot commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Calculate,
    Example,
    Admin,
    AdminSettings,
    Help,
    About,
    ChatInfo,
}

impl Command {
    /// Parse a command name (leading slash and bot suffix already stripped
    /// or tolerated). Unknown commands yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('/');
        let name = name.split('@').next().unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Command::Start),
            "calculate" => Some(Command::Calculate),
            "example" => Some(Command::Example),
            "admin" => Some(Command::Admin),
            "admin_settings" => Some(Command::AdminSettings),
            "help" => Some(Command::Help),
            "about" => Some(Command::About),
            "info" => Some(Command::ChatInfo),
            _ => None,
        }
    }
}

/// Decoded inline button token
///
/// Tokens follow a stable namespaced scheme: `country_<code>`,
/// `delivery_<kind>`, `admin_<action>`, plus the two global navigation
/// tokens. The scheme is part of the persisted-message contract and must
/// not change between versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    MainMenu,
    NewCalculation,
    Country(String),
    Delivery(String),
    Admin(String),
}

impl ButtonAction {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "main_menu" => Some(ButtonAction::MainMenu),
            "new_calculation" => Some(ButtonAction::NewCalculation),
            _ => {
                if let Some(code) = token.strip_prefix("country_") {
                    Some(ButtonAction::Country(code.to_string()))
                } else if let Some(kind) = token.strip_prefix("delivery_") {
                    Some(ButtonAction::Delivery(kind.to_string()))
                } else {
                    token
                        .strip_prefix("admin_")
                        .map(|action| ButtonAction::Admin(action.to_string()))
                }
            }
        }
    }
}

/// One inline button: a visible label and the token sent back on press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Inline keyboard: rows of buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// Single-row keyboard
    pub fn row(buttons: Vec<Button>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }
}

/// A message the core asks the transport to deliver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/CALCULATE"), Some(Command::Calculate));
        assert_eq!(Command::parse("admin_settings"), Some(Command::AdminSettings));
        assert_eq!(Command::parse("/help@carcost_bot"), Some(Command::Help));
        assert_eq!(Command::parse("/frobnicate"), None);
    }

    #[test]
    fn test_button_token_parse() {
        assert_eq!(
            ButtonAction::parse("country_china"),
            Some(ButtonAction::Country("china".to_string()))
        );
        assert_eq!(
            ButtonAction::parse("delivery_train"),
            Some(ButtonAction::Delivery("train".to_string()))
        );
        assert_eq!(
            ButtonAction::parse("admin_reset_all"),
            Some(ButtonAction::Admin("reset_all".to_string()))
        );
        assert_eq!(ButtonAction::parse("main_menu"), Some(ButtonAction::MainMenu));
        assert_eq!(ButtonAction::parse("bogus"), None);
    }
}
