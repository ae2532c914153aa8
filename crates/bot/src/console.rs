//! Console transport
//!
//! A line-based stand-in for a real chat service, used for local runs and
//! manual testing. Outbound messages are printed to stdout with their
//! button tokens; inbound lines become events via [`parse_line`]:
//! `/name` is a command, `btn:<token>` a button press, anything else free
//! text.

use async_trait::async_trait;
use carcost_core::{ChatId, ChatTransport, InboundEvent, MessageId, OutboundMessage, Result};

pub struct ConsoleTransport;

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send(&self, chat: ChatId, message: OutboundMessage) -> Result<()> {
        println!("[{chat}] {}", message.text);
        if let Some(keyboard) = &message.keyboard {
            for row in &keyboard.rows {
                let rendered: Vec<String> = row
                    .iter()
                    .map(|b| format!("[{} -> btn:{}]", b.label, b.token))
                    .collect();
                println!("        {}", rendered.join(" "));
            }
        }
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message_id: MessageId) -> Result<()> {
        // A console has no message recall; pretend it worked
        tracing::debug!(%chat, ?message_id, "console cannot delete messages");
        Ok(())
    }
}

/// Turn one console line into an inbound event
pub fn parse_line(chat: ChatId, line: &str, message_id: MessageId) -> InboundEvent {
    let line = line.trim();
    if let Some(name) = line.strip_prefix('/') {
        InboundEvent::Command {
            chat,
            name: name.to_string(),
            sender: None,
        }
    } else if let Some(token) = line.strip_prefix("btn:") {
        InboundEvent::ButtonPress {
            chat,
            token: token.to_string(),
        }
    } else {
        InboundEvent::FreeText {
            chat,
            text: line.to_string(),
            message_id: Some(message_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_variants() {
        let chat = ChatId(1);
        let id = MessageId(7);

        assert!(matches!(
            parse_line(chat, "/calculate", id),
            InboundEvent::Command { ref name, .. } if name == "calculate"
        ));
        assert!(matches!(
            parse_line(chat, "btn:country_china", id),
            InboundEvent::ButtonPress { ref token, .. } if token == "country_china"
        ));
        assert!(matches!(
            parse_line(chat, "  25000 ", id),
            InboundEvent::FreeText { ref text, message_id: Some(MessageId(7)), .. } if text == "25000"
        ));
    }
}
