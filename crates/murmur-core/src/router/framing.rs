//! Sender-relative framings of routed messages.
//!
//! Delivered lines and transcript records use different forms of the same
//! content; keeping them together here makes the wire format easy to audit.

use murmur_types::intent::AiModel;
use murmur_types::session::SessionId;

/// Private message as delivered to and logged for the recipient.
pub fn private_for_recipient(sender: SessionId, body: &str) -> String {
    format!("[User {sender}] {body}")
}

/// Private message as logged for its sender.
pub fn private_for_sender(target: SessionId, body: &str) -> String {
    format!("You: (@{target}) {body}")
}

/// Broadcast as delivered back to its sender.
pub fn broadcast_for_sender(body: &str) -> String {
    format!("You: {body}")
}

/// Broadcast as delivered to every other session.
pub fn broadcast_for_peer(sender: SessionId, body: &str) -> String {
    format!("[User {sender}]: {body}")
}

/// Neutral broadcast record, encrypted once and logged for every participant.
pub fn broadcast_record(sender: SessionId, body: &str) -> String {
    format!("[{sender}] {body}")
}

/// AI prompt as logged for the caller.
pub fn ai_prompt(model: AiModel, prompt: &str) -> String {
    format!("You: ({}) {prompt}", model.role_tag())
}

/// AI reply as delivered to and logged for the caller.
pub fn ai_reply(model: AiModel, reply: &str) -> String {
    format!("{} {reply}", model.reply_prefix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_framings() {
        assert_eq!(private_for_recipient(SessionId(1000), "hi"), "[User 1000] hi");
        assert_eq!(private_for_sender(SessionId(1001), "hi"), "You: (@1001) hi");
    }

    #[test]
    fn broadcast_framings_differ_by_audience() {
        let s = SessionId(1000);
        assert_eq!(broadcast_for_sender("m"), "You: m");
        assert_eq!(broadcast_for_peer(s, "m"), "[User 1000]: m");
        assert_eq!(broadcast_record(s, "m"), "[1000] m");
    }

    #[test]
    fn ai_framings() {
        assert_eq!(ai_prompt(AiModel::DeepseekR1, "hello"), "You: (AI) hello");
        assert_eq!(ai_prompt(AiModel::Qwen2Math, "2+2"), "You: (Math) 2+2");
        assert_eq!(ai_reply(AiModel::DeepseekR1, "hi"), "AI: hi");
        assert_eq!(ai_reply(AiModel::Qwen2Math, "4"), "AI-Math: 4");
    }
}
