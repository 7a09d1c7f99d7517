//! Fixed server-to-client lines of the relay's text protocol.
//!
//! Every line travels newline-terminated over the TCP stream. The builders
//! return the line without its terminator.

use crate::session::SessionId;

/// Client command that deletes the caller's transcript.
pub const CLEAR_COMMAND: &str = "\\clear";

/// Opening marker of the history replay sent on connect.
pub const HISTORY_START: &str = "--- Chat History ---";
/// Closing marker of the history replay.
pub const HISTORY_END: &str = "--------------------";

/// Self-notification after `\clear`.
pub const HISTORY_CLEARED: &str = "Chat history cleared.";

pub const INVALID_USER_ID: &str = "Invalid user ID format. Please use '@<userID> message'.";
pub const INVALID_COMMAND: &str =
    "Invalid command. Use '@<userID> message' for private messaging.";

/// Reply text substituted when the external model cannot be run.
pub const AI_FAILURE_REPLY: &str = "Error calling AI model.";

/// First line every client receives.
pub fn user_id_line(id: SessionId) -> String {
    format!("Your User ID: {id}")
}

/// Sent to the sender of a private message whose target is not connected.
pub fn not_online_line(target: SessionId) -> String {
    format!("User {target} is not online.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_line_format() {
        assert_eq!(user_id_line(SessionId(1000)), "Your User ID: 1000");
    }

    #[test]
    fn not_online_line_format() {
        assert_eq!(not_online_line(SessionId(4242)), "User 4242 is not online.");
    }

    #[test]
    fn history_markers_have_expected_shape() {
        assert_eq!(HISTORY_END.len(), 20);
        assert!(HISTORY_END.chars().all(|c| c == '-'));
        assert_eq!(CLEAR_COMMAND, r"\clear");
    }
}
