//! Parsed form of one inbound chat line.
//!
//! Classification itself lives in `murmur-core::router`; these are the
//! stateless values it produces. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::protocol;
use crate::session::SessionId;

/// External text-generation model selectable from a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AiModel {
    /// General assistant, selected by `@ai`.
    DeepseekR1,
    /// Math assistant, selected by `@math`.
    Qwen2Math,
}

impl AiModel {
    /// Model family name (`deepseek-r1` / `qwen2-math`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeepseekR1 => "deepseek-r1",
            Self::Qwen2Math => "qwen2-math",
        }
    }

    /// Role tag used when the prompt is written to the caller's transcript,
    /// as in `You: (AI) ...`.
    pub fn role_tag(self) -> &'static str {
        match self {
            Self::DeepseekR1 => "AI",
            Self::Qwen2Math => "Math",
        }
    }

    /// Prefix of the reply line sent to the caller, as in `AI: ...`.
    pub fn reply_prefix(self) -> &'static str {
        match self {
            Self::DeepseekR1 => "AI:",
            Self::Qwen2Math => "AI-Math:",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command derived from a single non-empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `\clear`: delete the caller's transcript.
    Clear,
    /// `@ai` / `@math`: ask an external model.
    AiQuery { model: AiModel, prompt: String },
    /// `@<id> body`: direct message to one session.
    Private { target: SessionId, body: String },
    /// Anything else: deliver to every connected session.
    Broadcast { body: String },
}

/// Sender-only notices for lines that look like commands but are malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// `@<token> body` where the token is not a number.
    InvalidTarget,
    /// `@<token>` with no body at all.
    MalformedPrivate,
}

impl Diagnostic {
    /// The exact line sent back to the offending sender.
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidTarget => protocol::INVALID_USER_ID,
            Self::MalformedPrivate => protocol::INVALID_COMMAND,
        }
    }
}

/// Outcome of classifying a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Intent(Intent),
    Rejected(Diagnostic),
}
