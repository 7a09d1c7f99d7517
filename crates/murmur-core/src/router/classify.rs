//! Line classification: turn one inbound line into an [`Intent`] or a
//! sender-only [`Diagnostic`].

use murmur_types::intent::{AiModel, Classified, Diagnostic, Intent};
use murmur_types::protocol::CLEAR_COMMAND;
use murmur_types::session::SessionId;

const MATH_COMMAND: &str = "@math";
const AI_COMMAND: &str = "@ai";

/// Classify a raw inbound line.
///
/// The line is trimmed first. Returns `None` for a line that is empty after
/// trimming; such lines are ignored entirely.
///
/// Precedence, first match wins:
/// 1. exactly `\clear`
/// 2. `@math` / `@ai` prefix (case-insensitive, `@math` tested first)
/// 3. `@<id> <body>` private message, or a diagnostic if malformed
/// 4. broadcast
pub fn classify(line: &str) -> Option<Classified> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line == CLEAR_COMMAND {
        return Some(Classified::Intent(Intent::Clear));
    }

    if let Some(prompt) = strip_command(line, MATH_COMMAND) {
        return Some(ai_query(AiModel::Qwen2Math, prompt));
    }
    if let Some(prompt) = strip_command(line, AI_COMMAND) {
        return Some(ai_query(AiModel::DeepseekR1, prompt));
    }

    if let Some(rest) = line.strip_prefix('@') {
        return Some(classify_private(rest));
    }

    Some(Classified::Intent(Intent::Broadcast {
        body: line.to_string(),
    }))
}

/// Case-insensitive prefix match; returns the trimmed remainder.
fn strip_command<'a>(line: &'a str, command: &str) -> Option<&'a str> {
    let head = line.get(..command.len())?;
    if head.eq_ignore_ascii_case(command) {
        Some(line[command.len()..].trim())
    } else {
        None
    }
}

fn ai_query(model: AiModel, prompt: &str) -> Classified {
    Classified::Intent(Intent::AiQuery {
        model,
        prompt: prompt.to_string(),
    })
}

fn classify_private(rest: &str) -> Classified {
    let Some((token, body)) = rest.split_once(' ') else {
        return Classified::Rejected(Diagnostic::MalformedPrivate);
    };
    match token.parse::<SessionId>() {
        Ok(target) => Classified::Intent(Intent::Private {
            target,
            body: body.to_string(),
        }),
        Err(_) => Classified::Rejected(Diagnostic::InvalidTarget),
    }
}
