//! MessageRouter: executes a classified line on behalf of its sender.
//!
//! Generic over the transcript and generator ports so the same rules run
//! against the file store in production and in-memory fakes in tests.

use std::sync::Arc;

use murmur_types::intent::{AiModel, Classified, Intent};
use murmur_types::protocol;
use murmur_types::session::SessionId;
use tracing::{debug, info, warn};

use super::{classify, framing};
use crate::ai::TextGenerator;
use crate::session::{Session, SessionRegistry};
use crate::transcript::TranscriptStore;

/// Routes lines between sessions and records them in transcripts.
///
/// Holds no per-connection state; one router is shared by every connection.
pub struct MessageRouter<S, G> {
    registry: Arc<SessionRegistry>,
    transcripts: Arc<S>,
    generator: Arc<G>,
}

impl<S, G> Clone for MessageRouter<S, G> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            transcripts: self.transcripts.clone(),
            generator: self.generator.clone(),
        }
    }
}

impl<S: TranscriptStore, G: TextGenerator> MessageRouter<S, G> {
    pub fn new(registry: Arc<SessionRegistry>, transcripts: Arc<S>, generator: Arc<G>) -> Self {
        Self {
            registry,
            transcripts,
            generator,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Classify `line` and act on it. Blank lines are ignored.
    ///
    /// Completes only once the line has been fully handled, including any
    /// external model call, so a connection processes its lines in order.
    pub async fn route(&self, sender: &Session, line: &str) {
        let Some(classified) = classify(line) else {
            return;
        };
        match classified {
            Classified::Rejected(diagnostic) => {
                debug!(session_id = %sender.id(), ?diagnostic, "rejected line");
                sender.send(diagnostic.message());
            }
            Classified::Intent(intent) => self.dispatch(sender, intent).await,
        }
    }

    /// Execute an already-classified intent.
    pub async fn dispatch(&self, sender: &Session, intent: Intent) {
        match intent {
            Intent::Clear => self.clear(sender).await,
            Intent::AiQuery { model, prompt } => self.ask(sender, model, &prompt).await,
            Intent::Private { target, body } => self.private(sender, target, &body).await,
            Intent::Broadcast { body } => self.broadcast(sender, &body).await,
        }
    }

    async fn clear(&self, sender: &Session) {
        let id = sender.id();
        match self.transcripts.clear(id).await {
            Ok(()) => {
                debug!(session_id = %id, "transcript cleared");
                sender.send(protocol::HISTORY_CLEARED);
            }
            Err(e) => warn!(session_id = %id, error = %e, "failed to clear transcript"),
        }
    }

    async fn ask(&self, sender: &Session, model: AiModel, prompt: &str) {
        let id = sender.id();
        self.record(id, &framing::ai_prompt(model, prompt)).await;

        debug!(session_id = %id, %model, "invoking text generator");
        let reply = match self.generator.invoke(model, prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(session_id = %id, %model, error = %e, "text generation failed");
                protocol::AI_FAILURE_REPLY.to_string()
            }
        };

        let line = framing::ai_reply(model, &reply);
        sender.send(line.as_str());
        self.record(id, &line).await;
    }

    async fn private(&self, sender: &Session, target: SessionId, body: &str) {
        let from = sender.id();
        match self.registry.lookup(target).await {
            Some(recipient) => {
                let line = framing::private_for_recipient(from, body);
                recipient.send(line.as_str());
                self.record(target, &line).await;
                debug!(session_id = %from, %target, "private message delivered");
            }
            None => {
                debug!(session_id = %from, %target, "private message target offline");
                sender.send(protocol::not_online_line(target));
            }
        }
        self.record(from, &framing::private_for_sender(target, body)).await;
    }

    async fn broadcast(&self, sender: &Session, body: &str) {
        let from = sender.id();
        let participants = self.registry.snapshot().await;

        let to_self = framing::broadcast_for_sender(body);
        let to_peers = framing::broadcast_for_peer(from, body);
        for session in &participants {
            if session.id() == from {
                session.send(to_self.as_str());
            } else {
                session.send(to_peers.as_str());
            }
        }

        let ids: Vec<SessionId> = participants.iter().map(Session::id).collect();
        let record = framing::broadcast_record(from, body);
        if let Err(e) = self.transcripts.append_to_all(&ids, &record).await {
            warn!(session_id = %from, error = %e, "failed to record broadcast");
        }
        info!(session_id = %from, recipients = ids.len(), "[Group][User {from}]: {body}");
    }

    /// Append one line to a transcript, logging rather than propagating
    /// failures so delivery is never aborted by storage problems.
    async fn record(&self, user: SessionId, line: &str) {
        if let Err(e) = self.transcripts.append(user, line).await {
            warn!(session_id = %user, error = %e, "failed to append transcript line");
        }
    }
}
