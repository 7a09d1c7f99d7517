//! TextGenerator trait definition.
//!
//! The narrow capability the router needs from an AI backend: run a model on
//! a prompt and hand back plain text. The subprocess implementation lives in
//! murmur-infra; tests substitute in-memory fakes.

use murmur_types::error::ExecutionError;
use murmur_types::intent::AiModel;

/// Blocking-style bridge from a chat command to an external model.
///
/// The returned future resolves only when generation has finished. Dropping
/// it must abandon the generation (implementations kill their child process).
pub trait TextGenerator: Send + Sync {
    fn invoke(
        &self,
        model: AiModel,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, ExecutionError>> + Send;
}
