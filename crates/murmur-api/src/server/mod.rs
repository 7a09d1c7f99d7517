//! TCP line server: accept loop and shared relay handles.
//!
//! Each accepted socket gets its own task running [`connection::handle`].
//! Shutdown is driven by a [`CancellationToken`]; the accept loop stops and
//! waits for every connection task to finish before returning.

pub mod connection;

use std::sync::Arc;
use std::time::Duration;

use murmur_core::ai::TextGenerator;
use murmur_core::router::MessageRouter;
use murmur_core::session::SessionRegistry;
use murmur_core::transcript::TranscriptStore;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Pause after a failed `accept` (e.g. file descriptor exhaustion).
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Everything a connection task needs, cheap to clone.
pub struct Relay<S, G> {
    registry: Arc<SessionRegistry>,
    transcripts: Arc<S>,
    router: MessageRouter<S, G>,
}

impl<S, G> Clone for Relay<S, G> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            transcripts: self.transcripts.clone(),
            router: self.router.clone(),
        }
    }
}

impl<S: TranscriptStore, G: TextGenerator> Relay<S, G> {
    pub fn new(transcripts: Arc<S>, generator: Arc<G>) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let router = MessageRouter::new(registry.clone(), transcripts.clone(), generator);
        Self {
            registry,
            transcripts,
            router,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn transcripts(&self) -> &Arc<S> {
        &self.transcripts
    }

    pub fn router(&self) -> &MessageRouter<S, G> {
        &self.router
    }
}

/// Accept connections until `shutdown` is cancelled.
pub async fn serve<S, G>(
    listener: TcpListener,
    relay: Relay<S, G>,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    S: TranscriptStore + 'static,
    G: TextGenerator + 'static,
{
    let tracker = TaskTracker::new();

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    debug!(%peer, "accepted connection");
                    if let Err(e) = stream.set_nodelay(true) {
                        debug!(%peer, error = %e, "failed to set TCP_NODELAY");
                    }
                    let relay = relay.clone();
                    let token = shutdown.child_token();
                    tracker.spawn(async move {
                        if let Err(e) = connection::handle(stream, relay, token).await {
                            warn!(%peer, error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }

    info!(open = tracker.len(), "shutting down, closing connections");
    tracker.close();
    tracker.wait().await;
    info!("relay stopped");
    Ok(())
}
