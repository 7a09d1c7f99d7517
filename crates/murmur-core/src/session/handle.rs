//! Handle to one connected client.

use murmur_types::session::SessionId;
use tokio::sync::mpsc;
use tracing::debug;

/// Write endpoint of a session: one entry per outbound line, without the
/// trailing newline. The connection's writer task owns the receiving end.
pub type Outbound = mpsc::UnboundedSender<String>;

/// A connected client as seen by the registry and the router.
///
/// The connection handler owns the socket; everyone else holds clones of
/// this handle, which only reference the outbound channel. Once the writer
/// task goes away, sends become no-ops.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    outbound: Outbound,
}

impl Session {
    pub fn new(id: SessionId, outbound: Outbound) -> Self {
        Self { id, outbound }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Queue one line for delivery.
    ///
    /// Returns `false` if the connection is already gone; delivery to a
    /// closing session is best-effort.
    pub fn send(&self, line: impl Into<String>) -> bool {
        match self.outbound.send(line.into()) {
            Ok(()) => true,
            Err(_) => {
                debug!(session_id = %self.id, "dropping line for closed session");
                false
            }
        }
    }

    /// Whether the connection's writer has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.outbound.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_queues_line() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = Session::new(SessionId(1000), tx);
        assert!(session.send("hello"));
        assert_eq!(rx.try_recv().unwrap(), "hello");
    }

    #[test]
    fn send_to_closed_session_reports_false() {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Session::new(SessionId(1000), tx);
        drop(rx);
        assert!(session.is_closed());
        assert!(!session.send("lost"));
    }
}
