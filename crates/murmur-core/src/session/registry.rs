//! Authoritative registry of connected sessions.
//!
//! One `RwLock` guards both the id counter and the session map:
//! registration, removal and broadcast snapshots are mutually exclusive,
//! while lookups and snapshots may run alongside each other.

use std::collections::BTreeMap;

use murmur_types::session::{FIRST_SESSION_ID, SessionId};
use tokio::sync::RwLock;
use tracing::debug;

use super::handle::{Outbound, Session};

/// Set of live sessions keyed by id.
///
/// Invariant: an id present here belongs to a connection that has not yet
/// torn down. Absence means "not connected", which the router reports to
/// private-message senders as an offline target rather than an error.
pub struct SessionRegistry {
    inner: RwLock<RegistryInner>,
}

struct RegistryInner {
    next_id: u64,
    sessions: BTreeMap<SessionId, Session>,
}

impl SessionRegistry {
    /// Create an empty registry whose first id is [`FIRST_SESSION_ID`].
    pub fn new() -> Self {
        Self::starting_at(FIRST_SESSION_ID)
    }

    /// Create an empty registry with a custom first id.
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                next_id: first_id,
                sessions: BTreeMap::new(),
            }),
        }
    }

    /// Assign the next id to `outbound` and register it.
    ///
    /// Ids are strictly increasing and never handed out twice.
    pub async fn register(&self, outbound: Outbound) -> Session {
        let mut inner = self.inner.write().await;
        let id = SessionId(inner.next_id);
        inner.next_id += 1;
        let session = Session::new(id, outbound);
        inner.sessions.insert(id, session.clone());
        debug!(session_id = %id, live = inner.sessions.len(), "registered session");
        session
    }

    /// Remove a session. Returns `true` if it was registered.
    pub async fn unregister(&self, id: SessionId) -> bool {
        let mut inner = self.inner.write().await;
        let removed = inner.sessions.remove(&id).is_some();
        if removed {
            debug!(session_id = %id, live = inner.sessions.len(), "unregistered session");
        }
        removed
    }

    /// Handle for `id`, or `None` if that session is not connected.
    pub async fn lookup(&self, id: SessionId) -> Option<Session> {
        self.inner.read().await.sessions.get(&id).cloned()
    }

    /// Whether `id` is currently connected.
    pub async fn contains(&self, id: SessionId) -> bool {
        self.inner.read().await.sessions.contains_key(&id)
    }

    /// Consistent copy of every live session, ordered by ascending id.
    ///
    /// Taken under the registry lock, so no session is added or removed
    /// part-way through; callers iterate the copy without holding the lock.
    pub async fn snapshot(&self) -> Vec<Session> {
        self.inner.read().await.sessions.values().cloned().collect()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry").finish_non_exhaustive()
    }
}
