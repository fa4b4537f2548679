use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::features::auth::model::Session;

/// Stored values of one session, with expiration tracking
struct StoredSession {
    is_login: bool,
    token: String,
    role: String,
    name: String,
    expires_at: Instant,
}

/// In-memory session storage keyed by the id handed to the browser.
///
/// Each request reads its session afresh, so a role change is visible on the
/// very next request.
pub struct SessionStore {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, StoredSession>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Store a freshly logged-in session and return it
    pub async fn create(&self, token: String, role: String, name: String) -> Session {
        let id = Uuid::new_v4();
        let stored = StoredSession {
            is_login: true,
            token,
            role,
            name,
            expires_at: Instant::now() + self.ttl,
        };
        let session = to_session(id, &stored);

        self.entries.write().await.insert(id, stored);
        tracing::debug!("Session {} created (role {})", id, session.role);

        session
    }

    /// Look up a live session; expired entries are dropped on access
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        {
            let entries = self.entries.read().await;
            match entries.get(id) {
                Some(stored) if stored.expires_at > Instant::now() => {
                    return Some(to_session(*id, stored));
                }
                Some(_) => {}
                None => return None,
            }
        }

        self.entries.write().await.remove(id);
        tracing::debug!("Session {} expired", id);
        None
    }

    /// Remove every stored value of the session. Returns false if it did not exist.
    pub async fn clear(&self, id: &Uuid) -> bool {
        self.entries.write().await.remove(id).is_some()
    }

    /// Drop all expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn to_session(id: Uuid, stored: &StoredSession) -> Session {
    Session {
        id,
        is_login: stored.is_login,
        token: stored.token.clone(),
        role: stored.role.clone(),
        name: stored.name.clone(),
    }
}
