use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::editor::EditorSession;

pub type SessionHandle = Arc<Mutex<EditorSession>>;

struct Entry {
    handle: SessionHandle,
    last_touched: Instant,
}

/// Live editor sessions. Each session has its own lock, so the events of one
/// session are applied one at a time in arrival order.
///
/// A closing browser tab never says goodbye, so sessions untouched for longer
/// than `idle_ttl` are evicted on every insert and by `run_sweeper`.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        SessionRegistry {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl,
        }
    }

    pub async fn insert(&self, session: EditorSession) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(session));
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, now, self.idle_ttl);
        sessions.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_touched: now,
            },
        );
        (id, handle)
    }

    /// Looks up a session and marks it as recently used.
    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id)?;
        entry.last_touched = Instant::now();
        Some(entry.handle.clone())
    }

    pub async fn remove(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.write().await.remove(&id).map(|e| e.handle)
    }

    /// Drops every session idle for longer than the TTL. Returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        evict_idle(&mut sessions, Instant::now(), self.idle_ttl)
    }

    /// Evicts idle sessions every `period`, forever.
    pub async fn run_sweeper(self, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let evicted = self.evict_idle().await;
            if evicted > 0 {
                info!("Evicted {evicted} idle sessions");
            }
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, Entry>, now: Instant, ttl: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, e| now.duration_since(e.last_touched) <= ttl);
    before - sessions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::view::ViewSection;

    fn blank() -> EditorSession {
        EditorSession::new(None, ViewSection::Landing)
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let (id, _) = registry.insert(blank()).await;
        assert!(registry.get(id).await.is_some());
        assert!(registry.get(Uuid::new_v4()).await.is_none());

        assert!(registry.remove(id).await.is_some());
        assert!(registry.remove(id).await.is_none());
        assert_eq!(registry.len().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_is_evicted() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let (idle, _) = registry.insert(blank()).await;
        let (active, _) = registry.insert(blank()).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(registry.get(active).await.is_some());
        tokio::time::advance(Duration::from_secs(30)).await;

        assert_eq!(registry.evict_idle().await, 1);
        assert!(registry.get(idle).await.is_none());
        assert!(registry.get(active).await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_insert_sweeps_idle_sessions() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        for _ in 0..5 {
            registry.insert(blank()).await;
        }
        tokio::time::advance(Duration::from_secs(61)).await;

        registry.insert(blank()).await;
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_in_background() {
        let registry = SessionRegistry::new(Duration::from_secs(60));
        let (id, _) = registry.insert(blank()).await;
        tokio::spawn(registry.clone().run_sweeper(Duration::from_secs(10)));

        tokio::time::sleep(Duration::from_secs(75)).await;
        assert!(registry.get(id).await.is_none());
        assert_eq!(registry.len().await, 0);
    }
}
