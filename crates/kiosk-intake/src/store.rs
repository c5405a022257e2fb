// SPDX-FileCopyrightText: 2026 Kiosk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store keyed by user id.
//!
//! Backed by a `DashMap`, so individual `get`/`upsert`/`remove` calls are
//! atomic per key and sessions for different users never observe each
//! other. Read-modify-write cycles across calls rely on the dispatcher's
//! per-user serialization (one writer per user id at any time).

use dashmap::DashMap;
use kiosk_core::types::UserId;

use crate::session::ConversationSession;

/// Concurrent map of active conversation sessions.
///
/// Cloning is cheap and shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: std::sync::Arc<DashMap<UserId, ConversationSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the user's session, if one exists.
    pub fn get(&self, user_id: UserId) -> Option<ConversationSession> {
        self.inner.get(&user_id).map(|entry| entry.clone())
    }

    /// Inserts or replaces the session for its user id.
    pub fn upsert(&self, session: ConversationSession) {
        self.inner.insert(session.user_id, session);
    }

    /// Removes the user's session. Safe to call when no session exists.
    pub fn remove(&self, user_id: UserId) {
        self.inner.remove(&user_id);
    }

    /// Number of active sessions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::IntakeState;
    use kiosk_core::types::ChatId;

    #[test]
    fn get_absent_returns_none() {
        let store = SessionStore::new();
        assert!(store.get(UserId(1)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let store = SessionStore::new();
        let mut session = ConversationSession::new(UserId(1), ChatId(10));
        session.state = IntakeState::BrowsingCatalog;
        store.upsert(session.clone());

        assert_eq!(store.get(UserId(1)), Some(session));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SessionStore::new();
        store.upsert(ConversationSession::new(UserId(1), ChatId(10)));
        store.remove(UserId(1));
        store.remove(UserId(1));
        assert!(store.get(UserId(1)).is_none());
    }

    #[test]
    fn sessions_for_distinct_users_are_independent() {
        let store = SessionStore::new();
        let mut a = ConversationSession::new(UserId(1), ChatId(10));
        a.fields.name = Some("Alice".into());
        let mut b = ConversationSession::new(UserId(2), ChatId(20));
        b.fields.name = Some("Bob".into());
        store.upsert(a);
        store.upsert(b);

        assert_eq!(store.get(UserId(1)).unwrap().fields.name.as_deref(), Some("Alice"));
        assert_eq!(store.get(UserId(2)).unwrap().fields.name.as_deref(), Some("Bob"));

        store.remove(UserId(1));
        assert!(store.get(UserId(1)).is_none());
        assert_eq!(store.get(UserId(2)).unwrap().fields.name.as_deref(), Some("Bob"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_writers_never_leak_across_users() {
        let store = SessionStore::new();

        let writers = (0..8i64).map(|user| {
            let store = store.clone();
            tokio::spawn(async move {
                for round in 0..100 {
                    let mut session = ConversationSession::new(UserId(user), ChatId(user));
                    session.fields.name = Some(format!("user-{user}-round-{round}"));
                    store.upsert(session);

                    let seen = store.get(UserId(user)).unwrap();
                    let name = seen.fields.name.unwrap();
                    assert!(
                        name.starts_with(&format!("user-{user}-")),
                        "session for user {user} observed foreign name {name}"
                    );
                }
            })
        });

        for result in futures::future::join_all(writers).await {
            result.unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
