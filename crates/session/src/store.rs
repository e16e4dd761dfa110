//! The session store: single source of truth for who is logged in.
//!
//! Constructed once at startup and handed to whoever needs it (usually as
//! `Arc<SessionStore>` inside application state). Readers take snapshots
//! with [`SessionStore::current`] or watch transitions through
//! [`SessionStore::subscribe`]; only [`SessionStore::login`] and
//! [`SessionStore::logout`] change the session.

use std::sync::Mutex;

use chrono::{Duration, Utc};
use crm_core::session::{BearerToken, Session, SessionProfile};
use crm_core::types::Timestamp;
use tokio::sync::watch;

use crate::storage::{PersistedSession, SessionStorage, StorageError};

/// Default retention window of the persisted record.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    ttl: Duration,
    state: watch::Sender<Session>,
    /// Serializes transitions so storage and memory change in the same order.
    transition: Mutex<()>,
}

impl SessionStore {
    /// Open the store, rehydrating from whatever `storage` holds now.
    pub fn open(storage: impl SessionStorage + 'static, ttl: Duration) -> Self {
        Self::open_at(storage, ttl, Utc::now())
    }

    /// Open the store as of `now`.
    ///
    /// Missing, unreadable, expired, malformed or incomplete records all start
    /// the store empty; the last three are also erased from storage. An
    /// unreadable record is left in place for the next start.
    pub fn open_at(storage: impl SessionStorage + 'static, ttl: Duration, now: Timestamp) -> Self {
        let initial = rehydrate(&storage, now);
        let (state, _) = watch::channel(initial);
        Self {
            storage: Box::new(storage),
            ttl,
            state,
            transition: Mutex::new(()),
        }
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Bearer token of the current session, if any.
    pub fn token(&self) -> Option<BearerToken> {
        self.state.borrow().token().cloned()
    }

    /// Receiver that observes every login and logout.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Install `profile` as the current session.
    ///
    /// The profile is trusted as-is; credentials were checked upstream. It
    /// must be complete (see [`SessionProfile::new`]): a profile with a blank
    /// field is held in memory but not restored after a restart.
    pub fn login(&self, profile: SessionProfile) {
        self.login_at(profile, Utc::now());
    }

    pub fn login_at(&self, profile: SessionProfile, now: Timestamp) {
        let _guard = self.lock_transition();

        let session = Session::Authenticated(profile);
        match now.checked_add_signed(self.ttl) {
            Some(expires_at) => {
                let persisted = PersistedSession {
                    record: session.to_record(),
                    expires_at,
                };
                if let Err(e) = self.storage.save(&persisted) {
                    tracing::warn!(error = %e, "Failed to persist session; it will not survive a restart");
                }
            }
            None => {
                tracing::warn!(ttl = %self.ttl, "Session expiry out of range; it will not survive a restart");
            }
        }

        if let Some(profile) = session.profile() {
            tracing::info!(user_id = %profile.id, role = %profile.role, "Session started");
        }
        self.state.send_replace(session);
    }

    /// Clear the session in memory and in storage. Idempotent.
    pub fn logout(&self) {
        let _guard = self.lock_transition();

        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Failed to erase persisted session");
        }

        let previous = self.state.send_replace(Session::Anonymous);
        if let Some(profile) = previous.profile() {
            tracing::info!(user_id = %profile.id, "Session ended");
        }
    }

    fn lock_transition(&self) -> std::sync::MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .field("session", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

fn rehydrate(storage: &dyn SessionStorage, now: Timestamp) -> Session {
    let persisted = match storage.load() {
        Ok(Some(p)) => p,
        Ok(None) => return Session::Anonymous,
        Err(StorageError::Serialization(e)) => {
            tracing::warn!(error = %e, "Discarding malformed persisted session");
            discard(storage);
            return Session::Anonymous;
        }
        Err(e) => {
            tracing::warn!(error = %e, "Persisted session unreadable, starting without a session");
            return Session::Anonymous;
        }
    };

    if persisted.is_expired(now) {
        tracing::debug!(expires_at = %persisted.expires_at, "Persisted session expired");
        discard(storage);
        return Session::Anonymous;
    }

    let session = Session::from_record(persisted.record);
    match session.profile() {
        Some(profile) => {
            tracing::info!(user_id = %profile.id, role = %profile.role, "Session restored");
        }
        None => {
            tracing::warn!("Discarding incomplete persisted session");
            discard(storage);
        }
    }
    session
}

fn discard(storage: &dyn SessionStorage) {
    if let Err(e) = storage.clear() {
        tracing::warn!(error = %e, "Failed to erase persisted session");
    }
}
