// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session provider interface and the listener registry shared by providers.

pub mod gotrue;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::error::AuthError;

pub use gotrue::GoTrue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|t| t <= now.timestamp())
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub enum SignUp {
    /// The provider signed the new user in straight away.
    Session(Session),
    /// The user must follow an emailed confirmation link first.
    ConfirmationPending(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

pub type Listener = dyn Fn(AuthEvent, Option<&Session>) + Send + Sync;

/// The external identity service as the client consumes it.
pub trait SessionProvider: Send + Sync {
    fn current_session(&self) -> Result<Option<Session>, AuthError>;
    /// Listener stays registered until the returned handle is dropped.
    fn subscribe(&self, listener: Box<Listener>) -> Subscription;
    fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;
    fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, AuthError>;
    fn sign_out(&self) -> Result<(), AuthError>;

    fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self.current_session()?.map(|s| s.access_token))
    }
}

#[derive(Default)]
pub struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Arc<Listener>)>>,
}

impl Listeners {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn subscribe(self: &Arc<Self>, listener: Box<Listener>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::from(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(self),
        }
    }

    pub fn notify(&self, event: AuthEvent, session: Option<&Session>) {
        // Snapshot first so a listener may unsubscribe while being called.
        let snapshot: Vec<Arc<Listener>> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        tracing::debug!(?event, listeners = snapshot.len(), "session change");
        for listener in snapshot {
            listener(event, session);
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: u64) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(i, _)| *i != id);
    }
}

/// Unsubscribe handle returned by [`SessionProvider::subscribe`].
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
