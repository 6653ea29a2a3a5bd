// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth-state synchronization.
//!
//! An [`IdentityProvider`] pushes sign-in changes to registered callbacks.
//! [`AuthStateSynchronizer`] mirrors those pushes into a `tokio::sync::watch`
//! channel: one writer (the provider callback), any number of read-only
//! observers.
//!
//! The readiness flag starts `false`, flips to `true` on the first
//! notification (including one that carries no user) and never flips back.
//! Once [`AuthStateSynchronizer::deactivate`] returns, observers see no
//! further changes.

use crate::models::User;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::sync::watch;

/// Callback invoked with the current user, or `None` when signed out.
pub type AuthCallback = Arc<dyn Fn(Option<User>) + Send + Sync>;

/// Source of auth-state change notifications.
pub trait IdentityProvider: Send + Sync {
    /// Register `callback`. The provider invokes it at least once with the
    /// current state, then on every change until the subscription ends.
    fn subscribe(&self, callback: AuthCallback) -> Subscription;
}

/// Registration handle returned by [`IdentityProvider::subscribe`].
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// Deregister the callback.
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// Snapshot of the mirrored auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub ready: bool,
}

/// Mirrors an identity provider into observable state.
pub struct AuthStateSynchronizer {
    state: Arc<watch::Sender<AuthState>>,
    active: Arc<AtomicBool>,
    subscription: Option<Subscription>,
}

impl AuthStateSynchronizer {
    /// Subscribe to `provider` and start mirroring its notifications.
    pub fn activate(provider: &dyn IdentityProvider) -> Self {
        let (sender, _) = watch::channel(AuthState::default());
        let state = Arc::new(sender);
        let active = Arc::new(AtomicBool::new(true));

        let callback: AuthCallback = {
            let state = Arc::clone(&state);
            let active = Arc::clone(&active);
            Arc::new(move |user: Option<User>| {
                state.send_if_modified(|current| {
                    // Checked under the channel's write lock; see deactivate().
                    if !active.load(Ordering::Acquire) {
                        return false;
                    }
                    if !current.ready {
                        tracing::debug!(signed_in = user.is_some(), "Auth state ready");
                    }
                    current.user = user;
                    current.ready = true;
                    true
                });
            })
        };

        let subscription = provider.subscribe(callback);

        Self {
            state,
            active,
            subscription: Some(subscription),
        }
    }

    /// New observer of the mirrored state.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Wait for the first notification.
    ///
    /// Returns `None` if the synchronizer was deactivated before it became ready.
    pub async fn wait_until_ready(&self) -> Option<AuthState> {
        if !self.is_active() && !self.is_ready() {
            return None;
        }
        let mut receiver = self.state.subscribe();
        let state = receiver.wait_for(|state| state.ready).await.ok()?;
        Some((*state).clone())
    }

    /// Stop mirroring and deregister from the provider. Idempotent.
    pub fn deactivate(&mut self) {
        // Taking the write lock waits out any callback that is mid-update.
        self.state.send_if_modified(|_| {
            self.active.store(false, Ordering::Release);
            false
        });

        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!("Auth state synchronizer deactivated");
        }
    }
}

impl Drop for AuthStateSynchronizer {
    fn drop(&mut self) {
        self.deactivate();
    }
}

/// In-process identity provider.
///
/// Holds the current user, replays it to each new subscriber and fans out
/// every [`publish`](Self::publish) to all live subscribers in order.
/// Callbacks run with the delivery lock held and must not call back into the
/// provider.
#[derive(Clone, Default)]
pub struct LocalIdentityProvider {
    inner: Arc<ProviderInner>,
}

#[derive(Default)]
struct ProviderInner {
    current: Mutex<Option<User>>,
    subscribers: DashMap<u64, AuthCallback>,
    next_id: AtomicU64,
}

impl LocalIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that starts with `user` already signed in.
    pub fn with_user(user: User) -> Self {
        let provider = Self::default();
        *provider.lock_current() = Some(user);
        provider
    }

    /// Replace the current user and notify every subscriber.
    pub fn publish(&self, user: Option<User>) {
        let mut current = self.lock_current();
        *current = user.clone();

        let callbacks: Vec<AuthCallback> = self
            .inner
            .subscribers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        tracing::debug!(
            signed_in = user.is_some(),
            subscribers = callbacks.len(),
            "Publishing auth state change"
        );

        for callback in callbacks {
            callback(user.clone());
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock_current().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.inner
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl IdentityProvider for LocalIdentityProvider {
    fn subscribe(&self, callback: AuthCallback) -> Subscription {
        let current = self.lock_current();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.insert(id, Arc::clone(&callback));
        callback(current.clone());
        drop(current);

        let inner: Weak<ProviderInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers.remove(&id);
            }
        })
    }
}
