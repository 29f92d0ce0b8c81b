//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login
//! redirects and identity-dependent rendering. The store bootstraps once
//! per page load, then tracks the provider's change events; mutation
//! operations go through the provider and never write session state
//! directly — the change event is the sole source of truth.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::net::provider::{AuthError, AuthProvider, AuthSubscription};
use crate::net::types::ViewerIdentity;

/// Externally observable session state.
///
/// `loading` is true only during the bootstrap window between page load
/// and the first session resolution; it never reverts to true afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<ViewerIdentity>,
    pub loading: bool,
}

impl Default for SessionState {
    /// The bootstrap state: session presence not yet known.
    fn default() -> Self {
        Self { identity: None, loading: true }
    }
}

impl SessionState {
    /// Terminal state for builds without provider credentials.
    pub fn unconfigured() -> Self {
        Self { identity: None, loading: false }
    }

    /// Apply a subscription-channel event: replace the identity wholesale
    /// and resolve `loading`. Last write wins, in delivery order.
    ///
    /// Returns whether anything observably changed, so a duplicate of the
    /// current payload produces no second transition.
    pub fn apply_event(&mut self, identity: Option<ViewerIdentity>) -> bool {
        let changed = self.loading || self.identity != identity;
        self.identity = identity;
        self.loading = false;
        changed
    }

    /// Apply the one-time initial-fetch result. A no-op once `loading` has
    /// resolved, so a slow bootstrap response can never regress a state
    /// already established by the subscription channel.
    pub fn resolve_bootstrap(&mut self, identity: Option<ViewerIdentity>) -> bool {
        if !self.loading {
            return false;
        }
        self.apply_event(identity)
    }
}

/// Session store: one per page load, created at root mount and shut down
/// at root unmount, shared with consumers through Leptos context.
#[derive(Clone)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
    provider: Arc<dyn AuthProvider>,
    subscription: Arc<Mutex<Option<AuthSubscription>>>,
}

impl SessionStore {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
            provider,
            subscription: Arc::new(Mutex::new(None)),
        }
    }

    /// Reactive handle to the session state. Read-only by convention:
    /// writes happen only through the bootstrap and subscription paths.
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    /// Run the bootstrap sequence.
    ///
    /// Unconfigured builds resolve immediately to "no session" without a
    /// single provider call. Otherwise the change subscription is
    /// registered first, then the initial session fetch races it; the
    /// transition functions make either arrival order safe.
    pub fn init(&self) {
        if !self.provider.is_configured() {
            self.state.set(SessionState::unconfigured());
            return;
        }

        let state = self.state;
        let subscription = self.provider.subscribe(Box::new(move |identity| {
            let mut next = state.get_untracked();
            if next.apply_event(identity) {
                state.set(next);
            }
        }));
        if let Ok(mut slot) = self.subscription.lock() {
            *slot = Some(subscription);
        }

        #[cfg(feature = "hydrate")]
        {
            let store = self.clone();
            leptos::task::spawn_local(async move {
                store.fetch_initial_session().await;
            });
        }
    }

    /// One-time initial session read. A transport failure degrades to "no
    /// session" so the app never sits on the loading shell indefinitely.
    #[cfg(any(test, feature = "hydrate"))]
    async fn fetch_initial_session(&self) {
        let initial = match self.provider.current_session().await {
            Ok(identity) => identity,
            Err(error) => {
                leptos::logging::warn!("session bootstrap failed: {error}");
                None
            }
        };
        let mut next = self.state.get_untracked();
        if next.resolve_bootstrap(initial) {
            self.state.set(next);
        }
    }

    fn ensure_configured(&self) -> Result<(), AuthError> {
        if self.provider.is_configured() {
            Ok(())
        } else {
            Err(AuthError::NotConfigured)
        }
    }

    /// Verify credentials with the provider. Success does not flip the
    /// session state; the provider's change event does.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.ensure_configured()?;
        self.provider.sign_in(email, password).await
    }

    /// Create an account, attaching `full_name` as profile metadata. May
    /// complete without establishing a session (email confirmation).
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<(), AuthError> {
        self.ensure_configured()?;
        self.provider.sign_up(email, password, full_name).await
    }

    /// Request session termination. The prior identity remains visible
    /// until the provider's session-absent event arrives.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.ensure_configured()?;
        self.provider.sign_out().await
    }

    /// Request a password-recovery email. Success means accepted.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.ensure_configured()?;
        self.provider.reset_password(email).await
    }

    /// Release the change subscription. Safe to call more than once; the
    /// handle itself guards against double-release.
    pub fn shutdown(&self) {
        if let Ok(mut slot) = self.subscription.lock() {
            if let Some(mut subscription) = slot.take() {
                subscription.stop();
            }
        }
    }
}

/// Checked access to the store provided by [`crate::app::App`]. Absence of
/// a provider is a condition callers handle, not a panic.
pub fn use_session_store() -> Option<SessionStore> {
    use_context::<SessionStore>()
}
