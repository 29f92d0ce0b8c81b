//! Capability seam over the hosted identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store depends only on this trait, so the concrete backend
//! (`session_client`) stays swappable and store logic stays testable with
//! scripted providers.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use crate::net::types::ViewerIdentity;

/// Failure taxonomy for every provider-facing operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Provider credentials are absent from the build; no network call was
    /// attempted.
    #[error("identity provider is not configured")]
    NotConfigured,
    /// The provider could not be reached.
    #[error("could not reach the identity provider: {0}")]
    Transport(String),
    /// The provider explicitly rejected the operation; `message` is the
    /// provider's own text, passed through verbatim for display.
    #[error("{message}")]
    Operation {
        message: String,
        status: Option<u16>,
    },
}

/// Callback invoked with the replacement session payload on every provider
/// change event (sign-in, sign-out, expiry, refresh).
pub type SessionCallback = Box<dyn Fn(Option<ViewerIdentity>) + Send + Sync>;

/// Handle to a registered change subscription.
///
/// The underlying listener is released exactly once: `stop` is idempotent
/// and `Drop` releases on teardown, so neither double-release nor a
/// forgotten release can leak a dangling listener.
pub struct AuthSubscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl AuthSubscription {
    pub fn new(unsubscribe: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self { unsubscribe: Some(Box::new(unsubscribe)) }
    }

    /// Release the listener. Subsequent calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(release) = self.unsubscribe.take() {
            release();
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.unsubscribe.is_some()
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Capability set the session core consumes from an identity backend.
///
/// Futures are `?Send` because the browser transport is single-threaded;
/// implementations themselves must be `Send + Sync` so the store can live
/// in Leptos context.
#[async_trait::async_trait(?Send)]
pub trait AuthProvider: Send + Sync {
    /// Pure, synchronous configuration-presence check. When this is false
    /// every other operation fails with [`AuthError::NotConfigured`]
    /// without touching the network.
    fn is_configured(&self) -> bool;

    /// Single read of the current session, used once at bootstrap.
    async fn current_session(&self) -> Result<Option<ViewerIdentity>, AuthError>;

    /// Register for future session-change events until the returned handle
    /// is stopped. The channel never errors; a degraded channel simply
    /// stops delivering.
    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription;

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// `full_name` is attached as profile metadata at creation time. A
    /// successful sign-up does not imply a live session; providers that
    /// require email confirmation deliver the session later.
    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Fire-and-forget recovery request: success means accepted, not that
    /// the password changed.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}

/// Provider endpoint and key, baked into the bundle at compile time the
/// same way the hosting platform injects public client credentials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub publishable_key: String,
}

impl ProviderConfig {
    /// Read `STUDYBOARD_AUTH_URL` / `STUDYBOARD_AUTH_KEY` from the build
    /// environment. `None` when either is missing or empty.
    pub fn from_env() -> Option<Self> {
        let url = option_env!("STUDYBOARD_AUTH_URL").unwrap_or_default();
        let key = option_env!("STUDYBOARD_AUTH_KEY").unwrap_or_default();
        Self::from_parts(url, key)
    }

    /// Build a config from raw values, rejecting blank entries.
    pub fn from_parts(url: &str, publishable_key: &str) -> Option<Self> {
        let url = url.trim();
        let publishable_key = publishable_key.trim();
        if url.is_empty() || publishable_key.is_empty() {
            return None;
        }
        Some(Self {
            url: url.trim_end_matches('/').to_owned(),
            publishable_key: publishable_key.to_owned(),
        })
    }
}
