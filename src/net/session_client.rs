//! HTTP client for the hosted identity service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net` against the
//! provider's auth endpoints, with the access token persisted in
//! `localStorage` so a reload can recover the session.
//! Server-side (SSR): stubs that report "no session" since the browser
//! token store does not exist there.
//!
//! ERROR HANDLING
//! ==============
//! Non-OK responses become `AuthError::Operation` carrying the provider's
//! own message; unreachable-provider failures become
//! `AuthError::Transport`. Nothing here retries.

#[cfg(test)]
#[path = "session_client_test.rs"]
mod session_client_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::net::provider::{
    AuthError, AuthProvider, AuthSubscription, ProviderConfig, SessionCallback,
};
use crate::net::types::ViewerIdentity;
#[cfg(any(test, feature = "hydrate"))]
use crate::net::types::ApiErrorBody;
#[cfg(feature = "hydrate")]
use crate::net::types::{ApiUser, TokenGrant};

#[cfg(feature = "hydrate")]
const TOKEN_STORAGE_KEY: &str = "studyboard_access_token";

#[cfg(any(test, feature = "hydrate"))]
fn token_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/token?grant_type=password")
}

#[cfg(any(test, feature = "hydrate"))]
fn signup_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/signup")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn recover_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/recover")
}

#[cfg(any(test, feature = "hydrate"))]
fn user_endpoint(base: &str) -> String {
    format!("{base}/auth/v1/user")
}

/// Map a non-OK response to an operation error, preferring the provider's
/// own message over a generic one.
#[cfg(any(test, feature = "hydrate"))]
fn operation_error(status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(ApiErrorBody::into_message)
        .unwrap_or_else(|| format!("auth request failed: {status}"));
    AuthError::Operation { message, status: Some(status) }
}

#[cfg(feature = "hydrate")]
fn transport_error(error: gloo_net::Error) -> AuthError {
    AuthError::Transport(error.to_string())
}

#[cfg(feature = "hydrate")]
fn stored_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(TOKEN_STORAGE_KEY).ok()?
}

#[cfg(feature = "hydrate")]
fn store_token(token: Option<&str>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    let _ = match token {
        Some(value) => storage.set_item(TOKEN_STORAGE_KEY, value),
        None => storage.remove_item(TOKEN_STORAGE_KEY),
    };
}

type SubscriberList = Arc<Mutex<Vec<(u64, SessionCallback)>>>;

/// Identity-provider client speaking the hosted auth HTTP API.
///
/// Besides the HTTP surface it owns the local change channel: its own
/// successful sign-in/sign-out emit a session event to subscribers, the
/// same way the original hosted client library reports same-tab changes.
pub struct HostedAuthClient {
    config: Option<ProviderConfig>,
    subscribers: SubscriberList,
    next_subscriber_id: AtomicU64,
}

impl HostedAuthClient {
    pub fn new(config: Option<ProviderConfig>) -> Self {
        Self {
            config,
            subscribers: Arc::new(Mutex::new(Vec::new())),
            next_subscriber_id: AtomicU64::new(0),
        }
    }

    /// Client wired from the build-time provider credentials.
    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    fn config(&self) -> Result<&ProviderConfig, AuthError> {
        self.config.as_ref().ok_or(AuthError::NotConfigured)
    }

    /// Deliver a session event to every subscriber in registration order.
    /// Callbacks must not re-enter `subscribe`/`stop` (the list is locked
    /// for the duration of the dispatch).
    #[cfg(any(test, feature = "hydrate"))]
    fn notify(&self, identity: Option<ViewerIdentity>) {
        let Ok(subscribers) = self.subscribers.lock() else {
            return;
        };
        for (_, callback) in subscribers.iter() {
            callback(identity.clone());
        }
    }

    /// Persist the grant and announce the new session. A grant without a
    /// usable identity (pending email confirmation) announces nothing.
    #[cfg(feature = "hydrate")]
    fn adopt_grant(&self, grant: TokenGrant) {
        let identity = grant.user.and_then(ApiUser::into_identity);
        if let (Some(token), Some(identity)) = (grant.access_token, identity) {
            store_token(Some(&token));
            self.notify(Some(identity));
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for HostedAuthClient {
    fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    async fn current_session(&self) -> Result<Option<ViewerIdentity>, AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let Some(token) = stored_token() else {
                return Ok(None);
            };
            let resp = gloo_net::http::Request::get(&user_endpoint(&config.url))
                .header("apikey", &config.publishable_key)
                .header("Authorization", &format!("Bearer {token}"))
                .send()
                .await
                .map_err(transport_error)?;
            if resp.status() == 401 || resp.status() == 403 {
                // Stale or revoked token: this is "no session", not an error.
                store_token(None);
                return Ok(None);
            }
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(operation_error(resp.status(), &body));
            }
            let user: ApiUser = resp.json().await.map_err(transport_error)?;
            Ok(user.into_identity())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = config;
            Ok(None)
        }
    }

    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription {
        let id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push((id, callback));
        }
        let subscribers = Arc::clone(&self.subscribers);
        AuthSubscription::new(move || {
            if let Ok(mut subscribers) = subscribers.lock() {
                subscribers.retain(|(subscriber_id, _)| *subscriber_id != id);
            }
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email, "password": password });
            let resp = gloo_net::http::Request::post(&token_endpoint(&config.url))
                .header("apikey", &config.publishable_key)
                .json(&payload)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(operation_error(resp.status(), &body));
            }
            let grant: TokenGrant = resp.json().await.map_err(transport_error)?;
            if grant.access_token.is_none() {
                return Err(AuthError::Operation {
                    message: "identity provider returned no session".to_owned(),
                    status: None,
                });
            }
            self.adopt_grant(grant);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, email, password);
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }

    async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<(), AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({
                "email": email,
                "password": password,
                "data": { "full_name": full_name },
            });
            let resp = gloo_net::http::Request::post(&signup_endpoint(&config.url))
                .header("apikey", &config.publishable_key)
                .json(&payload)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(operation_error(resp.status(), &body));
            }
            // Auto-confirm deployments return a live grant; confirmation
            // flows return the pending user only, and no event is emitted.
            let grant: TokenGrant = resp.json().await.map_err(transport_error)?;
            self.adopt_grant(grant);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, email, password, full_name);
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            if let Some(token) = stored_token() {
                let resp = gloo_net::http::Request::post(&logout_endpoint(&config.url))
                    .header("apikey", &config.publishable_key)
                    .header("Authorization", &format!("Bearer {token}"))
                    .send()
                    .await
                    .map_err(transport_error)?;
                // 401 means the token was already invalid server-side; the
                // local session still ends.
                if !resp.ok() && resp.status() != 401 {
                    let body = resp.text().await.unwrap_or_default();
                    return Err(operation_error(resp.status(), &body));
                }
            }
            store_token(None);
            self.notify(None);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = config;
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let config = self.config()?;
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({ "email": email });
            let resp = gloo_net::http::Request::post(&recover_endpoint(&config.url))
                .header("apikey", &config.publishable_key)
                .json(&payload)
                .map_err(transport_error)?
                .send()
                .await
                .map_err(transport_error)?;
            if !resp.ok() {
                let body = resp.text().await.unwrap_or_default();
                return Err(operation_error(resp.status(), &body));
            }
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (config, email);
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }
}
