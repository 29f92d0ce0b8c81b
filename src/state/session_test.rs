use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use crate::net::provider::SessionCallback;

fn identity(id: &str) -> ViewerIdentity {
    ViewerIdentity {
        id: id.to_owned(),
        email: format!("{id}@example.com"),
        full_name: None,
        avatar_url: None,
    }
}

// =============================================================
// SessionState transitions (pure)
// =============================================================

#[test]
fn default_state_is_bootstrapping() {
    let state = SessionState::default();
    assert!(state.loading);
    assert_eq!(state.identity, None);
}

#[test]
fn apply_event_is_last_write_wins_in_delivery_order() {
    let mut state = SessionState::default();
    for event in [Some(identity("u1")), None, Some(identity("u2")), Some(identity("u3"))] {
        state.apply_event(event.clone());
        assert_eq!(state.identity, event);
        assert!(!state.loading);
    }
}

#[test]
fn apply_event_is_idempotent_for_identical_payloads() {
    let mut state = SessionState::default();
    assert!(state.apply_event(None));
    assert!(!state.apply_event(None));

    assert!(state.apply_event(Some(identity("u1"))));
    assert!(!state.apply_event(Some(identity("u1"))));
}

#[test]
fn loading_resolves_exactly_once_and_never_reverts() {
    let mut state = SessionState::default();
    assert!(state.loading);
    state.apply_event(None);
    assert!(!state.loading);
    state.apply_event(Some(identity("u1")));
    state.resolve_bootstrap(None);
    assert!(!state.loading);
}

#[test]
fn resolve_bootstrap_is_a_noop_after_first_resolution() {
    let mut state = SessionState::default();
    // Subscription channel wins the race.
    assert!(state.apply_event(Some(identity("u1"))));
    // Late initial-fetch result must not regress the established state.
    assert!(!state.resolve_bootstrap(None));
    assert_eq!(state.identity, Some(identity("u1")));
}

// =============================================================
// Scripted provider for store-level scenarios
// =============================================================

struct MockProvider {
    configured: bool,
    initial: Mutex<Result<Option<ViewerIdentity>, AuthError>>,
    sign_in_result: Mutex<Result<(), AuthError>>,
    calls: Mutex<Vec<&'static str>>,
    callback: Mutex<Option<SessionCallback>>,
    released: Arc<AtomicUsize>,
}

impl MockProvider {
    fn configured() -> Self {
        Self {
            configured: true,
            initial: Mutex::new(Ok(None)),
            sign_in_result: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
            callback: Mutex::new(None),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn unconfigured() -> Self {
        Self { configured: false, ..Self::configured() }
    }

    fn with_initial(self, initial: Result<Option<ViewerIdentity>, AuthError>) -> Self {
        *self.initial.lock().unwrap() = initial;
        self
    }

    fn with_sign_in_result(self, result: Result<(), AuthError>) -> Self {
        *self.sign_in_result.lock().unwrap() = result;
        self
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Push a session-change event through the registered subscription.
    fn fire(&self, event: Option<ViewerIdentity>) {
        let callback = self.callback.lock().unwrap();
        let callback = callback.as_ref().expect("no subscription registered");
        callback(event);
    }
}

#[async_trait::async_trait(?Send)]
impl AuthProvider for MockProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn current_session(&self) -> Result<Option<ViewerIdentity>, AuthError> {
        self.record("current_session");
        self.initial.lock().unwrap().clone()
    }

    fn subscribe(&self, callback: SessionCallback) -> AuthSubscription {
        self.record("subscribe");
        *self.callback.lock().unwrap() = Some(callback);
        let released = self.released.clone();
        AuthSubscription::new(move || {
            released.fetch_add(1, Ordering::SeqCst);
        })
    }

    async fn sign_in(&self, _email: &str, _password: &str) -> Result<(), AuthError> {
        self.record("sign_in");
        self.sign_in_result.lock().unwrap().clone()
    }

    async fn sign_up(&self, _email: &str, _password: &str, _full_name: &str) -> Result<(), AuthError> {
        self.record("sign_up");
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.record("sign_out");
        Ok(())
    }

    async fn reset_password(&self, _email: &str) -> Result<(), AuthError> {
        self.record("reset_password");
        Ok(())
    }
}

fn store_with(provider: MockProvider) -> (SessionStore, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    (SessionStore::new(provider.clone()), provider)
}

// =============================================================
// Bootstrap
// =============================================================

#[test]
fn unconfigured_init_short_circuits_without_provider_calls() {
    let (store, provider) = store_with(MockProvider::unconfigured());
    store.init();

    let state = store.state().get_untracked();
    assert!(!state.loading);
    assert_eq!(state.identity, None);
    assert!(provider.calls().is_empty());
}

#[test]
fn unconfigured_operations_reject_before_any_adapter_call() {
    let (store, provider) = store_with(MockProvider::unconfigured());
    store.init();

    assert_eq!(
        block_on(store.sign_in("a@b.com", "secret")),
        Err(AuthError::NotConfigured)
    );
    assert_eq!(
        block_on(store.sign_up("a@b.com", "secret", "Ada")),
        Err(AuthError::NotConfigured)
    );
    assert_eq!(block_on(store.sign_out()), Err(AuthError::NotConfigured));
    assert_eq!(
        block_on(store.reset_password("a@b.com")),
        Err(AuthError::NotConfigured)
    );
    assert!(provider.calls().is_empty());
}

#[test]
fn bootstrap_resolves_initial_identity() {
    let (store, _provider) =
        store_with(MockProvider::configured().with_initial(Ok(Some(identity("u1")))));
    store.init();
    block_on(store.fetch_initial_session());

    let state = store.state().get_untracked();
    assert!(!state.loading);
    assert_eq!(state.identity, Some(identity("u1")));
}

#[test]
fn bootstrap_transport_failure_degrades_to_no_session() {
    let (store, _provider) = store_with(
        MockProvider::configured().with_initial(Err(AuthError::Transport("offline".to_owned()))),
    );
    store.init();
    block_on(store.fetch_initial_session());

    let state = store.state().get_untracked();
    assert!(!state.loading);
    assert_eq!(state.identity, None);
}

#[test]
fn late_bootstrap_result_does_not_regress_subscription_state() {
    let (store, provider) = store_with(MockProvider::configured().with_initial(Ok(None)));
    store.init();

    // The subscription channel delivers a login before the initial fetch
    // resolves; the fetch's "no session" answer must not win.
    provider.fire(Some(identity("u1")));
    block_on(store.fetch_initial_session());

    assert_eq!(store.state().get_untracked().identity, Some(identity("u1")));
}

// =============================================================
// Subscription-driven transitions
// =============================================================

#[test]
fn subscription_events_move_identity_in_delivery_order() {
    let (store, provider) = store_with(MockProvider::configured());
    store.init();

    provider.fire(Some(identity("u1")));
    assert_eq!(store.state().get_untracked().identity, Some(identity("u1")));

    provider.fire(Some(identity("u2")));
    assert_eq!(store.state().get_untracked().identity, Some(identity("u2")));

    // Simulated expiry.
    provider.fire(None);
    let state = store.state().get_untracked();
    assert_eq!(state.identity, None);
    assert!(!state.loading);
}

#[test]
fn duplicate_session_absent_events_settle_on_same_state() {
    let (store, provider) = store_with(MockProvider::configured());
    store.init();

    provider.fire(None);
    let first = store.state().get_untracked();
    provider.fire(None);
    assert_eq!(store.state().get_untracked(), first);
}

// =============================================================
// Mutation operations
// =============================================================

#[test]
fn sign_in_failure_propagates_message_and_leaves_state_unchanged() {
    let rejection = AuthError::Operation {
        message: "Invalid login credentials".to_owned(),
        status: Some(400),
    };
    let (store, provider) =
        store_with(MockProvider::configured().with_sign_in_result(Err(rejection.clone())));
    store.init();

    let result = block_on(store.sign_in("a@b.com", "wrongpass"));
    assert_eq!(result, Err(rejection));
    assert_eq!(store.state().get_untracked().identity, None);
    assert_eq!(provider.calls(), vec!["subscribe", "sign_in"]);
}

#[test]
fn sign_in_success_does_not_set_state_directly() {
    let (store, provider) = store_with(MockProvider::configured());
    store.init();

    assert_eq!(block_on(store.sign_in("a@b.com", "secret")), Ok(()));
    // Still bootstrapping: only the change event establishes the identity.
    assert_eq!(store.state().get_untracked().identity, None);

    provider.fire(Some(identity("u1")));
    assert_eq!(store.state().get_untracked().identity, Some(identity("u1")));
}

#[test]
fn sign_out_keeps_identity_until_the_event_arrives() {
    let (store, provider) = store_with(MockProvider::configured());
    store.init();
    provider.fire(Some(identity("u1")));

    assert_eq!(block_on(store.sign_out()), Ok(()));
    assert_eq!(store.state().get_untracked().identity, Some(identity("u1")));

    provider.fire(None);
    assert_eq!(store.state().get_untracked().identity, None);
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn shutdown_releases_subscription_exactly_once() {
    let (store, provider) = store_with(MockProvider::configured());
    store.init();

    store.shutdown();
    store.shutdown();
    assert_eq!(provider.released.load(Ordering::SeqCst), 1);
}

#[test]
fn shutdown_before_init_is_a_noop() {
    let (store, provider) = store_with(MockProvider::configured());
    store.shutdown();
    assert_eq!(provider.released.load(Ordering::SeqCst), 0);
}
