//! Route gating over session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes must apply identical unauthenticated redirect behavior,
//! and the decision must be re-evaluated on every session-state change so a
//! session expiring mid-view still triggers the redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

/// Where unauthenticated viewers are sent.
pub const ENTRY_PATH: &str = "/login";

/// Outcome of gating one route against the current session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested view.
    Render,
    /// Send the viewer to the given path instead.
    Redirect(&'static str),
    /// Session presence is unresolved; render only a loading shell.
    ShowLoading,
}

/// Pure gating decision: a deterministic projection of
/// `(session state, route sensitivity)` with no I/O and no state.
pub fn decide(state: &SessionState, protected: bool) -> RouteDecision {
    if !protected {
        return RouteDecision::Render;
    }
    if state.loading {
        return RouteDecision::ShowLoading;
    }
    if state.identity.is_none() {
        return RouteDecision::Redirect(ENTRY_PATH);
    }
    RouteDecision::Render
}

/// Navigate to the entry point whenever the gating decision for a
/// protected route says redirect. Re-runs on every session-state change.
pub fn install_unauth_redirect<F>(state: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if let RouteDecision::Redirect(path) = decide(&state.get(), true) {
            navigate(path, NavigateOptions::default());
        }
    });
}
