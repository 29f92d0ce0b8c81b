//! Layout shell for session-protected views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route renders inside this shell, so the gating decision
//! and the unauthenticated redirect are applied uniformly: a loading shell
//! while the session is unresolved, a silent redirect when it resolves to
//! absent, and the page chrome plus content once authenticated.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::use_session_store;
use crate::state::ui::UiState;
use crate::util::guard::install_unauth_redirect;

/// Wraps protected page content in the authenticated app chrome.
///
/// Sign-out requests session termination but does not clear state itself;
/// the provider's session-absent event does, and the redirect effect then
/// sends the viewer to the entry point.
#[component]
pub fn AppShell(children: ChildrenFn) -> impl IntoView {
    let Some(store) = use_session_store() else {
        return view! {
            <div class="app-shell app-shell--error">
                <p>"Session context is unavailable."</p>
            </div>
        }
        .into_any();
    };

    let state = store.state();
    let ui = expect_context::<RwSignal<UiState>>();
    install_unauth_redirect(state, use_navigate());

    let store = StoredValue::new(store);

    let viewer_label = move || {
        state
            .get()
            .identity
            .map(|identity| identity.full_name.unwrap_or(identity.email))
            .unwrap_or_default()
    };

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let store = store.get_value();
            leptos::task::spawn_local(async move {
                if let Err(error) = store.sign_out().await {
                    leptos::logging::warn!("sign out failed: {error}");
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = store;
        }
    };

    view! {
        <Show
            when=move || !state.get().loading && state.get().identity.is_some()
            fallback=move || {
                view! {
                    <div class="app-shell app-shell--pending">
                        <p>
                            {move || {
                                if state.get().loading { "Loading..." } else { "Redirecting to sign in..." }
                            }}
                        </p>
                    </div>
                }
            }
        >
            <div class="app-shell">
                <header class="app-shell__header toolbar">
                    <span class="toolbar__brand">"Study App"</span>
                    <nav class="toolbar__nav">
                        <a href="/">"Dashboard"</a>
                        <a href="/settings">"Settings"</a>
                    </nav>

                    <span class="toolbar__spacer"></span>

                    <button
                        class="btn toolbar__dark-toggle"
                        on:click=move |_| {
                            let next = crate::util::dark_mode::toggle(ui.get().dark_mode);
                            ui.update(|u| u.dark_mode = next);
                        }
                        title="Toggle dark mode"
                    >
                        {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                    </button>

                    <span class="toolbar__viewer">{viewer_label}</span>

                    <button class="btn toolbar__sign-out" on:click=on_sign_out title="Sign out">
                        "Sign out"
                    </button>
                </header>

                <main class="app-shell__content">{children()}</main>
            </div>
        </Show>
    }
    .into_any()
}
