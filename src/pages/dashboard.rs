//! Dashboard page — the authenticated landing route.

use leptos::prelude::*;

use crate::components::app_shell::AppShell;
use crate::state::session::use_session_store;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session_store().map(|store| store.state());

    // Greeting falls back to the email when no display name is set; the
    // shell has already guaranteed an identity is present when this shows.
    let greeting = move || {
        session
            .and_then(|state| state.get().identity)
            .map(|identity| identity.full_name.unwrap_or(identity.email))
            .map_or_else(
                || "Welcome back to your study app".to_owned(),
                |name| format!("Welcome back, {name}"),
            )
    };

    view! {
        <AppShell>
            <div class="dashboard-page">
                <div class="dashboard-page__intro">
                    <h1>"Dashboard"</h1>
                    <p class="dashboard-page__subtitle">{greeting}</p>
                </div>

                <div class="dashboard-page__cards">
                    <section class="card">
                        <h2 class="card__title">"Study streak"</h2>
                        <p class="card__value">"0 days"</p>
                        <p class="card__hint">"Daily review keeps material fresh"</p>
                    </section>
                    <section class="card">
                        <h2 class="card__title">"Decks"</h2>
                        <p class="card__value">"No decks yet"</p>
                        <p class="card__hint">"Create a deck to start studying"</p>
                    </section>
                    <section class="card">
                        <h2 class="card__title">"Next session"</h2>
                        <p class="card__value">"Nothing scheduled"</p>
                        <p class="card__hint">"Sessions appear here once planned"</p>
                    </section>
                </div>
            </div>
        </AppShell>
    }
}
