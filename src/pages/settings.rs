//! Settings page — account summary and presentation preferences.

use leptos::prelude::*;

use crate::components::app_shell::AppShell;
use crate::state::session::use_session_store;
use crate::state::ui::UiState;

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session_store().map(|store| store.state());
    let ui = expect_context::<RwSignal<UiState>>();

    let account_line = move |select: fn(&crate::net::types::ViewerIdentity) -> String| {
        move || {
            session
                .and_then(|state| state.get().identity)
                .map(|identity| select(&identity))
                .unwrap_or_default()
        }
    };
    let email = account_line(|identity| identity.email.clone());
    let full_name = account_line(|identity| identity.full_name.clone().unwrap_or_default());

    view! {
        <AppShell>
            <div class="settings-page">
                <div class="settings-page__intro">
                    <h1>"Settings"</h1>
                    <p class="settings-page__subtitle">"Manage your account and preferences"</p>
                </div>

                <div class="settings-page__cards">
                    <section class="card">
                        <h2 class="card__title">"Account"</h2>
                        <dl class="settings-page__facts">
                            <dt>"Email"</dt>
                            <dd>{email}</dd>
                            <dt>"Name"</dt>
                            <dd>{full_name}</dd>
                        </dl>
                    </section>

                    <section class="card">
                        <h2 class="card__title">"Theme & Appearance"</h2>
                        <p class="card__hint">"Choose how the app looks on this device."</p>
                        <button
                            class="btn settings-page__theme-toggle"
                            on:click=move |_| {
                                let next = crate::util::dark_mode::toggle(ui.get().dark_mode);
                                ui.update(|u| u.dark_mode = next);
                            }
                        >
                            {move || if ui.get().dark_mode { "Switch to light mode" } else { "Switch to dark mode" }}
                        </button>
                    </section>
                </div>
            </div>
        </AppShell>
    }
}
