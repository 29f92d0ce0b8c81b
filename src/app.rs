//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::net::session_client::HostedAuthClient;
use crate::pages::{dashboard::DashboardPage, login::LoginPage, settings::SettingsPage};
use crate::state::session::SessionStore;
use crate::state::ui::UiState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the session store lifecycle: created and bootstrapped here at root
/// mount, change subscription released in `on_cleanup` at root unmount.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore::new(Arc::new(HostedAuthClient::from_env()));
    store.init();
    provide_context(store.clone());
    on_cleanup(move || store.shutdown());

    let ui = RwSignal::new(UiState { dark_mode: crate::util::dark_mode::read_preference() });
    provide_context(ui);
    crate::util::dark_mode::apply(ui.get_untracked().dark_mode);

    view! {
        <Stylesheet id="leptos" href="/pkg/studyboard.css"/>
        <Title text="Study App"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
                <Route path=StaticSegment("settings") view=SettingsPage/>
            </Routes>
        </Router>
    }
}
