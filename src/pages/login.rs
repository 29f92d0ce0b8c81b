//! Entry page with sign-in / sign-up tabs and password recovery.
//!
//! Submit handlers delegate credential verification to the session store;
//! provider rejection messages are shown verbatim as transient notices.
//! Navigation to the dashboard happens on call success, while the session
//! state itself flips via the provider's change event.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::session::use_session_store;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthTab {
    SignIn,
    SignUp,
}

/// Shaped credential payload for an account-creation submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SignUpInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub(crate) fn validate_sign_in_input(
    email: &str,
    password: &str,
) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if !is_plausible_email(email) {
        return Err("Please enter a valid email address.");
    }
    if password.len() < 6 {
        return Err("Password must be at least 6 characters.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

pub(crate) fn validate_sign_up_input(
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
    accepted_terms: bool,
) -> Result<SignUpInput, &'static str> {
    let full_name = full_name.trim();
    if full_name.len() < 2 {
        return Err("Please enter your full name.");
    }
    let (email, password) = validate_sign_in_input(email, password)?;
    if password != confirm_password {
        return Err("Passwords do not match.");
    }
    if !accepted_terms {
        return Err("You must accept the terms to continue.");
    }
    Ok(SignUpInput { full_name: full_name.to_owned(), email, password })
}

#[cfg(feature = "hydrate")]
fn go_to_dashboard() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href("/");
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let Some(store) = use_session_store() else {
        return view! {
            <div class="login-page">
                <p>"Session context is unavailable."</p>
            </div>
        }
        .into_any();
    };
    let store = StoredValue::new(store);

    let tab = RwSignal::new(AuthTab::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let accept_terms = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let notice = RwSignal::new(String::new());

    let select_tab = move |next: AuthTab| {
        tab.set(next);
        notice.set(String::new());
    };

    let on_sign_in = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) =
            match validate_sign_in_input(&email.get(), &password.get()) {
                Ok(values) => values,
                Err(message) => {
                    notice.set(message.to_owned());
                    return;
                }
            };
        busy.set(true);
        notice.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match store.get_value().sign_in(&email_value, &password_value).await {
                Ok(()) => go_to_dashboard(),
                Err(error) => {
                    notice.set(error.to_string());
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value);
        }
    };

    let on_sign_up = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let input = match validate_sign_up_input(
            &full_name.get(),
            &email.get(),
            &password.get(),
            &confirm_password.get(),
            accept_terms.get(),
        ) {
            Ok(input) => input,
            Err(message) => {
                notice.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        notice.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let store = store.get_value();
            match store.sign_up(&input.email, &input.password, &input.full_name).await {
                Ok(()) => {
                    // Auto-confirm deployments already delivered the session
                    // event; confirmation flows have no session yet.
                    if store.state().get_untracked().identity.is_some() {
                        go_to_dashboard();
                    } else {
                        notice.set(
                            "Account created. Check your inbox to confirm your email.".to_owned(),
                        );
                        busy.set(false);
                    }
                }
                Err(error) => {
                    notice.set(error.to_string());
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = input;
        }
    };

    let on_forgot_password = move |_| {
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        if email_value.is_empty() {
            notice.set("Enter your email first.".to_owned());
            return;
        }
        busy.set(true);
        notice.set("Requesting password reset...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match store.get_value().reset_password(&email_value).await {
                Ok(()) => notice.set("Reset requested. Check your email.".to_owned()),
                Err(error) => notice.set(error.to_string()),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email_value;
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Study App"</h1>
                <p class="login-card__subtitle">"Sign in to your account or create a new one"</p>

                <div class="login-tabs">
                    <button
                        class="login-tab"
                        class:login-tab--active=move || tab.get() == AuthTab::SignIn
                        on:click=move |_| select_tab(AuthTab::SignIn)
                    >
                        "Sign In"
                    </button>
                    <button
                        class="login-tab"
                        class:login-tab--active=move || tab.get() == AuthTab::SignUp
                        on:click=move |_| select_tab(AuthTab::SignUp)
                    >
                        "Sign Up"
                    </button>
                </div>

                <Show when=move || tab.get() == AuthTab::SignIn>
                    <form class="login-form" on:submit=on_sign_in>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                        </button>
                        <button
                            class="login-link"
                            type="button"
                            on:click=on_forgot_password
                        >
                            "Forgot password?"
                        </button>
                    </form>
                </Show>

                <Show when=move || tab.get() == AuthTab::SignUp>
                    <form class="login-form" on:submit=on_sign_up>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Your full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="email"
                            placeholder="Enter your email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Choose a password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Confirm your password"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                        <label class="login-terms">
                            <input
                                type="checkbox"
                                prop:checked=move || accept_terms.get()
                                on:change=move |ev| accept_terms.set(event_target_checked(&ev))
                            />
                            "I accept the terms and conditions"
                        </label>
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Creating account..." } else { "Create account" }}
                        </button>
                    </form>
                </Show>

                <Show when=move || !notice.get().is_empty()>
                    <p class="login-message">{move || notice.get()}</p>
                </Show>
            </div>
        </div>
    }
    .into_any()
}
