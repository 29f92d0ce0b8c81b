//! Shared application state provided via Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` owns the auth-session lifecycle consumed by route guards and
//! pages; `ui` holds presentation preferences.

pub mod session;
pub mod ui;
