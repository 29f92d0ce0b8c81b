//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome while reading shared state from Leptos
//! context providers; `app_shell` is where the route gate is enforced.

pub mod app_shell;
