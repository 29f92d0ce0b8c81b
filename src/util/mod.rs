//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` is the pure route-gating decision applied by protected layouts;
//! `dark_mode` isolates browser persistence for the theme preference.

pub mod dark_mode;
pub mod guard;
