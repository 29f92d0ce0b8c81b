//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates chrome and
//! gating to `components::app_shell`.

pub mod dashboard;
pub mod login;
pub mod settings;
