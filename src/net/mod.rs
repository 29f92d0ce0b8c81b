//! Networking modules for the hosted identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `provider` defines the capability seam the session store depends on,
//! `session_client` is the HTTP implementation of that seam, and `types`
//! defines the shared wire schema.

pub mod provider;
pub mod session_client;
pub mod types;
