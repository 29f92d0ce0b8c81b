//! Wire DTOs for the identity-provider HTTP API.
//!
//! DESIGN
//! ======
//! These types mirror the provider's JSON payloads so serde handles the
//! boundary; everything downstream of `ViewerIdentity` is provider-agnostic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated principal's minimal profile, held client-side.
///
/// Replaced wholesale on every provider change event, never mutated
/// field-by-field. `id` and `email` are always present together; a
/// provider user without an email is treated as "no session".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerIdentity {
    /// Opaque unique identifier assigned by the provider.
    pub id: String,
    /// Sign-in email address.
    pub email: String,
    /// Display name from profile metadata, if set.
    pub full_name: Option<String>,
    /// Avatar image reference from profile metadata, if set.
    pub avatar_url: Option<String>,
}

/// User payload as returned by `GET /auth/v1/user` and embedded in grants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    /// Provider-assigned user id (UUID string).
    pub id: String,
    /// Absent for phone-only or anonymous principals.
    pub email: Option<String>,
    /// Open-ended profile metadata (`full_name`, `avatar_url`, ...).
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

impl ApiUser {
    /// Convert to a [`ViewerIdentity`], or `None` when the payload cannot
    /// form a complete identity (no partial identities downstream).
    pub fn into_identity(self) -> Option<ViewerIdentity> {
        let email = self.email?;
        let full_name = metadata_string(&self.user_metadata, "full_name");
        let avatar_url = metadata_string(&self.user_metadata, "avatar_url");
        Some(ViewerIdentity { id: self.id, email, full_name, avatar_url })
    }
}

fn metadata_string(metadata: &serde_json::Value, key: &str) -> Option<String> {
    metadata.get(key).and_then(|v| v.as_str()).map(str::to_owned)
}

/// Response to a password grant or signup request.
///
/// Signup against a provider that requires email confirmation returns the
/// pending user with no token; both fields are therefore optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TokenGrant {
    pub access_token: Option<String>,
    pub user: Option<ApiUser>,
}

/// Error body shapes the provider emits across endpoints.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ApiErrorBody {
    pub msg: Option<String>,
    pub message: Option<String>,
    pub error_description: Option<String>,
}

impl ApiErrorBody {
    /// First human-readable message present, in the provider's own
    /// precedence order.
    pub fn into_message(self) -> Option<String> {
        self.msg.or(self.message).or(self.error_description)
    }
}
