//! Identity record published by the identity provider.

use serde::{Deserialize, Serialize};

/// Signed-in user as reported by the identity provider.
///
/// Owned by the provider; consumers only ever hold read-only copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Provider-assigned user ID (Firebase uid)
    pub uid: String,
    /// Email address (may be None for phone/anonymous sign-in)
    pub email: Option<String>,
    /// Display name
    pub display_name: Option<String>,
}

impl User {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }
}
