//! User profile model for storage and API.

use crate::models::UserPreferences;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dashboard role of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Coach,
    #[default]
    Client,
}

/// User profile stored in Firestore (document ID is the uid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Firebase uid
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    /// Assigned coach (clients only)
    #[serde(default)]
    pub coach_id: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    pub created_at: String,
    pub updated_at: String,
}
