// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data-service layer.
//!
//! Route handlers only see the [`DataService`] trait. The acting user is
//! always passed in explicitly; nothing here reads ambient session state.

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::middleware::auth::AuthUser;
use crate::models::{MealPlan, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const PROFILES: &str = "profiles";
    pub const MEAL_PLANS: &str = "meal_plans";
}

/// Failures reported by the data-service layer.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database not connected (offline mode)")]
    Offline,
}

impl DataError {
    /// Human-readable message carried by the failure, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            DataError::Database(msg) | DataError::NotFound(msg) => Some(msg.as_str()),
            DataError::Offline => None,
        }
    }
}

/// Operations the HTTP proxies delegate to.
#[async_trait]
pub trait DataService: Send + Sync {
    /// Persist `meal_plan` for `user_id` and return the stored result.
    async fn edit_meal_plan(
        &self,
        meal_plan: MealPlan,
        user_id: &str,
    ) -> Result<serde_json::Value, DataError>;

    /// Fetch the profile of the authenticated caller.
    async fn get_user_profile(&self, user: &AuthUser) -> Result<UserProfile, DataError>;
}
