// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile route.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub const PROFILE_FETCH_FAILED: &str = "Failed to fetch user profile";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile))
}

/// Get the caller's profile, unwrapped.
///
/// Failure detail is logged; callers only ever see a fixed message.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    state
        .data
        .get_user_profile(&user)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, uid = %user.uid, "Failed to fetch user profile");
            AppError::Opaque(PROFILE_FETCH_FAILED)
        })
}
