// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal-plan edit route.
//!
//! Validates the submitted plan, hands it to the data service and wraps the
//! outcome in a `{ success, data }` envelope. Coaches edit their clients'
//! plans, so the target user comes from the body; it defaults to the caller.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::MealPlan;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const INVALID_MEAL_PLAN: &str = "Invalid meal plan data";
pub const INVALID_BODY: &str = "Invalid request body";
pub const EDIT_FAILED: &str = "Failed to edit meal plan";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/meal-plans/edit", post(edit_meal_plan))
}

/// Edit request as sent by the dashboard.
///
/// Both fields stay untyped until validation so that an unexpected shape is
/// reported as bad meal plan data rather than as an unreadable body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMealPlanRequest {
    #[serde(default)]
    pub meal_plan: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
}

/// Successful edit response.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EditMealPlanResponse {
    pub success: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub data: Value,
}

/// Check the request before anything is delegated.
fn validate(request: EditMealPlanRequest) -> Result<(MealPlan, Option<String>)> {
    let invalid = || AppError::BadRequest(INVALID_MEAL_PLAN.to_string());

    let meal_plan = match request.meal_plan {
        Some(Value::Object(fields)) => MealPlan::from(fields),
        _ => return Err(invalid()),
    };

    if !meal_plan.has_meal_data() {
        return Err(invalid());
    }

    Ok((meal_plan, request.user_id.and_then(target_user_id)))
}

/// Numeric user IDs are accepted in decimal form; blanks and other shapes
/// count as absent.
fn target_user_id(value: Value) -> Option<String> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Edit a meal plan.
async fn edit_meal_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<EditMealPlanRequest>, JsonRejection>,
) -> Result<Json<EditMealPlanResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected meal plan edit body");
        AppError::BadRequest(INVALID_BODY.to_string())
    })?;

    let (meal_plan, target_user) = validate(request)?;
    let user_id = target_user.unwrap_or_else(|| user.uid.clone());

    tracing::debug!(editor = %user.uid, user_id = %user_id, "Editing meal plan");

    match state.data.edit_meal_plan(meal_plan, &user_id).await {
        Ok(data) => Ok(Json(EditMealPlanResponse {
            success: true,
            data,
        })),
        Err(e) => {
            tracing::error!(
                error = %e,
                editor = %user.uid,
                user_id = %user_id,
                "Failed to edit meal plan"
            );
            Err(AppError::delegation(&e, EDIT_FAILED))
        }
    }
}
