// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal optimization proxy routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::services::optimizer::{OptimizeRequest, SingleMealRequest};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/optimize", post(optimize))
        .route("/api/optimize/meal", post(optimize_single_meal))
        .route("/api/optimizer/status", get(test_connection))
        .route("/api/optimizer/health", get(health))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected optimizer request body");
        AppError::BadRequest(rejection.body_text())
    })
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Optimize a full meal plan.
async fn optimize(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = body(payload)?;
    if is_blank(&request.meal_data) {
        return Err(AppError::BadRequest("meal_data is required".to_string()));
    }

    tracing::info!(uid = %user.uid, "Optimizing meal plan");
    state.optimizer.optimize(&request).await.map(Json)
}

/// Optimize a single meal.
async fn optimize_single_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<SingleMealRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = body(payload)?;
    if is_blank(&request.meal) {
        return Err(AppError::BadRequest("meal is required".to_string()));
    }

    tracing::info!(uid = %user.uid, "Optimizing single meal");
    state.optimizer.optimize_single_meal(&request).await.map(Json)
}

/// Check connectivity to the optimizer.
async fn test_connection(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    state.optimizer.test_connection().await.map(Json)
}

async fn health(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    state.optimizer.health().await.map(Json)
}
