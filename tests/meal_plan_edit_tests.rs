// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal-plan edit route tests.
//!
//! These tests verify that:
//! 1. Invalid plans are rejected with 400 before the data service is called
//! 2. Successful edits are wrapped in a `{ success, data }` envelope
//! 3. Data-service failures surface as 500 with `error` and `details`

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;

mod common;
use common::{create_test_app, create_test_jwt, post_json, send, StubDataService};

const EDIT_URI: &str = "/api/meal-plans/edit";

#[tokio::test]
async fn test_empty_meal_plan_is_rejected() {
    let data = Arc::new(StubDataService::new());
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(EDIT_URI, &token, &json!({ "mealPlan": {}, "userId": "u1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid meal plan data" }));
    assert_eq!(data.edit_call_count(), 0);
}

#[tokio::test]
async fn test_invalid_plans_never_reach_data_service() {
    let bodies = [
        json!({ "userId": "u1" }),
        json!({ "mealPlan": null, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": null }, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": [] }, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": {} }, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": "" }, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": 0 }, "userId": "u1" }),
        json!({ "mealPlan": { "meal_data": false }, "userId": "u1" }),
        json!({ "mealPlan": "lunch", "userId": "u1" }),
    ];

    for request_body in bodies {
        let data = Arc::new(StubDataService::new());
        let (app, state) = create_test_app(data.clone());
        let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

        let (status, body) = send(app, post_json(EDIT_URI, &token, &request_body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {request_body}");
        assert!(body.get("error").is_some(), "body: {request_body}");
        assert_eq!(data.edit_call_count(), 0, "body: {request_body}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let data = Arc::new(StubDataService::new());
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let request = Request::builder()
        .method("POST")
        .uri(EDIT_URI)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request body" }));
    assert_eq!(data.edit_call_count(), 0);
}

#[tokio::test]
async fn test_successful_edit_returns_envelope() {
    let data = Arc::new(StubDataService::new().with_edit_result(json!({ "id": 42 })));
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": [{ "meal": "lunch" }] }, "userId": "u1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": { "id": 42 } }));

    let calls = data.edit_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "u1");
    assert_eq!(calls[0].0.meal_data, Some(json!([{ "meal": "lunch" }])));
}

#[tokio::test]
async fn test_missing_user_id_defaults_to_caller() {
    let data = Arc::new(StubDataService::new());
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("client-9", &state.config.jwt_signing_key);

    let (status, _) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": { "monday": ["oats"] } } }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data.edit_calls.lock().unwrap()[0].1, "client-9");
}

#[tokio::test]
async fn test_data_service_failure_returns_message_and_details() {
    let data = Arc::new(StubDataService::new().with_edit_error("plan is locked"));
    let (app, state) = create_test_app(data);
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": [{ "meal": "dinner" }] }, "userId": "u1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "plan is locked");
    assert_eq!(body["details"], "Database error: plan is locked");
}

#[tokio::test]
async fn test_data_service_failure_without_message_uses_fallback() {
    let data = Arc::new(StubDataService::new().with_edit_error(""));
    let (app, state) = create_test_app(data);
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": [{ "meal": "dinner" }] }, "userId": "u1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to edit meal plan");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_offline_data_service_uses_fallback() {
    let data = Arc::new(StubDataService::new().offline_for_edits());
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": [{ "meal": "dinner" }] }, "userId": "u1" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to edit meal plan");
    assert_eq!(body["details"], "Database not connected (offline mode)");
    assert_eq!(data.edit_call_count(), 1);
}

#[tokio::test]
async fn test_numeric_plan_id_is_delegated() {
    let data = Arc::new(StubDataService::new().with_edit_result(json!({ "id": 42 })));
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, body) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({
                "mealPlan": { "id": 42, "meal_data": [{ "meal": "lunch" }] },
                "userId": "u1"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "data": { "id": 42 } }));

    let calls = data.edit_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.id, Some(json!(42)));
    assert_eq!(calls[0].1, "u1");
}

#[tokio::test]
async fn test_numeric_user_id_is_delegated_as_string() {
    let data = Arc::new(StubDataService::new());
    let (app, state) = create_test_app(data.clone());
    let token = create_test_jwt("coach-1", &state.config.jwt_signing_key);

    let (status, _) = send(
        app,
        post_json(
            EDIT_URI,
            &token,
            &json!({ "mealPlan": { "meal_data": [{ "meal": "lunch" }] }, "userId": 1001 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(data.edit_calls.lock().unwrap()[0].1, "1001");
}
