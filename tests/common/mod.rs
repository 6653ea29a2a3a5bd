// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use mealcoach_api::config::{Config, OptimizerConfig};
use mealcoach_api::db::{DataError, DataService, FirestoreDb};
use mealcoach_api::middleware::auth::{create_jwt, AuthUser};
use mealcoach_api::models::{MealPlan, UserPreferences, UserProfile, UserRole};
use mealcoach_api::routes::create_router;
use mealcoach_api::services::OptimizerClient;
use mealcoach_api::AppState;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Unique ID for test isolation.
#[allow(dead_code)]
pub fn unique_id(prefix: &str) -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

/// Data service with canned outcomes that records every call.
///
/// An edit failure of `None` is reported as [`DataError::Offline`].
pub struct StubDataService {
    edit_outcome: Result<Value, Option<String>>,
    profile_outcome: Result<UserProfile, String>,
    pub edit_calls: Mutex<Vec<(MealPlan, String)>>,
    pub profile_calls: Mutex<Vec<AuthUser>>,
}

#[allow(dead_code)]
impl StubDataService {
    pub fn new() -> Self {
        Self {
            edit_outcome: Ok(serde_json::json!({})),
            profile_outcome: Err("profile not configured".to_string()),
            edit_calls: Mutex::new(Vec::new()),
            profile_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_edit_result(mut self, result: Value) -> Self {
        self.edit_outcome = Ok(result);
        self
    }

    pub fn with_edit_error(mut self, message: &str) -> Self {
        self.edit_outcome = Err(Some(message.to_string()));
        self
    }

    pub fn offline_for_edits(mut self) -> Self {
        self.edit_outcome = Err(None);
        self
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile_outcome = Ok(profile);
        self
    }

    pub fn with_profile_error(mut self, message: &str) -> Self {
        self.profile_outcome = Err(message.to_string());
        self
    }

    pub fn edit_call_count(&self) -> usize {
        self.edit_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DataService for StubDataService {
    async fn edit_meal_plan(&self, meal_plan: MealPlan, user_id: &str) -> Result<Value, DataError> {
        self.edit_calls
            .lock()
            .unwrap()
            .push((meal_plan, user_id.to_string()));
        self.edit_outcome
            .clone()
            .map_err(|message| message.map_or(DataError::Offline, DataError::Database))
    }

    async fn get_user_profile(&self, user: &AuthUser) -> Result<UserProfile, DataError> {
        self.profile_calls.lock().unwrap().push(user.clone());
        self.profile_outcome.clone().map_err(DataError::Database)
    }
}

/// Sample client profile.
#[allow(dead_code)]
pub fn sample_profile(uid: &str) -> UserProfile {
    UserProfile {
        id: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        display_name: Some("Test Client".to_string()),
        role: UserRole::Client,
        coach_id: Some("coach-1".to_string()),
        preferences: UserPreferences::default(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

/// Create a test app around `data`, with the optimizer at its default URL.
#[allow(dead_code)]
pub fn create_test_app(data: Arc<StubDataService>) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_optimizer(data, OptimizerConfig::default())
}

/// Create a test app with a custom optimizer configuration.
pub fn create_test_app_with_optimizer(
    data: Arc<StubDataService>,
    optimizer: OptimizerConfig,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let optimizer = OptimizerClient::new(optimizer).expect("optimizer client");

    let state = Arc::new(AppState {
        config,
        data,
        optimizer,
    });

    (create_router(state.clone()), state)
}

/// Create a signed session token for `uid`.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    create_jwt(uid, signing_key).expect("sign test jwt")
}

/// Authenticated JSON POST.
#[allow(dead_code)]
pub fn post_json(uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Authenticated GET.
#[allow(dead_code)]
pub fn get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Send a request and decode the JSON response body.
#[allow(dead_code)]
pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
