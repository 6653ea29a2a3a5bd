// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Profiles (coach and client profiles, keyed by uid)
//! - Meal plans (one document per plan, keyed by plan ID)

use crate::db::{collections, DataError, DataService};
use crate::middleware::auth::AuthUser;
use crate::models::{MealPlan, MealPlanRecord, UserProfile};
use crate::time_utils::now_utc_rfc3339;
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, DataError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| DataError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, DataError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            DataError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return [`DataError::Offline`].
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, DataError> {
        self.client.as_ref().ok_or(DataError::Offline)
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by uid.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, DataError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PROFILES)
            .obj()
            .one(uid)
            .await
            .map_err(|e| DataError::Database(e.to_string()))
    }

    /// Create or update a profile.
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), DataError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PROFILES)
            .document_id(&profile.id)
            .object(profile)
            .execute()
            .await
            .map_err(|e| DataError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── Meal Plan Operations ────────────────────────────────────

    /// Get a stored meal plan by ID.
    pub async fn get_meal_plan(&self, plan_id: &str) -> Result<Option<MealPlanRecord>, DataError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::MEAL_PLANS)
            .obj()
            .one(plan_id)
            .await
            .map_err(|e| DataError::Database(e.to_string()))
    }

    /// Store a meal plan, replacing any previous version.
    pub async fn set_meal_plan(&self, record: &MealPlanRecord) -> Result<(), DataError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::MEAL_PLANS)
            .document_id(&record.id)
            .object(record)
            .execute()
            .await
            .map_err(|e| DataError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete a meal plan.
    pub async fn delete_meal_plan(&self, plan_id: &str) -> Result<(), DataError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::MEAL_PLANS)
            .document_id(plan_id)
            .execute()
            .await
            .map_err(|e| DataError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl DataService for FirestoreDb {
    async fn edit_meal_plan(
        &self,
        meal_plan: MealPlan,
        user_id: &str,
    ) -> Result<serde_json::Value, DataError> {
        let record = MealPlanRecord::from_plan(meal_plan, user_id, now_utc_rfc3339());

        // An existing plan may only be overwritten for the user it belongs to.
        if let Some(existing) = self.get_meal_plan(&record.id).await? {
            if existing.user_id != record.user_id {
                return Err(DataError::NotFound(format!(
                    "Meal plan {} not found for user {}",
                    record.id, user_id
                )));
            }
        }

        self.set_meal_plan(&record).await?;

        tracing::debug!(plan_id = %record.id, user_id, "Meal plan stored");

        serde_json::to_value(&record).map_err(|e| DataError::Database(e.to_string()))
    }

    async fn get_user_profile(&self, user: &AuthUser) -> Result<UserProfile, DataError> {
        self.get_profile(&user.uid)
            .await?
            .ok_or_else(|| DataError::NotFound(format!("Profile {} not found", user.uid)))
    }
}
