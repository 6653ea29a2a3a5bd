// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the external meal optimization service.
//!
//! Endpoints, timeout and retry budget come from [`OptimizerConfig`]. Transient
//! failures (connect errors, timeouts, 5xx, 429) are retried with exponential
//! backoff up to `retry_attempts` times.

use crate::config::{Endpoint, OptimizerConfig};
use crate::error::AppError;
use crate::models::UserPreferences;
use anyhow::Context;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const RETRY_MIN_DELAY: Duration = Duration::from_millis(100);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Whole-plan optimization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub meal_data: Value,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

/// Single-meal optimization request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleMealRequest {
    pub meal: Value,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

#[derive(Serialize)]
struct OptimizePayload<'a> {
    meal_data: &'a Value,
    user_preferences: &'a UserPreferences,
}

#[derive(Serialize)]
struct SingleMealPayload<'a> {
    meal: &'a Value,
    user_preferences: &'a UserPreferences,
}

/// Meal optimization API client.
#[derive(Clone)]
pub struct OptimizerClient {
    http: ClientWithMiddleware,
    config: OptimizerConfig,
}

impl OptimizerClient {
    /// Build a client honoring the configured timeout and retry budget.
    pub fn new(config: OptimizerConfig) -> anyhow::Result<Self> {
        let reqwest_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed building optimizer HTTP client")?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(RETRY_MIN_DELAY, RETRY_MAX_DELAY)
            .build_with_max_retries(config.retry_attempts);

        let http = ClientBuilder::new(reqwest_client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        tracing::info!(
            base_url = %config.base_url,
            timeout_ms = config.timeout.as_millis() as u64,
            retry_attempts = config.retry_attempts,
            "Initialized meal optimizer client"
        );

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimize a whole meal plan.
    pub async fn optimize(&self, request: &OptimizeRequest) -> Result<Value, AppError> {
        let payload = OptimizePayload {
            meal_data: &request.meal_data,
            user_preferences: self.preferences(&request.preferences),
        };
        self.post_json(Endpoint::Optimize, &payload).await
    }

    /// Optimize one meal in isolation.
    pub async fn optimize_single_meal(&self, request: &SingleMealRequest) -> Result<Value, AppError> {
        let payload = SingleMealPayload {
            meal: &request.meal,
            user_preferences: self.preferences(&request.preferences),
        };
        self.post_json(Endpoint::OptimizeSingleMeal, &payload).await
    }

    /// Check that the service is reachable and its upstreams are configured.
    pub async fn test_connection(&self) -> Result<Value, AppError> {
        self.get_json(Endpoint::TestConnection).await
    }

    /// Service liveness.
    pub async fn health(&self) -> Result<Value, AppError> {
        self.get_json(Endpoint::Health).await
    }

    fn preferences<'a>(&'a self, supplied: &'a Option<UserPreferences>) -> &'a UserPreferences {
        supplied
            .as_ref()
            .unwrap_or(&self.config.default_preferences)
    }

    async fn post_json<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Value, AppError> {
        let url = self.config.url(endpoint);
        tracing::debug!(endpoint = endpoint.name(), url = %url, "Calling meal optimizer");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Optimizer(format!("{} request failed: {}", endpoint.name(), e)))?;

        check_response_json(endpoint, response).await
    }

    async fn get_json(&self, endpoint: Endpoint) -> Result<Value, AppError> {
        let url = self.config.url(endpoint);
        tracing::debug!(endpoint = endpoint.name(), url = %url, "Calling meal optimizer");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Optimizer(format!("{} request failed: {}", endpoint.name(), e)))?;

        check_response_json(endpoint, response).await
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    endpoint: Endpoint,
    response: reqwest::Response,
) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            endpoint = endpoint.name(),
            status = status.as_u16(),
            "Meal optimizer returned an error"
        );
        return Err(AppError::Optimizer(format!("HTTP {}: {}", status, body)));
    }

    response.json::<T>().await.map_err(|e| {
        AppError::Optimizer(format!("Failed to parse {} response: {}", endpoint.name(), e))
    })
}
