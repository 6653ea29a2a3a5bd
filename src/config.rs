// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Also holds the static description of the meal optimization API: base URL,
//! endpoint paths, timeout and retry budget. Nothing here performs I/O beyond
//! reading the environment.

use crate::models::UserPreferences;
use std::env;
use std::time::Duration;

/// Default base URL of the meal optimization service.
pub const DEFAULT_OPTIMIZER_URL: &str = "http://localhost:5000";
/// Request timeout for the meal optimization service.
pub const OPTIMIZER_TIMEOUT_MS: u64 = 30_000;
/// Retry attempts for transient meal optimization failures.
pub const OPTIMIZER_RETRY_ATTEMPTS: u32 = 3;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL (allowed CORS origin)
    pub frontend_url: String,
    /// GCP/Firebase project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Meal optimization API settings
    pub optimizer: OptimizerConfig,
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?;
        if jwt_signing_key.is_empty() {
            return Err(ConfigError::Invalid("JWT_SIGNING_KEY must not be empty"));
        }

        let mut optimizer = OptimizerConfig::default();
        if let Ok(url) = env::var("OPTIMIZER_API_URL") {
            optimizer.base_url = url.trim_end_matches('/').to_string();
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            jwt_signing_key: jwt_signing_key.into_bytes(),
            optimizer,
        })
    }
}

/// Logical endpoints exposed by the meal optimization service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Optimize,
    OptimizeSingleMeal,
    TestConnection,
    Health,
}

impl Endpoint {
    pub const ALL: [Endpoint; 4] = [
        Endpoint::Optimize,
        Endpoint::OptimizeSingleMeal,
        Endpoint::TestConnection,
        Endpoint::Health,
    ];

    /// Logical name as used by callers.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Optimize => "optimize",
            Endpoint::OptimizeSingleMeal => "optimize_single_meal",
            Endpoint::TestConnection => "test_connection",
            Endpoint::Health => "health",
        }
    }
}

/// Endpoint name to path mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerEndpoints {
    pub optimize: String,
    pub optimize_single_meal: String,
    pub test_connection: String,
    pub health: String,
}

impl Default for OptimizerEndpoints {
    fn default() -> Self {
        Self {
            optimize: "/optimize".to_string(),
            optimize_single_meal: "/optimize-single-meal".to_string(),
            test_connection: "/test-connection".to_string(),
            health: "/health".to_string(),
        }
    }
}

impl OptimizerEndpoints {
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Optimize => &self.optimize,
            Endpoint::OptimizeSingleMeal => &self.optimize_single_meal,
            Endpoint::TestConnection => &self.test_connection,
            Endpoint::Health => &self.health,
        }
    }
}

/// Static description of the meal optimization API.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub base_url: String,
    pub endpoints: OptimizerEndpoints,
    pub timeout: Duration,
    pub retry_attempts: u32,
    /// Preferences sent when a caller supplies none.
    pub default_preferences: UserPreferences,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPTIMIZER_URL.to_string(),
            endpoints: OptimizerEndpoints::default(),
            timeout: Duration::from_millis(OPTIMIZER_TIMEOUT_MS),
            retry_attempts: OPTIMIZER_RETRY_ATTEMPTS,
            default_preferences: UserPreferences::default(),
        }
    }
}

impl OptimizerConfig {
    /// Point the config at a different service (tests, staging).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL for a logical endpoint.
    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, self.endpoints.path(endpoint))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
