// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MealCoach API: backend for the nutrition coaching dashboard.
//!
//! This crate proxies meal-plan edits and profile reads to the Firestore
//! data service, forwards optimization requests to the external meal
//! optimizer, and mirrors identity-provider changes into observable state.

pub mod auth_state;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::DataService;
use services::OptimizerClient;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub data: Arc<dyn DataService>,
    pub optimizer: OptimizerClient,
}
