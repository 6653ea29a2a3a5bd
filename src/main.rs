// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MealCoach API Server
//!
//! Serves the coaching dashboard: meal-plan edits, profiles and meal
//! optimization requests.

use mealcoach_api::{config::Config, db::FirestoreDb, services::OptimizerClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting MealCoach API");

    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let optimizer = OptimizerClient::new(config.optimizer.clone())?;

    let state = Arc::new(AppState {
        config: config.clone(),
        data: Arc::new(db),
        optimizer,
    });

    let app = mealcoach_api::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
///
/// `RUST_LOG` overrides the default filter.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mealcoach_api=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
