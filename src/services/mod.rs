// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - clients for external services.

pub mod optimizer;

pub use optimizer::{OptimizeRequest, OptimizerClient, SingleMealRequest};
