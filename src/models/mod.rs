// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod meal_plan;
pub mod preferences;
pub mod profile;
pub mod user;

pub use meal_plan::{MealPlan, MealPlanRecord};
pub use preferences::{MacroPreferences, UserPreferences};
pub use profile::{UserProfile, UserRole};
pub use user::User;
