// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Dietary preferences attached to a profile and sent to the optimizer.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default daily calorie target when the client has not set one.
pub const DEFAULT_CALORIE_TARGET: u32 = 2000;

/// Macro split as whole percentages of daily calories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroPreferences {
    pub protein: u8,
    pub carbs: u8,
    pub fat: u8,
}

impl Default for MacroPreferences {
    fn default() -> Self {
        Self {
            protein: 30,
            carbs: 40,
            fat: 30,
        }
    }
}

/// A client's dietary preferences.
///
/// Every field is defaulted so partial documents and requests deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct UserPreferences {
    /// e.g. "vegetarian", "gluten_free"
    pub dietary_restrictions: Vec<String>,
    /// e.g. "mediterranean", "japanese"
    pub cuisine_preferences: Vec<String>,
    pub macro_preferences: MacroPreferences,
    pub calorie_target: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            cuisine_preferences: Vec::new(),
            macro_preferences: MacroPreferences::default(),
            calorie_target: DEFAULT_CALORIE_TARGET,
        }
    }
}
