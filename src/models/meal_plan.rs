// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meal plan models.
//!
//! The shape of `meal_data` belongs to the dashboard and the optimizer, so it
//! is carried as raw JSON. Unknown top-level fields are kept as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields owned by the storage layer; never taken from client input.
const RESERVED_FIELDS: [&str; 4] = ["id", "user_id", "meal_data", "updated_at"];

/// Meal plan as submitted by the dashboard editor.
///
/// `id` is whatever the dashboard sent back from a previous edit; stored plans
/// may carry numeric IDs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MealPlan {
    /// True if `meal_data` is present and not empty.
    pub fn has_meal_data(&self) -> bool {
        self.meal_data.as_ref().is_some_and(|data| !is_empty(data))
    }

    /// Document key for this plan, if the submitted `id` can be one.
    ///
    /// Strings are used as-is, numbers in their decimal form. Anything else,
    /// including a blank string, counts as no ID.
    pub fn storage_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for MealPlan {
    fn from(mut fields: Map<String, Value>) -> Self {
        Self {
            id: fields.remove("id"),
            meal_data: fields.remove("meal_data"),
            extra: fields,
        }
    }
}

/// Same notion of "empty" as the dashboard's falsy check, plus empty
/// collections.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Meal plan as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanRecord {
    pub id: String,
    pub user_id: String,
    pub meal_data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub updated_at: String,
}

impl MealPlanRecord {
    /// Build the stored form of `plan` for `user_id`.
    ///
    /// Plans without an ID are keyed by user, so each client has one current plan.
    pub fn from_plan(plan: MealPlan, user_id: &str, updated_at: String) -> Self {
        let id = plan.storage_id().unwrap_or_else(|| user_id.to_string());
        let mut extra = plan.extra;
        for key in RESERVED_FIELDS {
            extra.remove(key);
        }

        Self {
            id,
            user_id: user_id.to_string(),
            meal_data: plan.meal_data.unwrap_or(Value::Null),
            extra,
            updated_at,
        }
    }
}
