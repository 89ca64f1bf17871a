// ABOUTME: Normalizes decoded model JSON into typed nutrition plan records
// ABOUTME: Coerces fragile calorie fields and drops malformed meal entries per policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Plan Normalizer
//!
//! Walks the decoded `serde_json::Value` tree and constructs the typed
//! [`NutritionPlan`]. Models are unreliable about numeric types, so known
//! fragile fields (ingredient `calories`, meal `total_calories`) are coerced
//! to integers with a `0` fallback before typed construction. A meal entry
//! that still fails construction (e.g. a missing name) is recorded through
//! the injected [`DiagnosticSink`] and dropped from its category; missing or
//! malformed required top-level structure fails the whole plan.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::errors::AppError;
use crate::models::{DailyCaloriesRange, MacronutrientRange, MealOption, MealPlan, NutritionPlan};

/// The four fixed meal plan categories, in plan order
const MEAL_CATEGORIES: [&str; 4] = ["breakfast", "lunch", "dinner", "snacks"];

/// Injected logging capability for per-entry validation failures
///
/// Keeps the normalizer a pure function of its input: production code uses
/// [`TracingSink`], tests can substitute a collecting sink.
pub trait DiagnosticSink {
    /// Record a diagnostic message
    fn record(&self, message: &str);
}

/// Default sink that forwards diagnostics to `tracing::warn!`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, message: &str) {
        warn!("{message}");
    }
}

/// Best-effort coercion of a calorie field to an integer
///
/// Integers pass through; floats and numeric strings truncate toward zero;
/// anything else (including a missing field, passed as `Value::Null`)
/// falls back to `0`.
fn coerce_calories(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<f64>().map_or(0, |float| float as i64),
        _ => 0,
    }
}

/// Attempt to build a typed meal option from a raw entry
///
/// Applies the calorie coercion policy to `total_calories` and every
/// ingredient's `calories` before typed construction, so only genuinely
/// structural problems (missing name, ingredients not a list) fail.
///
/// # Errors
///
/// Returns a schema error if the coerced entry still fails validation.
fn meal_option_from_entry(entry: &Value) -> Result<MealOption, AppError> {
    let mut patched = entry.clone();

    if let Some(fields) = patched.as_object_mut() {
        let total = fields.get("total_calories").map_or(0, coerce_calories);
        fields.insert("total_calories".to_owned(), Value::from(total));

        if let Some(Value::Array(items)) = fields.get_mut("ingredients") {
            for item in items {
                if let Some(ingredient) = item.as_object_mut() {
                    let calories = ingredient.get("calories").map_or(0, coerce_calories);
                    ingredient.insert("calories".to_owned(), Value::from(calories));
                }
            }
        }
    }

    serde_json::from_value(patched)
        .map_err(|e| AppError::schema_invalid(format!("meal entry rejected: {e}")))
}

/// Build one category's option list, dropping entries that fail validation
///
/// Valid entries keep their original relative order.
fn parse_category(
    raw: &Value,
    category: &str,
    sink: &dyn DiagnosticSink,
) -> Result<Vec<MealOption>, AppError> {
    let entries = raw.as_array().ok_or_else(|| {
        AppError::schema_invalid(format!("meal_plan.{category} is not a list"))
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| match meal_option_from_entry(entry) {
            Ok(option) => Some(option),
            Err(error) => {
                sink.record(&format!("Dropping invalid {category} entry: {error}"));
                None
            }
        })
        .collect())
}

/// Fetch a required key from a JSON object
fn require<'a>(
    object: &'a serde_json::Map<String, Value>,
    key: &str,
    context: &str,
) -> Result<&'a Value, AppError> {
    object
        .get(key)
        .ok_or_else(|| AppError::schema_invalid(format!("{context} is missing '{key}'")))
}

/// Normalize a decoded model response into a typed nutrition plan
///
/// Requires `daily_calories_range`, `macronutrients_range`, and `meal_plan`
/// with all four category keys at the top level. Individual malformed meal
/// entries are recorded through `sink` and dropped; everything else that is
/// missing or structurally wrong fails the whole plan.
///
/// Normalization is deterministic: no randomness, no I/O, no time
/// dependency.
///
/// # Errors
///
/// Returns [`crate::errors::ErrorCode::SchemaInvalid`] if required top-level
/// structure is missing or malformed.
pub fn normalize_plan(decoded: &Value, sink: &dyn DiagnosticSink) -> Result<NutritionPlan, AppError> {
    let root = decoded
        .as_object()
        .ok_or_else(|| AppError::schema_invalid("top-level JSON is not an object"))?;

    let daily_calories_range: DailyCaloriesRange =
        serde_json::from_value(require(root, "daily_calories_range", "plan")?.clone())
            .map_err(|e| AppError::schema_invalid(format!("daily_calories_range: {e}")))?;

    let macros_raw = require(root, "macronutrients_range", "plan")?
        .as_object()
        .ok_or_else(|| AppError::schema_invalid("macronutrients_range is not a mapping"))?;

    let mut macronutrients_range = BTreeMap::new();
    for (name, raw) in macros_raw {
        let range: MacronutrientRange = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::schema_invalid(format!("macronutrients_range.{name}: {e}")))?;
        macronutrients_range.insert(name.clone(), range);
    }

    let meal_plan_raw = require(root, "meal_plan", "plan")?
        .as_object()
        .ok_or_else(|| AppError::schema_invalid("meal_plan is not a mapping"))?;

    let category = |key: &str| -> Result<Vec<MealOption>, AppError> {
        parse_category(require(meal_plan_raw, key, "meal_plan")?, key, sink)
    };

    let meal_plan = MealPlan {
        breakfast: category(MEAL_CATEGORIES[0])?,
        lunch: category(MEAL_CATEGORIES[1])?,
        dinner: category(MEAL_CATEGORIES[2])?,
        snacks: category(MEAL_CATEGORIES[3])?,
    };

    Ok(NutritionPlan {
        daily_calories_range,
        macronutrients_range,
        meal_plan,
    })
}
