// ABOUTME: Typed records for daily nutrition plans produced by the model
// ABOUTME: Covers calorie ranges, macronutrient ranges, and the four-category meal plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Nutrition Plan Models
//!
//! Typed records for the structures the plan normalizer builds out of the
//! model's decoded JSON. All values are transient: constructed fresh per
//! request and owned by the calling handler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque user/request attributes forwarded verbatim to the model
///
/// The core never interprets these fields; they are serialized as-is into
/// the generation prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    /// Arbitrary profile attributes (age, weight, goals, restrictions, ...)
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl ProfileData {
    /// Create an empty profile
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a profile attribute, consuming and returning the profile
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// Target range for total daily calorie intake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCaloriesRange {
    /// Lower bound in kcal
    pub low: i64,
    /// Upper bound in kcal
    pub high: i64,
}

impl DailyCaloriesRange {
    /// Whether the bounds are in non-decreasing order
    ///
    /// The core does not enforce this; range validation belongs to the
    /// caller consuming the plan.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.low <= self.high
    }
}

/// Target range for a single macronutrient, in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacronutrientRange {
    /// Lower bound in grams
    pub low: i64,
    /// Upper bound in grams
    pub high: i64,
}

/// A single ingredient within a meal option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name
    pub name: String,
    /// Calorie contribution in kcal
    pub calories: i64,
}

/// One suggested meal for a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealOption {
    /// Meal name
    pub name: String,
    /// Total calories for the meal in kcal
    pub total_calories: i64,
    /// Ingredients making up the meal
    pub ingredients: Vec<Ingredient>,
}

/// Daily meal plan with the four fixed categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealPlan {
    /// Breakfast options, in model-emitted order
    pub breakfast: Vec<MealOption>,
    /// Lunch options
    pub lunch: Vec<MealOption>,
    /// Dinner options
    pub dinner: Vec<MealOption>,
    /// Snack options
    pub snacks: Vec<MealOption>,
}

/// A complete daily nutrition plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlan {
    /// Target range for total daily calories
    pub daily_calories_range: DailyCaloriesRange,
    /// Per-macronutrient target ranges, keyed by whatever names the model
    /// produced (commonly "protein", "fat", "carbs")
    pub macronutrients_range: BTreeMap<String, MacronutrientRange>,
    /// The four-category meal plan
    pub meal_plan: MealPlan,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_data_flattens_attributes() {
        let profile = ProfileData::new()
            .with_attribute("age", serde_json::json!(34))
            .with_attribute("goal", serde_json::json!("cutting"));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["age"], 34);
        assert_eq!(json["goal"], "cutting");
    }

    #[test]
    fn test_daily_calories_range_ordering() {
        assert!(DailyCaloriesRange { low: 1800, high: 2200 }.is_ordered());
        assert!(DailyCaloriesRange { low: 2000, high: 2000 }.is_ordered());
        assert!(!DailyCaloriesRange { low: 2200, high: 1800 }.is_ordered());
    }

    #[test]
    fn test_meal_option_round_trips() {
        let option = MealOption {
            name: "Oats".to_owned(),
            total_calories: 300,
            ingredients: vec![Ingredient {
                name: "Oat".to_owned(),
                calories: 120,
            }],
        };

        let json = serde_json::to_string(&option).unwrap();
        let restored: MealOption = serde_json::from_str(&json).unwrap();
        assert_eq!(option, restored);
    }
}
