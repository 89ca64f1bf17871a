// ABOUTME: End-to-end tests for nutrition plan generation with a mock LLM provider
// ABOUTME: Exercises the full pipeline from raw model text to a typed plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(clippy::missing_panics_doc, clippy::missing_errors_doc)]
#![allow(missing_docs)]

mod common;

use common::{CollectingSink, MockLlmProvider};
use serde_json::json;

use nutriplan::config::LlmSettings;
use nutriplan::errors::ErrorCode;
use nutriplan::models::ProfileData;
use nutriplan::services::{generate_nutrition_plan, plan_from_response_text};

/// Raw model output: fenced JSON surrounded by prose, with string-typed
/// calorie fields the pipeline has to coerce
const FENCED_PLAN_RESPONSE: &str = "Here is your plan:\n```json\n{\"daily_calories_range\":{\"low\":1800,\"high\":2200},\"macronutrients_range\":{\"protein\":{\"low\":90,\"high\":150}},\"meal_plan\":{\"breakfast\":[{\"name\":\"Oats\",\"total_calories\":\"300\",\"ingredients\":[{\"name\":\"Oat\",\"calories\":\"120.0\"}]}],\"lunch\":[],\"dinner\":[],\"snacks\":[]}}\n```\nEnjoy!";

fn sample_profile() -> ProfileData {
    ProfileData::new()
        .with_attribute("age", json!(31))
        .with_attribute("weight_kg", json!(72))
        .with_attribute("goal", json!("maintenance"))
}

// ----------------------------------------------------------------------------
// End-to-end generation
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_generate_plan_from_fenced_response() {
    let provider = MockLlmProvider::with_response(FENCED_PLAN_RESPONSE);
    let settings = LlmSettings::default();

    let plan = generate_nutrition_plan(&provider, &settings, &sample_profile())
        .await
        .unwrap();

    assert_eq!(plan.daily_calories_range.low, 1800);
    assert_eq!(plan.daily_calories_range.high, 2200);

    let protein = &plan.macronutrients_range["protein"];
    assert_eq!(protein.low, 90);
    assert_eq!(protein.high, 150);

    assert_eq!(plan.meal_plan.breakfast.len(), 1);
    let oats = &plan.meal_plan.breakfast[0];
    assert_eq!(oats.name, "Oats");
    assert_eq!(oats.total_calories, 300);
    assert_eq!(oats.ingredients.len(), 1);
    assert_eq!(oats.ingredients[0].name, "Oat");
    assert_eq!(oats.ingredients[0].calories, 120);

    assert!(plan.meal_plan.lunch.is_empty());
    assert!(plan.meal_plan.dinner.is_empty());
    assert!(plan.meal_plan.snacks.is_empty());
}

#[tokio::test]
async fn test_empty_model_response_is_upstream_error() {
    let provider = MockLlmProvider::with_response("");
    let settings = LlmSettings::default();

    let error = generate_nutrition_plan(&provider, &settings, &sample_profile())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::UpstreamEmpty);
    assert_eq!(error.http_status(), 502);
}

#[tokio::test]
async fn test_prose_only_response_is_not_found() {
    let provider = MockLlmProvider::with_response("Sorry, I cannot produce a plan right now.");
    let settings = LlmSettings::default();

    let error = generate_nutrition_plan(&provider, &settings, &sample_profile())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::JsonNotFound);
}

#[tokio::test]
async fn test_response_missing_meal_plan_is_schema_error() {
    let response = json!({
        "daily_calories_range": {"low": 1800, "high": 2200},
        "macronutrients_range": {"protein": {"low": 90, "high": 150}}
    })
    .to_string();

    let provider = MockLlmProvider::with_response(response);
    let settings = LlmSettings::default();

    let error = generate_nutrition_plan(&provider, &settings, &sample_profile())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::SchemaInvalid);
}

// ----------------------------------------------------------------------------
// Pure pipeline tail
// ----------------------------------------------------------------------------

#[test]
fn test_pipeline_is_idempotent() {
    let sink = CollectingSink::new();

    let first = plan_from_response_text(FENCED_PLAN_RESPONSE, &sink).unwrap();
    let second = plan_from_response_text(FENCED_PLAN_RESPONSE, &sink).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_whitespace_response_is_upstream_error() {
    let sink = CollectingSink::new();
    let error = plan_from_response_text("  \n\t  ", &sink).unwrap_err();
    assert_eq!(error.code, ErrorCode::UpstreamEmpty);
}

#[test]
fn test_dropped_entries_reach_the_sink() {
    let response = json!({
        "daily_calories_range": {"low": 1800, "high": 2200},
        "macronutrients_range": {"protein": {"low": 90, "high": 150}},
        "meal_plan": {
            "breakfast": [
                {"name": "Oats", "total_calories": 300, "ingredients": []},
                {"total_calories": 400, "ingredients": []}
            ],
            "lunch": [],
            "dinner": [],
            "snacks": []
        }
    })
    .to_string();

    let sink = CollectingSink::new();
    let plan = plan_from_response_text(&response, &sink).unwrap();

    assert_eq!(plan.meal_plan.breakfast.len(), 1);
    assert_eq!(plan.meal_plan.breakfast[0].name, "Oats");
    assert_eq!(sink.messages().len(), 1);
    assert!(sink.messages()[0].contains("breakfast"));
}
