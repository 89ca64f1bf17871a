// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the nutrition-plan generation prompt for the model collaborator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # System Prompts
//!
//! Prompts are loaded at compile time from markdown files for easy maintenance.

/// Nutrition plan generation system prompt
///
/// Instructs the model to respond with a single JSON object containing the
/// daily calorie range, macronutrient ranges, and the four-category meal plan.
pub const NUTRITION_PLAN_PROMPT: &str = include_str!("nutrition_plan.md");

/// Get the system prompt for nutrition plan generation
#[must_use]
pub const fn get_nutrition_plan_prompt() -> &'static str {
    NUTRITION_PLAN_PROMPT
}
