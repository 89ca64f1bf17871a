// ABOUTME: Parsing core for nutrition plans embedded in free-form model output
// ABOUTME: Composes the JSON locator with the defensive plan normalizer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Plan Parsing Core
//!
//! Two components, composed linearly by [`crate::services`]:
//!
//! - [`extract`] locates the first balanced-brace substring of the model's
//!   raw text that decodes as valid JSON, stripping markdown fences first.
//! - [`normalize`] walks the decoded value tree, coerces fragile numeric
//!   fields, and builds the typed [`crate::models::NutritionPlan`], dropping
//!   individual malformed meal entries instead of failing the whole plan.

pub mod extract;
pub mod normalize;

pub use extract::{clean_response_text, extract_first_json};
pub use normalize::{normalize_plan, DiagnosticSink, TracingSink};
