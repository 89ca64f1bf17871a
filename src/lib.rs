// ABOUTME: Main library entry point for the nutriplan service core
// ABOUTME: Extracts structured daily nutrition plans from free-form LLM output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

#![deny(unsafe_code)]

//! # Nutriplan
//!
//! A service core that turns the free-form text output of a generative
//! language model into a typed daily nutrition plan.
//!
//! The pipeline is linear: the model's raw text is stripped of markdown
//! code fences, scanned for the first balanced-brace substring that decodes
//! as JSON, decoded into a generic value tree, and normalized into typed
//! plan records. Known-fragile numeric fields (ingredient and meal calorie
//! counts) are coerced defensively, and individual malformed meal entries
//! are logged and dropped rather than failing the whole plan.
//!
//! ## Architecture
//!
//! - **LLM**: provider abstraction and the Gemini implementation
//! - **Plan**: JSON locator and plan normalizer (the parsing core)
//! - **Models**: typed nutrition plan records
//! - **Services**: the end-to-end `generate_nutrition_plan` composition
//!
//! ## Example
//!
//! ```rust,no_run
//! use nutriplan::config::LlmSettings;
//! use nutriplan::llm::GeminiProvider;
//! use nutriplan::models::ProfileData;
//! use nutriplan::services::generate_nutrition_plan;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nutriplan::errors::AppError> {
//!     let provider = GeminiProvider::from_env()?;
//!     let settings = LlmSettings::from_env()?;
//!     let profile = ProfileData::default();
//!     let plan = generate_nutrition_plan(&provider, &settings, &profile).await?;
//!     println!("{} breakfast options", plan.meal_plan.breakfast.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod models;
pub mod plan;
pub mod services;
