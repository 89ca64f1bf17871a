// ABOUTME: Environment-driven configuration for the LLM collaborator
// ABOUTME: Resolves model selection and generation knobs from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # LLM Settings
//!
//! Environment-only configuration for the model-generation collaborator.
//! The API key itself is resolved by the provider
//! (see [`crate::llm::GeminiProvider::from_env`]); this module covers the
//! request-shaping knobs.

use std::env;

use crate::errors::AppError;

/// Environment variable overriding the provider's default model
pub const LLM_MODEL_ENV: &str = "NUTRIPLAN_LLM_MODEL";

/// Environment variable for the sampling temperature
pub const LLM_TEMPERATURE_ENV: &str = "NUTRIPLAN_LLM_TEMPERATURE";

/// Environment variable for the generation token cap
pub const LLM_MAX_TOKENS_ENV: &str = "NUTRIPLAN_LLM_MAX_TOKENS";

/// Low temperature keeps the plan JSON structurally consistent across calls
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Request-shaping settings for plan generation
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// Model identifier; `None` uses the provider's default
    pub model: Option<String>,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum tokens to generate; `None` uses the provider's default
    pub max_tokens: Option<u32>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}

impl LlmSettings {
    /// Create settings from environment variables
    ///
    /// Unset variables fall back to defaults; set-but-unparseable numeric
    /// values are configuration errors rather than silent fallbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if `NUTRIPLAN_LLM_TEMPERATURE` or
    /// `NUTRIPLAN_LLM_MAX_TOKENS` is set but not a valid number.
    pub fn from_env() -> Result<Self, AppError> {
        let model = env::var(LLM_MODEL_ENV).ok().filter(|m| !m.is_empty());

        let temperature = match env::var(LLM_TEMPERATURE_ENV) {
            Ok(raw) => raw.parse::<f32>().map_err(|e| {
                AppError::config(format!("{LLM_TEMPERATURE_ENV} is not a valid number: {e}"))
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let max_tokens = match env::var(LLM_MAX_TOKENS_ENV) {
            Ok(raw) => Some(raw.parse::<u32>().map_err(|e| {
                AppError::config(format!("{LLM_MAX_TOKENS_ENV} is not a valid integer: {e}"))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            model,
            temperature,
            max_tokens,
        })
    }
}
