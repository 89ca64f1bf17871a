// ABOUTME: End-to-end nutrition plan generation from a user profile
// ABOUTME: Calls the model collaborator, then extracts and normalizes the plan JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Nutrition Plan Service
//!
//! Composes the pipeline: profile → prompt → model completion → fence strip
//! → JSON locate → decode → normalize. All failures surface as a single
//! [`AppError`] so a hosting request handler reports one uniform
//! status + message; nothing is retried here (retry policy, if any, belongs
//! to the caller wrapping the model invocation).

use serde_json::Value;
use tracing::{debug, error};

use crate::config::LlmSettings;
use crate::errors::AppError;
use crate::llm::{get_nutrition_plan_prompt, ChatMessage, ChatRequest, LlmProvider};
use crate::models::{NutritionPlan, ProfileData};
use crate::plan::{
    clean_response_text, extract_first_json, normalize_plan, DiagnosticSink, TracingSink,
};

/// Generate a daily nutrition plan for a user profile
///
/// The profile is serialized verbatim into the user message; its attributes
/// are never interpreted by this core.
///
/// # Errors
///
/// Returns an error if the model call fails, the model returns no text
/// (`UpstreamEmpty`), no JSON object can be located (`JsonNotFound`), the
/// located JSON fails to decode (`DecodeFailed`), or required plan structure
/// is missing (`SchemaInvalid`).
pub async fn generate_nutrition_plan(
    provider: &dyn LlmProvider,
    settings: &LlmSettings,
    profile: &ProfileData,
) -> Result<NutritionPlan, AppError> {
    let profile_json = serde_json::to_string(profile)
        .map_err(|e| AppError::internal(format!("Failed to serialize profile: {e}")))?;

    let messages = vec![
        ChatMessage::system(get_nutrition_plan_prompt()),
        ChatMessage::user(format!(
            "Create a daily nutrition plan for this profile:\n{profile_json}\n\n\
            Return the plan as a single JSON object."
        )),
    ];

    let mut request = ChatRequest::new(messages).with_temperature(settings.temperature);
    if let Some(model) = &settings.model {
        request = request.with_model(model.clone());
    }
    if let Some(max_tokens) = settings.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }

    debug!(provider = provider.name(), "Requesting nutrition plan");

    let response = provider.complete(&request).await?;

    plan_from_response_text(&response.content, &TracingSink)
}

/// Build a typed plan from raw model output text
///
/// The pure tail of the pipeline: fence strip, JSON locate, decode,
/// normalize. Running it twice on the same text yields identical output.
///
/// # Errors
///
/// Returns `UpstreamEmpty` for blank text, `JsonNotFound` when no decodable
/// object exists, `DecodeFailed` if the located span fails a downstream
/// decode, and `SchemaInvalid` for missing or malformed plan structure.
pub fn plan_from_response_text(
    text: &str,
    sink: &dyn DiagnosticSink,
) -> Result<NutritionPlan, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::upstream_empty());
    }

    let cleaned = clean_response_text(text);

    let json_text = extract_first_json(cleaned).map_err(|e| {
        error!(cleaned_text = %cleaned, "No nutrition plan JSON found in model output");
        e
    })?;

    // The locator already verified this span decodes; a failure here means
    // the downstream decode disagrees with the candidate check
    let decoded: Value = serde_json::from_str(&json_text).map_err(|e| {
        error!(error = %e, "Located JSON span failed to decode");
        AppError::decode_failed(format!("JSON decode error: {e}"))
    })?;

    normalize_plan(&decoded, sink)
}
