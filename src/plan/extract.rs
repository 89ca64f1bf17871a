// ABOUTME: Locates the first valid JSON object inside free-form model output
// ABOUTME: Strips markdown fences, then runs a balanced-brace scan with decode-on-close
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # JSON Locator
//!
//! Language models do not reliably emit clean JSON: the object the prompt
//! asks for may be wrapped in markdown fences, preceded by prose, or sit
//! next to stray braces. This module scans the raw text for the first
//! top-level balanced-brace substring that actually decodes as JSON.
//!
//! Regex cannot match nested braces, so the scan is an explicit depth
//! counter over the character sequence. Candidates are tried in the order
//! their closing braces appear; the first one that decodes wins.

use regex::Regex;
use std::sync::LazyLock;

use crate::errors::AppError;

/// Markdown fence markers removed before scanning
///
/// The `json`-tagged variant must come first in the alternation so that
/// ```` ```json ```` is consumed whole rather than leaving `json` behind.
/// Stored as Option to handle compilation failures gracefully (should never
/// fail for a static pattern).
static FENCE_MARKERS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("(?i)```json|```").ok());

/// Trim leading/trailing markdown fence markers and whitespace
///
/// A pre-cleaning pass for the common case where the model wraps its whole
/// answer in a single fenced block. [`extract_first_json`] removes interior
/// markers itself, so calling this first is optional.
#[must_use]
pub fn clean_response_text(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Extract the first valid JSON object from free-form text
///
/// Removes all markdown fence markers (case-insensitive), then scans the
/// remaining text with a brace depth counter. A `{` at depth zero records a
/// candidate start; when its matching `}` brings the depth back to zero the
/// span is decoded, and the first span that decodes successfully is
/// returned. Stray `}` characters at depth zero are ignored.
///
/// The returned string is guaranteed to re-parse as JSON.
///
/// # Errors
///
/// Returns [`crate::errors::ErrorCode::JsonNotFound`] if no balanced,
/// decodable JSON object exists in `text`.
pub fn extract_first_json(text: &str) -> Result<String, AppError> {
    let cleaned = FENCE_MARKERS
        .as_ref()
        .map_or_else(|| text.into(), |re| re.replace_all(text, ""));
    let cleaned = cleaned.trim();

    let mut depth: usize = 0;
    let mut start = None;

    for (index, character) in cleaned.char_indices() {
        match character {
            '{' => {
                if depth == 0 {
                    start = Some(index);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        if let Some(candidate_start) = start {
                            let candidate = &cleaned[candidate_start..=index];
                            if serde_json::from_str::<serde_json::Value>(candidate).is_ok() {
                                return Ok(candidate.to_owned());
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Err(AppError::json_not_found(
        "No JSON object found in response",
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_text_strips_fences() {
        assert_eq!(clean_response_text("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(clean_response_text("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(clean_response_text("```\n{}\n```"), "{}");
    }

    #[test]
    fn test_extracts_bare_object() {
        let extracted = extract_first_json(r#"{"low": 1, "high": 2}"#).unwrap();
        assert_eq!(extracted, r#"{"low": 1, "high": 2}"#);
    }

    #[test]
    fn test_ignores_stray_closing_braces() {
        let extracted = extract_first_json(r#"}} noise {"ok": true} tail"#).unwrap();
        assert_eq!(extracted, r#"{"ok": true}"#);
    }

    #[test]
    fn test_fence_only_input_fails() {
        let error = extract_first_json("```json\n```").unwrap_err();
        assert_eq!(error.code, crate::errors::ErrorCode::JsonNotFound);
    }
}
