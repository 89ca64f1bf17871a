// ABOUTME: Unified error handling for the nutriplan service core
// ABOUTME: Defines error codes, HTTP status mapping, and the response envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Unified Error Handling
//!
//! All failures in the plan-extraction pipeline surface as a single
//! [`AppError`] carrying an [`ErrorCode`], so a hosting request handler can
//! convert any core failure into one uniform status + message report without
//! leaking partial state.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The model collaborator returned no text at all
    #[serde(rename = "UPSTREAM_EMPTY")]
    UpstreamEmpty,
    /// No balanced, parseable JSON object was located in the model output
    #[serde(rename = "JSON_NOT_FOUND")]
    JsonNotFound,
    /// A located JSON span failed structural decoding downstream
    #[serde(rename = "DECODE_FAILED")]
    DecodeFailed,
    /// Required top-level plan structure missing or malformed
    #[serde(rename = "SCHEMA_INVALID")]
    SchemaInvalid,
    /// An external service (the model API) encountered an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// External service rate limit or quota exceeded
    #[serde(rename = "EXTERNAL_RATE_LIMITED")]
    ExternalRateLimited,
    /// Configuration error encountered
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// An internal error occurred
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            // 502 Bad Gateway - the upstream model produced unusable output
            Self::UpstreamEmpty
            | Self::JsonNotFound
            | Self::DecodeFailed
            | Self::SchemaInvalid
            | Self::ExternalServiceError => 502,

            // 503 Service Unavailable
            Self::ExternalRateLimited => 503,

            // 500 Internal Server Error
            Self::ConfigError | Self::InternalError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::UpstreamEmpty => "The model returned an empty response",
            Self::JsonNotFound => "No JSON object found in the model response",
            Self::DecodeFailed => "The model response could not be decoded as JSON",
            Self::SchemaInvalid => "The nutrition plan structure is missing or malformed",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalRateLimited => "External service rate limit exceeded",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload within an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
            },
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// The model collaborator returned no text
    #[must_use]
    pub fn upstream_empty() -> Self {
        Self::new(ErrorCode::UpstreamEmpty, "No response from the model API")
    }

    /// No parseable JSON object located in the model output
    pub fn json_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::JsonNotFound, message)
    }

    /// A located JSON span failed to decode
    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DecodeFailed, message)
    }

    /// Required plan structure missing or malformed
    pub fn schema_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SchemaInvalid, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }
}

/// Conversion from `anyhow::Error` at the outermost call boundary
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::UpstreamEmpty.http_status(), 502);
        assert_eq!(ErrorCode::JsonNotFound.http_status(), 502);
        assert_eq!(ErrorCode::SchemaInvalid.http_status(), 502);
        assert_eq!(ErrorCode::ExternalRateLimited.http_status(), 503);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
        assert_eq!(ErrorCode::ConfigError.http_status(), 500);
    }

    #[test]
    fn test_app_error_display() {
        let error = AppError::schema_invalid("meal_plan key is missing");
        let rendered = error.to_string();
        assert!(rendered.contains("missing or malformed"));
        assert!(rendered.contains("meal_plan key is missing"));
    }

    #[test]
    fn test_error_response_serialization() {
        let error = AppError::json_not_found("no candidate decoded");
        let response = ErrorResponse::from(error);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("JSON_NOT_FOUND"));
        assert!(json.contains("no candidate decoded"));
    }

    #[test]
    fn test_error_chaining_preserves_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        let error = AppError::external_service("gemini", "request failed").with_source(io_error);

        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
    }
}
