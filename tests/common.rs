// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides quiet logging setup, a scripted mock LLM provider, and a collecting sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Shared test utilities for `nutriplan`
//!
//! Provides common setup to reduce duplication across integration tests.

use async_trait::async_trait;
use std::sync::{Mutex, Once};

use nutriplan::errors::AppError;
use nutriplan::llm::{ChatRequest, ChatResponse, LlmProvider};
use nutriplan::plan::DiagnosticSink;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Scripted LLM provider returning a fixed response
pub struct MockLlmProvider {
    response: String,
}

impl MockLlmProvider {
    /// Create a provider that always answers with `response`
    pub fn with_response(response: impl Into<String>) -> Self {
        init_test_logging();
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn display_name(&self) -> &'static str {
        "Mock Provider"
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Ok(ChatResponse {
            content: self.response.clone(),
            model: "mock-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Diagnostic sink that collects recorded messages for assertions
#[derive(Debug, Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for CollectingSink {
    fn record(&self, message: &str) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message.to_owned());
        }
    }
}
