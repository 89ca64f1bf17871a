// ABOUTME: Service layer composing the LLM collaborator with the parsing core
// ABOUTME: Hosts the end-to-end nutrition plan generation flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! # Services
//!
//! The outermost composition boundary: everything below this layer is a pure
//! function or an external collaborator behind a trait.

mod nutrition;

pub use nutrition::{generate_nutrition_plan, plan_from_response_text};
