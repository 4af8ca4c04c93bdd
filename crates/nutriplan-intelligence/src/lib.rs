// ABOUTME: Nutrition derivation engine for the NutriPlan platform
// ABOUTME: Rule-based target calculation and recommendation payload normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

#![deny(unsafe_code)]

//! # NutriPlan Intelligence
//!
//! Derivation layer on top of `nutriplan-core`:
//!
//! - **targets**: derives energy and macronutrient targets, the glycemic
//!   index ceiling, and the meal repetition cap from a patient profile
//! - **recommendation**: normalizes the recommendation engine's
//!   heterogeneously-shaped plan payloads into the canonical weekly plan

/// Rule-based derivation of nutritional targets from a patient profile
pub mod targets;

/// Normalization of recommendation engine payloads into canonical plans
pub mod recommendation;

pub use recommendation::{normalize_plan, DEFAULT_PLAN_DAYS};
pub use targets::{compute_targets, compute_targets_on};
