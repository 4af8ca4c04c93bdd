// ABOUTME: Domain model module for patient, target, and weekly plan types
// ABOUTME: Re-exports the types shared between configuration, derivation, and scheduling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! Core data models shared across the planning pipeline.

/// Patient biometric and clinical snapshot
pub mod patient;

/// Weekly plan structure produced by normalization
pub mod plan;

/// Derived nutritional targets
pub mod targets;

pub use patient::{ActivityLevel, PatientProfile, Sex};
pub use plan::{Day, Food, Meal, MealSlot, NormalizedPlan, Week, DAYS_PER_WEEK};
pub use targets::{MacroGrams, NutritionalTargets};
