// ABOUTME: Core types for the NutriPlan nutritional planning platform
// ABOUTME: Foundation crate with domain models, error handling, configuration, and schedule paging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

#![deny(unsafe_code)]

//! # NutriPlan Core
//!
//! Foundation crate providing shared types for the NutriPlan nutritional
//! planning platform. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `PlanError`
//! - **models**: Domain models (patient profile, nutritional targets, weekly plan)
//! - **config**: User-editable plan configuration and completeness validation
//! - **generation**: Generation request and persistence payload shapes
//! - **schedule**: Weekly schedule grid and week navigation

/// Unified error handling for plan generation, normalization, and navigation
pub mod errors;

/// Core data models (`PatientProfile`, `NutritionalTargets`, `NormalizedPlan`)
pub mod models;

/// User-editable plan configuration with completeness validation
pub mod config;

/// Generation request shapes and request-scoped ingredient filters
pub mod generation;

/// Weekly schedule grid and clamped week navigation
pub mod schedule;
