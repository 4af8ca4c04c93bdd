// ABOUTME: Unified error type for plan normalization, scheduling, and configuration checks
// ABOUTME: Carries the user-facing Spanish form messages surfaced by the display layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Error Types
//!
//! A single `PlanError` covers the failure taxonomy of the planning core:
//!
//! - `MalformedPayload` - the recommendation payload holds no recognizable
//!   day or meal container. Fatal to the generation flow; surfaced to the
//!   caller, never retried.
//! - `Engine` - the upstream engine reported a failure inside its payload.
//! - `WeekOutOfRange` - a week index outside the plan's page range. A
//!   programming/UI error treated as a defensive assertion.
//! - `IncompleteConfiguration` - a required form field is empty. Fully
//!   recoverable by the user; its message names the field.
//!
//! Target derivation never errors: missing biometric inputs fall back to
//! documented defaults so a recommendation is always produced.

use thiserror::Error;

/// Errors raised by the planning core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Neither a day-keyed container nor a flat meal container was found
    #[error("No se encontró plan_semanal ni comidas en la respuesta del motor")]
    MalformedPayload,

    /// The recommendation engine reported a failure inside its payload
    #[error("Error del motor: {message}")]
    Engine {
        /// Failure text forwarded verbatim from the engine payload
        message: String,
    },

    /// Requested week index is outside `[1, total_weeks]`
    #[error("semana {requested} fuera de rango (1..={total_weeks})")]
    WeekOutOfRange {
        /// The week index that was requested
        requested: usize,
        /// Number of week pages the plan actually holds
        total_weeks: usize,
    },

    /// A required configuration field is empty; `field` is its form label
    #[error("El campo \"{field}\" es requerido")]
    IncompleteConfiguration {
        /// Human label of the first missing field
        field: &'static str,
    },
}

impl PlanError {
    /// Create an engine-failure error from the payload's `error` field
    #[must_use]
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Create a week-out-of-range error
    #[must_use]
    pub const fn week_out_of_range(requested: usize, total_weeks: usize) -> Self {
        Self::WeekOutOfRange {
            requested,
            total_weeks,
        }
    }

    /// Create an incomplete-configuration error naming the missing field
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::IncompleteConfiguration { field }
    }

    /// Whether the error is recoverable by editing the form
    #[must_use]
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::IncompleteConfiguration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_configuration_message_names_field() {
        let err = PlanError::missing_field("Grasas (%)");
        assert_eq!(err.to_string(), "El campo \"Grasas (%)\" es requerido");
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_week_out_of_range_is_not_user_correctable() {
        let err = PlanError::week_out_of_range(4, 2);
        assert!(!err.is_user_correctable());
        assert_eq!(err.to_string(), "semana 4 fuera de rango (1..=2)");
    }
}
