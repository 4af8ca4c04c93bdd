// ABOUTME: Patient biometric and clinical profile consumed by target derivation
// ABOUTME: Sex, activity level, and the immutable per-calculation snapshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Age assumed when the chart carries no birth date
pub const DEFAULT_AGE: u32 = 30;

/// Biological sex as recorded in the patient chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male (`M` in the chart)
    #[serde(rename = "M")]
    Male,
    /// Female (`F` in the chart)
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Parse a chart value; anything other than `M` maps to `Female`,
    /// matching the branch the energy formula takes for unknown values.
    #[must_use]
    pub fn from_chart(value: &str) -> Self {
        if value.eq_ignore_ascii_case("m") {
            Self::Male
        } else {
            Self::Female
        }
    }
}

/// Self-reported physical activity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActivityLevel {
    /// Sedentary to light activity (`baja`)
    #[serde(rename = "baja")]
    Low,
    /// Regular moderate activity (`moderada`)
    #[serde(rename = "moderada")]
    Moderate,
    /// Intense or daily training (`alta`)
    #[serde(rename = "alta")]
    High,
}

impl ActivityLevel {
    /// Multiplier applied when the chart carries no activity level
    pub const DEFAULT_FACTOR: f64 = 1.2;

    /// Harris-Benedict activity multiplier for this level
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Low => 1.2,
            Self::Moderate => 1.375,
            Self::High => 1.55,
        }
    }

    /// Parse a chart value; unknown values yield `None` (callers fall back
    /// to [`Self::DEFAULT_FACTOR`])
    #[must_use]
    pub fn from_chart(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "baja" => Some(Self::Low),
            "moderada" => Some(Self::Moderate),
            "alta" => Some(Self::High),
            _ => None,
        }
    }
}

/// Immutable biometric/clinical snapshot supplied per calculation call.
///
/// Assembled by the patient-lookup collaborator from the anthropometry and
/// clinical records; never persisted by this core. Missing measurements stay
/// `None` and fall back to documented defaults during derivation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    /// Body weight in kilograms (`<= 0` means not measured)
    #[serde(rename = "peso")]
    pub weight_kg: f64,
    /// Height in meters (`<= 0` means not measured)
    #[serde(rename = "talla")]
    pub height_m: f64,
    /// Birth date from the chart
    #[serde(rename = "fecha_nac", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Biological sex
    #[serde(rename = "sexo")]
    pub sex: Sex,
    /// Self-reported activity level
    #[serde(rename = "actividad", default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    /// Glycated hemoglobin (%) from the latest clinical record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hba1c: Option<f64>,
    /// Fasting glucose (mg/dL) from the latest clinical record
    #[serde(rename = "glucosa_ayunas", default, skip_serializing_if = "Option::is_none")]
    pub fasting_glucose: Option<f64>,
}

impl PatientProfile {
    /// Body mass index (weight / height²), or `0.0` when height is missing
    #[must_use]
    pub fn bmi(&self) -> f64 {
        if self.height_m > 0.0 {
            self.weight_kg / (self.height_m * self.height_m)
        } else {
            0.0
        }
    }

    /// Whole years between the birth date and `today`, decremented when the
    /// birthday has not yet occurred this year. [`DEFAULT_AGE`] when the
    /// chart carries no birth date.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let Some(birth) = self.birth_date else {
            return DEFAULT_AGE;
        };
        let mut age = today.year() - birth.year();
        if (today.month(), today.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}
