// ABOUTME: Derived nutritional target record handed to the configuration form
// ABOUTME: Energy, macronutrient split, glycemic ceiling, and repetition cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

use serde::{Deserialize, Serialize};

/// Kilocalories per gram of carbohydrate or protein
const KCAL_PER_GRAM_CHO_PRO: f64 = 4.0;
/// Kilocalories per gram of fat
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Patient-specific nutritional targets derived from a [`crate::models::PatientProfile`].
///
/// All fields derive deterministically from the profile and a fixed rule
/// table: identical inputs always yield identical outputs. The three
/// macronutrient percentages are not normalized to sum to exactly 100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NutritionalTargets {
    /// Daily energy target in kilocalories
    #[serde(rename = "kcal_objetivo")]
    pub calories_kcal: u32,
    /// Carbohydrate share of daily energy (0-100)
    pub cho_pct: u8,
    /// Protein share of daily energy (0-100)
    pub pro_pct: u8,
    /// Fat share of daily energy (0-100)
    pub fat_pct: u8,
    /// Maximum permitted glycemic index for selectable foods
    #[serde(rename = "ig_max")]
    pub glycemic_index_max: u8,
    /// Maximum times one food may repeat across the plan (1-4)
    #[serde(rename = "max_repeticiones")]
    pub max_repetitions: u8,
}

impl NutritionalTargets {
    /// Gram equivalents of the macronutrient split at the energy target,
    /// using 4 kcal/g for carbohydrate and protein and 9 kcal/g for fat.
    #[must_use]
    pub fn macro_grams(&self) -> MacroGrams {
        let kcal = f64::from(self.calories_kcal);
        let grams = |pct: u8, kcal_per_gram: f64| {
            (kcal * f64::from(pct) / 100.0 / kcal_per_gram).round() as u32
        };
        MacroGrams {
            cho_g: grams(self.cho_pct, KCAL_PER_GRAM_CHO_PRO),
            pro_g: grams(self.pro_pct, KCAL_PER_GRAM_CHO_PRO),
            fat_g: grams(self.fat_pct, KCAL_PER_GRAM_FAT),
        }
    }
}

/// Macronutrient targets expressed in grams per day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MacroGrams {
    /// Carbohydrate grams per day
    pub cho_g: u32,
    /// Protein grams per day
    pub pro_g: u32,
    /// Fat grams per day
    pub fat_g: u32,
}
