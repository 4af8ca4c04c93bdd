// ABOUTME: User-editable plan configuration with completeness validation
// ABOUTME: Date range helpers and the comma-joined meal pattern the form collects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Plan Configuration
//!
//! The record the configuration form collects before a generation request is
//! issued. [`PlanConfiguration::validate`] checks completeness only - field
//! ranges and cross-field consistency (the macro percentages summing to 100,
//! for instance) are intentionally not enforced here.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::PlanError;
use crate::models::plan::MealSlot;
use crate::models::targets::NutritionalTargets;

/// Inclusive day count covered by a date range (`end − start + 1`).
///
/// `None` when either bound is missing or the range is inverted, matching
/// the form clearing its day field until both dates are coherent.
#[must_use]
pub fn plan_days_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<u32> {
    let (start, end) = (start?, end?);
    let days = (end - start).num_days() + 1;
    u32::try_from(days).ok().filter(|d| *d > 0)
}

/// The set of meal slots selected for generation.
///
/// Round-trips the comma-joined short-key string the form submits
/// (`"des,alm,cena"`); unknown tokens are ignored on parse. Defaults to
/// breakfast, lunch, and dinner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct MealPattern {
    slots: BTreeSet<MealSlot>,
}

impl MealPattern {
    /// Pattern containing every slot
    #[must_use]
    pub fn full() -> Self {
        Self {
            slots: MealSlot::ALL.into_iter().collect(),
        }
    }

    /// Whether `slot` is selected
    #[must_use]
    pub fn contains(&self, slot: MealSlot) -> bool {
        self.slots.contains(&slot)
    }

    /// Select a slot; returns whether it was newly added
    pub fn insert(&mut self, slot: MealSlot) -> bool {
        self.slots.insert(slot)
    }

    /// Deselect a slot; returns whether it was present
    pub fn remove(&mut self, slot: MealSlot) -> bool {
        self.slots.remove(&slot)
    }

    /// Whether no slot is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Selected slots in chronological order
    pub fn iter(&self) -> impl Iterator<Item = MealSlot> + '_ {
        self.slots.iter().copied()
    }
}

impl Default for MealPattern {
    fn default() -> Self {
        Self {
            slots: [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner]
                .into_iter()
                .collect(),
        }
    }
}

impl fmt::Display for MealPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.slots.iter().map(|slot| slot.short_key()).collect();
        write!(f, "{}", keys.join(","))
    }
}

impl From<&str> for MealPattern {
    fn from(value: &str) -> Self {
        let slots = value
            .split(',')
            .filter_map(|token| {
                let token = token.trim();
                MealSlot::ALL
                    .into_iter()
                    .find(|slot| slot.short_key() == token)
            })
            .collect();
        Self { slots }
    }
}

impl From<String> for MealPattern {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<MealPattern> for String {
    fn from(pattern: MealPattern) -> Self {
        pattern.to_string()
    }
}

/// User-editable configuration collected by the form before generation.
///
/// Every numeric field stays `None` until the form is filled, either by hand
/// or by seeding from a derived [`NutritionalTargets`] record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanConfiguration {
    /// First plan day
    #[serde(rename = "fecha_inicio", default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last plan day (inclusive)
    #[serde(rename = "fecha_fin", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Day count covered by the range
    #[serde(rename = "dias_plan", default, skip_serializing_if = "Option::is_none")]
    pub plan_days: Option<u32>,
    /// Daily energy target (kcal)
    #[serde(rename = "kcal_objetivo", default, skip_serializing_if = "Option::is_none")]
    pub target_calories: Option<u32>,
    /// Carbohydrate share of daily energy (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cho_pct: Option<u8>,
    /// Protein share of daily energy (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro_pct: Option<u8>,
    /// Fat share of daily energy (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_pct: Option<u8>,
    /// Maximum permitted glycemic index
    #[serde(rename = "ig_max", default, skip_serializing_if = "Option::is_none")]
    pub glycemic_index_max: Option<u8>,
    /// Maximum times one food may repeat
    #[serde(rename = "max_repeticiones", default, skip_serializing_if = "Option::is_none")]
    pub max_repetitions: Option<u8>,
    /// Meal slots selected for generation
    #[serde(rename = "patron_comidas", default)]
    pub meal_pattern: MealPattern,
}

impl PlanConfiguration {
    /// Seed a configuration from derived targets and a date range, the way
    /// the "recommend" action fills the form.
    #[must_use]
    pub fn from_targets(
        targets: &NutritionalTargets,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            plan_days: plan_days_between(Some(start_date), Some(end_date)),
            target_calories: Some(targets.calories_kcal),
            cho_pct: Some(targets.cho_pct),
            pro_pct: Some(targets.pro_pct),
            fat_pct: Some(targets.fat_pct),
            glycemic_index_max: Some(targets.glycemic_index_max),
            max_repetitions: Some(targets.max_repetitions),
            meal_pattern: MealPattern::default(),
        }
    }

    /// Check completeness before a generation request is issued.
    ///
    /// Fields are checked in form order; the first missing one is reported
    /// by its human label. Numeric ranges and cross-field consistency are
    /// not checked.
    ///
    /// # Errors
    ///
    /// `PlanError::IncompleteConfiguration` naming the first empty field.
    pub fn validate(&self) -> Result<(), PlanError> {
        let checks: [(bool, &'static str); 8] = [
            (self.target_calories.is_none(), "Calorías objetivo"),
            (self.cho_pct.is_none(), "Carbohidratos (%)"),
            (self.pro_pct.is_none(), "Proteínas (%)"),
            (self.fat_pct.is_none(), "Grasas (%)"),
            (self.glycemic_index_max.is_none(), "Índice Glucémico máximo"),
            (self.max_repetitions.is_none(), "Repeticiones máximas"),
            (self.start_date.is_none(), "Fecha de inicio"),
            (self.end_date.is_none(), "Fecha de fin"),
        ];
        for (missing, label) in checks {
            if missing {
                return Err(PlanError::missing_field(label));
            }
        }
        Ok(())
    }

    /// Whether every required field is filled
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn complete_config() -> PlanConfiguration {
        let targets = NutritionalTargets {
            calories_kcal: 2000,
            cho_pct: 50,
            pro_pct: 18,
            fat_pct: 32,
            glycemic_index_max: 70,
            max_repetitions: 2,
        };
        PlanConfiguration::from_targets(&targets, date(2025, 1, 1), date(2025, 1, 7))
    }

    #[test]
    fn test_plan_days_inclusive() {
        assert_eq!(
            plan_days_between(Some(date(2025, 1, 1)), Some(date(2025, 1, 7))),
            Some(7)
        );
        assert_eq!(
            plan_days_between(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))),
            Some(1)
        );
    }

    #[test]
    fn test_plan_days_rejects_inverted_range() {
        assert_eq!(
            plan_days_between(Some(date(2025, 1, 7)), Some(date(2025, 1, 1))),
            None
        );
        assert_eq!(plan_days_between(None, Some(date(2025, 1, 1))), None);
    }

    #[test]
    fn test_meal_pattern_round_trip() {
        let pattern = MealPattern::default();
        assert_eq!(pattern.to_string(), "des,alm,cena");
        assert_eq!(MealPattern::from("des,alm,cena"), pattern);
        assert!(pattern.contains(MealSlot::Lunch));
        assert!(!pattern.contains(MealSlot::MidMorning));
    }

    #[test]
    fn test_meal_pattern_ignores_unknown_tokens() {
        let pattern = MealPattern::from("des,merienda,cena");
        assert_eq!(pattern.to_string(), "des,cena");
        assert!(MealPattern::from("").is_empty());
    }

    #[test]
    fn test_validate_complete_configuration() {
        assert!(complete_config().validate().is_ok());
    }

    #[test]
    fn test_validate_names_first_missing_field() {
        let mut config = complete_config();
        config.fat_pct = None;
        assert_eq!(
            config.validate(),
            Err(PlanError::missing_field("Grasas (%)"))
        );
        // Calories are checked before dates: with both missing, the
        // calories label wins.
        config.target_calories = None;
        config.start_date = None;
        assert_eq!(
            config.validate(),
            Err(PlanError::missing_field("Calorías objetivo"))
        );
    }

    #[test]
    fn test_from_targets_fills_plan_days() {
        let config = complete_config();
        assert_eq!(config.plan_days, Some(7));
        assert_eq!(config.target_calories, Some(2000));
        assert!(config.is_complete());
    }

    #[test]
    fn test_wire_keys() {
        let config = complete_config();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["fecha_inicio"], "2025-01-01");
        assert_eq!(value["kcal_objetivo"], 2000);
        assert_eq!(value["ig_max"], 70);
        assert_eq!(value["patron_comidas"], "des,alm,cena");
    }
}
