// ABOUTME: Generation request and persistence payload shapes with request-scoped ingredient filters
// ABOUTME: Include/exclude sets, excluded groups, and the draft/published submission record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Generation Request Shapes
//!
//! Everything the caller assembles around a generation call. Ingredient
//! preferences are request-scoped [`IngredientFilters`] passed in explicitly
//! rather than ambient state shared across UI handlers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlanConfiguration;
use crate::errors::PlanError;
use crate::models::plan::NormalizedPlan;
use crate::models::targets::NutritionalTargets;

/// An ingredient reference as returned by the ingredient search collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientRef {
    /// Upstream ingredient id
    pub id: i64,
    /// Display name
    #[serde(rename = "text")]
    pub name: String,
    /// Food group code, e.g. `GRUPO5_CARNES`
    #[serde(rename = "grupo", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Request-scoped ingredient preferences for one generation call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngredientFilters {
    /// Ingredients the plan must favor
    #[serde(rename = "incluir")]
    pub include: Vec<IngredientRef>,
    /// Ingredients the plan must avoid
    #[serde(rename = "excluir")]
    pub exclude: Vec<IngredientRef>,
    /// Whole food groups removed from selection
    #[serde(rename = "grupos_excluidos")]
    pub excluded_groups: Vec<String>,
}

impl IngredientFilters {
    /// Empty filter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the include list; returns `false` when the id is already there
    pub fn add_include(&mut self, ingredient: IngredientRef) -> bool {
        Self::add_to(&mut self.include, ingredient)
    }

    /// Add to the exclude list; returns `false` when the id is already there
    pub fn add_exclude(&mut self, ingredient: IngredientRef) -> bool {
        Self::add_to(&mut self.exclude, ingredient)
    }

    fn add_to(list: &mut Vec<IngredientRef>, ingredient: IngredientRef) -> bool {
        if list.iter().any(|item| item.id == ingredient.id) {
            return false;
        }
        list.push(ingredient);
        true
    }

    /// Remove from the include list, returning the removed entry
    pub fn remove_include(&mut self, id: i64) -> Option<IngredientRef> {
        Self::remove_from(&mut self.include, id)
    }

    /// Remove from the exclude list, returning the removed entry
    pub fn remove_exclude(&mut self, id: i64) -> Option<IngredientRef> {
        Self::remove_from(&mut self.exclude, id)
    }

    fn remove_from(list: &mut Vec<IngredientRef>, id: i64) -> Option<IngredientRef> {
        let position = list.iter().position(|item| item.id == id)?;
        Some(list.remove(position))
    }

    /// Whether an ingredient of `group` may still be offered to the user
    #[must_use]
    pub fn allows_group(&self, group: Option<&str>) -> bool {
        let group = group.unwrap_or("");
        !self.excluded_groups.iter().any(|excluded| excluded == group)
    }

    /// Replace the excluded groups, purging members of the newly excluded
    /// groups from both ingredient lists. Returns how many entries were
    /// purged.
    pub fn set_excluded_groups(&mut self, groups: Vec<String>) -> usize {
        let mut removed = 0;
        for list in [&mut self.include, &mut self.exclude] {
            list.retain(|item| {
                let banned = item
                    .group
                    .as_deref()
                    .is_some_and(|g| groups.iter().any(|excluded| excluded == g));
                if banned {
                    debug!(ingredient = %item.name, group = ?item.group, "purging ingredient from excluded group");
                    removed += 1;
                }
                !banned
            });
        }
        self.excluded_groups = groups;
        removed
    }
}

/// The system-proposed energy/macro baseline, echoed back to the engine so
/// it can report how far any later adjustment drifted from it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaselineConfiguration {
    /// Proposed daily energy target (kcal)
    #[serde(rename = "kcal_objetivo")]
    pub target_calories: u32,
    /// Proposed carbohydrate share (%)
    pub cho_pct: u8,
    /// Proposed protein share (%)
    pub pro_pct: u8,
    /// Proposed fat share (%)
    pub fat_pct: u8,
}

impl From<&NutritionalTargets> for BaselineConfiguration {
    fn from(targets: &NutritionalTargets) -> Self {
        Self {
            target_calories: targets.calories_kcal,
            cho_pct: targets.cho_pct,
            pro_pct: targets.pro_pct,
            fat_pct: targets.fat_pct,
        }
    }
}

/// The full payload handed to the recommendation collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Patient the plan is generated for
    #[serde(rename = "paciente_id")]
    pub patient_id: i64,
    /// Validated plan configuration
    #[serde(rename = "configuracion")]
    pub configuration: PlanConfiguration,
    /// System proposal before any manual or model adjustment
    #[serde(
        rename = "configuracion_original",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub base_configuration: Option<BaselineConfiguration>,
    /// Request-scoped ingredient preferences
    #[serde(rename = "ingredientes")]
    pub ingredients: IngredientFilters,
}

impl GenerationRequest {
    /// Assemble a request, validating configuration completeness first.
    ///
    /// # Errors
    ///
    /// `PlanError::IncompleteConfiguration` when a required field is empty;
    /// submission stays blocked until the form is corrected.
    pub fn build(
        patient_id: i64,
        configuration: PlanConfiguration,
        base_configuration: Option<BaselineConfiguration>,
        ingredients: IngredientFilters,
    ) -> Result<Self, PlanError> {
        configuration.validate()?;
        Ok(Self {
            patient_id,
            configuration,
            base_configuration,
            ingredients,
        })
    }
}

/// Lifecycle state of a persisted plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanStatus {
    /// Saved but not visible to the patient
    #[serde(rename = "borrador")]
    Draft,
    /// Published to the patient
    #[serde(rename = "publicado")]
    Published,
}

/// The payload the persistence collaborator stores as-is
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSubmission {
    /// Patient the plan belongs to, when one is selected
    #[serde(rename = "paciente_id", default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    /// Draft or published
    #[serde(rename = "estado")]
    pub status: PlanStatus,
    /// The normalized plan being saved
    pub plan: NormalizedPlan,
    /// Configuration the plan was generated with
    #[serde(rename = "configuracion")]
    pub configuration: PlanConfiguration,
    /// Ingredient preferences the plan was generated with
    #[serde(rename = "ingredientes")]
    pub ingredients: IngredientFilters,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: i64, name: &str, group: &str) -> IngredientRef {
        IngredientRef {
            id,
            name: name.to_owned(),
            group: Some(group.to_owned()),
        }
    }

    #[test]
    fn test_add_rejects_duplicate_ids() {
        let mut filters = IngredientFilters::new();
        assert!(filters.add_include(ingredient(1, "Avena", "GRUPO1_CEREALES")));
        assert!(!filters.add_include(ingredient(1, "Avena", "GRUPO1_CEREALES")));
        assert_eq!(filters.include.len(), 1);
        // The same id may sit on the exclude side; the lists are independent.
        assert!(filters.add_exclude(ingredient(1, "Avena", "GRUPO1_CEREALES")));
    }

    #[test]
    fn test_remove_returns_entry() {
        let mut filters = IngredientFilters::new();
        filters.add_include(ingredient(7, "Salmón", "GRUPO5_CARNES"));
        let removed = filters.remove_include(7);
        assert_eq!(removed.map(|i| i.name), Some("Salmón".to_owned()));
        assert!(filters.remove_include(7).is_none());
    }

    #[test]
    fn test_excluding_group_purges_both_lists() {
        let mut filters = IngredientFilters::new();
        filters.add_include(ingredient(1, "Avena", "GRUPO1_CEREALES"));
        filters.add_include(ingredient(2, "Leche", "GRUPO4_LACTEOS"));
        filters.add_exclude(ingredient(3, "Yogurt", "GRUPO4_LACTEOS"));
        let removed = filters.set_excluded_groups(vec!["GRUPO4_LACTEOS".to_owned()]);
        assert_eq!(removed, 2);
        assert_eq!(filters.include.len(), 1);
        assert!(filters.exclude.is_empty());
        assert!(!filters.allows_group(Some("GRUPO4_LACTEOS")));
        assert!(filters.allows_group(Some("GRUPO1_CEREALES")));
        assert!(filters.allows_group(None));
    }

    #[test]
    fn test_build_blocks_incomplete_configuration() {
        let err = GenerationRequest::build(
            12,
            PlanConfiguration::default(),
            None,
            IngredientFilters::new(),
        );
        assert_eq!(err, Err(PlanError::missing_field("Calorías objetivo")));
    }

    #[test]
    fn test_submission_wire_keys() {
        let targets = NutritionalTargets {
            calories_kcal: 2000,
            cho_pct: 50,
            pro_pct: 18,
            fat_pct: 32,
            glycemic_index_max: 70,
            max_repetitions: 2,
        };
        let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let submission = PlanSubmission {
            patient_id: Some(42),
            status: PlanStatus::Draft,
            plan: NormalizedPlan {
                total_days: 0,
                weeks: Vec::new(),
            },
            configuration: PlanConfiguration::from_targets(&targets, start, end),
            ingredients: IngredientFilters::new(),
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["paciente_id"], 42);
        assert_eq!(value["estado"], "borrador");
        assert_eq!(value["configuracion"]["kcal_objetivo"], 2000);
        assert!(value["ingredientes"]["incluir"].as_array().unwrap().is_empty());
    }
}
