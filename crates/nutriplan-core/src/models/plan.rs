// ABOUTME: Canonical weekly plan structure consumed by the display and persistence layers
// ABOUTME: Fixed meal slots, foods with scaled nutrients, days partitioned into weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Weekly Plan Model
//!
//! The canonical `{dias, semanas}` structure every recommendation payload is
//! normalized into. Field names serialize to the wire keys the rendering and
//! persistence collaborators already consume, so a serialized plan re-enters
//! the normalizer unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Days held by a full week page
pub const DAYS_PER_WEEK: usize = 7;

/// One of the five fixed daily meal slots.
///
/// Each slot owns the complete grid binding: the short and long keys the
/// upstream engine uses interchangeably, the display label, and the fixed
/// time the schedule grid is laid out on.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum MealSlot {
    /// 07:00 - desayuno
    #[serde(rename = "desayuno")]
    Breakfast,
    /// 10:00 - media mañana
    #[serde(rename = "media_manana")]
    MidMorning,
    /// 12:00 - almuerzo
    #[serde(rename = "almuerzo")]
    Lunch,
    /// 15:00 - media tarde
    #[serde(rename = "media_tarde")]
    MidAfternoon,
    /// 19:00 - cena
    #[serde(rename = "cena")]
    Dinner,
}

impl MealSlot {
    /// The five slots in chronological order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::MidMorning,
        Self::Lunch,
        Self::MidAfternoon,
        Self::Dinner,
    ];

    /// Short key used by the engine (`des`, `mm`, `alm`, `mt`, `cena`)
    #[must_use]
    pub const fn short_key(self) -> &'static str {
        match self {
            Self::Breakfast => "des",
            Self::MidMorning => "mm",
            Self::Lunch => "alm",
            Self::MidAfternoon => "mt",
            Self::Dinner => "cena",
        }
    }

    /// Long key used by the engine and the canonical plan
    #[must_use]
    pub const fn long_key(self) -> &'static str {
        match self {
            Self::Breakfast => "desayuno",
            Self::MidMorning => "media_manana",
            Self::Lunch => "almuerzo",
            Self::MidAfternoon => "media_tarde",
            Self::Dinner => "cena",
        }
    }

    /// Display label shown in the schedule grid
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "Desayuno",
            Self::MidMorning => "Media Mañana",
            Self::Lunch => "Almuerzo",
            Self::MidAfternoon => "Media Tarde",
            Self::Dinner => "Cena",
        }
    }

    /// Fixed grid time for this slot (`HH:MM`)
    #[must_use]
    pub const fn time(self) -> &'static str {
        match self {
            Self::Breakfast => "07:00",
            Self::MidMorning => "10:00",
            Self::Lunch => "12:00",
            Self::MidAfternoon => "15:00",
            Self::Dinner => "19:00",
        }
    }

    /// Slot bound to a grid time, if any
    #[must_use]
    pub fn from_time(time: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.time() == time)
    }
}

/// A single food entry within a meal.
///
/// Nutrient fields are per-portion values already scaled to the suggested
/// quantity and rounded to 2 decimals; they stay `None` when the upstream
/// ingredient record carried no figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Food {
    /// Food name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Display quantity, e.g. `"120g"` or `"1 taza"`
    #[serde(rename = "cantidad")]
    pub quantity_display: String,
    /// Numeric quantity when the display string was derived from one
    #[serde(rename = "cantidad_num", default, skip_serializing_if = "Option::is_none")]
    pub quantity_value: Option<f64>,
    /// Quantity unit (`g`, `ml`, …)
    #[serde(rename = "unidad", default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Food group code, e.g. `GRUPO1_CEREALES`
    #[serde(rename = "grupo", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Upstream ingredient id, kept to ease later lookups
    #[serde(rename = "ingrediente_id", default, skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<i64>,
    /// Energy for this portion (kcal)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kcal: Option<f64>,
    /// Carbohydrate for this portion (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cho: Option<f64>,
    /// Protein for this portion (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pro: Option<f64>,
    /// Fat for this portion (g)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    /// Fiber for this portion (g)
    #[serde(rename = "fibra", default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
}

impl Food {
    /// A bare name/quantity pair with no nutrient data
    #[must_use]
    pub fn named(name: impl Into<String>, quantity_display: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity_display: quantity_display.into(),
            quantity_value: None,
            unit: None,
            group: None,
            ingredient_id: None,
            kcal: None,
            cho: None,
            pro: None,
            fat: None,
            fiber: None,
        }
    }
}

/// A meal placed on the fixed time grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Display label (`Desayuno`, `Almuerzo`, …)
    #[serde(rename = "nombre")]
    pub label: String,
    /// Grid time (`HH:MM`), always one of the five fixed slot times
    #[serde(rename = "horario")]
    pub time: String,
    /// Ordered foods suggested for this meal
    #[serde(rename = "alimentos")]
    pub foods: Vec<Food>,
}

impl Meal {
    /// Build a meal bound to a slot's fixed label and time
    #[must_use]
    pub fn for_slot(slot: MealSlot, foods: Vec<Food>) -> Self {
        Self {
            label: slot.label().to_owned(),
            time: slot.time().to_owned(),
            foods,
        }
    }
}

/// One plan day with its meals keyed by canonical slot name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    /// 1-based day number within the plan
    #[serde(rename = "numero")]
    pub day_number: u32,
    /// Calendar date (`YYYY-MM-DD`), real or placeholder
    #[serde(rename = "fecha")]
    pub date: String,
    /// Meals present on this day, in slot order
    #[serde(rename = "comidas")]
    pub meals: BTreeMap<MealSlot, Meal>,
}

impl Day {
    /// The day's meal scheduled at `time`, first match wins on duplicates
    #[must_use]
    pub fn meal_at(&self, time: &str) -> Option<&Meal> {
        self.meals.values().find(|meal| meal.time == time)
    }
}

/// A page of at most seven consecutive plan days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Week {
    /// 1-based week number
    #[serde(rename = "numero")]
    pub index: u32,
    /// Days in this week, in plan order
    #[serde(rename = "dias")]
    pub days: Vec<Day>,
}

/// The canonical plan structure: days partitioned into week pages.
///
/// Held for the lifetime of a single generation session and replaced
/// wholesale on each new generation - never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedPlan {
    /// Total number of plan days
    #[serde(rename = "dias")]
    pub total_days: u32,
    /// Week pages, each holding at most seven days
    #[serde(rename = "semanas")]
    pub weeks: Vec<Week>,
}

impl NormalizedPlan {
    /// Number of week pages (`ceil(total_days / 7)`)
    #[must_use]
    pub fn total_weeks(&self) -> usize {
        (self.total_days as usize).div_ceil(DAYS_PER_WEEK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_grid_bindings() {
        assert_eq!(MealSlot::Breakfast.time(), "07:00");
        assert_eq!(MealSlot::MidAfternoon.short_key(), "mt");
        assert_eq!(MealSlot::MidMorning.long_key(), "media_manana");
        assert_eq!(MealSlot::Dinner.label(), "Cena");
        assert_eq!(MealSlot::from_time("12:00"), Some(MealSlot::Lunch));
        assert_eq!(MealSlot::from_time("13:00"), None);
    }

    #[test]
    fn test_meals_serialize_under_long_keys() {
        let mut meals = BTreeMap::new();
        meals.insert(
            MealSlot::Breakfast,
            Meal::for_slot(MealSlot::Breakfast, vec![Food::named("Avena", "1 taza")]),
        );
        let day = Day {
            day_number: 1,
            date: "2025-10-20".to_owned(),
            meals,
        };
        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(value["comidas"]["desayuno"]["nombre"], "Desayuno");
        assert_eq!(value["comidas"]["desayuno"]["horario"], "07:00");
        assert_eq!(
            value["comidas"]["desayuno"]["alimentos"][0]["cantidad"],
            "1 taza"
        );
    }

    #[test]
    fn test_meal_lookup_by_time() {
        let mut meals = BTreeMap::new();
        for slot in [MealSlot::Breakfast, MealSlot::Dinner] {
            meals.insert(slot, Meal::for_slot(slot, Vec::new()));
        }
        let day = Day {
            day_number: 1,
            date: "2025-10-20".to_owned(),
            meals,
        };
        assert_eq!(day.meal_at("19:00").map(|m| m.label.as_str()), Some("Cena"));
        assert!(day.meal_at("12:00").is_none());
    }

    #[test]
    fn test_total_weeks_rounds_up() {
        let plan = NormalizedPlan {
            total_days: 10,
            weeks: Vec::new(),
        };
        assert_eq!(plan.total_weeks(), 2);
        let single = NormalizedPlan {
            total_days: 7,
            weeks: Vec::new(),
        };
        assert_eq!(single.total_weeks(), 1);
    }
}
