// ABOUTME: Normalizes recommendation engine payloads into the canonical weekly plan
// ABOUTME: Ordered accessor strategies over day containers, meal keys, and food shapes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

//! # Payload Normalization
//!
//! The recommendation engine emits meal plans in several inconsistent
//! shapes. This module reconciles them into one canonical
//! [`NormalizedPlan`] through explicit accessor strategies evaluated in a
//! fixed priority order:
//!
//! - day container: `plan_semanal` → `plan_completo` → flat `comidas`
//!   (replicated across a default day count)
//! - meal key per slot: short code (`des`) → long name (`desayuno`)
//! - food list per meal: `alimentos_sugeridos` → `alimentos`
//! - food item: ingredient record with suggested quantity (nutrients scaled
//!   per 100 units) → pre-formatted name/quantity pair (passed through
//!   unchanged) → degraded placeholder
//!
//! A payload is consumed once and discarded; the produced plan is replaced
//! wholesale on each new generation, never mutated in place.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use nutriplan_core::errors::PlanError;
use nutriplan_core::models::plan::{
    Day, Food, Meal, MealSlot, NormalizedPlan, Week, DAYS_PER_WEEK,
};

/// Day count used when a flat payload declares none
pub const DEFAULT_PLAN_DAYS: u32 = 7;

/// Name given to food items carrying no usable fields
const FALLBACK_FOOD_NAME: &str = "Alimento";
/// Quantity given to food items carrying no usable fields
const FALLBACK_FOOD_QUANTITY: &str = "1 porción";

/// Day containers located in a raw payload, in resolution priority order
enum DayContainer<'a> {
    /// `dia_N`-keyed mapping of day plans
    Keyed(&'a Map<String, Value>),
    /// A single meal mapping with no day dimension
    Flat(&'a Map<String, Value>),
}

/// Normalize a raw recommendation payload into the canonical weekly plan.
///
/// `default_day_count` sizes the plan when the payload carries only a flat
/// meal container and no `dias_plan` of its own.
///
/// # Errors
///
/// - `PlanError::Engine` when the payload carries a top-level `error` string
/// - `PlanError::MalformedPayload` when no day or meal container can be
///   located, or the located container yields no days
pub fn normalize_plan(raw: &Value, default_day_count: u32) -> Result<NormalizedPlan, PlanError> {
    if let Some(message) = raw.get("error").and_then(Value::as_str) {
        warn!(message, "engine payload reported a failure");
        return Err(PlanError::engine(message));
    }

    let days = match locate_day_container(raw).ok_or(PlanError::MalformedPayload)? {
        DayContainer::Keyed(container) => collect_keyed_days(container),
        DayContainer::Flat(meals) => {
            let day_count = declared_day_count(raw).unwrap_or(default_day_count);
            debug!(day_count, "replicating flat meal container across days");
            collect_flat_days(meals, day_count)
        }
    };

    if days.is_empty() {
        return Err(PlanError::MalformedPayload);
    }

    let total_days = days.len() as u32;
    let weeks = partition_weeks(days);
    debug!(total_days, weeks = weeks.len(), "plan normalized");
    Ok(NormalizedPlan { total_days, weeks })
}

/// First container strategy that yields data wins
fn locate_day_container(raw: &Value) -> Option<DayContainer<'_>> {
    for key in ["plan_semanal", "plan_completo"] {
        if let Some(container) = raw.get(key).and_then(Value::as_object) {
            debug!(key, "day container located");
            return Some(DayContainer::Keyed(container));
        }
    }
    raw.get("comidas")
        .and_then(Value::as_object)
        .map(DayContainer::Flat)
}

/// Engine-declared day count (`dias_plan`), rounded up
fn declared_day_count(raw: &Value) -> Option<u32> {
    let declared = raw.get("dias_plan")?.as_f64()?;
    if declared > 0.0 {
        Some(declared.ceil() as u32)
    } else {
        None
    }
}

/// Walk `dia_1..dia_count` entries; absent day numbers are skipped
fn collect_keyed_days(container: &Map<String, Value>) -> Vec<Day> {
    let day_count = container.len();
    let mut days = Vec::with_capacity(day_count);
    for number in 1..=day_count {
        let Some(entry) = container.get(&format!("dia_{number}")) else {
            warn!(day = number, "day entry missing from keyed container");
            continue;
        };
        let date = entry
            .get("fecha")
            .and_then(Value::as_str)
            .map_or_else(|| placeholder_date(number), str::to_owned);
        days.push(Day {
            day_number: number as u32,
            date,
            meals: collect_meals(entry),
        });
    }
    days
}

/// Replicate one meal mapping across `day_count` identical days
fn collect_flat_days(meals: &Map<String, Value>, day_count: u32) -> Vec<Day> {
    let meal_source = Value::Object(meals.clone());
    (1..=day_count as usize)
        .map(|number| Day {
            day_number: number as u32,
            date: placeholder_date(number),
            meals: collect_meals(&meal_source),
        })
        .collect()
}

/// Resolve each canonical slot against its short key, then its long key
fn collect_meals(day_entry: &Value) -> BTreeMap<MealSlot, Meal> {
    let mut meals = BTreeMap::new();
    for slot in MealSlot::ALL {
        let resolved = [slot.short_key(), slot.long_key()]
            .into_iter()
            .find_map(|key| day_entry.get(key).filter(|v| !v.is_null()));
        if let Some(meal_value) = resolved {
            meals.insert(slot, normalize_meal(slot, meal_value));
        }
    }
    meals
}

/// Bind a raw meal to the slot's fixed label/time and normalize its foods
fn normalize_meal(slot: MealSlot, meal_value: &Value) -> Meal {
    let foods = ["alimentos_sugeridos", "alimentos"]
        .into_iter()
        .find_map(|key| meal_value.get(key).and_then(Value::as_array))
        .map(|items| items.iter().map(normalize_food).collect())
        .unwrap_or_default();
    Meal::for_slot(slot, foods)
}

/// Normalize one food item through the three accepted shapes
fn normalize_food(item: &Value) -> Food {
    if let Some(food) = scaled_engine_food(item) {
        return food;
    }
    if item.get("nombre").and_then(Value::as_str).is_some() && item.get("cantidad").is_some() {
        // Pre-formatted item: pass through unchanged, keeping every
        // recognized field.
        if let Ok(food) = serde_json::from_value::<Food>(item.clone()) {
            return food;
        }
    }
    degraded_food(item)
}

/// Engine shape: `{ingrediente, cantidad_sugerida, unidad}` with nutrients
/// declared per 100 units of the ingredient
fn scaled_engine_food(item: &Value) -> Option<Food> {
    let ingredient = item.get("ingrediente")?.as_object()?;
    let quantity = item.get("cantidad_sugerida")?.as_f64()?;

    let unit = item
        .get("unidad")
        .and_then(Value::as_str)
        .unwrap_or("g")
        .to_owned();
    let factor = quantity / 100.0;
    let scaled = |key: &str| {
        ingredient
            .get(key)
            .and_then(Value::as_f64)
            .map(|per_100| round2(per_100 * factor))
    };

    Some(Food {
        name: ingredient
            .get("nombre")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_FOOD_NAME)
            .to_owned(),
        quantity_display: format_quantity(quantity, &unit),
        quantity_value: Some(quantity),
        unit: Some(unit),
        group: ingredient
            .get("grupo")
            .and_then(Value::as_str)
            .map(str::to_owned),
        ingredient_id: ingredient.get("id").and_then(Value::as_i64),
        kcal: scaled("kcal"),
        cho: scaled("cho"),
        pro: scaled("pro"),
        fat: scaled("fat"),
        fiber: scaled("fibra"),
    })
}

/// Last-resort shape: keep whatever name/quantity survives
fn degraded_food(item: &Value) -> Food {
    let name = item
        .get("nombre")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_FOOD_NAME);
    let quantity = item
        .get("cantidad")
        .and_then(Value::as_str)
        .unwrap_or(FALLBACK_FOOD_QUANTITY);
    Food::named(name, quantity)
}

/// Round to 2 decimals, the precision the display layer expects
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `"150g"` for whole quantities, `"150.5g"` otherwise
fn format_quantity(quantity: f64, unit: &str) -> String {
    if quantity.fract().abs() < f64::EPSILON {
        format!("{quantity:.0}{unit}")
    } else {
        format!("{quantity}{unit}")
    }
}

/// Placeholder date for days the payload did not date: a fixed base
/// advanced by the day number, formatted `YYYY-MM-DD`
fn placeholder_date(day_number: usize) -> String {
    NaiveDate::from_ymd_opt(2025, 10, 19)
        .and_then(|base| base.checked_add_days(Days::new(day_number as u64)))
        .map_or_else(
            || format!("2025-10-{}", 19 + day_number),
            |date| date.format("%Y-%m-%d").to_string(),
        )
}

/// Chunk ordered days into week pages of at most seven; an empty week is
/// never emitted
fn partition_weeks(days: Vec<Day>) -> Vec<Week> {
    days.chunks(DAYS_PER_WEEK)
        .enumerate()
        .filter(|(_, chunk)| !chunk.is_empty())
        .map(|(i, chunk)| Week {
            index: i as u32 + 1,
            days: chunk.to_vec(),
        })
        .collect()
}
