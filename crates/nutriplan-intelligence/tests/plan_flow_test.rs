// ABOUTME: End-to-end flow test from patient profile to schedule grid
// ABOUTME: Targets → configuration → generation request, payload → plan → week navigation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use nutriplan_core::config::PlanConfiguration;
use nutriplan_core::generation::{GenerationRequest, IngredientFilters, IngredientRef};
use nutriplan_core::models::patient::{ActivityLevel, PatientProfile, Sex};
use nutriplan_core::models::plan::MealSlot;
use nutriplan_core::schedule::WeekCursor;
use nutriplan_intelligence::{compute_targets_on, normalize_plan};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_profile() -> PatientProfile {
    PatientProfile {
        weight_kg: 85.0,
        height_m: 1.60,
        birth_date: Some(date(1972, 3, 10)),
        sex: Sex::Female,
        activity_level: Some(ActivityLevel::Low),
        hba1c: Some(7.4),
        fasting_glucose: Some(152.0),
    }
}

fn ten_day_payload() -> Value {
    let mut container = Map::new();
    for n in 1..=10 {
        container.insert(
            format!("dia_{n}"),
            json!({
                "fecha": format!("2025-11-{:02}", 2 + n),
                "des": {
                    "alimentos_sugeridos": [{
                        "ingrediente": {
                            "id": 31,
                            "nombre": "Avena",
                            "grupo": "GRUPO1_CEREALES",
                            "kcal": 389.0,
                            "cho": 66.3
                        },
                        "cantidad_sugerida": 40.0,
                        "unidad": "g"
                    }]
                },
                "almuerzo": {
                    "alimentos": [
                        { "nombre": "Pollo a la plancha", "cantidad": "150g", "grupo": "GRUPO5_CARNES" }
                    ]
                }
            }),
        );
    }
    json!({ "plan_semanal": container })
}

#[test]
fn test_targets_feed_a_complete_generation_request() {
    // Obese profile (BMI 33.2) with poor glycemic control.
    let targets = compute_targets_on(&sample_profile(), date(2025, 6, 1));
    assert_eq!(
        (targets.cho_pct, targets.pro_pct, targets.fat_pct),
        (35, 20, 45)
    );
    // GI tier 60 for hba1c 7.4, minus 10 for obesity.
    assert_eq!(targets.glycemic_index_max, 50);
    // Base 2, +1 for low activity.
    assert_eq!(targets.max_repetitions, 3);

    let configuration =
        PlanConfiguration::from_targets(&targets, date(2025, 11, 3), date(2025, 11, 12));
    assert_eq!(configuration.plan_days, Some(10));

    let mut filters = IngredientFilters::new();
    assert!(filters.add_exclude(IngredientRef {
        id: 9,
        name: "Azúcar rubia".to_owned(),
        group: Some("GRUPO6_AZUCARES".to_owned()),
    }));
    let request = GenerationRequest::build(42, configuration, Some((&targets).into()), filters)
        .expect("complete configuration must build");

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["paciente_id"], 42);
    assert_eq!(body["configuracion"]["patron_comidas"], "des,alm,cena");
    assert_eq!(body["configuracion_original"]["cho_pct"], 35);
    assert_eq!(body["ingredientes"]["excluir"][0]["id"], 9);
}

#[test]
fn test_payload_flows_to_week_grid() {
    let plan = normalize_plan(&ten_day_payload(), 7).expect("payload must normalize");
    assert_eq!(plan.total_days, 10);
    assert_eq!(plan.total_weeks(), 2);

    let grid = plan.week_grid(1).unwrap();
    assert_eq!(grid.time_slots(), ["07:00", "10:00", "12:00", "15:00", "19:00"]);
    assert_eq!(grid.days().len(), 7);

    let monday = &grid.days()[0];
    assert_eq!(monday.date, "2025-11-03");
    let breakfast = grid.cell(monday, MealSlot::Breakfast).unwrap();
    assert_eq!(breakfast.label, "Desayuno");
    // 389 kcal and 66.3 g carbohydrate per 100 g, scaled to 40 g.
    assert_eq!(breakfast.foods[0].kcal, Some(155.6));
    assert_eq!(breakfast.foods[0].cho, Some(26.52));
    let lunch = grid.cell(monday, MealSlot::Lunch).unwrap();
    assert_eq!(lunch.foods[0].quantity_display, "150g");
    assert!(grid.cell(monday, MealSlot::Dinner).is_none());

    // Week 2 holds the 3-day remainder; navigation clamps at both ends.
    let second = plan.week_grid(2).unwrap();
    assert_eq!(second.days().len(), 3);
    assert_eq!(second.span(), (8, 10));

    let mut cursor = WeekCursor::new(plan.total_weeks());
    assert_eq!(cursor.advance(-1), 1);
    assert_eq!(cursor.advance(1), 2);
    assert_eq!(cursor.advance(1), 2);
    assert!(plan.week_grid(3).is_err());
}

#[test]
fn test_saved_plan_round_trips_through_serialization() {
    let plan = normalize_plan(&ten_day_payload(), 7).unwrap();
    let serialized = serde_json::to_value(&plan).unwrap();
    assert_eq!(serialized["dias"], 10);
    assert_eq!(serialized["semanas"][1]["dias"][0]["numero"], 8);
    let restored: nutriplan_core::models::plan::NormalizedPlan =
        serde_json::from_value(serialized).unwrap();
    assert_eq!(restored, plan);
}
