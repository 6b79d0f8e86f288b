// ABOUTME: Integration tests for nutrient severity grading and warning emission
// ABOUTME: Pins band boundaries, relevance gating, and warning ordering
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::BTreeSet;

use mealsense::config::HealthConfig;
use mealsense::intelligence::classify;
use mealsense::models::{ConditionCode, NutritionalInfo, Severity};

fn conditions(codes: &[ConditionCode]) -> BTreeSet<ConditionCode> {
    codes.iter().copied().collect()
}

fn nutrients_with_sodium(sodium_mg: f64) -> NutritionalInfo {
    NutritionalInfo {
        calories: 400.0,
        protein_g: 10.0,
        carbs_g: 40.0,
        fat_g: 10.0,
        fiber_g: 3.0,
        sodium_mg: Some(sodium_mg),
        ..NutritionalInfo::default()
    }
}

#[test]
fn test_sodium_at_high_threshold_grades_high() {
    // A value exactly on a band's lower bound falls into that band
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::Hypertension]);

    let warnings = classify(&nutrients_with_sodium(900.0), &active, &config);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].category, "sodium");
    assert_eq!(warnings[0].level, Severity::High);
    assert_eq!(warnings[0].unit, "mg");
}

#[test]
fn test_sodium_severity_is_monotonic() {
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::Hypertension]);

    let mut last = Severity::Low;
    for sodium in [500.0, 900.0, 1500.0, 3000.0] {
        let warnings = classify(&nutrients_with_sodium(sodium), &active, &config);
        let level = warnings[0].level;
        assert!(level >= last, "severity decreased at sodium {sodium}");
        last = level;
    }
    assert_eq!(last, Severity::VeryHigh);
}

#[test]
fn test_low_severity_emits_no_warning() {
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::Hypertension]);

    let warnings = classify(&nutrients_with_sodium(100.0), &active, &config);
    assert!(warnings.is_empty());
}

#[test]
fn test_irrelevant_conditions_emit_no_warning() {
    // Sodium is not in the relevance set for thyroid disorders
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::ThyroidDisorders]);

    let warnings = classify(&nutrients_with_sodium(3000.0), &active, &config);
    assert!(warnings.iter().all(|w| w.category != "sodium"));
}

#[test]
fn test_unreported_nutrient_is_skipped() {
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::Hypertension]);

    let nutrients = NutritionalInfo {
        calories: 400.0,
        sodium_mg: None,
        ..NutritionalInfo::default()
    };
    let warnings = classify(&nutrients, &active, &config);
    assert!(warnings.is_empty());
}

#[test]
fn test_condition_specific_guidance_only_for_active_conditions() {
    let config = HealthConfig::default();
    let active = conditions(&[ConditionCode::Hypertension, ConditionCode::KidneyDisease]);

    let warnings = classify(&nutrients_with_sodium(2000.0), &active, &config);
    let sodium = &warnings[0];
    assert!(sodium
        .condition_specific
        .contains_key(&ConditionCode::Hypertension));
    assert!(!sodium
        .condition_specific
        .contains_key(&ConditionCode::Diabetes));
    assert!(!sodium.general_guidance.is_empty());
}

#[test]
fn test_warnings_sorted_by_category() {
    let config = HealthConfig::default();
    let active = conditions(&[
        ConditionCode::Hypertension,
        ConditionCode::Diabetes,
        ConditionCode::HeartDisease,
    ]);

    let nutrients = NutritionalInfo {
        calories: 800.0,
        protein_g: 10.0,
        carbs_g: 80.0,
        fat_g: 30.0,
        fiber_g: 2.0,
        sodium_mg: Some(2000.0),
        sugar_g: Some(40.0),
        saturated_fat_g: Some(15.0),
        cholesterol_mg: Some(350.0),
        ..NutritionalInfo::default()
    };

    let warnings = classify(&nutrients, &active, &config);
    assert!(warnings.len() >= 3);
    let categories: Vec<&str> = warnings.iter().map(|w| w.category.as_str()).collect();
    let mut sorted = categories.clone();
    sorted.sort_unstable();
    assert_eq!(categories, sorted);
}
