// ABOUTME: Integration tests for generation request building and prompt assembly
// ABOUTME: Validates selection checks, defaults, and guidance hint embedding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealsense::errors::ErrorCode;
use mealsense::generation::{GenerationRequestBuilder, OpenAiCompatibleGenerator};
use mealsense::intelligence::aggregate;
use mealsense::models::{ConditionCode, FoodGuidance, HealthProfile, Medication, MedicationCategory};
use uuid::Uuid;

fn profile_with(conditions: &[ConditionCode], allergies: &[&str]) -> HealthProfile {
    HealthProfile {
        conditions: conditions.iter().copied().collect(),
        allergies: allergies.iter().map(|s| (*s).to_owned()).collect(),
        ..HealthProfile::default()
    }
}

#[test]
fn test_empty_selection_is_rejected() {
    let profile = HealthProfile::default();
    let guidance = FoodGuidance::default();

    let err = GenerationRequestBuilder::new(vec![], "vegan")
        .build(&profile, &guidance)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptySelection);

    // Whitespace-only selections count as empty
    let err = GenerationRequestBuilder::new(vec!["  ".into(), String::new()], "vegan")
        .build(&profile, &guidance)
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptySelection);
}

#[test]
fn test_blank_preference_is_rejected() {
    let err = GenerationRequestBuilder::new(vec!["rice".into()], "  ")
        .build(&HealthProfile::default(), &FoodGuidance::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_defaults_applied() {
    let request = GenerationRequestBuilder::new(vec!["rice".into()], "flexitarian")
        .servings(0)
        .build(&HealthProfile::default(), &FoodGuidance::default())
        .unwrap();

    assert_eq!(request.meal_type, "any meal");
    assert_eq!(request.servings, 1);
}

#[test]
fn test_guidance_flows_into_request_hints() {
    let meds = vec![Medication {
        id: Uuid::new_v4(),
        name: "Warfarin".into(),
        category: MedicationCategory::BloodThinner,
        avoid_foods: vec!["kale".into(), "grapefruit".into()],
        recommended_foods: vec!["rice".into()],
        is_custom: false,
    }];
    let guidance = aggregate(&meds);
    let profile = profile_with(&[ConditionCode::Hypertension], &["Shellfish"]);

    let request = GenerationRequestBuilder::new(vec!["rice".into(), "tofu".into()], "vegetarian")
        .meal_type("dinner")
        .servings(4)
        .build(&profile, &guidance)
        .unwrap();

    assert!(request.exclude_foods.contains(&"kale".to_owned()));
    assert!(request.prefer_foods.contains(&"rice".to_owned()));
    assert!(request.allergies.contains(&"Shellfish".to_owned()));
    assert_eq!(request.conditions, vec![ConditionCode::Hypertension]);
    assert_eq!(request.meal_type, "dinner");
    assert_eq!(request.servings, 4);
}

#[test]
fn test_prompt_contains_hints_and_contract() {
    let profile = profile_with(&[ConditionCode::Diabetes], &["Peanuts"]);
    let mut guidance = FoodGuidance::default();
    guidance.foods_to_avoid.push("grapefruit".into());
    guidance.recommended_foods.push("oats".into());

    let request = GenerationRequestBuilder::new(vec!["oats".into(), "banana".into()], "vegan")
        .meal_type("breakfast")
        .servings(2)
        .build(&profile, &guidance)
        .unwrap();

    let prompt = OpenAiCompatibleGenerator::build_prompt(&request);
    assert!(prompt.contains("oats"));
    assert!(prompt.contains("grapefruit"));
    assert!(prompt.contains("Peanuts"));
    assert!(prompt.contains("breakfast"));
    assert!(prompt.contains("JSON"));
}

#[test]
fn test_fence_stripping() {
    let fenced = "```json\n{\"title\": \"Test\"}\n```";
    assert_eq!(
        OpenAiCompatibleGenerator::strip_fences(fenced),
        "{\"title\": \"Test\"}"
    );
    let bare = "{\"title\": \"Test\"}";
    assert_eq!(OpenAiCompatibleGenerator::strip_fences(bare), bare);
}
