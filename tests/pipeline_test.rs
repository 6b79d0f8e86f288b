// ABOUTME: End-to-end tests for the recipe generation pipeline with a mock generator
// ABOUTME: Validates annotation, persistence, lifecycle operations, and failure behavior
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use async_trait::async_trait;
use mealsense::config::HealthConfig;
use mealsense::database::{Database, ListRecipesFilter};
use mealsense::errors::{AppError, AppResult, ErrorCode};
use mealsense::generation::{GeneratedRecipe, GenerationRequest, RecipeGenerator};
use mealsense::models::{ConditionCode, HealthProfile, Severity};
use mealsense::services::{GenerateParams, RecipeService};
use uuid::Uuid;

/// Generator that returns a fixed recipe parsed from a canned JSON payload
struct FixedGenerator {
    payload: &'static str,
}

#[async_trait]
impl RecipeGenerator for FixedGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> AppResult<GeneratedRecipe> {
        serde_json::from_str(self.payload)
            .map_err(|e| AppError::upstream_generation(format!("bad payload: {e}")))
    }
}

/// Generator that always fails, simulating an unreachable service
struct FailingGenerator;

#[async_trait]
impl RecipeGenerator for FailingGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> AppResult<GeneratedRecipe> {
        Err(AppError::upstream_unavailable("connection refused"))
    }
}

const SALTY_RECIPE: &str = r#"{
    "title": "Soy-Glazed Stir Fry",
    "description": "A quick weeknight stir fry.",
    "ingredients": [
        {"amount": "2 cups", "item": "rice"},
        {"amount": "3 tbsp", "item": "soy sauce"},
        {"amount": "1 cup", "item": "broccoli"}
    ],
    "instructions": ["Cook rice.", "Stir fry vegetables.", "Combine."],
    "prep_time": "10 minutes",
    "cook_time": "15 minutes",
    "total_time": "25 minutes",
    "servings": 2,
    "difficulty": "easy",
    "dietary_tags": ["vegetarian"],
    "meal_type": "dinner",
    "nutritional_info": {
        "calories": 450,
        "protein": "12g",
        "carbs": 70,
        "fat": 8,
        "fiber": 4,
        "sodium": "1600mg",
        "sugar": 6
    },
    "additional_items_needed": ["sesame oil"]
}"#;

async fn service_with(generator: Arc<dyn RecipeGenerator>) -> RecipeService {
    let db = Database::new("sqlite::memory:").await.unwrap();
    db.seed_catalogs().await.unwrap();
    RecipeService::new(db, generator, HealthConfig::default())
}

fn params() -> GenerateParams {
    GenerateParams {
        pantry_items: vec!["rice".into(), "broccoli".into(), "soy sauce".into()],
        dietary_preference: "vegetarian".into(),
        meal_type: Some("dinner".into()),
        servings: 2,
    }
}

#[tokio::test]
async fn test_generation_annotates_and_persists() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    db.seed_catalogs().await.unwrap();

    let user_id = Uuid::new_v4();
    let profile = HealthProfile {
        conditions: [ConditionCode::Hypertension, ConditionCode::Diabetes]
            .into_iter()
            .collect(),
        ..HealthProfile::default()
    };
    db.profiles().save(user_id, &profile).await.unwrap();

    let service = RecipeService::new(
        db.clone(),
        Arc::new(FixedGenerator {
            payload: SALTY_RECIPE,
        }),
        HealthConfig::default(),
    );

    let recipe = service.generate(user_id, params()).await.unwrap();

    assert_eq!(recipe.title, "Soy-Glazed Stir Fry");
    // "12g" and "1600mg" wire strings parse to numbers
    assert!((recipe.nutritional_info.protein_g - 12.0).abs() < f64::EPSILON);
    assert_eq!(recipe.nutritional_info.sodium_mg, Some(1600.0));

    // 1600 mg sodium grades very_high for a hypertensive user
    let sodium = recipe
        .health_warnings
        .iter()
        .find(|w| w.category == "sodium")
        .unwrap();
    assert_eq!(sodium.level, Severity::VeryHigh);

    // Suitability: hypertension disqualified, diabetes fine (sugar is low)
    assert!(!recipe.condition_suitability[&ConditionCode::Hypertension].suitable);
    assert!(recipe.condition_suitability[&ConditionCode::Diabetes].suitable);

    // Persisted round trip
    let stored = service.recipe(user_id, recipe.id).await.unwrap();
    assert_eq!(stored.title, recipe.title);
    assert_eq!(stored.health_warnings.len(), recipe.health_warnings.len());
    assert_eq!(stored.condition_suitability.len(), 2);
}

#[tokio::test]
async fn test_upstream_failure_persists_nothing() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    db.seed_catalogs().await.unwrap();
    let service = RecipeService::new(db.clone(), Arc::new(FailingGenerator), HealthConfig::default());

    let user_id = Uuid::new_v4();
    let err = service.generate(user_id, params()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GenerationUnavailable);

    let recipes = db
        .recipes()
        .list(user_id, ListRecipesFilter::default())
        .await
        .unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_empty_selection_fails_before_generation() {
    let service = service_with(Arc::new(FailingGenerator)).await;

    let err = service
        .generate(
            Uuid::new_v4(),
            GenerateParams {
                pantry_items: vec![],
                dietary_preference: "vegan".into(),
                meal_type: None,
                servings: 2,
            },
        )
        .await
        .unwrap_err();
    // The builder rejects the request before the generator is ever called
    assert_eq!(err.code, ErrorCode::EmptySelection);
}

#[tokio::test]
async fn test_recipe_lifecycle() {
    let db = Database::new("sqlite::memory:").await.unwrap();
    db.seed_catalogs().await.unwrap();
    let service = RecipeService::new(
        db.clone(),
        Arc::new(FixedGenerator {
            payload: SALTY_RECIPE,
        }),
        HealthConfig::default(),
    );
    let user_id = Uuid::new_v4();

    let recipe = service.generate(user_id, params()).await.unwrap();
    assert!(!recipe.is_favorite);

    // Favorite toggling flips the stored flag
    assert!(service.toggle_favorite(user_id, recipe.id).await.unwrap());
    let favorites = service
        .recipes(
            user_id,
            ListRecipesFilter {
                favorites_only: true,
                limit: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(favorites.len(), 1);
    assert!(!service.toggle_favorite(user_id, recipe.id).await.unwrap());

    // Ratings validate their range and average on read
    let err = service
        .rate_recipe(user_id, recipe.id, 0, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);

    service.rate_recipe(user_id, recipe.id, 5, None).await.unwrap();
    service
        .rate_recipe(user_id, recipe.id, 3, Some("decent".into()))
        .await
        .unwrap();
    let average = db.recipes().average_rating(recipe.id).await.unwrap().unwrap();
    assert!((average - 4.0).abs() < f64::EPSILON);

    // Deletion removes the recipe and its ratings
    service.delete_recipe(user_id, recipe.id).await.unwrap();
    let err = service.recipe(user_id, recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(db.recipes().list_ratings(recipe.id).await.unwrap().is_empty());

    // Another user's recipes are invisible to this user
    let other = Uuid::new_v4();
    let recipe = service.generate(other, params()).await.unwrap();
    let err = service.recipe(user_id, recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
