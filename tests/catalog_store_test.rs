// ABOUTME: Integration tests for the SQLite store managers
// ABOUTME: Covers catalog seeding, append-only custom entries, pantry, profiles, medications
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealsense::database::{Database, IngredientFilter};
use mealsense::errors::ErrorCode;
use mealsense::models::{
    ActivityLevel, ConditionCode, HealthProfile, IngredientCategory, MedicationCategory,
};
use uuid::Uuid;

async fn test_db() -> Database {
    let db = Database::new("sqlite::memory:").await.unwrap();
    db.seed_catalogs().await.unwrap();
    db
}

// =============================================================================
// Ingredient catalog
// =============================================================================

#[tokio::test]
async fn test_seeding_is_idempotent() {
    let db = test_db().await;
    let before = db.ingredients().list(&IngredientFilter::default()).await.unwrap();
    assert!(!before.is_empty());

    db.seed_catalogs().await.unwrap();
    let after = db.ingredients().list(&IngredientFilter::default()).await.unwrap();
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
async fn test_ingredient_filters() {
    let db = test_db().await;

    let vegetables = db
        .ingredients()
        .list(&IngredientFilter {
            category: Some(IngredientCategory::Vegetables),
            search: None,
        })
        .await
        .unwrap();
    assert!(!vegetables.is_empty());
    assert!(vegetables
        .iter()
        .all(|i| i.category == IngredientCategory::Vegetables));

    let tomatoes = db
        .ingredients()
        .list(&IngredientFilter {
            category: None,
            search: Some("Tomato".into()),
        })
        .await
        .unwrap();
    assert!(!tomatoes.is_empty());
    assert!(tomatoes
        .iter()
        .all(|i| i.name.to_lowercase().contains("tomato")));
}

#[tokio::test]
async fn test_custom_ingredient_conflicts_case_insensitively() {
    let db = test_db().await;

    db.ingredients()
        .add_custom("Dragon Fruit", IngredientCategory::Fruits)
        .await
        .unwrap();

    let err = db
        .ingredients()
        .add_custom("dragon fruit", IngredientCategory::Fruits)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    // Seeded names conflict too
    let err = db
        .ingredients()
        .add_custom("TOMATO", IngredientCategory::Vegetables)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

// =============================================================================
// Medication catalog and user associations
// =============================================================================

#[tokio::test]
async fn test_user_medication_lifecycle() {
    let db = test_db().await;
    let user_id = Uuid::new_v4();

    let catalog = db.medications().list_catalog().await.unwrap();
    assert!(!catalog.is_empty());
    let statin = catalog
        .iter()
        .find(|m| m.name == "Atorvastatin")
        .unwrap();

    let link = db
        .medications()
        .add_user_medication(user_id, statin.id)
        .await
        .unwrap();
    assert_eq!(link.medication_name, "Atorvastatin");

    // Re-adding the same association conflicts
    let err = db
        .medications()
        .add_user_medication(user_id, statin.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let active = db.medications().active_medications(user_id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert!(active[0].avoid_foods.contains(&"grapefruit".to_owned()));

    // Removal only deletes the association, not the catalog entry
    db.medications()
        .remove_user_medication(user_id, statin.id)
        .await
        .unwrap();
    assert!(db
        .medications()
        .active_medications(user_id)
        .await
        .unwrap()
        .is_empty());
    assert!(db.medications().get(statin.id).await.unwrap().is_some());

    // Removing again is NotFound
    let err = db
        .medications()
        .remove_user_medication(user_id, statin.id)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_unknown_medication_cannot_be_added() {
    let db = test_db().await;
    let err = db
        .medications()
        .add_user_medication(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_custom_medication_has_empty_interaction_lists() {
    let db = test_db().await;

    let custom = db
        .medications()
        .add_custom("Obscurin", MedicationCategory::Other)
        .await
        .unwrap();
    assert!(custom.is_custom);
    assert!(custom.avoid_foods.is_empty());
    assert!(custom.recommended_foods.is_empty());

    let err = db
        .medications()
        .add_custom("obscurin", MedicationCategory::Other)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

// =============================================================================
// Pantry
// =============================================================================

#[tokio::test]
async fn test_pantry_add_remove_clear() {
    let db = test_db().await;
    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();

    let item = db
        .pantry()
        .add(user_id, "Chickpeas", Some("2 cans".into()), None)
        .await
        .unwrap();
    db.pantry().add(user_id, "Rice", None, None).await.unwrap();
    db.pantry().add(other_user, "Chickpeas", None, None).await.unwrap();

    // Duplicate per user, case-insensitive
    let err = db
        .pantry()
        .add(user_id, "chickpeas", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    assert_eq!(db.pantry().list(user_id).await.unwrap().len(), 2);

    db.pantry().remove(user_id, item.id).await.unwrap();
    let err = db.pantry().remove(user_id, item.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let removed = db.pantry().clear(user_id).await.unwrap();
    assert_eq!(removed, 1);

    // Other users' pantries are untouched
    assert_eq!(db.pantry().list(other_user).await.unwrap().len(), 1);
}

// =============================================================================
// Health profiles
// =============================================================================

#[tokio::test]
async fn test_profile_replace_on_save() {
    let db = test_db().await;
    let user_id = Uuid::new_v4();

    assert!(db.profiles().get(user_id).await.unwrap().is_none());

    let first = HealthProfile {
        conditions: [ConditionCode::Hypertension, ConditionCode::Diabetes]
            .into_iter()
            .collect(),
        allergies: vec!["Peanuts".into()],
        activity_level: ActivityLevel::Moderate,
        ..HealthProfile::default()
    };
    db.profiles().save(user_id, &first).await.unwrap();

    let loaded = db.profiles().get(user_id).await.unwrap().unwrap();
    assert_eq!(loaded.conditions.len(), 2);
    assert_eq!(loaded.allergies, vec!["Peanuts".to_owned()]);

    // Saving again replaces the whole document; no merge
    let second = HealthProfile {
        conditions: [ConditionCode::Gout].into_iter().collect(),
        ..HealthProfile::default()
    };
    db.profiles().save(user_id, &second).await.unwrap();

    let loaded = db.profiles().get(user_id).await.unwrap().unwrap();
    assert_eq!(loaded.conditions.len(), 1);
    assert!(loaded.conditions.contains(&ConditionCode::Gout));
    assert!(loaded.allergies.is_empty());
}
