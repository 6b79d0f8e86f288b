// ABOUTME: End-to-end recipe generation pipeline with health annotation
// ABOUTME: Loads profile and medications, calls the generator, grades the result, persists it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::HealthConfig;
use crate::database::{Database, ListRecipesFilter};
use crate::errors::{AppError, AppResult};
use crate::generation::{GenerationRequestBuilder, RecipeGenerator};
use crate::intelligence::{aggregate, classify, evaluate, nutritional_benefits};
use crate::models::{FoodGuidance, HealthProfile, Rating, Recipe};

/// Caller-supplied parameters for one generation run
#[derive(Debug, Clone)]
pub struct GenerateParams {
    /// Selected pantry ingredient names
    pub pantry_items: Vec<String>,
    /// Dietary preference ("vegan", "flexitarian", ...)
    pub dietary_preference: String,
    /// Optional meal type; defaults to "any meal"
    pub meal_type: Option<String>,
    /// Requested servings; values below 1 are clamped to 1
    pub servings: u32,
}

/// Orchestrates generation, annotation, and persistence
pub struct RecipeService {
    db: Database,
    generator: Arc<dyn RecipeGenerator>,
    health: HealthConfig,
}

impl RecipeService {
    /// Create a new recipe service
    #[must_use]
    pub fn new(db: Database, generator: Arc<dyn RecipeGenerator>, health: HealthConfig) -> Self {
        Self {
            db,
            generator,
            health,
        }
    }

    /// The user's health profile, defaulting to an empty one when unsaved
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn profile(&self, user_id: Uuid) -> AppResult<HealthProfile> {
        Ok(self.db.profiles().get(user_id).await?.unwrap_or_default())
    }

    /// Aggregated food guidance for the user's active medications
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn food_guidance(&self, user_id: Uuid) -> AppResult<FoodGuidance> {
        let medications = self.db.medications().active_medications(user_id).await?;
        Ok(aggregate(&medications))
    }

    /// Generate a recipe and annotate it with health intelligence
    ///
    /// Runs the full pipeline: load profile and medications, aggregate
    /// guidance, validate and build the request, call the generator, grade
    /// nutrient severities, derive per-condition suitability and benefits,
    /// then persist. Nothing is persisted when any step fails.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection`/`InvalidInput` for bad parameters, upstream
    /// generation errors when the external service misbehaves, and database
    /// errors from persistence
    pub async fn generate(&self, user_id: Uuid, params: GenerateParams) -> AppResult<Recipe> {
        let profile = self.profile(user_id).await?;
        let medications = self.db.medications().active_medications(user_id).await?;
        let guidance = aggregate(&medications);

        debug!(
            user_id = %user_id,
            pantry_items = params.pantry_items.len(),
            medications = medications.len(),
            conditions = profile.conditions.len(),
            "Starting recipe generation"
        );

        let mut builder =
            GenerationRequestBuilder::new(params.pantry_items, params.dietary_preference)
                .servings(params.servings);
        if let Some(meal_type) = params.meal_type {
            builder = builder.meal_type(meal_type);
        }
        let request = builder.build(&profile, &guidance)?;

        let generated = self.generator.generate(&request).await.map_err(|e| {
            warn!(user_id = %user_id, error = %e, "Recipe generation failed");
            e.with_user_id(user_id)
        })?;

        let nutritional_info = generated.nutritional_info.into_nutritional_info()?;
        nutritional_info.validate()?;

        let health_warnings = classify(&nutritional_info, &profile.conditions, &self.health);
        let condition_suitability = evaluate(&generated.ingredients, &health_warnings, &profile);
        let benefits = nutritional_benefits(&nutritional_info, &profile.conditions);

        let recipe = Recipe {
            id: Uuid::new_v4(),
            user_id,
            title: generated.title,
            description: generated.description,
            ingredients: generated.ingredients,
            instructions: generated.instructions,
            prep_time: generated.prep_time,
            cook_time: generated.cook_time,
            total_time: generated.total_time,
            servings: generated.servings.max(1),
            difficulty: generated.difficulty,
            dietary_tags: generated.dietary_tags,
            meal_type: if generated.meal_type.trim().is_empty() {
                request.meal_type.clone()
            } else {
                generated.meal_type
            },
            nutritional_info,
            additional_items_needed: generated.additional_items_needed,
            health_warnings,
            nutritional_benefits: benefits,
            condition_suitability,
            is_favorite: false,
            created_date: Utc::now(),
        };

        self.db.recipes().insert(&recipe).await?;

        info!(
            user_id = %user_id,
            recipe_id = %recipe.id,
            warnings = recipe.health_warnings.len(),
            "Generated and stored recipe"
        );
        Ok(recipe)
    }

    /// Get one recipe by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn recipe(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<Recipe> {
        self.db
            .recipes()
            .get(user_id, recipe_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Recipe {recipe_id} not found"))
                    .with_resource_id(recipe_id.to_string())
                    .with_user_id(user_id)
            })
    }

    /// List a user's recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails
    pub async fn recipes(&self, user_id: Uuid, filter: ListRecipesFilter) -> AppResult<Vec<Recipe>> {
        self.db.recipes().list(user_id, filter).await
    }

    /// Toggle the favorite flag on a recipe and return the new value
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn toggle_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<bool> {
        let recipe = self.recipe(user_id, recipe_id).await?;
        let next = !recipe.is_favorite;
        self.db
            .recipes()
            .set_favorite(user_id, recipe_id, next)
            .await?;
        Ok(next)
    }

    /// Delete a recipe and its ratings
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn delete_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        self.db.recipes().delete(user_id, recipe_id).await
    }

    /// Rate a recipe (1-5 stars with an optional review)
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for ratings outside 1-5 and
    /// `ResourceNotFound` if the recipe does not exist for the user
    pub async fn rate_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        rating: u8,
        review: Option<String>,
    ) -> AppResult<Rating> {
        let rating = Rating::new(recipe_id, rating, review)?;
        self.db.recipes().add_rating(user_id, &rating).await?;
        Ok(rating)
    }
}
