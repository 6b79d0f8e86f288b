// ABOUTME: Database operations for generated recipes and their ratings
// ABOUTME: Stores derived annotations as JSON columns and serves newest-first listings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, NutritionalInfo, Rating, Recipe};

/// Filter options for listing recipes
#[derive(Debug, Clone, Copy, Default)]
pub struct ListRecipesFilter {
    /// Restrict to favorites
    pub favorites_only: bool,
    /// Maximum number of results (default 50)
    pub limit: Option<u32>,
}

/// Recipe and rating operations manager
pub struct RecipesManager {
    pool: SqlitePool,
}

impl RecipesManager {
    /// Create a new recipes manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a fully annotated recipe
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert(&self, recipe: &Recipe) -> AppResult<()> {
        let ingredients_json = serde_json::to_string(&recipe.ingredients)?;
        let instructions_json = serde_json::to_string(&recipe.instructions)?;
        let tags_json = serde_json::to_string(&recipe.dietary_tags)?;
        let nutrition_json = serde_json::to_string(&recipe.nutritional_info)?;
        let additional_json = serde_json::to_string(&recipe.additional_items_needed)?;
        let warnings_json = serde_json::to_string(&recipe.health_warnings)?;
        let benefits_json = serde_json::to_string(&recipe.nutritional_benefits)?;
        let suitability_json = serde_json::to_string(&recipe.condition_suitability)?;
        let difficulty_json = serde_json::to_string(&recipe.difficulty)?;

        sqlx::query(
            r"
            INSERT INTO recipes (
                id, user_id, title, description, ingredients, instructions,
                prep_time, cook_time, total_time, servings, difficulty,
                dietary_tags, meal_type, nutritional_info, additional_items_needed,
                health_warnings, nutritional_benefits, condition_suitability,
                is_favorite, created_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
            ",
        )
        .bind(recipe.id.to_string())
        .bind(recipe.user_id.to_string())
        .bind(&recipe.title)
        .bind(&recipe.description)
        .bind(&ingredients_json)
        .bind(&instructions_json)
        .bind(&recipe.prep_time)
        .bind(&recipe.cook_time)
        .bind(&recipe.total_time)
        .bind(i64::from(recipe.servings))
        .bind(&difficulty_json)
        .bind(&tags_json)
        .bind(&recipe.meal_type)
        .bind(&nutrition_json)
        .bind(&additional_json)
        .bind(&warnings_json)
        .bind(&benefits_json)
        .bind(&suitability_json)
        .bind(i64::from(recipe.is_favorite))
        .bind(recipe.created_date.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert recipe: {e}")))?;

        Ok(())
    }

    /// Get one recipe by id for a user
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<Option<Recipe>> {
        let row = sqlx::query("SELECT * FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe: {e}")))?;

        row.map(|r| row_to_recipe(&r)).transpose()
    }

    /// List a user's recipes, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, user_id: Uuid, filter: ListRecipesFilter) -> AppResult<Vec<Recipe>> {
        let favorites_clause = if filter.favorites_only {
            "AND is_favorite = 1"
        } else {
            ""
        };
        let limit = i64::from(filter.limit.unwrap_or(50));

        let query = format!(
            r"
            SELECT * FROM recipes
            WHERE user_id = $1 {favorites_clause}
            ORDER BY created_date DESC
            LIMIT $2
            "
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        rows.iter().map(row_to_recipe).collect()
    }

    /// Set the favorite flag on a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn set_favorite(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE recipes SET is_favorite = $1 WHERE id = $2 AND user_id = $3",
        )
        .bind(i64::from(is_favorite))
        .bind(recipe_id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update favorite: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id} not found"))
                .with_resource_id(recipe_id.to_string())
                .with_user_id(user_id));
        }
        Ok(())
    }

    /// Delete a recipe and its ratings
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn delete(&self, user_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Recipe {recipe_id} not found"))
                .with_resource_id(recipe_id.to_string())
                .with_user_id(user_id));
        }

        sqlx::query("DELETE FROM recipe_ratings WHERE recipe_id = $1")
            .bind(recipe_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete ratings: {e}")))?;

        Ok(())
    }

    /// Append a rating to a recipe
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the recipe does not exist for the user
    pub async fn add_rating(&self, user_id: Uuid, rating: &Rating) -> AppResult<()> {
        let exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE id = $1 AND user_id = $2")
                .bind(rating.recipe_id.to_string())
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check recipe: {e}")))?;
        if exists == 0 {
            return Err(AppError::not_found(format!(
                "Recipe {} not found",
                rating.recipe_id
            ))
            .with_resource_id(rating.recipe_id.to_string())
            .with_user_id(user_id));
        }

        sqlx::query(
            r"
            INSERT INTO recipe_ratings (id, recipe_id, rating, review, created_date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(rating.id.to_string())
        .bind(rating.recipe_id.to_string())
        .bind(i64::from(rating.rating))
        .bind(&rating.review)
        .bind(rating.created_date.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add rating: {e}")))?;

        Ok(())
    }

    /// List a recipe's ratings, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_ratings(&self, recipe_id: Uuid) -> AppResult<Vec<Rating>> {
        let rows = sqlx::query(
            r"
            SELECT id, recipe_id, rating, review, created_date
            FROM recipe_ratings
            WHERE recipe_id = $1
            ORDER BY created_date DESC
            ",
        )
        .bind(recipe_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ratings: {e}")))?;

        rows.iter().map(row_to_rating).collect()
    }

    /// Average star rating for a recipe, if any ratings exist
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn average_rating(&self, recipe_id: Uuid) -> AppResult<Option<f64>> {
        let avg: Option<f64> =
            sqlx::query_scalar("SELECT AVG(rating) FROM recipe_ratings WHERE recipe_id = $1")
                .bind(recipe_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to average ratings: {e}")))?;
        Ok(avg)
    }
}

fn parse_uuid(s: &str) -> AppResult<Uuid> {
    Uuid::parse_str(s).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp: {e}")))
}

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let ingredients_json: String = row.get("ingredients");
    let instructions_json: String = row.get("instructions");
    let servings: i64 = row.get("servings");
    let difficulty_json: String = row.get("difficulty");
    let tags_json: String = row.get("dietary_tags");
    let nutrition_json: String = row.get("nutritional_info");
    let additional_json: String = row.get("additional_items_needed");
    let warnings_json: String = row.get("health_warnings");
    let benefits_json: String = row.get("nutritional_benefits");
    let suitability_json: String = row.get("condition_suitability");
    let is_favorite: i64 = row.get("is_favorite");
    let created_date_str: String = row.get("created_date");

    let nutritional_info: NutritionalInfo = serde_json::from_str(&nutrition_json)?;
    let difficulty: Difficulty = serde_json::from_str(&difficulty_json)?;

    Ok(Recipe {
        id: parse_uuid(&id_str)?,
        user_id: parse_uuid(&user_id_str)?,
        title: row.get("title"),
        description: row.get("description"),
        ingredients: serde_json::from_str(&ingredients_json)?,
        instructions: serde_json::from_str(&instructions_json)?,
        prep_time: row.get("prep_time"),
        cook_time: row.get("cook_time"),
        total_time: row.get("total_time"),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        servings: servings as u32,
        difficulty,
        dietary_tags: serde_json::from_str(&tags_json)?,
        meal_type: row.get("meal_type"),
        nutritional_info,
        additional_items_needed: serde_json::from_str(&additional_json)?,
        health_warnings: serde_json::from_str(&warnings_json)?,
        nutritional_benefits: serde_json::from_str(&benefits_json)?,
        condition_suitability: serde_json::from_str(&suitability_json)?,
        is_favorite: is_favorite == 1,
        created_date: parse_timestamp(&created_date_str)?,
    })
}

fn row_to_rating(row: &SqliteRow) -> AppResult<Rating> {
    let id_str: String = row.get("id");
    let recipe_id_str: String = row.get("recipe_id");
    let rating: i64 = row.get("rating");
    let created_date_str: String = row.get("created_date");

    Ok(Rating {
        id: parse_uuid(&id_str)?,
        recipe_id: parse_uuid(&recipe_id_str)?,
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        rating: rating as u8,
        review: row.get("review"),
        created_date: parse_timestamp(&created_date_str)?,
    })
}
