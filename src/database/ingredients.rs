// ABOUTME: Database operations for the ingredient catalog
// ABOUTME: Seeds the built-in list and supports filtered listing plus custom additions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::catalog::seed_ingredients;
use crate::errors::{AppError, AppResult};
use crate::models::{Ingredient, IngredientCategory};

/// Filter options for listing ingredients
#[derive(Debug, Clone, Default)]
pub struct IngredientFilter {
    /// Restrict to one category
    pub category: Option<IngredientCategory>,
    /// Case-insensitive substring match on the name
    pub search: Option<String>,
}

/// Ingredient catalog operations manager
pub struct IngredientsManager {
    pool: SqlitePool,
}

impl IngredientsManager {
    /// Create a new ingredients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the built-in ingredient catalog when the table is empty
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn seed_if_empty(&self) -> AppResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ingredients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count ingredients: {e}")))?;
        if count > 0 {
            return Ok(());
        }

        let seeds = seed_ingredients();
        for ingredient in &seeds {
            sqlx::query("INSERT INTO ingredients (id, name, category) VALUES ($1, $2, $3)")
                .bind(ingredient.id.to_string())
                .bind(&ingredient.name)
                .bind(ingredient.category.as_str())
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to seed ingredient: {e}")))?;
        }
        info!(count = seeds.len(), "Seeded ingredient catalog");
        Ok(())
    }

    /// List catalog ingredients with optional category and search filters
    ///
    /// Results are ordered by name for deterministic output.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, filter: &IngredientFilter) -> AppResult<Vec<Ingredient>> {
        let category = filter.category.map(|c| c.as_str().to_owned());
        let search = filter
            .search
            .as_ref()
            .map(|s| format!("%{}%", s.to_lowercase()));

        let rows = sqlx::query(
            r"
            SELECT id, name, category
            FROM ingredients
            WHERE ($1 IS NULL OR category = $1)
              AND ($2 IS NULL OR LOWER(name) LIKE $2)
            ORDER BY name
            ",
        )
        .bind(category)
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list ingredients: {e}")))?;

        rows.iter().map(row_to_ingredient).collect()
    }

    /// Add a custom ingredient to the catalog
    ///
    /// Names are unique case-insensitively across the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the name already exists, or a database
    /// error if the insert fails
    pub async fn add_custom(
        &self,
        name: &str,
        category: IngredientCategory,
    ) -> AppResult<Ingredient> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Ingredient name must not be empty"));
        }

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ingredients WHERE LOWER(name) = LOWER($1)")
                .bind(trimmed)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check ingredient: {e}")))?;
        if existing > 0 {
            return Err(AppError::conflict(format!(
                "Ingredient '{trimmed}' already exists"
            )));
        }

        let ingredient = Ingredient {
            id: Uuid::new_v4(),
            name: trimmed.to_owned(),
            category,
        };

        sqlx::query("INSERT INTO ingredients (id, name, category) VALUES ($1, $2, $3)")
            .bind(ingredient.id.to_string())
            .bind(&ingredient.name)
            .bind(ingredient.category.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to add ingredient: {e}")))?;

        Ok(ingredient)
    }
}

fn row_to_ingredient(row: &SqliteRow) -> AppResult<Ingredient> {
    let id_str: String = row.get("id");
    let category_str: String = row.get("category");

    Ok(Ingredient {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        name: row.get("name"),
        category: IngredientCategory::parse(&category_str),
    })
}
