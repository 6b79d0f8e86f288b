// ABOUTME: Database operations for per-user pantry contents
// ABOUTME: Handles add/remove/clear with per-user duplicate detection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::PantryItem;

/// Pantry operations manager
pub struct PantryManager {
    pool: SqlitePool,
}

impl PantryManager {
    /// Create a new pantry manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's pantry, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<PantryItem>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, ingredient_name, quantity, notes, added_date
            FROM pantry_items
            WHERE user_id = $1
            ORDER BY added_date DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list pantry: {e}")))?;

        rows.iter().map(row_to_pantry_item).collect()
    }

    /// Add an item to a user's pantry
    ///
    /// Ingredient names are unique case-insensitively per user.
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the user already has the ingredient
    pub async fn add(
        &self,
        user_id: Uuid,
        ingredient_name: &str,
        quantity: Option<String>,
        notes: Option<String>,
    ) -> AppResult<PantryItem> {
        let trimmed = ingredient_name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Ingredient name must not be empty"));
        }

        let existing: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*) FROM pantry_items
            WHERE user_id = $1 AND LOWER(ingredient_name) = LOWER($2)
            ",
        )
        .bind(user_id.to_string())
        .bind(trimmed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check pantry item: {e}")))?;
        if existing > 0 {
            return Err(AppError::conflict(format!(
                "'{trimmed}' is already in the pantry"
            )));
        }

        let item = PantryItem {
            id: Uuid::new_v4(),
            user_id,
            ingredient_name: trimmed.to_owned(),
            quantity,
            notes,
            added_date: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO pantry_items (id, user_id, ingredient_name, quantity, notes, added_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(item.id.to_string())
        .bind(item.user_id.to_string())
        .bind(&item.ingredient_name)
        .bind(&item.quantity)
        .bind(&item.notes)
        .bind(item.added_date.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add pantry item: {e}")))?;

        Ok(item)
    }

    /// Remove one pantry item by id
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the item does not exist for the user
    pub async fn remove(&self, user_id: Uuid, item_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM pantry_items WHERE id = $1 AND user_id = $2")
            .bind(item_id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to remove pantry item: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Pantry item {item_id} not found"))
                .with_resource_id(item_id.to_string()));
        }
        Ok(())
    }

    /// Remove every item from a user's pantry
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn clear(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM pantry_items WHERE user_id = $1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear pantry: {e}")))?;
        Ok(result.rows_affected())
    }
}

fn row_to_pantry_item(row: &SqliteRow) -> AppResult<PantryItem> {
    let id_str: String = row.get("id");
    let user_id_str: String = row.get("user_id");
    let added_date_str: String = row.get("added_date");

    Ok(PantryItem {
        id: Uuid::parse_str(&id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        user_id: Uuid::parse_str(&user_id_str)
            .map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))?,
        ingredient_name: row.get("ingredient_name"),
        quantity: row.get("quantity"),
        notes: row.get("notes"),
        added_date: DateTime::parse_from_rfc3339(&added_date_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::internal(format!("Invalid timestamp: {e}")))?,
    })
}
