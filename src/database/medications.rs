// ABOUTME: Database operations for the medication catalog and user medication links
// ABOUTME: Seeds curated food-interaction entries and manages per-user associations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::catalog::seed_medications;
use crate::errors::{AppError, AppResult};
use crate::models::{Medication, MedicationCategory, UserMedication};

/// Medication catalog and user association operations manager
pub struct MedicationsManager {
    pool: SqlitePool,
}

impl MedicationsManager {
    /// Create a new medications manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the built-in medication catalog when the table is empty
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn seed_if_empty(&self) -> AppResult<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medications")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count medications: {e}")))?;
        if count > 0 {
            return Ok(());
        }

        let seeds = seed_medications();
        for medication in &seeds {
            self.insert(medication).await?;
        }
        info!(count = seeds.len(), "Seeded medication catalog");
        Ok(())
    }

    /// List the full medication catalog ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_catalog(&self) -> AppResult<Vec<Medication>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, category, avoid_foods, recommended_foods, is_custom
            FROM medications
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list medications: {e}")))?;

        rows.iter().map(row_to_medication).collect()
    }

    /// Get a catalog medication by id
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, medication_id: Uuid) -> AppResult<Option<Medication>> {
        let row = sqlx::query(
            r"
            SELECT id, name, category, avoid_foods, recommended_foods, is_custom
            FROM medications
            WHERE id = $1
            ",
        )
        .bind(medication_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get medication: {e}")))?;

        row.map(|r| row_to_medication(&r)).transpose()
    }

    /// Add a custom medication to the catalog
    ///
    /// Custom entries carry no interaction lists; names are unique
    /// case-insensitively across the catalog.
    ///
    /// # Errors
    ///
    /// Returns a conflict error if the name already exists
    pub async fn add_custom(
        &self,
        name: &str,
        category: MedicationCategory,
    ) -> AppResult<Medication> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Medication name must not be empty"));
        }

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM medications WHERE LOWER(name) = LOWER($1)")
                .bind(trimmed)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to check medication: {e}")))?;
        if existing > 0 {
            return Err(AppError::conflict(format!(
                "Medication '{trimmed}' already exists"
            )));
        }

        let medication = Medication::custom(trimmed, category);
        self.insert(&medication).await?;
        Ok(medication)
    }

    /// Associate a catalog medication with a user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the medication id is unknown and a
    /// conflict error if the association already exists
    pub async fn add_user_medication(
        &self,
        user_id: Uuid,
        medication_id: Uuid,
    ) -> AppResult<UserMedication> {
        let Some(medication) = self.get(medication_id).await? else {
            return Err(AppError::not_found(format!(
                "Medication {medication_id} not found"
            ))
            .with_resource_id(medication_id.to_string()));
        };

        let existing: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_medications WHERE user_id = $1 AND medication_id = $2",
        )
        .bind(user_id.to_string())
        .bind(medication_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to check user medication: {e}")))?;
        if existing > 0 {
            return Err(AppError::conflict(format!(
                "Medication '{}' is already active for this user",
                medication.name
            )));
        }

        let added_at = Utc::now();
        sqlx::query(
            "INSERT INTO user_medications (user_id, medication_id, added_at) VALUES ($1, $2, $3)",
        )
        .bind(user_id.to_string())
        .bind(medication_id.to_string())
        .bind(added_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to add user medication: {e}")))?;

        Ok(UserMedication {
            user_id,
            medication_id,
            medication_name: medication.name,
            added_at,
        })
    }

    /// Remove a user's medication association (catalog entry is untouched)
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the association does not exist
    pub async fn remove_user_medication(
        &self,
        user_id: Uuid,
        medication_id: Uuid,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "DELETE FROM user_medications WHERE user_id = $1 AND medication_id = $2",
        )
        .bind(user_id.to_string())
        .bind(medication_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to remove user medication: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Medication {medication_id} is not active for this user"
            ))
            .with_resource_id(medication_id.to_string()));
        }
        Ok(())
    }

    /// List a user's medication associations, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_user_medications(&self, user_id: Uuid) -> AppResult<Vec<UserMedication>> {
        let rows = sqlx::query(
            r"
            SELECT um.user_id, um.medication_id, um.added_at, m.name
            FROM user_medications um
            JOIN medications m ON m.id = um.medication_id
            WHERE um.user_id = $1
            ORDER BY um.added_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list user medications: {e}")))?;

        rows.iter()
            .map(|row| {
                let user_id_str: String = row.get("user_id");
                let medication_id_str: String = row.get("medication_id");
                let added_at_str: String = row.get("added_at");
                Ok(UserMedication {
                    user_id: parse_uuid(&user_id_str)?,
                    medication_id: parse_uuid(&medication_id_str)?,
                    medication_name: row.get("name"),
                    added_at: parse_timestamp(&added_at_str)?,
                })
            })
            .collect()
    }

    /// Resolve a user's active medications to full catalog entries
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn active_medications(&self, user_id: Uuid) -> AppResult<Vec<Medication>> {
        let rows = sqlx::query(
            r"
            SELECT m.id, m.name, m.category, m.avoid_foods, m.recommended_foods, m.is_custom
            FROM user_medications um
            JOIN medications m ON m.id = um.medication_id
            WHERE um.user_id = $1
            ORDER BY m.name
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to load active medications: {e}")))?;

        rows.iter().map(row_to_medication).collect()
    }

    async fn insert(&self, medication: &Medication) -> AppResult<()> {
        let avoid_json = serde_json::to_string(&medication.avoid_foods)?;
        let recommended_json = serde_json::to_string(&medication.recommended_foods)?;

        sqlx::query(
            r"
            INSERT INTO medications (id, name, category, avoid_foods, recommended_foods, is_custom)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(medication.id.to_string())
        .bind(&medication.name)
        .bind(medication.category.as_str())
        .bind(&avoid_json)
        .bind(&recommended_json)
        .bind(i64::from(medication.is_custom))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert medication: {e}")))?;

        Ok(())
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

fn row_to_medication(row: &SqliteRow) -> AppResult<Medication> {
    let id_str: String = row.get("id");
    let category_str: String = row.get("category");
    let avoid_json: String = row.get("avoid_foods");
    let recommended_json: String = row.get("recommended_foods");
    let is_custom: i64 = row.get("is_custom");

    Ok(Medication {
        id: parse_uuid(&id_str)?,
        name: row.get("name"),
        category: MedicationCategory::parse(&category_str),
        avoid_foods: serde_json::from_str(&avoid_json)?,
        recommended_foods: serde_json::from_str(&recommended_json)?,
        is_custom: is_custom == 1,
    })
}
