// ABOUTME: Database operations for user health profiles
// ABOUTME: Profiles are stored as one JSON document per user and replaced wholesale on save
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::HealthProfile;

/// Health profile operations manager
pub struct ProfilesManager {
    pool: SqlitePool,
}

impl ProfilesManager {
    /// Create a new profiles manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user's health profile, if one has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or the stored document
    /// does not parse
    pub async fn get(&self, user_id: Uuid) -> AppResult<Option<HealthProfile>> {
        let row: Option<String> =
            sqlx::query_scalar("SELECT profile FROM health_profiles WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|json| serde_json::from_str(&json).map_err(AppError::from))
            .transpose()
    }

    /// Save a user's health profile, replacing any previous version
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn save(&self, user_id: Uuid, profile: &HealthProfile) -> AppResult<()> {
        let json = serde_json::to_string(profile)?;
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO health_profiles (user_id, profile, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT(user_id) DO UPDATE SET profile = $2, updated_at = $3
            ",
        )
        .bind(user_id.to_string())
        .bind(&json)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;

        debug!(
            user_id = %user_id,
            conditions = profile.conditions.len(),
            allergies = profile.allergies.len(),
            "Saved health profile"
        );
        Ok(())
    }
}
