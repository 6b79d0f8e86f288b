// ABOUTME: SQLite persistence layer for catalogs, pantries, profiles, and recipes
// ABOUTME: Owns the connection pool, schema migrations, and per-table managers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Database Management
//!
//! Connection handling and schema migrations for the recipe engine store.
//! Each table family gets its own manager over a shared [`SqlitePool`].

mod ingredients;
mod medications;
mod pantry;
mod profiles;
mod recipes;

pub use ingredients::{IngredientFilter, IngredientsManager};
pub use medications::MedicationsManager;
pub use pantry::PantryManager;
pub use profiles::ProfilesManager;
pub use recipes::{ListRecipesFilter, RecipesManager};

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database handle for the recipe engine store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Manager for the ingredient catalog
    #[must_use]
    pub fn ingredients(&self) -> IngredientsManager {
        IngredientsManager::new(self.pool.clone())
    }

    /// Manager for the medication catalog and user associations
    #[must_use]
    pub fn medications(&self) -> MedicationsManager {
        MedicationsManager::new(self.pool.clone())
    }

    /// Manager for per-user pantries
    #[must_use]
    pub fn pantry(&self) -> PantryManager {
        PantryManager::new(self.pool.clone())
    }

    /// Manager for health profiles
    #[must_use]
    pub fn profiles(&self) -> ProfilesManager {
        ProfilesManager::new(self.pool.clone())
    }

    /// Manager for recipes and ratings
    #[must_use]
    pub fn recipes(&self) -> RecipesManager {
        RecipesManager::new(self.pool.clone())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a table creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_catalogs().await?;
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        Ok(())
    }

    /// Create catalog tables
    async fn migrate_catalogs(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS medications (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                avoid_foods TEXT NOT NULL,
                recommended_foods TEXT NOT NULL,
                is_custom INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create per-user tables (profiles, medication links, pantry)
    async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_profiles (
                user_id TEXT PRIMARY KEY,
                profile TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_medications (
                user_id TEXT NOT NULL,
                medication_id TEXT NOT NULL,
                added_at TEXT NOT NULL,
                PRIMARY KEY (user_id, medication_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pantry_items (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                ingredient_name TEXT NOT NULL,
                quantity TEXT,
                notes TEXT,
                added_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create recipe and rating tables
    async fn migrate_recipes(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                ingredients TEXT NOT NULL,
                instructions TEXT NOT NULL,
                prep_time TEXT NOT NULL,
                cook_time TEXT NOT NULL,
                total_time TEXT NOT NULL,
                servings INTEGER NOT NULL,
                difficulty TEXT NOT NULL,
                dietary_tags TEXT NOT NULL,
                meal_type TEXT NOT NULL,
                nutritional_info TEXT NOT NULL,
                additional_items_needed TEXT NOT NULL,
                health_warnings TEXT NOT NULL,
                nutritional_benefits TEXT NOT NULL,
                condition_suitability TEXT NOT NULL,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ratings (
                id TEXT PRIMARY KEY,
                recipe_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                review TEXT,
                created_date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Seed the ingredient and medication catalogs when their tables are empty
    ///
    /// # Errors
    ///
    /// Returns an error if a seed insert fails
    pub async fn seed_catalogs(&self) -> crate::errors::AppResult<()> {
        self.ingredients().seed_if_empty().await?;
        self.medications().seed_if_empty().await?;
        Ok(())
    }
}
