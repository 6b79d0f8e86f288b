// ABOUTME: Main library entry point for the mealsense recipe engine
// ABOUTME: Health-aware recipe generation with medication guidance and nutrient grading
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![deny(unsafe_code)]

//! # Mealsense
//!
//! A health-aware recipe engine. Users declare medical conditions, allergies,
//! and active medications; the engine aggregates medication food guidance,
//! drives an external generation service from the user's pantry, then grades
//! each generated recipe's nutrients and renders per-condition suitability
//! verdicts before persisting it.
//!
//! ## Architecture
//!
//! - **Models**: Condition codes, health profiles, medications, recipes
//! - **Config**: Severity band tables with environment overrides
//! - **Intelligence**: Guidance aggregation, warning classification, suitability
//! - **Generation**: Request builder and the OpenAI-compatible generator client
//! - **Database**: `SQLite` stores for catalogs, pantries, profiles, recipes
//! - **Services**: The end-to-end generation pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mealsense::config::HealthConfig;
//! use mealsense::database::Database;
//! use mealsense::generation::OpenAiCompatibleGenerator;
//! use mealsense::services::{GenerateParams, RecipeService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Database::new("sqlite:mealsense.db").await?;
//!     db.seed_catalogs().await?;
//!
//!     let generator = Arc::new(OpenAiCompatibleGenerator::from_env()?);
//!     let service = RecipeService::new(db, generator, HealthConfig::load());
//!
//!     let user_id = uuid::Uuid::new_v4();
//!     let recipe = service
//!         .generate(
//!             user_id,
//!             GenerateParams {
//!                 pantry_items: vec!["chickpeas".into(), "spinach".into()],
//!                 dietary_preference: "vegetarian".into(),
//!                 meal_type: Some("dinner".into()),
//!                 servings: 2,
//!             },
//!         )
//!         .await?;
//!     println!("{} ({} warnings)", recipe.title, recipe.health_warnings.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod database;
pub mod errors;
pub mod generation;
pub mod intelligence;
pub mod logging;
pub mod models;
pub mod services;
