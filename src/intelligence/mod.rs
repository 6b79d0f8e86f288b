// ABOUTME: Clinical constraint aggregation and suitability engine
// ABOUTME: Pure, deterministic analysis functions over catalog snapshots and recipes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Intelligence Module
//!
//! The analytical core of the crate: medication guidance aggregation,
//! nutrient severity classification, and per-condition suitability
//! evaluation. Every function here is a total, synchronous computation over
//! immutable inputs; they hold no state and are safe to call concurrently
//! for different users and recipes.

/// Medication guidance aggregation
pub mod guidance;
/// Condition suitability evaluation
pub mod suitability;
/// Nutrient severity classification
pub mod warnings;

pub use guidance::aggregate;
pub use suitability::{evaluate, ingredient_matches_allergy, nutritional_benefits};
pub use warnings::classify;
