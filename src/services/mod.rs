// ABOUTME: Service layer tying stores, the constraint engine, and generation together
// ABOUTME: Exposes the end-to-end recipe pipeline and recipe lifecycle operations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Service layer
//!
//! [`RecipeService`] is the single entry point callers use: it loads the
//! user's health context, aggregates medication guidance, drives the
//! external generator, annotates the result, and persists it.

mod pipeline;

pub use pipeline::{GenerateParams, RecipeService};
