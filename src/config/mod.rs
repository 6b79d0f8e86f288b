// ABOUTME: Configuration module for the mealsense engine
// ABOUTME: Re-exports the health analysis configuration tables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Configuration management for nutrient thresholds and advisory templates

pub mod health;

pub use health::{HealthConfig, Nutrient, SeverityBands};
