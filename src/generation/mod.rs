// ABOUTME: Generation request model and builder with boundary validation
// ABOUTME: Assembles pantry, preference, and aggregated guidance into a structured request
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Generation request assembly
//!
//! The builder validates the user's selection and packages everything the
//! external generation service needs: pantry items, dietary preference,
//! meal type, servings, active conditions, and the aggregated guidance as
//! hard exclusion / soft inclusion hints. The builder never chooses
//! ingredients itself.

/// Recipe generator trait and the OpenAI-compatible implementation
pub mod provider;

pub use provider::{GeneratedRecipe, OpenAiCompatibleGenerator, RecipeGenerator};

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::{ConditionCode, FoodGuidance, HealthProfile};

/// Meal type defaulted when the caller does not specify one
///
/// Matches the behavior of the original generation endpoint.
const DEFAULT_MEAL_TYPE: &str = "any meal";

/// Structured request sent to the external generation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Selected pantry ingredient names (non-empty)
    pub pantry_items: Vec<String>,
    /// Dietary preference ("vegan", "flexitarian", ...)
    pub dietary_preference: String,
    /// Meal type ("dinner", "any meal", ...)
    pub meal_type: String,
    /// Number of servings (always ≥ 1)
    pub servings: u32,
    /// Active condition codes, passed as context hints
    pub conditions: Vec<ConditionCode>,
    /// Declared allergies, passed as hard exclusions
    pub allergies: Vec<String>,
    /// Foods to exclude (hard hints, from aggregated medication guidance)
    pub exclude_foods: Vec<String>,
    /// Foods to prefer (soft hints, from aggregated medication guidance)
    pub prefer_foods: Vec<String>,
}

/// Builder for [`GenerationRequest`] with boundary validation
#[derive(Debug, Clone)]
pub struct GenerationRequestBuilder {
    pantry_items: Vec<String>,
    dietary_preference: String,
    meal_type: Option<String>,
    servings: u32,
}

impl GenerationRequestBuilder {
    /// Start a builder from the user's pantry selection and preference
    #[must_use]
    pub fn new(pantry_items: Vec<String>, dietary_preference: impl Into<String>) -> Self {
        Self {
            pantry_items,
            dietary_preference: dietary_preference.into(),
            meal_type: None,
            servings: 2,
        }
    }

    /// Set the meal type (defaults to "any meal" when unset)
    #[must_use]
    pub fn meal_type(mut self, meal_type: impl Into<String>) -> Self {
        self.meal_type = Some(meal_type.into());
        self
    }

    /// Set the serving count; values below 1 are clamped to 1
    #[must_use]
    pub const fn servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Assemble and validate the request
    ///
    /// Embeds the profile's conditions and allergies, and the aggregated
    /// guidance's avoid list as hard exclusion hints / recommended list as
    /// soft inclusion hints.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection` when no pantry items were selected and
    /// `InvalidInput` when the dietary preference is blank.
    pub fn build(
        self,
        profile: &HealthProfile,
        guidance: &FoodGuidance,
    ) -> AppResult<GenerationRequest> {
        if self.pantry_items.iter().all(|i| i.trim().is_empty()) {
            return Err(AppError::empty_selection());
        }
        if self.dietary_preference.trim().is_empty() {
            return Err(AppError::invalid_input(
                "Dietary preference must not be empty",
            ));
        }

        Ok(GenerationRequest {
            pantry_items: self
                .pantry_items
                .into_iter()
                .filter(|i| !i.trim().is_empty())
                .collect(),
            dietary_preference: self.dietary_preference,
            meal_type: self
                .meal_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MEAL_TYPE.to_owned()),
            servings: self.servings.max(1),
            conditions: profile.conditions.iter().copied().collect(),
            allergies: profile.allergies.clone(),
            exclude_foods: guidance.foods_to_avoid.clone(),
            prefer_foods: guidance.recommended_foods.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_rejected() {
        let result = GenerationRequestBuilder::new(vec![], "vegan")
            .build(&HealthProfile::default(), &FoodGuidance::default());
        assert_eq!(
            result.unwrap_err().code,
            crate::errors::ErrorCode::EmptySelection
        );
    }

    #[test]
    fn test_servings_clamped_to_one() {
        let request = GenerationRequestBuilder::new(vec!["rice".into()], "vegetarian")
            .servings(0)
            .build(&HealthProfile::default(), &FoodGuidance::default())
            .unwrap();
        assert_eq!(request.servings, 1);
    }

    #[test]
    fn test_meal_type_defaults() {
        let request = GenerationRequestBuilder::new(vec!["rice".into()], "vegetarian")
            .build(&HealthProfile::default(), &FoodGuidance::default())
            .unwrap();
        assert_eq!(request.meal_type, "any meal");
    }
}
