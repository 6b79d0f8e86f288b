// ABOUTME: Recipe generator trait and OpenAI-compatible chat-completions client
// ABOUTME: Prompts for strict JSON, strips markdown fences, parses lenient nutrient units
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Recipe Generation Provider
//!
//! The engine treats natural-language recipe generation as an opaque
//! external service behind the [`RecipeGenerator`] trait. The bundled
//! implementation talks to any OpenAI-compatible chat-completions endpoint
//! (hosted APIs, Ollama, vLLM) configured via environment variables:
//!
//! - `MEALSENSE_GENERATOR_URL`: base URL (default `http://localhost:11434/v1`)
//! - `MEALSENSE_GENERATOR_API_KEY`: bearer token (optional for local servers)
//! - `MEALSENSE_GENERATOR_MODEL`: model name (default `qwen2.5:14b-instruct`)
//!
//! Failures are surfaced as `GenerationFailed` / `GenerationUnavailable`
//! errors; the pipeline persists nothing on failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::generation::GenerationRequest;
use crate::models::{Difficulty, NutritionalInfo, RecipeIngredient};

const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
const DEFAULT_MODEL: &str = "qwen2.5:14b-instruct";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// A recipe as returned by the generation service: base fields only,
/// without the derived health annotations the engine computes afterward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Recipe title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Ordered ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Preparation time ("15 minutes")
    #[serde(default)]
    pub prep_time: String,
    /// Cooking time
    #[serde(default)]
    pub cook_time: String,
    /// Total time
    #[serde(default)]
    pub total_time: String,
    /// Number of servings
    pub servings: u32,
    /// Reported difficulty
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Dietary tags
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    /// Meal type
    #[serde(default)]
    pub meal_type: String,
    /// Per-serving nutrient values (lenient wire format)
    pub nutritional_info: WireNutrition,
    /// Items the recipe needs that were not in the pantry selection
    #[serde(default)]
    pub additional_items_needed: Vec<String>,
}

/// Nutrient value that tolerates both `12.5` and `"12.5g"` wire forms
///
/// Generation models frequently answer with unit-suffixed strings even when
/// asked for numbers; parsing strips a trailing unit instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Number(f64),
    Text(String),
}

impl WireValue {
    /// Numeric value, stripping any trailing unit suffix from text forms
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let numeric: String = s
                    .trim()
                    .chars()
                    .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
                    .collect();
                numeric.parse().ok()
            }
        }
    }
}

/// Nutrient block in the generation service's response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireNutrition {
    pub calories: WireValue,
    pub protein: WireValue,
    pub carbs: WireValue,
    pub fat: WireValue,
    pub fiber: WireValue,
    #[serde(default)]
    pub sodium: Option<WireValue>,
    #[serde(default)]
    pub sugar: Option<WireValue>,
    #[serde(default)]
    pub saturated_fat: Option<WireValue>,
    #[serde(default)]
    pub cholesterol: Option<WireValue>,
    #[serde(default)]
    pub potassium: Option<WireValue>,
}

impl WireNutrition {
    /// Convert to the engine's nutrient profile
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` when a required nutrient cannot be parsed.
    pub fn into_nutritional_info(self) -> AppResult<NutritionalInfo> {
        let required = |value: &WireValue, name: &str| {
            value.as_f64().ok_or_else(|| {
                AppError::upstream_generation(format!(
                    "Generation service returned unparseable {name} value"
                ))
            })
        };

        Ok(NutritionalInfo {
            calories: required(&self.calories, "calories")?,
            protein_g: required(&self.protein, "protein")?,
            carbs_g: required(&self.carbs, "carbs")?,
            fat_g: required(&self.fat, "fat")?,
            fiber_g: required(&self.fiber, "fiber")?,
            sodium_mg: self.sodium.as_ref().and_then(WireValue::as_f64),
            sugar_g: self.sugar.as_ref().and_then(WireValue::as_f64),
            saturated_fat_g: self.saturated_fat.as_ref().and_then(WireValue::as_f64),
            cholesterol_mg: self.cholesterol.as_ref().and_then(WireValue::as_f64),
            potassium_mg: self.potassium.as_ref().and_then(WireValue::as_f64),
        })
    }
}

/// External recipe generation service
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Generate a recipe for the given structured request
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` / `GenerationUnavailable` on service
    /// errors; implementations never return a partially-populated recipe.
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GeneratedRecipe>;
}

// ── OpenAI-compatible wire types ────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// OpenAI-compatible chat-completions recipe generator
pub struct OpenAiCompatibleGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiCompatibleGenerator {
    /// Create a generator for an explicit endpoint
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key,
            model: model.into(),
        })
    }

    /// Create a generator from environment configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn from_env() -> AppResult<Self> {
        let base_url =
            std::env::var("MEALSENSE_GENERATOR_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let api_key = std::env::var("MEALSENSE_GENERATOR_API_KEY").ok();
        let model =
            std::env::var("MEALSENSE_GENERATOR_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Self::new(base_url, api_key, model)
    }

    /// Build the JSON-only generation prompt from a structured request
    #[must_use]
    pub fn build_prompt(request: &GenerationRequest) -> String {
        let mut prompt = format!(
            "You are an expert chef and nutritionist. Create a detailed, delicious {} recipe for {}.\n\n\
             Available ingredients: {}\n\n\
             Requirements:\n\
             - Recipe must be {}\n\
             - Suitable for {}\n\
             - Serves {} people\n\
             - Use as many of the available ingredients as possible\n\
             - List any additional common ingredients needed\n\
             - Include per-serving nutritional information (calories, protein, carbs, fat, fiber, sodium, sugar, saturated_fat, cholesterol, potassium)\n",
            request.dietary_preference,
            request.meal_type,
            request.pantry_items.join(", "),
            request.dietary_preference,
            request.meal_type,
            request.servings,
        );

        if !request.exclude_foods.is_empty() || !request.allergies.is_empty() {
            let mut excluded: Vec<&str> = request
                .exclude_foods
                .iter()
                .map(String::as_str)
                .collect();
            excluded.extend(request.allergies.iter().map(String::as_str));
            prompt.push_str(&format!(
                "- MUST NOT contain any of: {}\n",
                excluded.join(", ")
            ));
        }
        if !request.prefer_foods.is_empty() {
            prompt.push_str(&format!(
                "- Where it fits naturally, prefer: {}\n",
                request.prefer_foods.join(", ")
            ));
        }
        if !request.conditions.is_empty() {
            let conditions: Vec<&str> =
                request.conditions.iter().map(|c| c.as_str()).collect();
            prompt.push_str(&format!(
                "- The cook manages these health conditions; keep nutrient levels appropriate: {}\n",
                conditions.join(", ")
            ));
        }

        prompt.push_str(
            "\nReturn the recipe as pure JSON (no markdown) with this exact shape:\n\
             {\"title\": \"...\", \"description\": \"...\", \
             \"ingredients\": [{\"amount\": \"2 cups\", \"item\": \"...\"}], \
             \"instructions\": [\"Step 1\"], \
             \"prep_time\": \"X minutes\", \"cook_time\": \"X minutes\", \"total_time\": \"X minutes\", \
             \"servings\": N, \"difficulty\": \"easy|medium|hard\", \
             \"dietary_tags\": [\"...\"], \"meal_type\": \"...\", \
             \"nutritional_info\": {\"calories\": 0, \"protein\": 0, \"carbs\": 0, \"fat\": 0, \"fiber\": 0, \
             \"sodium\": 0, \"sugar\": 0, \"saturated_fat\": 0, \"cholesterol\": 0, \"potassium\": 0}, \
             \"additional_items_needed\": [\"...\"]}",
        );

        prompt
    }

    /// Strip markdown code fences a model may wrap around its JSON answer
    #[must_use]
    pub fn strip_fences(content: &str) -> &str {
        let trimmed = content.trim();
        let Some(inner) = trimmed.strip_prefix("```") else {
            return trimmed;
        };
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        inner.strip_suffix("```").unwrap_or(inner).trim()
    }
}

#[async_trait]
impl RecipeGenerator for OpenAiCompatibleGenerator {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<GeneratedRecipe> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: "You are an expert chef and nutritionist specializing in creating delicious, healthy recipes.".into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: Self::build_prompt(request),
                },
            ],
            temperature: 0.7,
        };

        debug!(
            model = %self.model,
            pantry_items = request.pantry_items.len(),
            "Requesting recipe generation"
        );

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(ref key) = self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await.map_err(|e| {
            warn!("Generation service unreachable: {e}");
            AppError::upstream_unavailable(format!("Generation service unreachable: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream_generation(format!(
                "Generation service returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::upstream_generation(format!("Malformed completion response: {e}"))
        })?;

        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| {
                AppError::upstream_generation("Generation service returned no choices")
            })?;

        serde_json::from_str(Self::strip_fences(content)).map_err(|e| {
            AppError::upstream_generation(format!("Generation service returned invalid recipe JSON: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences() {
        assert_eq!(OpenAiCompatibleGenerator::strip_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(
            OpenAiCompatibleGenerator::strip_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(
            OpenAiCompatibleGenerator::strip_fences("```\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn test_wire_value_parsing() {
        assert_eq!(WireValue::Number(12.5).as_f64(), Some(12.5));
        assert_eq!(WireValue::Text("12.5g".into()).as_f64(), Some(12.5));
        assert_eq!(WireValue::Text("300 mg".into()).as_f64(), Some(300.0));
        assert_eq!(WireValue::Text("n/a".into()).as_f64(), None);
    }

    #[test]
    fn test_wire_nutrition_parses_mixed_forms() {
        let json = r#"{
            "calories": 420,
            "protein": "18g",
            "carbs": "55g",
            "fat": 12.5,
            "fiber": "6g",
            "sodium": "480mg"
        }"#;
        let wire: WireNutrition = serde_json::from_str(json).unwrap();
        let info = wire.into_nutritional_info().unwrap();
        assert!((info.calories - 420.0).abs() < f64::EPSILON);
        assert!((info.protein_g - 18.0).abs() < f64::EPSILON);
        assert_eq!(info.sodium_mg, Some(480.0));
        assert_eq!(info.sugar_g, None);
    }
}
