// ABOUTME: Core domain models for health profiles, medications, ingredients, and recipes
// ABOUTME: Defines ConditionCode, FoodGuidance, HealthWarning, and the annotated Recipe type
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Common data structures shared across the engine, stores, and the
//! generation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::AppError;

/// Enumerated medical conditions a health profile can declare
///
/// The engine treats unknown condition codes as a precondition violation:
/// parsing fails loudly at the boundary rather than silently dropping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCode {
    /// High blood pressure
    Hypertension,
    /// Diabetes (type 1 or type 2)
    Diabetes,
    /// Pre-diabetes
    PreDiabetes,
    /// Chronic kidney disease
    KidneyDisease,
    /// Heart disease / cardiovascular disease
    HeartDisease,
    /// High cholesterol
    HighCholesterol,
    /// Liver disease
    LiverDisease,
    /// Cancer (history or active)
    CancerHistory,
    /// Digestive disorders (IBS, Crohn's, ...)
    DigestiveDisorders,
    /// Autoimmune conditions
    Autoimmune,
    /// Thyroid disorders
    ThyroidDisorders,
    /// Osteoporosis
    Osteoporosis,
    /// Gout
    Gout,
}

impl ConditionCode {
    /// All defined condition codes
    pub const ALL: [Self; 13] = [
        Self::Hypertension,
        Self::Diabetes,
        Self::PreDiabetes,
        Self::KidneyDisease,
        Self::HeartDisease,
        Self::HighCholesterol,
        Self::LiverDisease,
        Self::CancerHistory,
        Self::DigestiveDisorders,
        Self::Autoimmune,
        Self::ThyroidDisorders,
        Self::Osteoporosis,
        Self::Gout,
    ];

    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension",
            Self::Diabetes => "diabetes",
            Self::PreDiabetes => "pre_diabetes",
            Self::KidneyDisease => "kidney_disease",
            Self::HeartDisease => "heart_disease",
            Self::HighCholesterol => "high_cholesterol",
            Self::LiverDisease => "liver_disease",
            Self::CancerHistory => "cancer_history",
            Self::DigestiveDisorders => "digestive_disorders",
            Self::Autoimmune => "autoimmune",
            Self::ThyroidDisorders => "thyroid_disorders",
            Self::Osteoporosis => "osteoporosis",
            Self::Gout => "gout",
        }
    }

    /// Human-readable label for display
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hypertension => "Hypertension (High Blood Pressure)",
            Self::Diabetes => "Diabetes (Type 1 or Type 2)",
            Self::PreDiabetes => "Pre-Diabetes",
            Self::KidneyDisease => "Chronic Kidney Disease",
            Self::HeartDisease => "Heart Disease / Cardiovascular Disease",
            Self::HighCholesterol => "High Cholesterol",
            Self::LiverDisease => "Liver Disease",
            Self::CancerHistory => "Cancer (History or Active)",
            Self::DigestiveDisorders => "Digestive Disorders",
            Self::Autoimmune => "Autoimmune Conditions",
            Self::ThyroidDisorders => "Thyroid Disorders",
            Self::Osteoporosis => "Osteoporosis",
            Self::Gout => "Gout",
        }
    }
}

impl FromStr for ConditionCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::invalid_input(format!("Unknown condition code: {s}")))
    }
}

impl fmt::Display for ConditionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical activity level for a health profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Exercise 1-3 days/week
    Light,
    /// Exercise 3-5 days/week
    Moderate,
    /// Exercise 6-7 days/week
    VeryActive,
    /// Physical job plus exercise
    ExtraActive,
}

/// Age bucket for a health profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AgeRange {
    #[serde(rename = "18-30")]
    #[default]
    From18To30,
    #[serde(rename = "31-40")]
    From31To40,
    #[serde(rename = "41-50")]
    From41To50,
    #[serde(rename = "51-60")]
    From51To60,
    #[serde(rename = "61-70")]
    From61To70,
    #[serde(rename = "70+")]
    Over70,
}

/// A user's declared health context
///
/// Owned exclusively by one user and mutated wholesale on save (replace,
/// not patch); no history is retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Active medical conditions (deterministic iteration order)
    pub conditions: std::collections::BTreeSet<ConditionCode>,
    /// Declared food allergies ("Peanuts", "Shellfish", ...)
    pub allergies: Vec<String>,
    /// Dietary restrictions ("vegan", "gluten-free", ...)
    pub dietary_restrictions: Vec<String>,
    /// Age bucket
    pub age_range: AgeRange,
    /// Physical activity level
    pub activity_level: ActivityLevel,
    /// Health and wellness goals ("Weight loss", "Heart health", ...)
    pub health_goals: Vec<String>,
}

/// Medication category determining the vitamin advisory template
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MedicationCategory {
    Diabetes,
    Hypertension,
    Cholesterol,
    Thyroid,
    AcidReflux,
    BloodThinner,
    #[default]
    Other,
}

impl MedicationCategory {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Diabetes => "diabetes",
            Self::Hypertension => "hypertension",
            Self::Cholesterol => "cholesterol",
            Self::Thyroid => "thyroid",
            Self::AcidReflux => "acid_reflux",
            Self::BloodThinner => "blood_thinner",
            Self::Other => "other",
        }
    }

    /// Parse from storage string representation (unknown maps to Other)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "diabetes" => Self::Diabetes,
            "hypertension" => Self::Hypertension,
            "cholesterol" => Self::Cholesterol,
            "thyroid" => Self::Thyroid,
            "acid_reflux" => Self::AcidReflux,
            "blood_thinner" => Self::BloodThinner,
            _ => Self::Other,
        }
    }
}

/// A catalog medication with known food interactions
///
/// Catalog entries are shared and immutable once created; custom entries
/// are appended, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    /// Unique identifier
    pub id: Uuid,
    /// Display name (unique case-insensitively across the catalog)
    pub name: String,
    /// Category for advisory templates
    pub category: MedicationCategory,
    /// Foods known to interact adversely with this medication
    pub avoid_foods: Vec<String>,
    /// Foods that support this medication's therapeutic goal
    pub recommended_foods: Vec<String>,
    /// Whether this entry was user-created
    pub is_custom: bool,
}

impl Medication {
    /// Create a custom medication with empty interaction lists
    #[must_use]
    pub fn custom(name: impl Into<String>, category: MedicationCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category,
            avoid_foods: Vec::new(),
            recommended_foods: Vec::new(),
            is_custom: true,
        }
    }
}

/// Association between a user and a catalog medication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMedication {
    /// Owning user
    pub user_id: Uuid,
    /// Catalog medication id
    pub medication_id: Uuid,
    /// Medication display name (denormalized for listing)
    pub medication_name: String,
    /// When the association was created
    pub added_at: DateTime<Utc>,
}

/// Ingredient category for catalog organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Vegetables,
    Fruits,
    Grains,
    Proteins,
    Dairy,
    NutsSeeds,
    Spices,
    Condiments,
    Canned,
    #[default]
    Other,
}

impl IngredientCategory {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetables => "vegetables",
            Self::Fruits => "fruits",
            Self::Grains => "grains",
            Self::Proteins => "proteins",
            Self::Dairy => "dairy",
            Self::NutsSeeds => "nuts_seeds",
            Self::Spices => "spices",
            Self::Condiments => "condiments",
            Self::Canned => "canned",
            Self::Other => "other",
        }
    }

    /// Parse from storage string representation (unknown maps to Other)
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "vegetables" => Self::Vegetables,
            "fruits" => Self::Fruits,
            "grains" => Self::Grains,
            "proteins" => Self::Proteins,
            "dairy" => Self::Dairy,
            "nuts_seeds" => Self::NutsSeeds,
            "spices" => Self::Spices,
            "condiments" => Self::Condiments,
            "canned" => Self::Canned,
            _ => Self::Other,
        }
    }
}

/// A catalog ingredient (append-only, name unique case-insensitively)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Category
    pub category: IngredientCategory,
}

/// An item in a user's pantry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PantryItem {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Ingredient name (unique per user)
    pub ingredient_name: String,
    /// Optional free-form quantity ("2 cups", "1 bag")
    pub quantity: Option<String>,
    /// Optional notes ("soft", "fresh")
    pub notes: Option<String>,
    /// When the item was added
    pub added_date: DateTime<Utc>,
}

/// Per-serving nutrient values for a recipe
///
/// Negative values are a precondition violation; [`NutritionalInfo::validate`]
/// fails loudly at the boundary instead of clamping.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionalInfo {
    /// Calories per serving (kcal)
    pub calories: f64,
    /// Protein per serving (g)
    pub protein_g: f64,
    /// Carbohydrates per serving (g)
    pub carbs_g: f64,
    /// Fat per serving (g)
    pub fat_g: f64,
    /// Fiber per serving (g)
    pub fiber_g: f64,
    /// Sodium per serving (mg), if reported
    pub sodium_mg: Option<f64>,
    /// Sugar per serving (g), if reported
    pub sugar_g: Option<f64>,
    /// Saturated fat per serving (g), if reported
    pub saturated_fat_g: Option<f64>,
    /// Cholesterol per serving (mg), if reported
    pub cholesterol_mg: Option<f64>,
    /// Potassium per serving (mg), if reported
    pub potassium_mg: Option<f64>,
}

impl NutritionalInfo {
    /// Validate that no nutrient value is negative
    ///
    /// # Errors
    ///
    /// Returns an error naming the first negative field.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("calories", Some(self.calories)),
            ("protein", Some(self.protein_g)),
            ("carbs", Some(self.carbs_g)),
            ("fat", Some(self.fat_g)),
            ("fiber", Some(self.fiber_g)),
            ("sodium", self.sodium_mg),
            ("sugar", self.sugar_g),
            ("saturated_fat", self.saturated_fat_g),
            ("cholesterol", self.cholesterol_mg),
            ("potassium", self.potassium_mg),
        ];
        for (name, value) in fields {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(AppError::new(
                        crate::errors::ErrorCode::ValueOutOfRange,
                        format!("Nutrient '{name}' must not be negative (got {v})"),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Severity grade for a nutrient warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Below the moderate threshold; never emitted as a warning
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Severity {
    /// Convert to storage string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severity-graded nutrient warning attached to a generated recipe
///
/// Immutable once attached to a recipe instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthWarning {
    /// Nutrient name ("sodium", "sugar", ...)
    pub category: String,
    /// Graded severity (always Moderate or above when emitted)
    pub level: Severity,
    /// The recipe's per-serving value for this nutrient
    pub amount: f64,
    /// Measurement unit ("mg" or "g")
    pub unit: String,
    /// Condition-independent guidance line
    pub general_guidance: String,
    /// Per-condition guidance for each matching active condition
    pub condition_specific: BTreeMap<ConditionCode, String>,
}

/// Suitability verdict for one condition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    /// Whether the recipe is appropriate for the condition
    pub suitable: bool,
    /// Names the disqualifying nutrient/ingredient, or affirms suitability
    pub notes: String,
}

/// Aggregated food guidance derived from a user's active medications
///
/// Derived, never persisted; recomputation is deterministic for the same
/// medication set regardless of ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodGuidance {
    /// Foods supporting the medications' therapeutic goals (deduplicated)
    pub recommended_foods: Vec<String>,
    /// Foods with known adverse interactions (deduplicated, wins conflicts)
    pub foods_to_avoid: Vec<String>,
    /// One advisory line per medication category present
    pub vitamin_recommendations: Vec<String>,
    /// Fixed advice line; empty when no medications are active
    pub general_advice: String,
}

impl FoodGuidance {
    /// Whether any guidance is present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recommended_foods.is_empty()
            && self.foods_to_avoid.is_empty()
            && self.vitamin_recommendations.is_empty()
            && self.general_advice.is_empty()
    }
}

/// One ingredient line in a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Quantity as free text ("2 cups")
    pub amount: String,
    /// Ingredient name
    pub item: String,
}

/// Recipe difficulty reported by the generation service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// A generated recipe with derived health annotations
///
/// Created by the generation pipeline; immutable except for `is_favorite`
/// and appended ratings; deleted explicitly by the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: String,
    /// Ordered ingredient lines
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Preparation time ("15 minutes")
    pub prep_time: String,
    /// Cooking time
    pub cook_time: String,
    /// Total time
    pub total_time: String,
    /// Number of servings
    pub servings: u32,
    /// Reported difficulty
    pub difficulty: Difficulty,
    /// Dietary tags ("vegan", ...)
    pub dietary_tags: Vec<String>,
    /// Meal type ("dinner", "any meal", ...)
    pub meal_type: String,
    /// Per-serving nutrient values
    pub nutritional_info: NutritionalInfo,
    /// Pantry items not available that the recipe needs
    pub additional_items_needed: Vec<String>,
    /// Derived nutrient warnings (sorted by nutrient category)
    pub health_warnings: Vec<HealthWarning>,
    /// Derived per-condition benefit notes
    pub nutritional_benefits: Vec<String>,
    /// Derived per-condition suitability verdicts
    pub condition_suitability: BTreeMap<ConditionCode, SuitabilityVerdict>,
    /// Favorite flag (the only mutable recipe field)
    pub is_favorite: bool,
    /// Creation timestamp
    pub created_date: DateTime<Utc>,
}

/// A rating/review for a recipe (append-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    /// Unique identifier
    pub id: Uuid,
    /// Rated recipe
    pub recipe_id: Uuid,
    /// Star rating, 1-5
    pub rating: u8,
    /// Optional review text
    pub review: Option<String>,
    /// Creation timestamp
    pub created_date: DateTime<Utc>,
}

impl Rating {
    /// Create a new rating after validating the 1-5 range
    ///
    /// # Errors
    ///
    /// Returns an error if `rating` is outside 1-5.
    pub fn new(recipe_id: Uuid, rating: u8, review: Option<String>) -> Result<Self, AppError> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::new(
                crate::errors::ErrorCode::ValueOutOfRange,
                format!("Rating must be between 1 and 5 (got {rating})"),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            recipe_id,
            rating,
            review,
            created_date: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_code_round_trip() {
        for code in ConditionCode::ALL {
            assert_eq!(code.as_str().parse::<ConditionCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_condition_code_fails() {
        assert!("arthritis".parse::<ConditionCode>().is_err());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
        assert!(Severity::High < Severity::VeryHigh);
    }

    #[test]
    fn test_nutritional_info_rejects_negative() {
        let info = NutritionalInfo {
            sodium_mg: Some(-1.0),
            ..NutritionalInfo::default()
        };
        assert!(info.validate().is_err());
        assert!(NutritionalInfo::default().validate().is_ok());
    }

    #[test]
    fn test_rating_range() {
        let recipe_id = Uuid::new_v4();
        assert!(Rating::new(recipe_id, 0, None).is_err());
        assert!(Rating::new(recipe_id, 6, None).is_err());
        assert!(Rating::new(recipe_id, 5, Some("great".into())).is_ok());
    }
}
