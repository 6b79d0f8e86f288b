// ABOUTME: Health analysis configuration with per-nutrient severity thresholds
// ABOUTME: Data-driven tables keyed by (nutrient, condition) with environment overrides
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Nutrient threshold tables and advisory templates
//!
//! The warning classifier is data-driven: each monitored nutrient carries
//! four ascending per-serving thresholds and a set of conditions it is
//! relevant to. Defaults below are informed by published dietary guidance
//! (AHA sodium and added-sugar advisories, DRI saturated fat limits, the
//! historical 300 mg/day cholesterol guideline, KDIGO protein guidance for
//! CKD) scaled to a single serving. They are configuration, not clinical
//! advice, and every value can be overridden via environment variables of
//! the form `MEALSENSE_<NUTRIENT>_<BAND>` (e.g. `MEALSENSE_SODIUM_HIGH`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{ConditionCode, MedicationCategory, NutritionalInfo, Severity};

/// A nutrient monitored by the warning classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Sodium,
    Sugar,
    SaturatedFat,
    Cholesterol,
    Protein,
    Potassium,
}

impl Nutrient {
    /// All monitored nutrients
    pub const ALL: [Self; 6] = [
        Self::Sodium,
        Self::Sugar,
        Self::SaturatedFat,
        Self::Cholesterol,
        Self::Protein,
        Self::Potassium,
    ];

    /// Warning category name (stable, used for sorting warning output)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sodium => "sodium",
            Self::Sugar => "sugar",
            Self::SaturatedFat => "saturated_fat",
            Self::Cholesterol => "cholesterol",
            Self::Protein => "protein",
            Self::Potassium => "potassium",
        }
    }

    /// Measurement unit for this nutrient's per-serving value
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Sodium | Self::Cholesterol | Self::Potassium => "mg",
            Self::Sugar | Self::SaturatedFat | Self::Protein => "g",
        }
    }

    /// Extract this nutrient's per-serving value from a nutrient profile
    ///
    /// Optional nutrients the generation service did not report yield `None`
    /// and are skipped by the classifier.
    #[must_use]
    pub fn value_in(&self, info: &NutritionalInfo) -> Option<f64> {
        match self {
            Self::Sodium => info.sodium_mg,
            Self::Sugar => info.sugar_g,
            Self::SaturatedFat => info.saturated_fat_g,
            Self::Cholesterol => info.cholesterol_mg,
            Self::Protein => Some(info.protein_g),
            Self::Potassium => info.potassium_mg,
        }
    }
}

/// Four ascending severity thresholds for one nutrient
///
/// Each value is the *inclusive lower bound* of its band: severity is the
/// highest band whose bound the per-serving value meets. Values below the
/// moderate bound classify as `Low`, which never produces a warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeverityBands {
    /// Informational lower bound of the low band
    pub low: f64,
    /// Lower bound of the moderate band
    pub moderate: f64,
    /// Lower bound of the high band
    pub high: f64,
    /// Lower bound of the very high band
    pub very_high: f64,
}

impl SeverityBands {
    /// Classify a per-serving value into a severity grade
    ///
    /// Boundary semantics are inclusive at each lower bound: a value equal
    /// to the `high` threshold classifies `High` (not `VeryHigh`) as long
    /// as it is below the `very_high` threshold.
    #[must_use]
    pub fn severity_for(&self, value: f64) -> Severity {
        if value >= self.very_high {
            Severity::VeryHigh
        } else if value >= self.high {
            Severity::High
        } else if value >= self.moderate {
            Severity::Moderate
        } else {
            Severity::Low
        }
    }
}

/// Classification rule for one nutrient: thresholds plus relevance set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientRule {
    /// The monitored nutrient
    pub nutrient: Nutrient,
    /// Severity thresholds (per serving)
    pub bands: SeverityBands,
    /// Conditions this nutrient is relevant to; the classifier only fires
    /// when the user has at least one of them
    pub conditions: BTreeSet<ConditionCode>,
}

/// Health analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Per-nutrient classification rules
    pub rules: Vec<NutrientRule>,
}

impl HealthConfig {
    /// Load configuration with built-in defaults and environment overrides
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_environment_overrides();
        config
    }

    /// Look up the rule for a nutrient
    #[must_use]
    pub fn rule_for(&self, nutrient: Nutrient) -> Option<&NutrientRule> {
        self.rules.iter().find(|r| r.nutrient == nutrient)
    }

    /// Apply `MEALSENSE_<NUTRIENT>_<BAND>` environment overrides
    fn apply_environment_overrides(&mut self) {
        for rule in &mut self.rules {
            let prefix = rule.nutrient.as_str().to_uppercase();
            Self::parse_env_f64(&format!("MEALSENSE_{prefix}_LOW"), &mut rule.bands.low);
            Self::parse_env_f64(
                &format!("MEALSENSE_{prefix}_MODERATE"),
                &mut rule.bands.moderate,
            );
            Self::parse_env_f64(&format!("MEALSENSE_{prefix}_HIGH"), &mut rule.bands.high);
            Self::parse_env_f64(
                &format!("MEALSENSE_{prefix}_VERY_HIGH"),
                &mut rule.bands.very_high,
            );
        }
    }

    /// Parse environment variable as f64 and update target if valid
    fn parse_env_f64(env_var: &str, target: &mut f64) {
        if let Ok(value) = std::env::var(env_var) {
            if let Ok(parsed) = value.parse::<f64>() {
                *target = parsed;
            }
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        let rule = |nutrient: Nutrient, bands: [f64; 4], conditions: &[ConditionCode]| {
            NutrientRule {
                nutrient,
                bands: SeverityBands {
                    low: bands[0],
                    moderate: bands[1],
                    high: bands[2],
                    very_high: bands[3],
                },
                conditions: conditions.iter().copied().collect(),
            }
        };

        use ConditionCode::{
            Diabetes, HeartDisease, HighCholesterol, Hypertension, KidneyDisease, PreDiabetes,
        };

        Self {
            rules: vec![
                // AHA advises staying well under 1500-2300 mg/day for
                // hypertensive individuals; 900+ mg in one serving is high.
                rule(
                    Nutrient::Sodium,
                    [200.0, 500.0, 900.0, 1500.0],
                    &[Hypertension, KidneyDisease, HeartDisease],
                ),
                // AHA added-sugar ceiling is 25-36 g/day.
                rule(
                    Nutrient::Sugar,
                    [5.0, 10.0, 20.0, 35.0],
                    &[Diabetes, PreDiabetes],
                ),
                // DRI/AHA saturated fat limit ~13 g/day at 2000 kcal.
                rule(
                    Nutrient::SaturatedFat,
                    [2.0, 5.0, 9.0, 13.0],
                    &[HeartDisease, HighCholesterol],
                ),
                // Historical 300 mg/day dietary cholesterol guideline.
                rule(
                    Nutrient::Cholesterol,
                    [50.0, 100.0, 200.0, 300.0],
                    &[HeartDisease, HighCholesterol],
                ),
                // KDIGO recommends ~0.8 g/kg/day for CKD; 40 g in a single
                // serving exhausts most of that budget.
                rule(
                    Nutrient::Protein,
                    [15.0, 20.0, 30.0, 40.0],
                    &[KidneyDisease],
                ),
                rule(
                    Nutrient::Potassium,
                    [300.0, 500.0, 700.0, 1000.0],
                    &[KidneyDisease],
                ),
            ],
        }
    }
}

/// Condition-independent guidance line for a warning
#[must_use]
pub fn general_guidance(nutrient: Nutrient, level: Severity, amount: f64) -> String {
    let unit = nutrient.unit();
    let name = nutrient.as_str().replace('_', " ");
    match level {
        Severity::Low => format!("{name} content ({amount:.0} {unit}) is within a low range."),
        Severity::Moderate => format!(
            "This serving contains a moderate amount of {name} ({amount:.0} {unit}). Keep an eye on your intake for the rest of the day."
        ),
        Severity::High => format!(
            "This serving is high in {name} ({amount:.0} {unit}). Consider reducing portion size or balancing with lower-{name} meals."
        ),
        Severity::VeryHigh => format!(
            "This serving is very high in {name} ({amount:.0} {unit}) and may exceed a full day's recommended amount."
        ),
    }
}

/// Per-(nutrient, condition) guidance line parameterized by amount
#[must_use]
pub fn condition_guidance(nutrient: Nutrient, condition: ConditionCode, amount: f64) -> String {
    let unit = nutrient.unit();
    match (nutrient, condition) {
        (Nutrient::Sodium, ConditionCode::Hypertension) => format!(
            "With hypertension, {amount:.0} {unit} of sodium in one serving can raise blood pressure. Aim to stay under 1500 mg for the day."
        ),
        (Nutrient::Sodium, ConditionCode::KidneyDisease) => format!(
            "With chronic kidney disease, {amount:.0} {unit} of sodium adds to fluid retention load. Discuss daily sodium targets with your care team."
        ),
        (Nutrient::Sodium, ConditionCode::HeartDisease) => format!(
            "With heart disease, {amount:.0} {unit} of sodium per serving works against blood pressure control."
        ),
        (Nutrient::Sugar, ConditionCode::Diabetes) => format!(
            "With diabetes, {amount:.0} {unit} of sugar per serving can spike blood glucose. Pair with protein or fiber to slow absorption."
        ),
        (Nutrient::Sugar, ConditionCode::PreDiabetes) => format!(
            "With pre-diabetes, {amount:.0} {unit} of sugar per serving pushes toward glucose intolerance. Prefer whole-fruit sweetness."
        ),
        (Nutrient::SaturatedFat, ConditionCode::HeartDisease) => format!(
            "With heart disease, {amount:.0} {unit} of saturated fat per serving contributes to arterial plaque risk."
        ),
        (Nutrient::SaturatedFat, ConditionCode::HighCholesterol) => format!(
            "With high cholesterol, {amount:.0} {unit} of saturated fat per serving raises LDL. Swap in olive oil or nuts where possible."
        ),
        (Nutrient::Cholesterol, ConditionCode::HeartDisease) => format!(
            "With heart disease, {amount:.0} {unit} of dietary cholesterol per serving is significant relative to a 300 mg/day budget."
        ),
        (Nutrient::Cholesterol, ConditionCode::HighCholesterol) => format!(
            "With high cholesterol, {amount:.0} {unit} of dietary cholesterol per serving adds to your existing lipid burden."
        ),
        (Nutrient::Protein, ConditionCode::KidneyDisease) => format!(
            "With chronic kidney disease, {amount:.0} {unit} of protein in one serving uses much of a restricted daily protein allowance (~0.8 g/kg)."
        ),
        (Nutrient::Potassium, ConditionCode::KidneyDisease) => format!(
            "With chronic kidney disease, {amount:.0} {unit} of potassium per serving may accumulate if kidney clearance is reduced."
        ),
        // Fallback for pairs outside the curated table (kept total so the
        // classifier never fails on a configured rule).
        (n, c) => format!(
            "With {}, monitor intake of {} ({amount:.0} {unit} in this serving).",
            c.as_str().replace('_', " "),
            n.as_str().replace('_', " "),
        ),
    }
}

/// Vitamin/supplement advisory line for a medication category
#[must_use]
pub const fn vitamin_advisory(category: MedicationCategory) -> &'static str {
    match category {
        MedicationCategory::Diabetes => {
            "Diabetes medications such as metformin can lower vitamin B12 over time; include B12-rich foods and consider periodic level checks."
        }
        MedicationCategory::Hypertension => {
            "Some blood pressure medications affect potassium balance; avoid potassium-based salt substitutes unless your doctor approves."
        }
        MedicationCategory::Cholesterol => {
            "Statins can deplete CoQ10; fatty fish, whole grains, and nuts help. Avoid grapefruit with most statins."
        }
        MedicationCategory::Thyroid => {
            "Take thyroid medication several hours apart from calcium, iron, and high-fiber meals; limit soy close to your dose."
        }
        MedicationCategory::AcidReflux => {
            "Long-term acid reducers can impair B12, magnesium, and calcium absorption; favor foods rich in these nutrients."
        }
        MedicationCategory::BloodThinner => {
            "Keep vitamin K intake consistent day to day (leafy greens) so anticoagulant dosing stays stable."
        }
        MedicationCategory::Other => {
            "Ask your pharmacist about food and supplement interactions for this medication."
        }
    }
}

/// Fixed general-advice line used when at least one medication is active
pub const GENERAL_ADVICE: &str = "These recommendations reflect your current medications. Keep your intake of interacting foods consistent, and consult your pharmacist before major dietary changes.";

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_rules_cover_monitored_nutrients() {
        let config = HealthConfig::default();
        for nutrient in [
            Nutrient::Sodium,
            Nutrient::Sugar,
            Nutrient::SaturatedFat,
            Nutrient::Cholesterol,
            Nutrient::Protein,
        ] {
            assert!(config.rule_for(nutrient).is_some(), "missing {nutrient:?}");
        }
    }

    #[test]
    fn test_bands_are_ascending() {
        for rule in HealthConfig::default().rules {
            assert!(rule.bands.low < rule.bands.moderate);
            assert!(rule.bands.moderate < rule.bands.high);
            assert!(rule.bands.high < rule.bands.very_high);
        }
    }

    #[test]
    fn test_boundary_is_inclusive_lower_bound() {
        let bands = SeverityBands {
            low: 200.0,
            moderate: 500.0,
            high: 900.0,
            very_high: 1500.0,
        };
        assert_eq!(bands.severity_for(199.9), Severity::Low);
        assert_eq!(bands.severity_for(500.0), Severity::Moderate);
        assert_eq!(bands.severity_for(899.9), Severity::Moderate);
        // A value exactly on the high bound is High, not VeryHigh.
        assert_eq!(bands.severity_for(900.0), Severity::High);
        assert_eq!(bands.severity_for(1499.9), Severity::High);
        assert_eq!(bands.severity_for(1500.0), Severity::VeryHigh);
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        std::env::set_var("MEALSENSE_SODIUM_HIGH", "750");
        let config = HealthConfig::load();
        std::env::remove_var("MEALSENSE_SODIUM_HIGH");

        let rule = config.rule_for(Nutrient::Sodium).unwrap();
        assert!((rule.bands.high - 750.0).abs() < f64::EPSILON);
    }
}
