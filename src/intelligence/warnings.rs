// ABOUTME: Nutrient severity classifier emitting graded warnings per condition
// ABOUTME: Data-driven via HealthConfig threshold tables, output sorted by nutrient
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Nutrient severity classification
//!
//! Compares a recipe's per-serving nutrient values against the configured
//! threshold tables and emits [`HealthWarning`] records for every monitored
//! nutrient that is relevant to at least one of the user's active
//! conditions. Low-severity results are simply absent from the output; only
//! moderate and above produce a warning.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::health::{condition_guidance, general_guidance, HealthConfig};
use crate::models::{ConditionCode, HealthWarning, NutritionalInfo, Severity};

/// Classify a nutrient profile into severity-graded warnings
///
/// Identical `(nutrients, conditions)` input always yields an identical,
/// order-stable warning list sorted by nutrient category name. Nutrients
/// the generation service did not report are skipped, as are nutrients
/// whose relevance set does not intersect the active conditions.
///
/// Callers validate the nutrient profile at the boundary
/// ([`NutritionalInfo::validate`]); for well-formed input this function is
/// total.
#[must_use]
pub fn classify(
    nutrients: &NutritionalInfo,
    conditions: &BTreeSet<ConditionCode>,
    config: &HealthConfig,
) -> Vec<HealthWarning> {
    let mut warnings: Vec<HealthWarning> = Vec::new();

    for rule in &config.rules {
        let matching: Vec<ConditionCode> = rule
            .conditions
            .intersection(conditions)
            .copied()
            .collect();
        if matching.is_empty() {
            continue;
        }

        let Some(amount) = rule.nutrient.value_in(nutrients) else {
            continue;
        };

        let level = rule.bands.severity_for(amount);
        if level < Severity::Moderate {
            continue;
        }

        let condition_specific: BTreeMap<ConditionCode, String> = matching
            .into_iter()
            .map(|c| (c, condition_guidance(rule.nutrient, c, amount)))
            .collect();

        warnings.push(HealthWarning {
            category: rule.nutrient.as_str().to_owned(),
            level,
            amount,
            unit: rule.nutrient.unit().to_owned(),
            general_guidance: general_guidance(rule.nutrient, level, amount),
            condition_specific,
        });
    }

    warnings.sort_by(|a, b| a.category.cmp(&b.category));
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(codes: &[ConditionCode]) -> BTreeSet<ConditionCode> {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_no_conditions_no_warnings() {
        let nutrients = NutritionalInfo {
            sodium_mg: Some(2000.0),
            ..NutritionalInfo::default()
        };
        let warnings = classify(&nutrients, &conditions(&[]), &HealthConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_irrelevant_condition_is_skipped() {
        let nutrients = NutritionalInfo {
            sodium_mg: Some(2000.0),
            ..NutritionalInfo::default()
        };
        let warnings = classify(
            &nutrients,
            &conditions(&[ConditionCode::Gout]),
            &HealthConfig::default(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unreported_nutrient_is_skipped() {
        let nutrients = NutritionalInfo::default(); // sodium_mg: None
        let warnings = classify(
            &nutrients,
            &conditions(&[ConditionCode::Hypertension]),
            &HealthConfig::default(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_condition_specific_entry_per_matching_condition() {
        let nutrients = NutritionalInfo {
            sodium_mg: Some(1000.0),
            ..NutritionalInfo::default()
        };
        let warnings = classify(
            &nutrients,
            &conditions(&[
                ConditionCode::Hypertension,
                ConditionCode::HeartDisease,
                ConditionCode::Diabetes,
            ]),
            &HealthConfig::default(),
        );
        assert_eq!(warnings.len(), 1);
        let warning = &warnings[0];
        assert_eq!(warning.category, "sodium");
        assert_eq!(warning.condition_specific.len(), 2);
        assert!(warning
            .condition_specific
            .contains_key(&ConditionCode::Hypertension));
        assert!(warning
            .condition_specific
            .contains_key(&ConditionCode::HeartDisease));
    }
}
