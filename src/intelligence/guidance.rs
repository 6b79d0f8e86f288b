// ABOUTME: Constraint aggregator merging food guidance from multiple medications
// ABOUTME: Resolves avoid/recommend conflicts deterministically, avoidance wins
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Medication guidance aggregation
//!
//! Merges the `avoid_foods` / `recommended_foods` lists of a user's active
//! medications into a single [`FoodGuidance`]. The result is a pure function
//! of the medication *set*: any permutation of the input yields an identical
//! result.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::health::{vitamin_advisory, GENERAL_ADVICE};
use crate::models::{FoodGuidance, Medication, MedicationCategory};

/// Aggregate food guidance from a set of active medications
///
/// - Food names are deduplicated case-insensitively. When two medications
///   spell the same food with different casing, the lexicographically
///   smallest spelling is kept so the output does not depend on input order.
/// - A food listed as both avoided and recommended by different medications
///   is retained only in `foods_to_avoid` (avoidance wins, fail-safe).
/// - One vitamin advisory line is emitted per medication category present.
/// - With zero medications every field is empty; callers treat this as
///   "no guidance", not an error.
#[must_use]
pub fn aggregate(medications: &[Medication]) -> FoodGuidance {
    if medications.is_empty() {
        return FoodGuidance::default();
    }

    let avoid = dedup_fold(medications.iter().flat_map(|m| m.avoid_foods.iter()));
    let mut recommend = dedup_fold(medications.iter().flat_map(|m| m.recommended_foods.iter()));

    // Conflict rule: avoidance takes precedence over recommendation.
    recommend.retain(|key, _| !avoid.contains_key(key));

    let categories: BTreeSet<MedicationCategory> =
        medications.iter().map(|m| m.category).collect();

    FoodGuidance {
        recommended_foods: recommend.into_values().collect(),
        foods_to_avoid: avoid.into_values().collect(),
        vitamin_recommendations: categories
            .into_iter()
            .map(|c| vitamin_advisory(c).to_owned())
            .collect(),
        general_advice: GENERAL_ADVICE.to_owned(),
    }
}

/// Deduplicate food names case-insensitively, keyed by lowercase form
///
/// The map is ordered by key so downstream `into_values` iteration is
/// stable; on casing collisions the lexicographically smallest original
/// spelling wins.
fn dedup_fold<'a>(foods: impl Iterator<Item = &'a String>) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    for food in foods {
        let trimmed = food.trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        out.entry(key)
            .and_modify(|existing| {
                if trimmed < existing.as_str() {
                    *existing = trimmed.to_owned();
                }
            })
            .or_insert_with(|| trimmed.to_owned());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn med(
        category: MedicationCategory,
        avoid: &[&str],
        recommend: &[&str],
    ) -> Medication {
        Medication {
            id: Uuid::new_v4(),
            name: format!("med-{}", Uuid::new_v4()),
            category,
            avoid_foods: avoid.iter().map(|s| (*s).to_owned()).collect(),
            recommended_foods: recommend.iter().map(|s| (*s).to_owned()).collect(),
            is_custom: false,
        }
    }

    #[test]
    fn test_zero_medications_yields_neutral_guidance() {
        let guidance = aggregate(&[]);
        assert!(guidance.is_empty());
        assert_eq!(guidance.general_advice, "");
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let meds = vec![
            med(MedicationCategory::Other, &["Grapefruit"], &[]),
            med(MedicationCategory::Other, &["grapefruit"], &[]),
        ];
        let guidance = aggregate(&meds);
        assert_eq!(guidance.foods_to_avoid.len(), 1);
    }

    #[test]
    fn test_vitamin_lines_collapse_by_category() {
        let meds = vec![
            med(MedicationCategory::Diabetes, &[], &[]),
            med(MedicationCategory::Diabetes, &[], &[]),
            med(MedicationCategory::Thyroid, &[], &[]),
        ];
        let guidance = aggregate(&meds);
        assert_eq!(guidance.vitamin_recommendations.len(), 2);
    }
}
