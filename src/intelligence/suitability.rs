// ABOUTME: Condition suitability evaluator producing per-condition verdicts with rationale
// ABOUTME: Disqualifies on high/very_high warnings naming the condition or allergy matches
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Condition suitability evaluation
//!
//! Runs after the severity classifier for the same recipe (hard ordering
//! dependency enforced by the pipeline) and produces a suitable/unsuitable
//! verdict with rationale for each active condition. Two disqualifiers
//! exist: a high or very_high warning whose condition-specific guidance
//! names the condition, and a recipe ingredient matching a declared
//! allergy.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    ConditionCode, HealthProfile, HealthWarning, NutritionalInfo, RecipeIngredient, Severity,
    SuitabilityVerdict,
};

/// Evaluate per-condition suitability for a classified recipe
///
/// `warnings` must be the complete classifier output for the same recipe;
/// the evaluator is never invoked on an incomplete warning list. For each
/// active condition the verdict is unsuitable iff a high/very_high warning
/// names it or an ingredient matches one of the profile's allergies; the
/// notes always name the specific disqualifier.
#[must_use]
pub fn evaluate(
    ingredients: &[RecipeIngredient],
    warnings: &[HealthWarning],
    profile: &HealthProfile,
) -> BTreeMap<ConditionCode, SuitabilityVerdict> {
    let allergy_hit = ingredients.iter().find_map(|ing| {
        profile
            .allergies
            .iter()
            .find(|allergy| ingredient_matches_allergy(&ing.item, allergy))
            .map(|allergy| (ing.item.clone(), allergy.clone()))
    });

    profile
        .conditions
        .iter()
        .map(|&condition| {
            let nutrient_hit = warnings.iter().find(|w| {
                w.level >= Severity::High && w.condition_specific.contains_key(&condition)
            });

            let verdict = if let Some(warning) = nutrient_hit {
                SuitabilityVerdict {
                    suitable: false,
                    notes: format!(
                        "Not recommended for {}: {} content is {} ({:.0} {} per serving).",
                        condition.label(),
                        warning.category.replace('_', " "),
                        warning.level,
                        warning.amount,
                        warning.unit,
                    ),
                }
            } else if let Some((ref ingredient, ref allergy)) = allergy_hit {
                SuitabilityVerdict {
                    suitable: false,
                    notes: format!(
                        "Not recommended: ingredient '{ingredient}' matches your declared allergy '{allergy}'."
                    ),
                }
            } else {
                SuitabilityVerdict {
                    suitable: true,
                    notes: format!(
                        "No concerning nutrient levels for {} in this recipe.",
                        condition.label()
                    ),
                }
            };

            (condition, verdict)
        })
        .collect()
}

/// Case-insensitive substring match between an ingredient and an allergy
///
/// Matches in either direction, with a trailing-`s` singularization pass so
/// "Peanuts" matches "peanut butter".
#[must_use]
pub fn ingredient_matches_allergy(ingredient: &str, allergy: &str) -> bool {
    let ing = ingredient.trim().to_lowercase();
    let allergy = allergy.trim().to_lowercase();
    if ing.is_empty() || allergy.is_empty() {
        return false;
    }
    if ing.contains(&allergy) || allergy.contains(&ing) {
        return true;
    }
    let singular = allergy.strip_suffix('s').unwrap_or(&allergy);
    !singular.is_empty() && ing.contains(singular)
}

/// Derive per-condition nutritional benefit notes for a recipe
///
/// Short affirming lines for notable nutrient strengths, surfaced alongside
/// warnings in the annotated recipe.
#[must_use]
pub fn nutritional_benefits(
    nutrients: &NutritionalInfo,
    conditions: &BTreeSet<ConditionCode>,
) -> Vec<String> {
    let mut benefits = Vec::new();

    if nutrients.fiber_g >= 5.0 {
        let mut line = format!(
            "High in fiber ({:.0} g per serving), supporting digestion",
            nutrients.fiber_g
        );
        if conditions.contains(&ConditionCode::Diabetes)
            || conditions.contains(&ConditionCode::PreDiabetes)
        {
            line.push_str(" and slowing glucose absorption");
        }
        line.push('.');
        benefits.push(line);
    }

    if nutrients.protein_g >= 20.0 && !conditions.contains(&ConditionCode::KidneyDisease) {
        benefits.push(format!(
            "Good protein content ({:.0} g per serving) for satiety and muscle maintenance.",
            nutrients.protein_g
        ));
    }

    if let Some(sodium) = nutrients.sodium_mg {
        if sodium < 200.0
            && (conditions.contains(&ConditionCode::Hypertension)
                || conditions.contains(&ConditionCode::HeartDisease))
        {
            benefits.push(format!(
                "Low sodium ({sodium:.0} mg per serving) supports blood pressure management."
            ));
        }
    }

    if let Some(sat_fat) = nutrients.saturated_fat_g {
        if sat_fat < 2.0
            && (conditions.contains(&ConditionCode::HeartDisease)
                || conditions.contains(&ConditionCode::HighCholesterol))
        {
            benefits.push(format!(
                "Low saturated fat ({sat_fat:.1} g per serving), heart-friendly."
            ));
        }
    }

    benefits
}
