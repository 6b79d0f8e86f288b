// ABOUTME: Built-in seed catalogs for ingredients and medications
// ABOUTME: Loaded into the store on first run when the tables are empty
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! Seed catalogs
//!
//! The ingredient list mirrors the product's default pantry vocabulary; the
//! medication list carries curated food-interaction guidance per entry.
//! Both are inserted only when the corresponding table is empty, and users
//! extend them append-only through the store managers.

use uuid::Uuid;

use crate::models::{Ingredient, IngredientCategory, Medication, MedicationCategory};

/// Default ingredient catalog: (name, category)
const SEED_INGREDIENTS: &[(&str, IngredientCategory)] = &[
    // Vegetables
    ("cucumber", IngredientCategory::Vegetables),
    ("tomato", IngredientCategory::Vegetables),
    ("onion", IngredientCategory::Vegetables),
    ("garlic", IngredientCategory::Vegetables),
    ("bell pepper", IngredientCategory::Vegetables),
    ("hot pepper", IngredientCategory::Vegetables),
    ("carrot", IngredientCategory::Vegetables),
    ("broccoli", IngredientCategory::Vegetables),
    ("spinach", IngredientCategory::Vegetables),
    ("lettuce", IngredientCategory::Vegetables),
    ("kale", IngredientCategory::Vegetables),
    ("zucchini", IngredientCategory::Vegetables),
    ("eggplant", IngredientCategory::Vegetables),
    ("cauliflower", IngredientCategory::Vegetables),
    ("mushroom", IngredientCategory::Vegetables),
    ("pumpkin", IngredientCategory::Vegetables),
    ("butternut squash", IngredientCategory::Vegetables),
    ("sweet potato", IngredientCategory::Vegetables),
    ("potato", IngredientCategory::Vegetables),
    ("celery", IngredientCategory::Vegetables),
    ("asparagus", IngredientCategory::Vegetables),
    ("green beans", IngredientCategory::Vegetables),
    // Fruits
    ("apple", IngredientCategory::Fruits),
    ("banana", IngredientCategory::Fruits),
    ("orange", IngredientCategory::Fruits),
    ("lemon", IngredientCategory::Fruits),
    ("lime", IngredientCategory::Fruits),
    ("strawberry", IngredientCategory::Fruits),
    ("blueberry", IngredientCategory::Fruits),
    ("raspberry", IngredientCategory::Fruits),
    ("mango", IngredientCategory::Fruits),
    ("pineapple", IngredientCategory::Fruits),
    ("watermelon", IngredientCategory::Fruits),
    ("grapes", IngredientCategory::Fruits),
    ("avocado", IngredientCategory::Fruits),
    ("peach", IngredientCategory::Fruits),
    ("pear", IngredientCategory::Fruits),
    // Grains & starches
    ("rice", IngredientCategory::Grains),
    ("red rice", IngredientCategory::Grains),
    ("brown rice", IngredientCategory::Grains),
    ("quinoa", IngredientCategory::Grains),
    ("oatmeal", IngredientCategory::Grains),
    ("oats", IngredientCategory::Grains),
    ("pasta", IngredientCategory::Grains),
    ("bread", IngredientCategory::Grains),
    ("pizza bread", IngredientCategory::Grains),
    ("tortilla", IngredientCategory::Grains),
    ("couscous", IngredientCategory::Grains),
    ("barley", IngredientCategory::Grains),
    ("flour", IngredientCategory::Grains),
    // Proteins
    ("chickpeas", IngredientCategory::Proteins),
    ("black beans", IngredientCategory::Proteins),
    ("kidney beans", IngredientCategory::Proteins),
    ("lentils", IngredientCategory::Proteins),
    ("tofu", IngredientCategory::Proteins),
    ("tempeh", IngredientCategory::Proteins),
    ("edamame", IngredientCategory::Proteins),
    ("hummus", IngredientCategory::Proteins),
    ("peanut butter", IngredientCategory::Proteins),
    ("almond butter", IngredientCategory::Proteins),
    ("eggs", IngredientCategory::Proteins),
    ("chicken", IngredientCategory::Proteins),
    ("fish", IngredientCategory::Proteins),
    ("salmon", IngredientCategory::Proteins),
    ("tuna", IngredientCategory::Proteins),
    ("shrimp", IngredientCategory::Proteins),
    // Dairy & alternatives
    ("yogurt", IngredientCategory::Dairy),
    ("greek yogurt", IngredientCategory::Dairy),
    ("milk", IngredientCategory::Dairy),
    ("almond milk", IngredientCategory::Dairy),
    ("oat milk", IngredientCategory::Dairy),
    ("soy milk", IngredientCategory::Dairy),
    ("cheese", IngredientCategory::Dairy),
    ("cheddar cheese", IngredientCategory::Dairy),
    ("mozzarella", IngredientCategory::Dairy),
    ("parmesan", IngredientCategory::Dairy),
    ("feta cheese", IngredientCategory::Dairy),
    ("butter", IngredientCategory::Dairy),
    ("cream cheese", IngredientCategory::Dairy),
    // Nuts & seeds
    ("almonds", IngredientCategory::NutsSeeds),
    ("walnuts", IngredientCategory::NutsSeeds),
    ("cashews", IngredientCategory::NutsSeeds),
    ("pecans", IngredientCategory::NutsSeeds),
    ("peanuts", IngredientCategory::NutsSeeds),
    ("chia seeds", IngredientCategory::NutsSeeds),
    ("flax seeds", IngredientCategory::NutsSeeds),
    ("sunflower seeds", IngredientCategory::NutsSeeds),
    ("pumpkin seeds", IngredientCategory::NutsSeeds),
    // Spices & herbs
    ("salt", IngredientCategory::Spices),
    ("black pepper", IngredientCategory::Spices),
    ("cumin", IngredientCategory::Spices),
    ("paprika", IngredientCategory::Spices),
    ("turmeric", IngredientCategory::Spices),
    ("cinnamon", IngredientCategory::Spices),
    ("oregano", IngredientCategory::Spices),
    ("basil", IngredientCategory::Spices),
    ("thyme", IngredientCategory::Spices),
    ("rosemary", IngredientCategory::Spices),
    ("ginger", IngredientCategory::Spices),
    ("chili powder", IngredientCategory::Spices),
    ("cayenne pepper", IngredientCategory::Spices),
    // Condiments & oils
    ("olive oil", IngredientCategory::Condiments),
    ("vegetable oil", IngredientCategory::Condiments),
    ("coconut oil", IngredientCategory::Condiments),
    ("sesame oil", IngredientCategory::Condiments),
    ("soy sauce", IngredientCategory::Condiments),
    ("vinegar", IngredientCategory::Condiments),
    ("balsamic vinegar", IngredientCategory::Condiments),
    ("apple cider vinegar", IngredientCategory::Condiments),
    ("mustard", IngredientCategory::Condiments),
    ("ketchup", IngredientCategory::Condiments),
    ("mayonnaise", IngredientCategory::Condiments),
    ("hot sauce", IngredientCategory::Condiments),
    ("sriracha", IngredientCategory::Condiments),
    ("honey", IngredientCategory::Condiments),
    ("maple syrup", IngredientCategory::Condiments),
    ("agave nectar", IngredientCategory::Condiments),
    // Canned & packaged
    ("canned tomatoes", IngredientCategory::Canned),
    ("tomato paste", IngredientCategory::Canned),
    ("tomato sauce", IngredientCategory::Canned),
    ("coconut milk", IngredientCategory::Canned),
    ("vegetable broth", IngredientCategory::Canned),
    ("chicken broth", IngredientCategory::Canned),
];

/// Build the default ingredient catalog with fresh ids
#[must_use]
pub fn seed_ingredients() -> Vec<Ingredient> {
    SEED_INGREDIENTS
        .iter()
        .map(|(name, category)| Ingredient {
            id: Uuid::new_v4(),
            name: (*name).to_owned(),
            category: *category,
        })
        .collect()
}

/// Build the default medication catalog with fresh ids
///
/// Food lists are curated from commonly published interaction guidance
/// (grapefruit with statins, vitamin K consistency with warfarin, soy and
/// levothyroxine, potassium with ACE inhibitors).
#[must_use]
pub fn seed_medications() -> Vec<Medication> {
    let med = |name: &str,
               category: MedicationCategory,
               avoid: &[&str],
               recommend: &[&str]| Medication {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        category,
        avoid_foods: avoid.iter().map(|s| (*s).to_owned()).collect(),
        recommended_foods: recommend.iter().map(|s| (*s).to_owned()).collect(),
        is_custom: false,
    };

    vec![
        med(
            "Metformin",
            MedicationCategory::Diabetes,
            &["alcohol", "sugary drinks", "refined carbs"],
            &["leafy greens", "whole grains", "lentils", "salmon", "eggs"],
        ),
        med(
            "Insulin",
            MedicationCategory::Diabetes,
            &["sugary drinks", "candy", "white bread"],
            &["oats", "black beans", "broccoli", "greek yogurt"],
        ),
        med(
            "Lisinopril",
            MedicationCategory::Hypertension,
            &["bananas", "salt substitutes", "licorice", "potassium supplements"],
            &["berries", "oats", "garlic", "beets"],
        ),
        med(
            "Amlodipine",
            MedicationCategory::Hypertension,
            &["grapefruit", "high-sodium foods"],
            &["leafy greens", "berries", "low-fat dairy"],
        ),
        med(
            "Hydrochlorothiazide",
            MedicationCategory::Hypertension,
            &["licorice", "alcohol"],
            &["bananas", "oranges", "spinach", "sweet potato"],
        ),
        med(
            "Atorvastatin",
            MedicationCategory::Cholesterol,
            &["grapefruit", "fried foods", "full-fat dairy"],
            &["oats", "salmon", "walnuts", "olive oil"],
        ),
        med(
            "Simvastatin",
            MedicationCategory::Cholesterol,
            &["grapefruit", "fried foods"],
            &["oats", "almonds", "avocado"],
        ),
        med(
            "Levothyroxine",
            MedicationCategory::Thyroid,
            &["soy", "walnuts", "coffee", "calcium supplements"],
            &["eggs", "fish", "dairy"],
        ),
        med(
            "Omeprazole",
            MedicationCategory::AcidReflux,
            &["spicy foods", "citrus", "coffee", "alcohol"],
            &["ginger", "oatmeal", "bananas", "melon"],
        ),
        med(
            "Warfarin",
            MedicationCategory::BloodThinner,
            &["kale", "spinach", "cranberry juice", "alcohol", "grapefruit"],
            &["rice", "chicken", "carrots", "apples"],
        ),
    ]
}
