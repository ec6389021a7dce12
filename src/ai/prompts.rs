//! Prompt templates for the completion adapter.
//!
//! The consistency rules appear here only as hints to the model; the real
//! enforcement lives in `products::validate`.

use serde_json::json;

use crate::lookup::FoodFactsRecord;
use crate::profile::model::BodyStats;

/// Reserved `name` value the model must return for non-food subjects.
pub const NON_FOOD_SENTINEL: &str = "NON_FOOD_ITEM";

/// Instruction paired with inline image bytes on the scan path.
pub fn scan_instruction() -> String {
    format!(
        "Analyze this image. First, determine if it contains a food item, meal, or beverage. \
         If it does NOT contain food, return a JSON where 'name' is '{NON_FOOD_SENTINEL}' and \
         other required fields are empty/zero. If it IS food, identify the product, estimate \
         its nutritional value per 100g (or per 100ml for liquids), and analyze ingredients \
         based on typical formulation if not visible. Suggest 2-3 healthier alternatives if \
         applicable. DATA CONSISTENCY RULE: if you detect sugar, cane sugar, syrup, honey, \
         fructose, or any sweetener in the ingredients, the 'sugar' field in nutrition MUST be \
         greater than 0."
    )
}

/// Text-search prompt grounded on an OpenFoodFacts record.
pub fn grounded_search_prompt(query: &str, record: &FoodFactsRecord) -> String {
    let grounding = json!({
        "name": record.name.clone().unwrap_or_else(|| query.to_string()),
        "brand": record.brands.clone().unwrap_or_else(|| "Unknown".to_string()),
        "ingredients": record
            .ingredients_text
            .clone()
            .unwrap_or_else(|| "Not available".to_string()),
        "nutrition": {
            "calories": record.calories_100g,
            "protein": record.protein_100g,
            "carbs": record.carbs_100g,
            "fats": record.fats_100g,
            "sugar": record.sugar_100g,
            "salt": record.salt_100g,
        }
    });

    format!(
        "You are a strict data extraction engine. Analyze this product based on the provided \
         database record: {grounding}.\n\
         INSTRUCTIONS:\n\
         1. Use the provided 'nutrition' values EXACTLY as they appear for the per-100g fields. \
         Do not hallucinate numbers if real ones are provided.\n\
         2. If specific nutrition fields are null in the input, estimate them from the product \
         ingredients and type.\n\
         3. Analyze the ingredients text and categorize each ingredient (good/bad/neutral).\n\
         4. Suggest 3 specific healthier alternatives.\n\
         CONSISTENCY RULES:\n\
         - If input sugar is 0 but the ingredients contain sugar, cane sugar, corn syrup, honey, \
         fructose or glucose, override the sugar value with a realistic non-zero estimate.\n\
         - If input calories are missing, calculate them as (fat*9) + (carbs*4) + (protein*4).\n\
         Return JSON strictly matching the schema."
    )
}

/// Text-search prompt with no grounding data available.
pub fn ungrounded_search_prompt(query: &str) -> String {
    format!(
        "Analyze the food product query: \"{query}\".\n\
         INSTRUCTIONS:\n\
         1. Determine if this is a valid food item. If NOT (e.g. \"laptop\"), return \
         name=\"{NON_FOOD_SENTINEL}\".\n\
         2. If it is food, generate a comprehensive nutritional profile per 100g of the product.\n\
         3. Provide REALISTIC estimates for calories, protein, carbs, fats, sugar, fiber, salt.\n\
         4. Suggest 3 specific healthier alternative products.\n\
         CONSISTENCY RULE: if the generated ingredients contain added sugars, the 'sugar' value \
         MUST be greater than 0.\n\
         Return JSON strictly matching the schema."
    )
}

/// Prompt for computing daily nutrition goals from body stats.
pub fn daily_goals_prompt(stats: &BodyStats) -> String {
    format!(
        "Calculate the optimal daily nutritional goals for a user with the following profile:\n\
         Age: {}\n\
         Gender: {}\n\
         Weight: {}kg\n\
         Height: {}cm\n\
         Activity Level: {}\n\
         Goal: {}\n\
         Return the target daily calories, protein (g), carbs (g), fats (g), sugar (g), \
         fiber (g), and salt (g). Strictly JSON format matching the schema.",
        stats.age, stats.gender, stats.weight_kg, stats.height_cm, stats.activity_level, stats.goal
    )
}

/// Prompt for breaking a meal description into logged items.
pub fn meal_breakdown_prompt(description: &str) -> String {
    format!(
        "Analyze the nutritional content of this meal description: \"{description}\". \
         Break it down into individual food items. For each item, estimate the TOTAL \
         nutritional values for the specific quantity described in the text. If quantity is \
         implied (e.g. \"an apple\"), use that. If quantity is vague, assume a standard medium \
         serving. Return a JSON array of items strictly following the schema."
    )
}
