//! The three fixed response schemas sent with every completion request.
//! Field names match the serde representations in `products::model` and
//! `profile::model`.

use serde_json::{json, Value};

fn nutrition_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "calories": { "type": "NUMBER", "description": "Energy in kcal per 100g" },
            "protein":  { "type": "NUMBER", "description": "Protein in grams per 100g" },
            "carbs":    { "type": "NUMBER", "description": "Carbohydrates in grams per 100g" },
            "fats":     { "type": "NUMBER", "description": "Fat in grams per 100g" },
            "sugar":    { "type": "NUMBER", "description": "Sugars in grams per 100g" },
            "fiber":    { "type": "NUMBER", "description": "Fiber in grams per 100g" },
            "salt":     { "type": "NUMBER", "description": "Salt in grams per 100g" }
        }
    })
}

/// Schema for a full product analysis (search and scan paths).
pub fn product_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "brand": { "type": "STRING" },
            "category": { "type": "STRING" },
            "health_reasoning": { "type": "STRING" },
            "ingredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "status": { "type": "STRING", "enum": ["good", "bad", "neutral"] },
                        "reason": { "type": "STRING" }
                    }
                }
            },
            "nutrition": nutrition_schema(),
            "certifications": { "type": "ARRAY", "items": { "type": "STRING" } },
            "pros": { "type": "ARRAY", "items": { "type": "STRING" } },
            "cons": { "type": "ARRAY", "items": { "type": "STRING" } },
            "additives": { "type": "ARRAY", "items": { "type": "STRING" } },
            "healthier_alternatives": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "brand": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "calories": { "type": "NUMBER" }
                    }
                }
            }
        },
        "required": ["name", "ingredients", "nutrition"]
    })
}

/// Schema for AI-generated daily nutrition goals.
pub fn daily_goals_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "calories": { "type": "NUMBER" },
            "protein":  { "type": "NUMBER" },
            "carbs":    { "type": "NUMBER" },
            "fats":     { "type": "NUMBER" },
            "sugar":    { "type": "NUMBER" },
            "fiber":    { "type": "NUMBER" },
            "salt":     { "type": "NUMBER" }
        },
        "required": ["calories", "protein", "carbs", "fats", "sugar", "fiber", "salt"]
    })
}

/// Schema for breaking a free-text meal description into items.
pub fn meal_breakdown_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "item_name": { "type": "STRING", "description": "Name of the food item" },
                "portion_desc": { "type": "STRING", "description": "Portion size used for the totals" },
                "nutrition": nutrition_schema()
            }
        }
    })
}
