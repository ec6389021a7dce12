//! Parsing of schema-constrained completion text into domain types.

use crate::ai::error::AnalysisError;
use crate::ai::prompts::NON_FOOD_SENTINEL;
use crate::products::model::{MealItem, ProductRecord};
use crate::profile::model::DailyGoals;

/// Parses a product completion, converting the non-food sentinel into an
/// error rather than a half-empty record.
pub fn parse_product(text: &str) -> Result<ProductRecord, AnalysisError> {
    let product: ProductRecord =
        serde_json::from_str(text).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;
    if product.name == NON_FOOD_SENTINEL {
        return Err(AnalysisError::NotFood);
    }
    Ok(product)
}

pub fn parse_daily_goals(text: &str) -> Result<DailyGoals, AnalysisError> {
    serde_json::from_str(text).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
}

pub fn parse_meal_items(text: &str) -> Result<Vec<MealItem>, AnalysisError> {
    serde_json::from_str(text).map_err(|e| AnalysisError::InvalidResponse(e.to_string()))
}
