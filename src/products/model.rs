use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verdict attached to a single ingredient by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientStatus {
    Good,
    Bad,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientAssessment {
    pub name: String,
    pub status: IngredientStatus,
    #[serde(default)]
    pub reason: String,
}

/// Nutrition figures per 100 g (or 100 ml for liquids).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    #[serde(default)]
    pub sugar: f64,
    pub fiber: Option<f64>,
    pub salt: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAlternative {
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub reason: String,
    pub calories: Option<f64>,
}

/// Normalized food item returned by a search or scan. Immutable once built;
/// cached by the source query string on the text path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub health_reasoning: String,
    pub ingredients: Vec<IngredientAssessment>,
    pub nutrition: Nutrition,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub additives: Vec<String>,
    pub healthier_alternatives: Option<Vec<ProductAlternative>>,
}

/// One item of a free-text meal breakdown. Nutrition here is the total for
/// the described portion, not per 100 g.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealItem {
    pub item_name: String,
    #[serde(default)]
    pub portion_desc: String,
    pub nutrition: Nutrition,
}
