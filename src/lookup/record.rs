use serde_json::Value;

/// Strict intermediate shape for an OpenFoodFacts candidate. The upstream
/// response is duck-typed and unstable; everything downstream sees only this.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFactsRecord {
    pub name: Option<String>,
    pub brands: Option<String>,
    pub ingredients_text: Option<String>,
    pub image_url: Option<String>,
    pub calories_100g: Option<f64>,
    pub protein_100g: Option<f64>,
    pub carbs_100g: Option<f64>,
    pub fats_100g: Option<f64>,
    pub sugar_100g: Option<f64>,
    pub salt_100g: Option<f64>,
}

fn non_empty_str(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn nutriment(value: &Value, key: &str) -> Option<f64> {
    value.get("nutriments").and_then(|n| n.get(key)).and_then(Value::as_f64)
}

/// Energy in kcal per 100 g, falling back to the unsuffixed field some
/// records carry instead.
pub(crate) fn energy_kcal(candidate: &Value) -> Option<f64> {
    nutriment(candidate, "energy-kcal_100g").or_else(|| nutriment(candidate, "energy-kcal"))
}

pub(crate) fn has_ingredients_text(candidate: &Value) -> bool {
    non_empty_str(candidate, "ingredients_text").is_some()
}

/// Maps one raw candidate into the strict record. The single place that
/// touches upstream field names.
pub fn normalize(candidate: &Value) -> FoodFactsRecord {
    FoodFactsRecord {
        name: non_empty_str(candidate, "product_name"),
        brands: non_empty_str(candidate, "brands"),
        ingredients_text: non_empty_str(candidate, "ingredients_text"),
        image_url: non_empty_str(candidate, "image_front_url")
            .or_else(|| non_empty_str(candidate, "image_url")),
        calories_100g: energy_kcal(candidate),
        protein_100g: nutriment(candidate, "proteins_100g"),
        carbs_100g: nutriment(candidate, "carbohydrates_100g"),
        fats_100g: nutriment(candidate, "fat_100g"),
        sugar_100g: nutriment(candidate, "sugars_100g"),
        salt_100g: nutriment(candidate, "salt_100g"),
    }
}

/// Selection policy: first candidate with both an energy figure and an
/// ingredients text, falling back to the first raw candidate.
pub fn select_best(candidates: &[Value]) -> Option<FoodFactsRecord> {
    let best = candidates
        .iter()
        .find(|c| energy_kcal(c).is_some() && has_ingredients_text(c))
        .or_else(|| candidates.first())?;
    Some(normalize(best))
}
