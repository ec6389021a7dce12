//! Post-processing validators for AI-returned nutrition figures.
//!
//! The prompts carry these rules as hints, but the model is not trusted to
//! apply them; this module is the enforcement point.

use crate::products::model::ProductRecord;

/// kcal per gram of protein / carbs / fat.
const KCAL_PROTEIN: f64 = 4.0;
const KCAL_CARBS: f64 = 4.0;
const KCAL_FAT: f64 = 9.0;

/// Sugar figure applied when ingredients prove sugar is present but the
/// reported value is zero and carbs give nothing to estimate from.
const SUGAR_FLOOR_G: f64 = 1.0;

const SUGAR_TOKENS: &[&str] = &[
    "sugar",
    "cane sugar",
    "corn syrup",
    "syrup",
    "honey",
    "fructose",
    "glucose",
    "dextrose",
    "maltose",
    "molasses",
    "sweetener",
];

pub fn has_sugar_bearing_ingredient(product: &ProductRecord) -> bool {
    product.ingredients.iter().any(|i| {
        let name = i.name.to_lowercase();
        SUGAR_TOKENS.iter().any(|t| name.contains(t))
    })
}

/// Applies the consistency rules in place and returns the corrected record.
///
/// Rules:
/// 1. negative figures are clamped to zero;
/// 2. sugar must be positive when a sugar-bearing ingredient is listed;
///    re-estimated as a third of carbs, or a floor value when carbs are zero;
/// 3. missing calories are back-calculated from macros.
pub fn enforce_consistency(mut product: ProductRecord) -> ProductRecord {
    let n = &mut product.nutrition;
    n.calories = n.calories.max(0.0);
    n.protein = n.protein.max(0.0);
    n.carbs = n.carbs.max(0.0);
    n.fats = n.fats.max(0.0);
    n.sugar = n.sugar.max(0.0);
    n.fiber = n.fiber.map(|v| v.max(0.0));
    n.salt = n.salt.map(|v| v.max(0.0));

    if product.nutrition.sugar == 0.0 && has_sugar_bearing_ingredient(&product) {
        let carbs = product.nutrition.carbs;
        product.nutrition.sugar = if carbs > 0.0 {
            (carbs / 3.0).max(SUGAR_FLOOR_G)
        } else {
            SUGAR_FLOOR_G
        };
        tracing::debug!(
            product = %product.name,
            sugar = product.nutrition.sugar,
            "sugar re-estimated from sugar-bearing ingredients"
        );
    }

    if product.nutrition.calories == 0.0 {
        let n = &product.nutrition;
        let kcal = n.protein * KCAL_PROTEIN + n.carbs * KCAL_CARBS + n.fats * KCAL_FAT;
        if kcal > 0.0 {
            product.nutrition.calories = kcal;
            tracing::debug!(
                product = %product.name,
                kcal,
                "calories back-calculated from macros"
            );
        }
    }

    product
}
