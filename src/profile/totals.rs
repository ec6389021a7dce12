use serde::Serialize;
use time::Date;

use crate::profile::model::LogEntry;

/// Summed intake across log entries: Σ(nutrient × quantity) per nutrient.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sugar: f64,
    pub fiber: f64,
    pub salt: f64,
    pub entries: usize,
}

/// Totals over the whole log, or over one UTC calendar day when `date` is
/// given. Untracked fiber/salt values contribute nothing.
pub fn daily_totals(log: &[LogEntry], date: Option<Date>) -> NutritionTotals {
    let mut totals = NutritionTotals::default();
    for entry in log {
        if let Some(day) = date {
            if entry.added_at.date() != day {
                continue;
            }
        }
        let n = &entry.product.nutrition;
        let q = entry.quantity;
        totals.calories += n.calories * q;
        totals.protein += n.protein * q;
        totals.carbs += n.carbs * q;
        totals.fats += n.fats * q;
        totals.sugar += n.sugar * q;
        totals.fiber += n.fiber.unwrap_or(0.0) * q;
        totals.salt += n.salt.unwrap_or(0.0) * q;
        totals.entries += 1;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::model::{Nutrition, ProductRecord};
    use time::macros::datetime;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn entry(nutrition: Nutrition, quantity: f64, added_at: OffsetDateTime) -> LogEntry {
        LogEntry {
            product: ProductRecord {
                id: Uuid::new_v4(),
                name: "item".into(),
                brand: String::new(),
                category: String::new(),
                image_url: None,
                health_reasoning: String::new(),
                ingredients: vec![],
                nutrition,
                certifications: vec![],
                pros: vec![],
                cons: vec![],
                additives: vec![],
                healthier_alternatives: None,
            },
            quantity,
            unit: Some("serving".into()),
            added_at,
        }
    }

    #[test]
    fn totals_are_sum_of_nutrient_times_quantity() {
        let now = datetime!(2026-08-29 12:00 UTC);
        let log = vec![
            entry(
                Nutrition {
                    calories: 100.0,
                    protein: 10.0,
                    carbs: 20.0,
                    fats: 5.0,
                    sugar: 8.0,
                    fiber: Some(2.0),
                    salt: Some(0.5),
                },
                2.0,
                now,
            ),
            entry(
                Nutrition {
                    calories: 50.0,
                    protein: 1.0,
                    carbs: 12.0,
                    fats: 0.0,
                    sugar: 10.0,
                    fiber: None,
                    salt: None,
                },
                1.5,
                now,
            ),
        ];

        let totals = daily_totals(&log, None);
        assert_eq!(totals.calories, 100.0 * 2.0 + 50.0 * 1.5);
        assert_eq!(totals.protein, 10.0 * 2.0 + 1.0 * 1.5);
        assert_eq!(totals.carbs, 20.0 * 2.0 + 12.0 * 1.5);
        assert_eq!(totals.fats, 5.0 * 2.0);
        assert_eq!(totals.sugar, 8.0 * 2.0 + 10.0 * 1.5);
        assert_eq!(totals.fiber, 2.0 * 2.0);
        assert_eq!(totals.salt, 0.5 * 2.0);
        assert_eq!(totals.entries, 2);
    }

    #[test]
    fn date_filter_excludes_other_days() {
        let log = vec![
            entry(
                Nutrition {
                    calories: 100.0,
                    ..Default::default()
                },
                1.0,
                datetime!(2026-08-28 23:59 UTC),
            ),
            entry(
                Nutrition {
                    calories: 200.0,
                    ..Default::default()
                },
                1.0,
                datetime!(2026-08-29 00:01 UTC),
            ),
        ];
        let totals = daily_totals(&log, Some(datetime!(2026-08-29 00:00 UTC).date()));
        assert_eq!(totals.calories, 200.0);
        assert_eq!(totals.entries, 1);
    }

    #[test]
    fn empty_log_totals_zero() {
        let totals = daily_totals(&[], None);
        assert_eq!(totals, NutritionTotals::default());
    }
}
