use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::products::model::ProductRecord;

/// Daily nutrition targets. Unlike `Nutrition`, these are absolute daily
/// amounts, not per-100g figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub sugar: Option<f64>,
    pub fiber: Option<f64>,
    pub salt: Option<f64>,
}

impl Default for DailyGoals {
    fn default() -> Self {
        // Guest defaults, applied until the user edits or generates goals.
        Self {
            calories: 2200.0,
            protein: 150.0,
            carbs: 250.0,
            fats: 70.0,
            sugar: None,
            fiber: None,
            salt: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    LoseWeight,
    Maintain,
    GainMuscle,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        })
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FitnessGoal::LoseWeight => "lose_weight",
            FitnessGoal::Maintain => "maintain",
            FitnessGoal::GainMuscle => "gain_muscle",
        })
    }
}

/// Body stats used to generate personalized daily goals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyStats {
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub goal: FitnessGoal,
}

/// One diet-log entry: a product at a quantity multiplier of its per-100g
/// figures. Entries are append-only; removal is by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub product: ProductRecord,
    pub quantity: f64,
    pub unit: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
}

/// The mutable per-user state behind a `profiles` row. Guests get
/// `ProfileData::default()` and nothing is persisted for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub goals: DailyGoals,
    #[serde(default)]
    pub history: Vec<ProductRecord>,
    #[serde(default)]
    pub log: Vec<LogEntry>,
    pub stats: Option<BodyStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_defaults_match_expected_targets() {
        let goals = DailyGoals::default();
        assert_eq!(goals.calories, 2200.0);
        assert_eq!(goals.protein, 150.0);
        assert_eq!(goals.carbs, 250.0);
        assert_eq!(goals.fats, 70.0);
        assert!(goals.sugar.is_none());
    }

    #[test]
    fn body_stats_wire_format_is_snake_case() {
        let stats = BodyStats {
            age: 30,
            gender: Gender::Other,
            weight_kg: 70.0,
            height_cm: 175.0,
            activity_level: ActivityLevel::VeryActive,
            goal: FitnessGoal::GainMuscle,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["activity_level"], "very_active");
        assert_eq!(json["goal"], "gain_muscle");
        assert_eq!(stats.activity_level.to_string(), "very_active");
    }

    #[test]
    fn empty_profile_json_deserializes_to_defaults() {
        let profile: ProfileData = serde_json::from_str("{}").unwrap();
        assert!(profile.history.is_empty());
        assert!(profile.log.is_empty());
        assert_eq!(profile.goals, DailyGoals::default());
    }
}
