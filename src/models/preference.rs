// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout and meal preferences submitted from the customization forms.
//!
//! One document per user in each collection, overwritten on every plan
//! request.

use crate::models::lenient::{f64_from_any, u32_from_any};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

// ─── Workout ─────────────────────────────────────────────────

/// Training goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FitnessGoal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    #[serde(rename = "Endurance")]
    Endurance,
    #[serde(rename = "General Fitness")]
    GeneralFitness,
    #[serde(rename = "Flexibility & Mobility")]
    FlexibilityMobility,
    #[serde(rename = "Event-Specific Training")]
    EventSpecific,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::GeneralFitness => "General Fitness",
            FitnessGoal::FlexibilityMobility => "Flexibility & Mobility",
            FitnessGoal::EventSpecific => "Event-Specific Training",
        }
    }
}

/// Training intensity. Accepts lowercase spellings from older clients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum IntensityLevel {
    #[serde(alias = "beginner")]
    Beginner,
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "advanced")]
    Advanced,
}

impl IntensityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityLevel::Beginner => "Beginner",
            IntensityLevel::Intermediate => "Intermediate",
            IntensityLevel::Advanced => "Advanced",
        }
    }
}

/// Height/weight used in prompts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BodyMetrics {
    /// Height in cm
    #[serde(deserialize_with = "f64_from_any")]
    #[validate(range(min = 50.0, max = 300.0, message = "height must be in cm"))]
    pub height: f64,
    /// Weight in kg
    #[serde(deserialize_with = "f64_from_any")]
    #[validate(range(min = 20.0, max = 500.0, message = "weight must be in kg"))]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
}

/// Workout customization form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutPreference {
    pub goal: FitnessGoal,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub event_name: String,
    #[validate(nested)]
    pub body_metrics: BodyMetrics,
    /// Program length in weeks
    #[serde(deserialize_with = "u32_from_any")]
    #[validate(range(min = 1, max = 52))]
    pub program_duration: u32,
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Session length in minutes
    #[serde(deserialize_with = "u32_from_any")]
    #[validate(range(min = 1, max = 600))]
    pub session_length: u32,
    /// Training days per week
    #[serde(deserialize_with = "u32_from_any")]
    #[validate(range(min = 1, max = 7))]
    pub weekly_frequency: u32,
    #[serde(default)]
    pub no_rest_days: bool,
    pub intensity_level: IntensityLevel,
    #[serde(default)]
    pub health_considerations: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub additional_details: String,
}

// ─── Meal ────────────────────────────────────────────────────

/// Number of meals per day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealCountPreference {
    #[serde(rename = "3 Meals")]
    Three,
    #[serde(rename = "5 Meals")]
    Five,
    #[serde(rename = "6+ Meals")]
    SixPlus,
}

impl MealCountPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealCountPreference::Three => "3 Meals",
            MealCountPreference::Five => "5 Meals",
            MealCountPreference::SixPlus => "6+ Meals",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    #[serde(rename = "Gluten-free")]
    GlutenFree,
    #[serde(rename = "Lactose-free")]
    LactoseFree,
    Halal,
    Jain,
    Kosher,
    None,
}

impl DietaryRestriction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "Vegetarian",
            DietaryRestriction::Vegan => "Vegan",
            DietaryRestriction::GlutenFree => "Gluten-free",
            DietaryRestriction::LactoseFree => "Lactose-free",
            DietaryRestriction::Halal => "Halal",
            DietaryRestriction::Jain => "Jain",
            DietaryRestriction::Kosher => "Kosher",
            DietaryRestriction::None => "None",
        }
    }
}

/// Meal customization form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPreference {
    #[validate(length(min = 1, max = 200))]
    pub goal: String,
    /// Daily calorie target (kcal)
    #[serde(default, deserialize_with = "f64_from_any")]
    #[validate(range(min = 0.0, max = 10000.0))]
    pub caloric_intake_goal: f64,
    pub meal_count_preference: MealCountPreference,
    #[serde(default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub allergies: String,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub bmi: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub height: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub weight: f64,
    #[serde(default, deserialize_with = "u32_from_any")]
    #[validate(range(max = 130))]
    pub age: u32,
}

impl MealPreference {
    /// Restrictions for the prompt; `None` when nothing meaningful was chosen.
    pub fn restrictions_text(&self) -> Option<String> {
        let names: Vec<&str> = self
            .dietary_restrictions
            .iter()
            .filter(|r| **r != DietaryRestriction::None)
            .map(DietaryRestriction::as_str)
            .collect();
        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }
}
