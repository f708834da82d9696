// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan model and macro aggregation for the nutrition dashboard.

use crate::models::lenient::{f64_from_any, string_from_any, u32_from_any};
use crate::models::workout::{status_from_any, PlanStatus};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meal slot within a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealType {
    #[serde(rename = "Early Morning")]
    EarlyMorning,
    Breakfast,
    #[serde(rename = "Mid-Morning Snack")]
    MidMorningSnack,
    Lunch,
    #[serde(rename = "Afternoon Snack")]
    AfternoonSnack,
    #[serde(rename = "Pre-Workout Meal")]
    PreWorkout,
    #[serde(rename = "Post-Workout Meal")]
    PostWorkout,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 8] = [
        MealType::EarlyMorning,
        MealType::Breakfast,
        MealType::MidMorningSnack,
        MealType::Lunch,
        MealType::AfternoonSnack,
        MealType::PreWorkout,
        MealType::PostWorkout,
        MealType::Dinner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::EarlyMorning => "Early Morning",
            MealType::Breakfast => "Breakfast",
            MealType::MidMorningSnack => "Mid-Morning Snack",
            MealType::Lunch => "Lunch",
            MealType::AfternoonSnack => "Afternoon Snack",
            MealType::PreWorkout => "Pre-Workout Meal",
            MealType::PostWorkout => "Post-Workout Meal",
            MealType::Dinner => "Dinner",
        }
    }
}

/// Macros for a meal. Grams for protein/carbs/fats, kcal for calories.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NutritionalValues {
    #[serde(default, deserialize_with = "f64_from_any")]
    pub protein: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub fats: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub calories: f64,
}

impl std::ops::AddAssign for NutritionalValues {
    fn add_assign(&mut self, other: Self) {
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fats += other.fats;
        self.calories += other.calories;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Meal {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub name: String,
    #[serde(default, deserialize_with = "string_from_any")]
    pub description: String,
    #[serde(default)]
    pub nutritional_values: NutritionalValues,
}

/// One day of meals. Totals are stored as the model reported them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealDay {
    #[serde(deserialize_with = "u32_from_any")]
    pub day: u32,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default, deserialize_with = "status_from_any")]
    pub status: PlanStatus,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub total_calories: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub total_protein: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub total_carbs: f64,
    #[serde(default, deserialize_with = "f64_from_any")]
    pub total_fats: f64,
}

impl MealDay {
    /// Sum of per-meal macros.
    pub fn meal_totals(&self) -> NutritionalValues {
        let mut totals = NutritionalValues::default();
        for meal in &self.meals {
            totals += meal.nutritional_values;
        }
        totals
    }

    /// Totals as reported by the model.
    pub fn reported_totals(&self) -> NutritionalValues {
        NutritionalValues {
            protein: self.total_protein,
            carbs: self.total_carbs,
            fats: self.total_fats,
            calories: self.total_calories,
        }
    }
}

/// Body returned by the model for a meal prompt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedMealPlan {
    pub days: Vec<MealDay>,
}

/// Stored meal plan (one per user).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Owner's auth user ID (also used as document ID)
    pub user_id: String,
    #[serde(default)]
    pub days: Vec<MealDay>,
    pub created_at: String,
    pub updated_at: String,
}

impl MealPlan {
    pub fn new(user_id: &str, now: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            days: Vec::new(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Merge generated days by day number.
    ///
    /// A day already in the plan is replaced in place, a new day number is
    /// appended, and days the model did not return are kept.
    pub fn merge_days(&mut self, days: Vec<MealDay>, now: &str) {
        for day in days {
            match self.days.iter_mut().find(|d| d.day == day.day) {
                Some(existing) => *existing = day,
                None => self.days.push(day),
            }
        }
        self.updated_at = now.to_string();
    }

    /// Macro summary for the nutrition dashboard.
    pub fn summary(&self) -> MacroSummary {
        let days: Vec<DayMacros> = self
            .days
            .iter()
            .map(|d| DayMacros {
                day: d.day,
                meal_count: d.meals.len() as u32,
                computed: d.meal_totals(),
                reported: d.reported_totals(),
            })
            .collect();

        let mut totals = NutritionalValues::default();
        for d in &days {
            totals += d.computed;
        }

        let average = if days.is_empty() {
            NutritionalValues::default()
        } else {
            let n = days.len() as f64;
            NutritionalValues {
                protein: round1(totals.protein / n),
                carbs: round1(totals.carbs / n),
                fats: round1(totals.fats / n),
                calories: round1(totals.calories / n),
            }
        };

        MacroSummary {
            percentages: MacroSplit::from_grams(&totals),
            days,
            totals,
            average,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Macros for one day, computed from meals and as reported.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayMacros {
    pub day: u32,
    pub meal_count: u32,
    pub computed: NutritionalValues,
    pub reported: NutritionalValues,
}

/// Share of each macro by grams, in percent.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroSplit {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl MacroSplit {
    pub fn from_grams(values: &NutritionalValues) -> Self {
        let total = values.protein + values.carbs + values.fats;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            protein: round1(values.protein * 100.0 / total),
            carbs: round1(values.carbs * 100.0 / total),
            fats: round1(values.fats * 100.0 / total),
        }
    }
}

/// Nutrition dashboard summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MacroSummary {
    pub days: Vec<DayMacros>,
    pub totals: NutritionalValues,
    /// Per-day average of the computed totals
    pub average: NutritionalValues,
    pub percentages: MacroSplit,
}
