// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod analysis;
pub mod image;
pub mod lenient;
pub mod meal;
pub mod preference;
pub mod user;
pub mod workout;

pub use analysis::FoodAnalysis;
pub use image::ExerciseImage;
pub use meal::{GeneratedMealPlan, MealDay, MealPlan};
pub use preference::{MealPreference, WorkoutPreference};
pub use user::User;
pub use workout::{GeneratedWorkoutPlan, PlanStatus, WorkoutPlan};
