// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation service.
//!
//! Handles the core workflow for both plan kinds:
//! 1. Overwrite the user's preference document
//! 2. Build the prompt and call the chat completion API
//! 3. Strip code fences and parse the reply
//! 4. Reshape (exercise images, derived statuses) and store the plan

use crate::db::FirestoreDb;
use crate::error::Result;
use crate::models::{
    GeneratedMealPlan, GeneratedWorkoutPlan, MealPreference, WorkoutPlan, WorkoutPreference,
};
use crate::services::ai_json::parse_ai_json;
use crate::services::mistral::{MistralClient, MEAL_MAX_TOKENS, WORKOUT_MAX_TOKENS};
use crate::services::prompts;

/// Generates workout and meal plans through the chat completion API.
#[derive(Clone)]
pub struct PlanGenerator {
    mistral: MistralClient,
    db: FirestoreDb,
}

impl PlanGenerator {
    pub fn new(mistral: MistralClient, db: FirestoreDb) -> Self {
        Self { mistral, db }
    }

    /// Generate and store a workout plan, replacing the previous one.
    pub async fn generate_workout_plan(
        &self,
        user_id: &str,
        preference: &WorkoutPreference,
    ) -> Result<GeneratedWorkoutPlan> {
        self.db.set_workout_preference(user_id, preference).await?;

        let prompt = prompts::workout_prompt(preference);
        tracing::info!(
            user_id,
            weeks = preference.program_duration,
            days_per_week = preference.weekly_frequency,
            "Generating workout plan"
        );

        let reply = self.mistral.complete(&prompt, WORKOUT_MAX_TOKENS).await?;
        let mut generated: GeneratedWorkoutPlan = parse_ai_json(&reply)?;

        let names = generated.exercise_names();
        let images = self.db.get_exercise_images(&names).await?;
        generated.apply_images(&images);
        generated.normalize();

        let now = chrono::Utc::now().to_rfc3339();
        let created_at = self
            .db
            .get_workout_plan(user_id)
            .await?
            .map(|p| p.created_at)
            .unwrap_or_else(|| now.clone());

        let plan = WorkoutPlan {
            user_id: user_id.to_string(),
            weeks: generated.weeks.clone(),
            created_at,
            updated_at: now,
        };
        self.db.set_workout_plan(&plan).await?;

        tracing::info!(
            user_id,
            weeks = plan.weeks.len(),
            exercises = names.len(),
            images_matched = images.len(),
            "Workout plan stored"
        );

        Ok(generated)
    }

    /// Generate a week of meals and merge it into the stored plan.
    pub async fn generate_meal_plan(
        &self,
        user_id: &str,
        preference: &MealPreference,
    ) -> Result<GeneratedMealPlan> {
        self.db.set_meal_preference(user_id, preference).await?;

        let prompt = prompts::meal_prompt(preference);
        tracing::info!(user_id, days = prompts::MEAL_PLAN_DAYS, "Generating meal plan");

        let reply = self.mistral.complete(&prompt, MEAL_MAX_TOKENS).await?;
        let generated: GeneratedMealPlan = parse_ai_json(&reply)?;

        self.db
            .merge_meal_days(user_id, generated.days.clone())
            .await?;

        Ok(generated)
    }
}
