// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage)
//! - Preferences (one workout and one meal document per user)
//! - Plans (one workout and one meal plan per user)
//! - Exercise images (name -> URL catalog)
//!
//! Per-user documents are keyed by the auth user ID, so every upsert is a
//! single-document write.

use crate::db::collections;
use crate::error::AppError;
use crate::models::meal::MealDay;
use crate::models::workout::{PlanStatus, StatusChange};
use crate::models::{
    ExerciseImage, MealPlan, MealPreference, User, WorkoutPlan, WorkoutPreference,
};
use futures_util::{stream, StreamExt};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;

const MAX_CONCURRENT_DB_OPS: usize = 10;
// Firestore limits `IN` filters to 30 values.
const IN_FILTER_LIMIT: usize = 30;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Generic Document Helpers ────────────────────────────────

    async fn get_doc<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_doc<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by their auth user ID.
    pub async fn get_user(&self, auth_user_id: &str) -> Result<Option<User>, AppError> {
        self.get_doc(collections::USERS, auth_user_id).await
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.set_doc(collections::USERS, &user.auth_user_id, user)
            .await
    }

    // ─── Preference Operations ───────────────────────────────────

    pub async fn get_workout_preference(
        &self,
        user_id: &str,
    ) -> Result<Option<WorkoutPreference>, AppError> {
        self.get_doc(collections::WORKOUT_PREFERENCES, user_id).await
    }

    /// Overwrite the user's workout preference.
    pub async fn set_workout_preference(
        &self,
        user_id: &str,
        preference: &WorkoutPreference,
    ) -> Result<(), AppError> {
        self.set_doc(collections::WORKOUT_PREFERENCES, user_id, preference)
            .await
    }

    pub async fn get_meal_preference(
        &self,
        user_id: &str,
    ) -> Result<Option<MealPreference>, AppError> {
        self.get_doc(collections::MEAL_PREFERENCES, user_id).await
    }

    /// Overwrite the user's meal preference.
    pub async fn set_meal_preference(
        &self,
        user_id: &str,
        preference: &MealPreference,
    ) -> Result<(), AppError> {
        self.set_doc(collections::MEAL_PREFERENCES, user_id, preference)
            .await
    }

    // ─── Workout Plan Operations ─────────────────────────────────

    pub async fn get_workout_plan(&self, user_id: &str) -> Result<Option<WorkoutPlan>, AppError> {
        self.get_doc(collections::WORKOUT_PLANS, user_id).await
    }

    /// Store a workout plan, replacing any previous plan for the user.
    pub async fn set_workout_plan(&self, plan: &WorkoutPlan) -> Result<(), AppError> {
        self.set_doc(collections::WORKOUT_PLANS, &plan.user_id, plan)
            .await
    }

    /// Set one day's status and recompute its week, committed in a transaction.
    ///
    /// The read is not part of the transaction, so two concurrent changes to
    /// the same plan can still overwrite each other.
    pub async fn update_workout_day_status(
        &self,
        user_id: &str,
        week_number: u32,
        day_number: u32,
        status: PlanStatus,
    ) -> Result<StatusChange, AppError> {
        let client = self.get_client()?;

        let mut plan = self
            .get_workout_plan(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout plan not found".to_string()))?;

        let change = plan
            .set_day_status(week_number, day_number, status)
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        plan.updated_at = chrono::Utc::now().to_rfc3339();

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::WORKOUT_PLANS)
            .document_id(user_id)
            .object(&plan)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add plan to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            week_number,
            day_number,
            day_status = change.day_status.as_str(),
            week_status = change.week_status.as_str(),
            "Workout day status updated"
        );

        Ok(change)
    }

    // ─── Meal Plan Operations ────────────────────────────────────

    pub async fn get_meal_plan(&self, user_id: &str) -> Result<Option<MealPlan>, AppError> {
        self.get_doc(collections::MEAL_PLANS, user_id).await
    }

    /// Merge generated days into the user's meal plan, creating it if needed.
    ///
    /// Same read-then-transactional-write shape as the status update.
    pub async fn merge_meal_days(
        &self,
        user_id: &str,
        days: Vec<MealDay>,
    ) -> Result<MealPlan, AppError> {
        let client = self.get_client()?;
        let now = chrono::Utc::now().to_rfc3339();

        let mut plan = self
            .get_meal_plan(user_id)
            .await?
            .unwrap_or_else(|| MealPlan::new(user_id, &now));
        let incoming = days.len();
        plan.merge_days(days, &now);

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::MEAL_PLANS)
            .document_id(user_id)
            .object(&plan)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add meal plan to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::info!(
            user_id,
            incoming,
            total_days = plan.days.len(),
            "Meal plan days merged"
        );

        Ok(plan)
    }

    // ─── Exercise Image Catalog ──────────────────────────────────

    /// Store a catalog entry.
    pub async fn set_exercise_image(&self, image: &ExerciseImage) -> Result<(), AppError> {
        self.set_doc(
            collections::EXERCISE_IMAGES,
            &ExerciseImage::doc_id(&image.name),
            image,
        )
        .await
    }

    /// Look up illustration URLs for the given exercise names.
    ///
    /// Names are queried in chunks (Firestore `IN` limit) with bounded
    /// concurrency. Names without a catalog entry are absent from the map.
    pub async fn get_exercise_images(
        &self,
        names: &[String],
    ) -> Result<HashMap<String, String>, AppError> {
        if names.is_empty() {
            return Ok(HashMap::new());
        }
        let client = self.get_client()?;

        let chunks: Vec<Vec<String>> = names
            .chunks(IN_FILTER_LIMIT)
            .map(|c| c.to_vec())
            .collect();

        let results = stream::iter(chunks)
            .map(|chunk| async move {
                client
                    .fluent()
                    .select()
                    .from(collections::EXERCISE_IMAGES)
                    .filter(move |q| q.field("name").is_in(chunk.clone()))
                    .obj::<ExerciseImage>()
                    .query()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<Vec<ExerciseImage>, AppError>>>()
            .await;

        let mut images = Vec::new();
        for result in results {
            images.extend(result?);
        }

        tracing::debug!(
            requested = names.len(),
            found = images.len(),
            "Exercise images resolved"
        );

        Ok(crate::models::image::image_map(images))
    }
}
