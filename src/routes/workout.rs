// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout plan routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::workout::{StatusChange, WorkoutProgress, WorkoutWeek};
use crate::models::{GeneratedWorkoutPlan, PlanStatus, WorkoutPreference};
use crate::routes::{json_body, load_user};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workout",
            get(get_workout_plan).post(generate_workout_plan),
        )
        .route("/api/workout/change-status", patch(change_status))
        .route("/api/workout/progress", get(get_progress))
        .route("/api/workout/preference", get(get_preference))
}

// ─── Plan Retrieval ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutPlanResponse {
    pub workout_plan: Vec<WorkoutWeek>,
}

async fn get_workout_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<WorkoutPlanResponse>> {
    let user = load_user(&state, &auth).await?;
    let plan = state
        .db
        .get_workout_plan(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan not found".to_string()))?;

    Ok(Json(WorkoutPlanResponse {
        workout_plan: plan.weeks,
    }))
}

// ─── Plan Generation ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutRequest {
    pub workout_preference: WorkoutPreference,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateWorkoutResponse {
    pub json_response: GeneratedWorkoutPlan,
}

/// Store the preference, generate a plan and replace the stored one.
async fn generate_workout_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<GenerateWorkoutRequest>, JsonRejection>,
) -> Result<Json<GenerateWorkoutResponse>> {
    let body = json_body(payload)?;
    body.workout_preference.validate()?;

    let user = load_user(&state, &auth).await?;
    let generated = state
        .planner
        .generate_workout_plan(&user.auth_user_id, &body.workout_preference)
        .await?;

    Ok(Json(GenerateWorkoutResponse {
        json_response: generated,
    }))
}

// ─── Status Updates ──────────────────────────────────────────

/// Fields are optional so a missing one is reported as a 400, not a
/// deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub week_number: Option<u32>,
    pub day_number: Option<u32>,
    pub status: Option<String>,
}

impl ChangeStatusRequest {
    /// Validate into (week, day, status).
    pub fn parse(&self) -> Result<(u32, u32, PlanStatus)> {
        let (week, day, status) = match (self.week_number, self.day_number, &self.status) {
            (Some(w), Some(d), Some(s)) if w > 0 && d > 0 && !s.is_empty() => (w, d, s),
            _ => {
                return Err(AppError::BadRequest(
                    "Missing required fields: weekNumber, dayNumber, and status".to_string(),
                ))
            }
        };

        let status = PlanStatus::parse(status).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid status value. Allowed values are 'pending' or 'completed'".to_string(),
            )
        })?;

        Ok((week, day, status))
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChangeStatusResponse {
    pub message: String,
    pub data: StatusChange,
}

/// Set a day's status and recompute the week.
async fn change_status(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<ChangeStatusRequest>, JsonRejection>,
) -> Result<Json<ChangeStatusResponse>> {
    let (week, day, status) = json_body(payload)?.parse()?;

    let user = load_user(&state, &auth).await?;
    let change = state
        .db
        .update_workout_day_status(&user.auth_user_id, week, day, status)
        .await?;

    Ok(Json(ChangeStatusResponse {
        message: "Day status updated successfully".to_string(),
        data: change,
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<WorkoutProgress>> {
    let user = load_user(&state, &auth).await?;
    let plan = state
        .db
        .get_workout_plan(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout plan not found".to_string()))?;

    Ok(Json(plan.progress()))
}

async fn get_preference(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<WorkoutPreference>> {
    let user = load_user(&state, &auth).await?;
    let preference = state
        .db
        .get_workout_preference(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout preference not found".to_string()))?;
    Ok(Json(preference))
}
