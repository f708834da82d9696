// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal plan and food analysis routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::meal::{MacroSummary, MealDay};
use crate::models::{FoodAnalysis, GeneratedMealPlan, MealPreference};
use crate::routes::{json_body, load_user};
use crate::AppState;
use axum::{
    extract::{
        multipart::MultipartError, rejection::JsonRejection, DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/meal", get(get_meal_plan))
        .route("/api/meal/customize", post(generate_meal_plan))
        .route("/api/meal/summary", get(get_summary))
        .route("/api/meal/preference", get(get_preference))
        .route(
            "/api/meal/analysis",
            post(analyze_food).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}

// ─── Plan Retrieval ──────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPlanResponse {
    pub meal_plan: Vec<MealDay>,
    pub message: String,
}

async fn get_meal_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MealPlanResponse>> {
    let user = load_user(&state, &auth).await?;
    let plan = state
        .db
        .get_meal_plan(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))?;

    Ok(Json(MealPlanResponse {
        meal_plan: plan.days,
        message: "Meal plan retrieved successfully".to_string(),
    }))
}

// ─── Plan Generation ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealRequest {
    pub meal_preference: MealPreference,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMealResponse {
    pub json_response: GeneratedMealPlan,
    pub message: String,
}

/// Store the preference, generate a week of meals and merge it by day.
async fn generate_meal_plan(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<GenerateMealRequest>, JsonRejection>,
) -> Result<Json<GenerateMealResponse>> {
    let body = json_body(payload)?;
    body.meal_preference.validate()?;

    let user = load_user(&state, &auth).await?;
    let generated = state
        .planner
        .generate_meal_plan(&user.auth_user_id, &body.meal_preference)
        .await?;

    Ok(Json(GenerateMealResponse {
        json_response: generated,
        message: "Meal plan generated successfully".to_string(),
    }))
}

// ─── Dashboard ───────────────────────────────────────────────

async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MacroSummary>> {
    let user = load_user(&state, &auth).await?;
    let plan = state
        .db
        .get_meal_plan(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal plan not found".to_string()))?;

    Ok(Json(plan.summary()))
}

async fn get_preference(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<MealPreference>> {
    let user = load_user(&state, &auth).await?;
    let preference = state
        .db
        .get_meal_preference(&user.auth_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Meal preference not found".to_string()))?;
    Ok(Json(preference))
}

// ─── Food Analysis ───────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodAnalysisResponse {
    /// The model's reply, relayed unchanged
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "Record<string, unknown>")
    )]
    pub json_response: FoodAnalysis,
    /// Hosted URL of the uploaded image
    pub image_part: String,
}

/// Uploaded image plus optional portion text.
struct FoodUpload {
    bytes: Vec<u8>,
    mime_type: String,
    portion: Option<String>,
}

/// Oversized uploads keep their 413; anything else malformed is a 400.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

async fn read_upload(mut multipart: Multipart) -> Result<FoodUpload> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut portion = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                file = Some((bytes.to_vec(), mime_type));
            }
            "portion" => {
                let text = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                portion = Some(text);
            }
            _ => {}
        }
    }

    let (bytes, mime_type) = file
        .filter(|(bytes, _)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    if !mime_type.starts_with("image/") {
        return Err(AppError::BadRequest(format!(
            "Unsupported file type: {}",
            mime_type
        )));
    }

    Ok(FoodUpload {
        bytes,
        mime_type,
        portion,
    })
}

/// Analyze a food photo for nutrition and a recipe.
async fn analyze_food(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<Json<FoodAnalysisResponse>> {
    let upload = read_upload(multipart).await?;
    tracing::info!(
        user_id = %auth.user_id,
        bytes = upload.bytes.len(),
        mime_type = %upload.mime_type,
        "Food analysis requested"
    );

    let result = state
        .food_analyzer
        .analyze(&upload.bytes, &upload.mime_type, upload.portion.as_deref())
        .await?;

    Ok(Json(FoodAnalysisResponse {
        json_response: result.analysis,
        image_part: result.image_url,
    }))
}
