// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current user profile routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::User;
use crate::routes::{json_body, load_user};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/user", get(get_user).put(upsert_user))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub user: User,
    pub message: String,
}

/// Get current user profile.
async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = load_user(&state, &auth).await?;
    Ok(Json(UserResponse {
        user,
        message: "User retrieved successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
}

/// Create or update the caller's profile.
async fn upsert_user(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    payload: std::result::Result<Json<UpsertUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let body = json_body(payload)?;
    body.validate()?;

    let now = chrono::Utc::now().to_rfc3339();
    let created_at = state
        .db
        .get_user(&auth.user_id)
        .await?
        .map(|u| u.created_at)
        .unwrap_or_else(|| now.clone());

    let user = User {
        auth_user_id: auth.user_id.clone(),
        username: body.username.trim().to_string(),
        email: body.email,
        created_at,
        updated_at: now,
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %auth.user_id, "User profile saved");

    Ok(Json(UserResponse {
        user,
        message: "User saved successfully".to_string(),
    }))
}
