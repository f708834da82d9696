// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitCircuit: AI-generated workout and meal plans.
//!
//! This crate provides the backend API that stores user preferences,
//! generates plans through hosted language models, analyzes food photos
//! and serves dashboard summaries.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{CloudinaryClient, FoodAnalyzer, GeminiClient, MistralClient, PlanGenerator};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub planner: PlanGenerator,
    pub food_analyzer: FoodAnalyzer,
}

impl AppState {
    /// Build the state and its provider clients from configuration.
    pub fn new(config: Config, db: FirestoreDb) -> Self {
        let mistral = MistralClient::new(
            &config.mistral_api_url,
            config.mistral_api_key.clone(),
            config.mistral_model.clone(),
        );
        let gemini = GeminiClient::new(
            &config.gemini_api_url,
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
        );
        let cloudinary = CloudinaryClient::new(
            &config.cloudinary_api_url,
            config.cloudinary_cloud_name.clone(),
            config.cloudinary_api_key.clone(),
            config.cloudinary_api_secret.clone(),
        );

        Self {
            planner: PlanGenerator::new(mistral, db.clone()),
            food_analyzer: FoodAnalyzer::new(gemini, cloudinary),
            config,
            db,
        }
    }
}
