// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ai_json;
pub mod cloudinary;
pub mod food;
pub mod gemini;
pub mod mistral;
pub mod planner;
pub mod prompts;

pub use ai_json::AiError;
pub use cloudinary::CloudinaryClient;
pub use food::{AnalyzedImage, FoodAnalyzer};
pub use gemini::GeminiClient;
pub use mistral::MistralClient;
pub use planner::PlanGenerator;
