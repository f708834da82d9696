// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food image analysis: host the image, then ask the vision model about it.

use crate::error::Result;
use crate::models::FoodAnalysis;
use crate::services::ai_json::parse_ai_json;
use crate::services::cloudinary::{CloudinaryClient, FOOD_ANALYSIS_FOLDER};
use crate::services::gemini::GeminiClient;
use crate::services::prompts;

/// Analysis plus the hosted copy of the image.
#[derive(Debug)]
pub struct AnalyzedImage {
    pub analysis: FoodAnalysis,
    pub image_url: String,
}

#[derive(Clone)]
pub struct FoodAnalyzer {
    gemini: GeminiClient,
    cloudinary: CloudinaryClient,
}

impl FoodAnalyzer {
    pub fn new(gemini: GeminiClient, cloudinary: CloudinaryClient) -> Self {
        Self { gemini, cloudinary }
    }

    pub async fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        portion: Option<&str>,
    ) -> Result<AnalyzedImage> {
        let image_url = self
            .cloudinary
            .upload_image(image, mime_type, FOOD_ANALYSIS_FOLDER)
            .await?;

        let prompt = prompts::food_analysis_prompt(portion);
        let reply = self.gemini.analyze_image(&prompt, image, mime_type).await?;
        let analysis: FoodAnalysis = parse_ai_json(&reply)?;

        tracing::info!(
            food_detected = analysis.is_food(),
            has_portion = portion.is_some(),
            "Food image analyzed"
        );

        Ok(AnalyzedImage {
            analysis,
            image_url,
        })
    }
}
