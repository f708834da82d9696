// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloudinary signed upload for analyzed food images.

use crate::services::ai_json::AiError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use sha2::{Digest, Sha256};

/// Folder that analyzed food images are stored under.
pub const FOOD_ANALYSIS_FOLDER: &str = "food_analysis";

/// Cloudinary upload client.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryClient {
    pub fn new(base_url: &str, cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cloud_name,
            api_key,
            api_secret,
        }
    }

    /// Upload an image as a data URI and return its HTTPS URL.
    pub async fn upload_image(
        &self,
        image: &[u8],
        mime_type: &str,
        folder: &str,
    ) -> Result<String, AiError> {
        let url = format!("{}/v1_1/{}/image/upload", self.base_url, self.cloud_name);
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );
        let data_uri = format!("data:{};base64,{}", mime_type, STANDARD.encode(image));

        let response = self
            .http
            .post(&url)
            .form(&[
                ("file", data_uri.as_str()),
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.api_key.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await
            .map_err(AiError::transport)?;

        if !response.status().is_success() {
            let err = AiError::from_response(response).await;
            tracing::warn!(error = %err, "Cloudinary upload failed");
            return Err(err);
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| {
                AiError::Request(format!("Invalid upload body: {}", e.without_url()))
            })?;

        tracing::info!(folder, url = %uploaded.secure_url, "Image uploaded");
        Ok(uploaded.secure_url)
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as
/// `k=v&k=v`, secret appended, SHA-256 hex.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
