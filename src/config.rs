//! Application configuration loaded from environment variables.
//!
//! Secrets (JWT key, provider API keys) are injected as environment
//! variables by the deployment; a local `.env` file is read when present.

use std::env;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Largest accepted food image upload
    pub max_upload_bytes: usize,

    /// Chat completion endpoint base (Mistral)
    pub mistral_api_url: String,
    pub mistral_model: String,
    /// Vision endpoint base (Gemini)
    pub gemini_api_url: String,
    pub gemini_model: String,
    /// Media host endpoint base (Cloudinary)
    pub cloudinary_api_url: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,

    // --- Secrets ---
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    pub mistral_api_key: String,
    pub gemini_api_key: String,
    pub cloudinary_api_secret: String,
}

impl Config {
    /// Config for tests. External endpoints point at an unroutable port.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            mistral_api_url: "http://127.0.0.1:9".to_string(),
            mistral_model: "mistral-large-latest".to_string(),
            gemini_api_url: "http://127.0.0.1:9".to_string(),
            gemini_model: "gemini-1.5-pro".to_string(),
            cloudinary_api_url: "http://127.0.0.1:9".to_string(),
            cloudinary_cloud_name: "test-cloud".to_string(),
            cloudinary_api_key: "test_cloudinary_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            mistral_api_key: "test_mistral_key".to_string(),
            gemini_api_key: "test_gemini_key".to_string(),
            cloudinary_api_secret: "test_cloudinary_secret".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),

            mistral_api_url: env::var("MISTRAL_API_URL")
                .unwrap_or_else(|_| "https://api.mistral.ai".to_string()),
            mistral_model: env::var("MISTRAL_MODEL")
                .unwrap_or_else(|_| "mistral-large-latest".to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".to_string()),
            cloudinary_api_url: env::var("CLOUDINARY_API_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com".to_string()),
            cloudinary_cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            cloudinary_api_key: required("CLOUDINARY_API_KEY")?,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            mistral_api_key: required("MISTRAL_API_KEY")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            cloudinary_api_secret: required("CLOUDINARY_API_SECRET")?,
        })
    }
}

/// Read a required variable, trimming stray whitespace from secret bindings.
fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
