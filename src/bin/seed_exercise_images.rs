// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Load the exercise illustration catalog into Firestore.
//!
//! Usage: seed_exercise_images <catalog.json>
//!
//! The file holds a JSON array of `{"name": ..., "url": ...}` objects.
//! Names should match the exercise list used in workout prompts.

use fitcircuit::db::FirestoreDb;
use fitcircuit::models::ExerciseImage;
use fitcircuit::services::prompts::EXERCISE_CATALOG;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: seed_exercise_images <catalog.json>"))?;
    let project_id = std::env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string());

    let content = std::fs::read_to_string(&path)?;
    let images: Vec<ExerciseImage> = serde_json::from_str(&content)?;

    let unknown: Vec<&str> = images
        .iter()
        .map(|i| i.name.as_str())
        .filter(|name| !EXERCISE_CATALOG.contains(name))
        .collect();
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "Catalog entries not in the exercise list");
    }

    let db = FirestoreDb::new(&project_id).await?;
    for image in &images {
        db.set_exercise_image(image).await?;
    }

    tracing::info!(count = images.len(), path = %path, "Exercise images seeded");
    Ok(())
}
