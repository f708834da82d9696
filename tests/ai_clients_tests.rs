// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Provider client tests against local mock servers.

use fitcircuit::models::GeneratedWorkoutPlan;
use fitcircuit::services::ai_json::parse_ai_json;
use fitcircuit::services::{AiError, CloudinaryClient, FoodAnalyzer, GeminiClient, MistralClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn mistral(server: &MockServer) -> MistralClient {
    MistralClient::new(
        &server.uri(),
        "mistral_key".to_string(),
        "mistral-large-latest".to_string(),
    )
}

fn gemini(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        &server.uri(),
        "gemini_key".to_string(),
        "gemini-1.5-pro".to_string(),
    )
}

fn cloudinary(server: &MockServer) -> CloudinaryClient {
    CloudinaryClient::new(
        &server.uri(),
        "test-cloud".to_string(),
        "cloud_key".to_string(),
        "cloud_secret".to_string(),
    )
}

fn chat_reply(content: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "cmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    }))
}

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    }))
}

// ─── Mistral ─────────────────────────────────────────────────

#[tokio::test]
async fn test_mistral_sends_prompt_and_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer mistral_key"))
        .and(body_partial_json(json!({
            "model": "mistral-large-latest",
            "max_tokens": 1234,
            "messages": [{ "role": "user", "content": "plan please" }]
        })))
        .respond_with(chat_reply(json!("{\"weeks\": []}")))
        .expect(1)
        .mount(&server)
        .await;

    let text = mistral(&server).complete("plan please", 1234).await.unwrap();
    assert_eq!(text, "{\"weeks\": []}");
}

#[tokio::test]
async fn test_mistral_fenced_workout_reply_parses() {
    let server = MockServer::start().await;
    let reply = "```json\n{\"weeks\":[{\"week\":1,\"days\":[{\"day\":1,\"exercises\":[{\"name\":\"Plank\",\"sets\":\"3\",\"reps\":0,\"time\":\"30 sec\",\"caloriesBurned\":\"25 kcal\"}]}]}]}\n```";

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply(json!(reply)))
        .mount(&server)
        .await;

    let text = mistral(&server).complete("plan", 100).await.unwrap();
    let plan: GeneratedWorkoutPlan = parse_ai_json(&text).unwrap();

    let exercise = &plan.weeks[0].days[0].exercises[0];
    assert_eq!(exercise.name, "Plank");
    assert_eq!(exercise.sets, 3);
    assert_eq!(exercise.calories_burned, 25.0);
}

#[tokio::test]
async fn test_mistral_chunked_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_reply(json!([
            { "type": "text", "text": "{\"days\":" },
            { "type": "text", "text": "[]}" }
        ])))
        .mount(&server)
        .await;

    let text = mistral(&server).complete("meals", 100).await.unwrap();
    assert_eq!(text, "{\"days\":[]}");
}

#[tokio::test]
async fn test_mistral_no_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = mistral(&server).complete("plan", 100).await.unwrap_err();
    assert!(matches!(err, AiError::EmptyResponse), "got {:?}", err);
}

#[tokio::test]
async fn test_mistral_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = mistral(&server).complete("plan", 100).await.unwrap_err();
    match err {
        AiError::Status { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_mistral_error_body_truncated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(5000)))
        .mount(&server)
        .await;

    let err = mistral(&server).complete("plan", 100).await.unwrap_err();
    assert!(matches!(err, AiError::Status { status: 500, ref body } if body.len() == 500));
}

#[tokio::test]
async fn test_mistral_error_body_truncated_on_char_boundary() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string(format!("x{}", "é".repeat(1000))))
        .mount(&server)
        .await;

    let err = mistral(&server).complete("plan", 100).await.unwrap_err();
    match err {
        AiError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body.chars().count(), 500);
            assert!(body.starts_with("xé"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

// ─── Gemini ──────────────────────────────────────────────────

#[tokio::test]
async fn test_gemini_key_not_in_url_or_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(gemini_reply("{\"food\": \"None\"}"))
        .expect(1)
        .mount(&server)
        .await;

    gemini(&server)
        .analyze_image("what is this", PNG_BYTES, "image/png")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);

    // Closed port: the transport error must not echo the key.
    let offline = GeminiClient::new(
        "http://127.0.0.1:9",
        "SECRET_GEMINI_KEY".to_string(),
        "gemini-1.5-pro".to_string(),
    );
    let err = offline
        .analyze_image("what is this", PNG_BYTES, "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Request(_)));
    assert!(!err.to_string().contains("SECRET_GEMINI_KEY"));
    assert!(!err.to_string().contains("127.0.0.1"));
}

#[tokio::test]
async fn test_gemini_sends_inline_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .and(header("x-goog-api-key", "gemini_key"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "what is this" },
                    { "inline_data": { "mime_type": "image/png", "data": "iVBORw0KGgo=" } }
                ]
            }]
        })))
        .respond_with(gemini_reply("{\"food\": \"None\"}"))
        .expect(1)
        .mount(&server)
        .await;

    let text = gemini(&server)
        .analyze_image("what is this", PNG_BYTES, "image/png")
        .await
        .unwrap();
    assert_eq!(text, "{\"food\": \"None\"}");
}

#[tokio::test]
async fn test_gemini_no_candidates_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = gemini(&server)
        .analyze_image("what is this", PNG_BYTES, "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::EmptyResponse));
}

// ─── Cloudinary ──────────────────────────────────────────────

#[tokio::test]
async fn test_cloudinary_signed_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .and(body_string_contains("folder=food_analysis"))
        .and(body_string_contains("api_key=cloud_key"))
        .and(body_string_contains("signature_algorithm=sha256"))
        .and(body_string_contains("data%3Aimage%2Fpng%3Bbase64%2C"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "food_analysis/abc",
            "secure_url": "https://res.cloudinary.com/test-cloud/image/upload/food_analysis/abc.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = cloudinary(&server)
        .upload_image(PNG_BYTES, "image/png", "food_analysis")
        .await
        .unwrap();
    assert_eq!(
        url,
        "https://res.cloudinary.com/test-cloud/image/upload/food_analysis/abc.png"
    );
}

#[tokio::test]
async fn test_cloudinary_rejected_upload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": { "message": "Invalid Signature" } })),
        )
        .mount(&server)
        .await;

    let err = cloudinary(&server)
        .upload_image(PNG_BYTES, "image/png", "food_analysis")
        .await
        .unwrap_err();
    assert!(matches!(err, AiError::Status { status: 401, .. }));
}

// ─── Food Analyzer ───────────────────────────────────────────

#[tokio::test]
async fn test_food_analyzer_end_to_end() {
    let server = MockServer::start().await;
    let report = json!({
        "food_identification": [
            { "item": "Margherita pizza", "estimated_weight": "250g" }
        ],
        "nutritional_information": {
            "calories": "650 kcal",
            "protein": "28g",
            "carbohydrates": "80g",
            "fats": "22g"
        },
        "recipe": {
            "name": "Margherita Pizza",
            "ingredients": [{ "name": "Mozzarella", "quantity": "125g" }],
            "instructions": ["Stretch dough", "Top and bake"],
            "prep_time": "20 minutes",
            "cook_time": "10 minutes",
            "servings": "2"
        }
    });

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cloudinary.com/test-cloud/pizza.png"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .and(body_string_contains("2 slices"))
        .respond_with(gemini_reply(&format!("```json\n{}\n```", report)))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = FoodAnalyzer::new(gemini(&server), cloudinary(&server));
    let result = analyzer
        .analyze(PNG_BYTES, "image/png", Some("2 slices"))
        .await
        .unwrap();

    assert_eq!(
        result.image_url,
        "https://res.cloudinary.com/test-cloud/pizza.png"
    );
    assert!(result.analysis.is_food());
    assert_eq!(result.analysis.item_count(), 1);
    assert_eq!(serde_json::to_value(&result.analysis).unwrap(), report);
}

#[tokio::test]
async fn test_food_analyzer_no_food() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cloudinary.com/test-cloud/desk.png"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(gemini_reply("{\"food\": \"None\"}"))
        .mount(&server)
        .await;

    let analyzer = FoodAnalyzer::new(gemini(&server), cloudinary(&server));
    let result = analyzer.analyze(PNG_BYTES, "image/png", None).await.unwrap();

    assert!(!result.analysis.is_food());
    assert_eq!(
        serde_json::to_value(&result.analysis).unwrap(),
        json!({ "food": "None" })
    );
}

#[tokio::test]
async fn test_food_analyzer_relays_partial_reply() {
    let server = MockServer::start().await;
    let reply = json!({
        "food_identification": [{ "item": "Apple" }],
        "health_tip": "Great source of fiber"
    });

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cloudinary.com/test-cloud/apple.png"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(gemini_reply(&reply.to_string()))
        .mount(&server)
        .await;

    let analyzer = FoodAnalyzer::new(gemini(&server), cloudinary(&server));
    let result = analyzer.analyze(PNG_BYTES, "image/png", None).await.unwrap();

    assert!(result.analysis.get("nutritional_information").is_none());
    assert_eq!(serde_json::to_value(&result.analysis).unwrap(), reply);
}

#[tokio::test]
async fn test_food_analyzer_skips_model_when_upload_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1_1/test-cloud/image/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
        .respond_with(gemini_reply("{\"food\": \"None\"}"))
        .expect(0)
        .mount(&server)
        .await;

    let analyzer = FoodAnalyzer::new(gemini(&server), cloudinary(&server));
    let err = analyzer
        .analyze(PNG_BYTES, "image/png", None)
        .await
        .unwrap_err();
    assert!(matches!(err, fitcircuit::error::AppError::Generation(_)));
}
