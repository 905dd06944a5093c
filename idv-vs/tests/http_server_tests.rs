//! HTTP Server & Routing Integration Tests
//!
//! Exercises the router in-process via tower::ServiceExt::oneshot; no
//! listening socket is involved. Face matching runs with the capability
//! unavailable so the tests do not depend on dlib model files.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use image::{Rgb, RgbImage};
use serde_json::Value;
use std::io::Cursor;
use tower::ServiceExt;

use idv_vs::analysis::{FaceMatcher, TamperScorer, TextExtractor};
use idv_vs::fusion::VerdictEngine;
use idv_vs::{build_router, AppState};

const BOUNDARY: &str = "idv-test-boundary";

/// Create test app state with the face capability absent
fn test_app_state() -> AppState {
    let engine = VerdictEngine::new(
        TextExtractor::default(),
        TamperScorer::default(),
        FaceMatcher::unavailable(),
    );
    AppState::new(engine)
}

/// Encode a flat-color PNG in memory
fn png_bytes(color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(32, 32, Rgb(color));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Assemble a multipart/form-data body from (field name, bytes) pairs
fn multipart_body(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, bytes) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}.png\"\r\n",
                name, name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn verify_request(parts: &[(&str, &[u8])]) -> Request<Body> {
    let body = multipart_body(parts);
    Request::builder()
        .method("POST")
        .uri("/verify")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_endpoint_returns_ok_json() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn verify_without_any_file_is_bad_request() {
    let app = build_router(test_app_state());

    let response = app.oneshot(verify_request(&[])).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Se requieren idCardFront e idCardBack");
    assert_eq!(json["received_files"], serde_json::json!([]));
    assert!(json["content_length"].is_u64());
}

#[tokio::test]
async fn verify_with_only_front_reports_received_files() {
    let app = build_router(test_app_state());
    let front = png_bytes([200, 180, 160]);

    let response = app
        .oneshot(verify_request(&[("idCardFront", &front)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["received_files"], serde_json::json!(["idCardFront"]));
}

#[tokio::test]
async fn verify_with_both_documents_returns_complete_verdict_body() {
    let app = build_router(test_app_state());
    let front = png_bytes([200, 180, 160]);
    let back = png_bytes([160, 180, 200]);

    let response = app
        .oneshot(verify_request(&[
            ("idCardFront", &front),
            ("idCardBack", &back),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);

    let verdict = json["verdict"].as_str().unwrap();
    assert!(
        ["probable_real", "probable_falso", "manual_review"].contains(&verdict),
        "unexpected verdict {}",
        verdict
    );

    let score = json["score"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&score));

    // Flat synthetic images always produce an ELA score
    assert!(json["ela"]["front"].is_f64());
    assert!(json["ela"]["back"].is_f64());

    // No selfie: face score must be null, not a number
    assert!(json["face_score"].is_null());

    assert!(json["ocr"]["front"].is_string());
    assert!(json["ocr"]["back"].is_string());
    assert!(json["ocr"]["excerpt"]["front"].is_string());
    assert!(json["ocr"]["excerpt"]["back"].is_string());
}

#[tokio::test]
async fn verify_with_selfie_and_no_face_capability_degrades_gracefully() {
    let app = build_router(test_app_state());
    let front = png_bytes([200, 180, 160]);
    let back = png_bytes([160, 180, 200]);
    let selfie = png_bytes([120, 110, 100]);

    let response = app
        .oneshot(verify_request(&[
            ("idCardFront", &front),
            ("idCardBack", &back),
            ("selfie", &selfie),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert!(json["face_score"].is_null());
    // Capability-unavailable is never a forgery signal on its own
    assert_ne!(json["verdict"], "probable_falso");
}

#[tokio::test]
async fn verify_with_undecodable_front_is_bad_request() {
    let app = build_router(test_app_state());
    let back = png_bytes([160, 180, 200]);

    let response = app
        .oneshot(verify_request(&[
            ("idCardFront", b"these bytes are not an image"),
            ("idCardBack", &back),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("idCardFront"));
}

#[tokio::test]
async fn verify_tolerates_unknown_fields() {
    let app = build_router(test_app_state());
    let front = png_bytes([200, 180, 160]);

    let response = app
        .oneshot(verify_request(&[
            ("idCardFront", &front),
            ("somethingElse", b"ignored"),
        ]))
        .await
        .unwrap();

    // Back is still missing; the unknown field shows up in diagnostics
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(
        json["received_files"],
        serde_json::json!(["idCardFront", "somethingElse"])
    );
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_router(test_app_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
