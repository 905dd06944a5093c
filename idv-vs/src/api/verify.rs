//! Document verification endpoint

use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_LENGTH;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::fusion::{DocumentSubmission, Verdict, VerdictOutcome};
use crate::AppState;

/// Multipart field carrying the document front image
pub const FIELD_FRONT: &str = "idCardFront";
/// Multipart field carrying the document back image
pub const FIELD_BACK: &str = "idCardBack";
/// Optional multipart field carrying the selfie image
pub const FIELD_SELFIE: &str = "selfie";

/// Response body for a completed verification
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub verdict: Verdict,
    pub score: f64,
    pub ela: ElaSection,
    pub ocr: OcrSection,
    pub face_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ElaSection {
    pub front: Option<f64>,
    pub back: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct OcrSection {
    pub front: String,
    pub back: String,
    pub excerpt: OcrExcerptSection,
}

#[derive(Debug, Serialize)]
pub struct OcrExcerptSection {
    pub front: String,
    pub back: String,
}

impl From<VerdictOutcome> for VerifyResponse {
    fn from(outcome: VerdictOutcome) -> Self {
        Self {
            success: true,
            verdict: outcome.assessment.verdict,
            score: outcome.assessment.score,
            ela: ElaSection {
                front: outcome.signals.ela_front,
                back: outcome.signals.ela_back,
            },
            ocr: OcrSection {
                front: outcome.signals.ocr_front,
                back: outcome.signals.ocr_back,
                excerpt: OcrExcerptSection {
                    front: outcome.ocr_excerpt_front,
                    back: outcome.ocr_excerpt_back,
                },
            },
            face_score: outcome.signals.face_similarity,
        }
    }
}

/// POST /verify
///
/// Multipart form fields: `idCardFront` (required), `idCardBack`
/// (required), `selfie` (optional). Unknown fields are tolerated and
/// show up in the 400 diagnostics when a required field is missing.
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<VerifyResponse>> {
    let content_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let mut front: Option<Vec<u8>> = None;
    let mut back: Option<Vec<u8>> = None;
    let mut selfie: Option<Vec<u8>> = None;
    let mut received_files: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field {}: {}", name, e)))?;
        received_files.push(name.clone());

        match name.as_str() {
            FIELD_FRONT => front = Some(bytes.to_vec()),
            FIELD_BACK => back = Some(bytes.to_vec()),
            FIELD_SELFIE => selfie = Some(bytes.to_vec()),
            _ => {}
        }
    }

    let (Some(front), Some(back)) = (front, back) else {
        warn!(
            "Missing idCardFront/idCardBack in /verify request. files={:?} content_length={:?}",
            received_files, content_length
        );
        return Err(ApiError::MissingDocuments {
            received_files,
            content_length,
        });
    };

    let submission = DocumentSubmission {
        front,
        back,
        selfie,
    };

    // The full analysis pipeline is blocking (imaging, OCR, face work);
    // keep it off the async worker threads
    let engine = state.engine.clone();
    let outcome = tokio::task::spawn_blocking(move || engine.evaluate(&submission))
        .await
        .map_err(|e| ApiError::Internal(format!("Verification task failed: {}", e)))??;

    info!(
        "OCR excerpts front={:?} back={:?}",
        outcome.ocr_excerpt_front, outcome.ocr_excerpt_back
    );

    Ok(Json(VerifyResponse::from(outcome)))
}
