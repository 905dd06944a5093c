//! Fusion scoring - fixed-threshold heuristics
//!
//! All thresholds are named constants and evaluation is order
//! independent. Verdict selection applies the suspicion override before
//! the score threshold: two or more suspicion points force a forgery
//! verdict no matter how high the composite score is.

use super::DocumentSignals;
use serde::Serialize;

/// ELA difference above this (strict) adds one suspicion point per side
pub const ELA_SUSPICION_THRESHOLD: f64 = 10.0;

/// Face similarity below this (strict) adds one suspicion point
pub const FACE_MISMATCH_THRESHOLD: f64 = 0.4;

/// Face similarity above this (strict) counts as a positive face match.
/// A present similarity between the two face thresholds is a deliberate
/// neutral dead zone: it contributes to neither suspicion nor influence.
pub const FACE_MATCH_THRESHOLD: f64 = 0.6;

/// Trimmed OCR text longer than this (strict) counts as plausible per side
pub const MIN_PLAUSIBLE_TEXT_LEN: usize = 10;

/// Composite score above this (strict) yields a "probably real" verdict
pub const REAL_SCORE_THRESHOLD: f64 = 0.65;

/// Maximum length of the OCR excerpt kept for observability
pub const OCR_EXCERPT_LEN: usize = 300;

// Weight layout: OCR plausibility and face match carry 0.4 each (maxing
// when both sides pass resp. the face matches), absence of suspicion
// carries the remaining 0.2 and degrades linearly, floored once
// suspicion reaches 2.
const OCR_SIDE_WEIGHT: f64 = 0.4;
const FACE_WEIGHT: f64 = 0.4;
const CLEANLINESS_WEIGHT: f64 = 0.2;

/// Discrete triage outcome per submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "probable_real")]
    ProbableReal,
    #[serde(rename = "probable_falso")]
    ProbableFalso,
    #[serde(rename = "manual_review")]
    ManualReview,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::ProbableReal => write!(f, "probable_real"),
            Verdict::ProbableFalso => write!(f, "probable_falso"),
            Verdict::ManualReview => write!(f, "manual_review"),
        }
    }
}

/// Fused assessment derived from one submission's signals
#[derive(Debug, Clone, Copy)]
pub struct Assessment {
    /// Count of tamper/mismatch indicators
    pub suspicion: u32,
    /// Count of sides with plausible extracted text (0..=2)
    pub ocr_confidence: u32,
    /// 1 when a confidently-similar face was found, else 0
    pub face_influence: u32,
    /// Composite score in [0,1], rounded to 3 decimals
    pub score: f64,
    pub verdict: Verdict,
}

/// Fuse the five signals into a bounded score and discrete verdict.
///
/// Absent signals contribute nothing: a missing ELA or face score is
/// never suspicion, and the default-weight calculation keeps the score
/// in range even when every signal is absent.
pub fn assess(signals: &DocumentSignals) -> Assessment {
    let mut suspicion = 0u32;
    if matches!(signals.ela_front, Some(v) if v > ELA_SUSPICION_THRESHOLD) {
        suspicion += 1;
    }
    if matches!(signals.ela_back, Some(v) if v > ELA_SUSPICION_THRESHOLD) {
        suspicion += 1;
    }
    if matches!(signals.face_similarity, Some(v) if v < FACE_MISMATCH_THRESHOLD) {
        suspicion += 1;
    }

    let mut ocr_confidence = 0u32;
    if signals.ocr_front.trim().chars().count() > MIN_PLAUSIBLE_TEXT_LEN {
        ocr_confidence += 1;
    }
    if signals.ocr_back.trim().chars().count() > MIN_PLAUSIBLE_TEXT_LEN {
        ocr_confidence += 1;
    }

    let face_influence =
        u32::from(matches!(signals.face_similarity, Some(v) if v > FACE_MATCH_THRESHOLD));

    let cleanliness = f64::from(2u32.saturating_sub(suspicion)) / 2.0;
    let raw = f64::from(ocr_confidence) * OCR_SIDE_WEIGHT
        + f64::from(face_influence) * FACE_WEIGHT
        + cleanliness * CLEANLINESS_WEIGHT;
    let clamped = raw.clamp(0.0, 1.0);

    // Suspicion override first, then the score threshold
    let verdict = if suspicion >= 2 {
        Verdict::ProbableFalso
    } else if clamped > REAL_SCORE_THRESHOLD {
        Verdict::ProbableReal
    } else {
        Verdict::ManualReview
    };

    Assessment {
        suspicion,
        ocr_confidence,
        face_influence,
        score: round3(clamped),
        verdict,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// First 300 characters of the trimmed text, newlines collapsed to spaces.
/// Recorded for observability only; never feeds back into the verdict.
pub fn ocr_excerpt(text: &str) -> String {
    text.trim()
        .chars()
        .take(OCR_EXCERPT_LEN)
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect()
}
