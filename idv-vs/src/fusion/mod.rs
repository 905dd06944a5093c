//! Verdict fusion - combining OCR, ELA, and face signals
//!
//! The engine orchestrates the three analysis adapters over one document
//! submission and fuses the five resulting signals (text per side, ELA
//! per side, optional face similarity) into a bounded score and a
//! discrete verdict. Absence of a signal is carried as `Option`
//! throughout: "could not be computed" is structurally distinct from
//! "computed a low value", and conflating them would silently change
//! verdicts.

pub mod scoring;

pub use scoring::{assess, ocr_excerpt, Assessment, Verdict};

use crate::analysis::{FaceMatcher, TamperScorer, TextExtractor};
use idv_common::{Error, Result};
use tracing::info;

/// One verification request: two required document faces, optional selfie.
/// Immutable once received; lives only for the duration of the request.
#[derive(Debug, Clone)]
pub struct DocumentSubmission {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
    pub selfie: Option<Vec<u8>>,
}

/// Raw signals collected from the three adapters
#[derive(Debug, Clone, Default)]
pub struct DocumentSignals {
    pub ocr_front: String,
    pub ocr_back: String,
    pub ela_front: Option<f64>,
    pub ela_back: Option<f64>,
    pub face_similarity: Option<f64>,
}

/// Complete result for one submission: the raw signals, the fused
/// assessment, and the observability excerpts.
#[derive(Debug, Clone)]
pub struct VerdictOutcome {
    pub signals: DocumentSignals,
    pub assessment: Assessment,
    pub ocr_excerpt_front: String,
    pub ocr_excerpt_back: String,
}

/// Fusion engine owning the three analysis adapters
pub struct VerdictEngine {
    ocr: TextExtractor,
    tamper: TamperScorer,
    face: FaceMatcher,
}

impl VerdictEngine {
    /// Create an engine from its adapters.
    ///
    /// Face capability availability is fixed by the `FaceMatcher` passed
    /// in, which makes the capability-absent behavior testable in
    /// isolation.
    pub fn new(ocr: TextExtractor, tamper: TamperScorer, face: FaceMatcher) -> Self {
        Self { ocr, tamper, face }
    }

    /// Whether face comparisons can contribute a signal at all
    pub fn face_available(&self) -> bool {
        self.face.is_available()
    }

    /// Evaluate one submission.
    ///
    /// The only error path is a required document image that does not
    /// decode (surfaced as invalid input); every adapter failure degrades
    /// to an absent/empty signal and still produces a complete outcome.
    pub fn evaluate(&self, submission: &DocumentSubmission) -> Result<VerdictOutcome> {
        let front_img = image::load_from_memory(&submission.front)
            .map_err(|e| Error::InvalidInput(format!("idCardFront is not a decodable image: {}", e)))?
            .to_rgb8();
        let back_img = image::load_from_memory(&submission.back)
            .map_err(|e| Error::InvalidInput(format!("idCardBack is not a decodable image: {}", e)))?
            .to_rgb8();

        // The three adapters are independent; run them sequentially
        let ocr_front = self.ocr.extract(&submission.front);
        let ocr_back = self.ocr.extract(&submission.back);
        let ela_front = self.tamper.score(&front_img);
        let ela_back = self.tamper.score(&back_img);
        let face_similarity = submission
            .selfie
            .as_deref()
            .and_then(|selfie| self.face.similarity(&submission.front, selfie));

        let signals = DocumentSignals {
            ocr_front,
            ocr_back,
            ela_front,
            ela_back,
            face_similarity,
        };

        let assessment = assess(&signals);
        let ocr_excerpt_front = ocr_excerpt(&signals.ocr_front);
        let ocr_excerpt_back = ocr_excerpt(&signals.ocr_back);

        info!(
            verdict = %assessment.verdict,
            score = assessment.score,
            suspicion = assessment.suspicion,
            "Verdict computed"
        );

        Ok(VerdictOutcome {
            signals,
            assessment,
            ocr_excerpt_front,
            ocr_excerpt_back,
        })
    }
}
