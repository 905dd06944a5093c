//! Analysis adapters - independent signal providers
//!
//! Three adapters feed the verdict engine: OCR text extraction, ELA
//! recompression scoring, and optional face similarity. They have no data
//! dependencies on each other and every one degrades to an empty/absent
//! signal on failure rather than returning an error to the caller.

pub mod face;
pub mod ocr;
pub mod tamper;

pub use face::FaceMatcher;
pub use ocr::TextExtractor;
pub use tamper::TamperScorer;
