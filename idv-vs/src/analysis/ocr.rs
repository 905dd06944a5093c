//! OCR text extraction adapter
//!
//! Runs tesseract over a document image with an ordered list of language
//! strategies. The first result whose trimmed length reaches the
//! minimum-quality threshold wins; otherwise the longest result seen
//! across strategies is kept. Extraction never fails: tesseract init
//! errors, missing traineddata, and temp-file I/O errors all degrade to
//! an empty string.

use tracing::debug;

/// Minimum trimmed length for a strategy result to win outright
const MIN_USABLE_LEN: usize = 5;

/// Default strategy order: Spanish-locale documents, general fallback
const DEFAULT_LANGUAGES: &[&str] = &["spa", "eng"];

/// Text extraction adapter over an ordered list of OCR language strategies
pub struct TextExtractor {
    languages: Vec<&'static str>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.to_vec(),
        }
    }
}

impl TextExtractor {
    /// Create an extractor with an explicit strategy order
    pub fn new(languages: Vec<&'static str>) -> Self {
        Self { languages }
    }

    /// Extract text from one document image.
    ///
    /// Returns an empty string when no strategy produces anything; an
    /// empty result means "nothing extracted", which downstream scoring
    /// treats as zero OCR confidence, not as an error.
    pub fn extract(&self, image_bytes: &[u8]) -> String {
        let mut best = String::new();
        for lang in &self.languages {
            match self.run_strategy(lang, image_bytes) {
                Ok(text) => {
                    if text.trim().chars().count() >= MIN_USABLE_LEN {
                        return text;
                    }
                    if text.trim().len() > best.trim().len() {
                        best = text;
                    }
                }
                Err(e) => {
                    debug!("OCR strategy {:?} failed: {}", lang, e);
                }
            }
        }
        best
    }

    #[cfg(feature = "ocr")]
    fn run_strategy(&self, lang: &str, image_bytes: &[u8]) -> idv_common::Result<String> {
        use idv_common::Error;
        use std::io::Write;

        // Tesseract reads from a file path, so stage the bytes first
        let mut temp_file = tempfile::NamedTempFile::new()?;
        temp_file.write_all(image_bytes)?;

        let image_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| Error::Internal("temp file path is not valid UTF-8".to_string()))?;

        let text = tesseract::Tesseract::new(None, Some(lang))
            .map_err(|e| Error::Internal(format!("Tesseract init error: {}", e)))?
            .set_image(image_path)
            .map_err(|e| Error::Internal(format!("Tesseract set image error: {}", e)))?
            .get_text()
            .map_err(|e| Error::Internal(format!("Tesseract error: {}", e)))?;

        Ok(text)
    }

    #[cfg(not(feature = "ocr"))]
    fn run_strategy(&self, _lang: &str, _image_bytes: &[u8]) -> idv_common::Result<String> {
        Err(idv_common::Error::Internal(
            "OCR support not compiled in".to_string(),
        ))
    }
}
