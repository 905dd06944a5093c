//! ELA tamper scoring adapter
//!
//! Re-encodes the document image as JPEG at a fixed quality and measures
//! the mean per-channel absolute pixel difference against the original.
//! A locally edited, partially re-saved image tends to diverge more from
//! a globally recompressed baseline than an untouched one, so a higher
//! mean difference is weak evidence of tampering.

use idv_common::Error;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use tracing::debug;

/// Fixed recompression quality for the ELA baseline
const ELA_JPEG_QUALITY: u8 = 90;

/// Recompression-difference scorer
pub struct TamperScorer {
    quality: u8,
}

impl Default for TamperScorer {
    fn default() -> Self {
        Self {
            quality: ELA_JPEG_QUALITY,
        }
    }
}

impl TamperScorer {
    /// Compute the ELA difference score for one image.
    ///
    /// Returns `None` when the score cannot be computed; `None` means
    /// "unknown", not "no difference", and contributes nothing to the
    /// suspicion count downstream.
    pub fn score(&self, img: &RgbImage) -> Option<f64> {
        match self.recompression_difference(img) {
            Ok(score) => Some(score),
            Err(e) => {
                debug!("ELA score unavailable: {}", e);
                None
            }
        }
    }

    fn recompression_difference(&self, img: &RgbImage) -> idv_common::Result<f64> {
        let pixel_count = f64::from(img.width()) * f64::from(img.height());
        if pixel_count == 0.0 {
            return Err(Error::Internal("image has no pixels".to_string()));
        }

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.quality)
            .encode_image(img)
            .map_err(|e| Error::Internal(format!("JPEG re-encode failed: {}", e)))?;

        let recompressed = image::load_from_memory(&jpeg)
            .map_err(|e| Error::Internal(format!("JPEG re-decode failed: {}", e)))?
            .to_rgb8();

        if recompressed.dimensions() != img.dimensions() {
            return Err(Error::Internal(
                "recompressed image dimensions changed".to_string(),
            ));
        }

        // Mean absolute difference per channel, then mean of the means
        let mut channel_sums = [0u64; 3];
        for (original, baseline) in img.pixels().zip(recompressed.pixels()) {
            for (sum, (&a, &b)) in channel_sums
                .iter_mut()
                .zip(original.0.iter().zip(baseline.0.iter()))
            {
                *sum += u64::from(a.abs_diff(b));
            }
        }

        let mean_of_means = channel_sums
            .iter()
            .map(|&sum| sum as f64 / pixel_count)
            .sum::<f64>()
            / 3.0;

        Ok(mean_of_means)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn uniform_image_scores_low() {
        let img = RgbImage::from_pixel(64, 64, Rgb([128, 128, 128]));
        let score = TamperScorer::default().score(&img).expect("score computed");
        // A flat image survives recompression almost unchanged
        assert!(score >= 0.0);
        assert!(score < 5.0, "uniform image scored {}", score);
    }

    #[test]
    fn noisy_image_scores_higher_than_uniform() {
        let uniform = RgbImage::from_pixel(64, 64, Rgb([128, 128, 128]));
        let noisy = RgbImage::from_fn(64, 64, |x, y| {
            // Cheap deterministic high-frequency pattern
            let v = ((x * 37 + y * 101) % 251) as u8;
            Rgb([v, v.wrapping_mul(3), v.wrapping_add(89)])
        });
        let scorer = TamperScorer::default();
        let uniform_score = scorer.score(&uniform).unwrap();
        let noisy_score = scorer.score(&noisy).unwrap();
        assert!(noisy_score > uniform_score);
    }

    #[test]
    fn empty_image_yields_absent_score() {
        let img = RgbImage::new(0, 0);
        assert!(TamperScorer::default().score(&img).is_none());
    }
}
