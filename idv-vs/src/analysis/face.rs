//! Face similarity adapter (optional capability)
//!
//! Backed by dlib: frontal face detector, landmark predictor, and the
//! 128-d face encoder network. The capability is resolved once at
//! startup; when the `face` feature is compiled out, the model files are
//! not configured, or model loading fails, every comparison returns
//! `None`. An absent similarity means "no comparison possible" and must
//! never be read as a low similarity.

#[cfg(feature = "face")]
use tracing::{info, warn};

/// Face matching adapter; holds the backend when the capability is available
pub struct FaceMatcher {
    #[cfg(feature = "face")]
    backend: Option<backend::DlibBackend>,
}

impl FaceMatcher {
    /// Initialize the capability, degrading to unavailable on any failure.
    pub fn initialize() -> Self {
        #[cfg(feature = "face")]
        {
            match idv_common::config::FaceModelPaths::from_env() {
                Some(paths) => match backend::DlibBackend::open(&paths) {
                    Ok(b) => return Self { backend: Some(b) },
                    Err(e) => warn!("Face matching unavailable: {}", e),
                },
                None => info!("Face matching not configured (model path variables unset)"),
            }
            Self { backend: None }
        }
        #[cfg(not(feature = "face"))]
        Self {}
    }

    /// Construct a matcher with the capability absent.
    ///
    /// This is the degraded state `initialize` falls back to; tests use
    /// it to exercise the engine without dlib.
    pub fn unavailable() -> Self {
        #[cfg(feature = "face")]
        {
            Self { backend: None }
        }
        #[cfg(not(feature = "face"))]
        Self {}
    }

    /// Whether comparisons can produce a score at all
    pub fn is_available(&self) -> bool {
        #[cfg(feature = "face")]
        {
            self.backend.is_some()
        }
        #[cfg(not(feature = "face"))]
        false
    }

    /// Similarity in [0,1] between the first face found in each image.
    ///
    /// `None` when the capability is unavailable, either image fails to
    /// decode, or no face is detected in either image.
    pub fn similarity(&self, document: &[u8], selfie: &[u8]) -> Option<f64> {
        #[cfg(feature = "face")]
        {
            self.backend.as_ref()?.similarity(document, selfie)
        }
        #[cfg(not(feature = "face"))]
        {
            let _ = (document, selfie);
            None
        }
    }
}

#[cfg(feature = "face")]
mod backend {
    use dlib_face_recognition::{
        FaceDetector, FaceDetectorTrait, FaceEncoderNetwork, FaceEncoderTrait, FaceEncoding,
        ImageMatrix, LandmarkPredictor, LandmarkPredictorTrait,
    };
    use idv_common::config::FaceModelPaths;
    use idv_common::{Error, Result};
    use tracing::debug;

    pub struct DlibBackend {
        detector: FaceDetector,
        landmarks: LandmarkPredictor,
        encoder: FaceEncoderNetwork,
    }

    impl DlibBackend {
        pub fn open(paths: &FaceModelPaths) -> Result<Self> {
            let landmarks = LandmarkPredictor::open(&paths.landmarks)
                .map_err(|e| Error::Config(format!("landmark model: {}", e)))?;
            let encoder = FaceEncoderNetwork::open(&paths.encoder)
                .map_err(|e| Error::Config(format!("encoder model: {}", e)))?;
            Ok(Self {
                detector: FaceDetector::default(),
                landmarks,
                encoder,
            })
        }

        pub fn similarity(&self, document: &[u8], selfie: &[u8]) -> Option<f64> {
            let document_encoding = self.first_face_encoding(document)?;
            let selfie_encoding = self.first_face_encoding(selfie)?;
            let distance = document_encoding.distance(&selfie_encoding);
            Some((1.0 - distance).clamp(0.0, 1.0))
        }

        /// Encode the first detected face; no multi-face disambiguation
        fn first_face_encoding(&self, bytes: &[u8]) -> Option<FaceEncoding> {
            let img = match image::load_from_memory(bytes) {
                Ok(img) => img.to_rgb8(),
                Err(e) => {
                    debug!("Face image decode failed: {}", e);
                    return None;
                }
            };
            let matrix = ImageMatrix::from_image(&img);
            let locations = self.detector.face_locations(&matrix);
            let rect = locations.first()?;
            let landmarks = self.landmarks.face_landmarks(&matrix, rect);
            let encodings = self.encoder.get_face_encodings(&matrix, &[landmarks], 0);
            encodings.first().cloned()
        }
    }
}
