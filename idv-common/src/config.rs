//! Configuration resolution for IDV services
//!
//! Provides multi-tier resolution for the listen port and for the face
//! model file paths. No config file is involved: the service is meant to
//! run with zero configuration and sane defaults.

use std::path::PathBuf;
use tracing::warn;

/// Default listen port for the verify service
pub const DEFAULT_VERIFY_PORT: u16 = 5001;

/// Environment variable overriding the listen port
pub const VERIFY_PORT_ENV: &str = "VERIFY_PORT";

/// Environment variable pointing at the dlib landmark predictor model
pub const FACE_LANDMARKS_MODEL_ENV: &str = "IDV_FACE_LANDMARKS_MODEL";

/// Environment variable pointing at the dlib face encoder model
pub const FACE_ENCODER_MODEL_ENV: &str = "IDV_FACE_ENCODER_MODEL";

/// Resolve the listen port following priority order:
/// 1. Command-line argument (highest priority)
/// 2. `VERIFY_PORT` environment variable
/// 3. Compiled default (5001)
///
/// A malformed environment value is ignored with a warning rather than
/// aborting startup.
pub fn resolve_listen_port(cli_arg: Option<u16>) -> u16 {
    // Priority 1: Command-line argument
    if let Some(port) = cli_arg {
        return port;
    }

    // Priority 2: Environment variable
    if let Ok(raw) = std::env::var(VERIFY_PORT_ENV) {
        match raw.trim().parse::<u16>() {
            Ok(port) if port != 0 => return port,
            _ => {
                warn!(
                    "Ignoring invalid {} value {:?}, using default {}",
                    VERIFY_PORT_ENV, raw, DEFAULT_VERIFY_PORT
                );
            }
        }
    }

    // Priority 3: Compiled default
    DEFAULT_VERIFY_PORT
}

/// Face model file locations for the optional face-matching capability
#[derive(Debug, Clone)]
pub struct FaceModelPaths {
    pub landmarks: PathBuf,
    pub encoder: PathBuf,
}

impl FaceModelPaths {
    /// Resolve model paths from the environment.
    ///
    /// Returns `None` when either variable is unset; the caller treats
    /// this as "face capability not configured" and degrades gracefully.
    pub fn from_env() -> Option<Self> {
        let landmarks = std::env::var(FACE_LANDMARKS_MODEL_ENV).ok()?;
        let encoder = std::env::var(FACE_ENCODER_MODEL_ENV).ok()?;
        Some(Self {
            landmarks: PathBuf::from(landmarks),
            encoder: PathBuf::from(encoder),
        })
    }
}
