//! # IDV Common Library
//!
//! Shared code for the IDV services including:
//! - Common error type
//! - Configuration resolution (listen port, face model paths)

pub mod config;
pub mod error;

pub use error::{Error, Result};
