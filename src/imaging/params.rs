//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how*. They sit between
//! [`operations`](super::operations), which decides which variants to write,
//! and the [`backend`](super::backend), which does the pixel work, so tests
//! can swap in a recording mock without touching operation logic.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// PNG compression level for encoded variants.
///
/// Compression never changes pixels, only file size and encode time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

/// Parameters for a resize-to-PNG operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub compression: PngCompression,
}
