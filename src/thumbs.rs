//! Thumbnail generation.
//!
//! Reads every source image directly inside the asset root and writes the
//! small and medium PNG variants the catalog points at:
//!
//! ```text
//! drinks/
//! ├── margarita.jpg              # Source (png, jpg, jpeg, webp)
//! ├── mojito.png
//! └── _thumbs/
//!     ├── margarita_512.png      # width min(512, source width)
//!     ├── margarita_1024.png     # width min(1024, source width)
//!     ├── mojito_512.png
//!     └── mojito_1024.png
//! ```
//!
//! Sources are processed one at a time in file-name order and the first
//! failure aborts the run. Existing variants are overwritten; the returned
//! [`ThumbReport`] counts how many were new.
//!
//! Subdirectories of the asset root (including the thumbnail root itself)
//! are never read as sources.

use crate::imaging::{
    BackendError, GeneratedVariant, ImageBackend, OutputStatus, RustBackend, VariantConfig,
    create_variants, get_dimensions, is_supported_source,
};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ThumbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source directory not found: {0}")]
    SourceDirNotFound(PathBuf),
    #[error("Source file name is not valid UTF-8: {0}")]
    InvalidFileName(PathBuf),
}

/// Progress reported while generating.
#[derive(Debug, Clone, PartialEq)]
pub enum ThumbEvent {
    /// Sources were enumerated. Emitted once, before any image work.
    Started {
        source_dir: PathBuf,
        source_count: usize,
    },
    /// Every variant of one source was written.
    SourceDone {
        /// 0-based position in processing order.
        index: usize,
        name: String,
        dimensions: (u32, u32),
        variants: Vec<GeneratedVariant>,
    },
}

/// Counts for a generator run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ThumbReport {
    pub sources: u32,
    pub created: u32,
    pub overwritten: u32,
}

impl ThumbReport {
    fn record(&mut self, status: OutputStatus) {
        match status {
            OutputStatus::Created => self.created += 1,
            OutputStatus::Overwritten => self.overwritten += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.created + self.overwritten
    }
}

impl fmt::Display for ThumbReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overwritten > 0 {
            write!(
                f,
                "{} created, {} overwritten ({} total)",
                self.created,
                self.overwritten,
                self.total()
            )
        } else {
            write!(f, "{} created", self.created)
        }
    }
}

/// Source images directly inside `source_dir`, sorted by file name.
///
/// Only regular files with a supported extension count; directories,
/// symlinks (logged at debug) and other files are skipped.
pub fn collect_sources(source_dir: &Path) -> Result<Vec<PathBuf>, ThumbError> {
    if !source_dir.is_dir() {
        return Err(ThumbError::SourceDirNotFound(source_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.path_is_symlink() {
            tracing::debug!(path = %entry.path().display(), "skipping symlinked source");
        } else if entry.file_type().is_file() && is_supported_source(entry.path()) {
            sources.push(entry.into_path());
        }
    }
    Ok(sources)
}

/// Generate variants for every source in `source_dir` into `output_dir`.
pub fn generate_thumbnails(
    source_dir: &Path,
    output_dir: &Path,
    config: &VariantConfig,
    on_event: impl FnMut(&ThumbEvent),
) -> Result<ThumbReport, ThumbError> {
    let backend = RustBackend::new();
    generate_with_backend(&backend, source_dir, output_dir, config, on_event)
}

/// Generate variants using a specific backend (allows testing with mock).
pub fn generate_with_backend(
    backend: &impl ImageBackend,
    source_dir: &Path,
    output_dir: &Path,
    config: &VariantConfig,
    mut on_event: impl FnMut(&ThumbEvent),
) -> Result<ThumbReport, ThumbError> {
    let sources = collect_sources(source_dir)?;
    std::fs::create_dir_all(output_dir)?;

    on_event(&ThumbEvent::Started {
        source_dir: source_dir.to_path_buf(),
        source_count: sources.len(),
    });

    let mut report = ThumbReport::default();
    if sources.is_empty() {
        tracing::info!(dir = %source_dir.display(), "no source images found");
        return Ok(report);
    }

    for (index, source) in sources.iter().enumerate() {
        let (Some(name), Some(stem)) = (
            source.file_name().and_then(|n| n.to_str()),
            source.file_stem().and_then(|s| s.to_str()),
        ) else {
            return Err(ThumbError::InvalidFileName(source.clone()));
        };

        let dimensions = get_dimensions(backend, source)?;
        let variants = create_variants(backend, source, output_dir, stem, dimensions, config)?;
        for variant in &variants {
            report.record(variant.status);
        }
        report.sources += 1;
        tracing::debug!(source = name, width = dimensions.0, height = dimensions.1, "variants written");

        on_event(&ThumbEvent::SourceDone {
            index,
            name: name.to_string(),
            dimensions,
            variants,
        });
    }

    tracing::info!(
        sources = report.sources,
        created = report.created,
        overwritten = report.overwritten,
        "thumbnail generation finished"
    );
    Ok(report)
}
