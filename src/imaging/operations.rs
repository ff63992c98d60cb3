//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they plan the
//! variants of one source image, decide file names, and call the backend.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{VariantSize, plan_variants};
use super::params::{PngCompression, ResizeParams};
use crate::naming::variant_file_name;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Whether a variant file was new or replaced an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    Created,
    Overwritten,
}

/// A variant written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVariant {
    pub target_width: u32,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub status: OutputStatus,
}

/// Configuration for variant generation.
#[derive(Debug, Clone)]
pub struct VariantConfig {
    /// Nominal widths, generated in this order.
    pub widths: Vec<u32>,
    pub compression: PngCompression,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            widths: crate::naming::VARIANT_WIDTHS.to_vec(),
            compression: PngCompression::default(),
        }
    }
}

/// Create every width variant of one source image.
///
/// Variants are written one at a time in `config.widths` order. Existing
/// files are overwritten; each result records whether the file was there
/// before this call.
pub fn create_variants(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    stem: &str,
    original_dims: (u32, u32),
    config: &VariantConfig,
) -> Result<Vec<GeneratedVariant>> {
    let mut variants = Vec::new();

    for VariantSize {
        target,
        width,
        height,
    } in plan_variants(original_dims, &config.widths)
    {
        let path = output_dir.join(variant_file_name(stem, target));
        let status = if path.exists() {
            OutputStatus::Overwritten
        } else {
            OutputStatus::Created
        };

        backend.resize(&ResizeParams {
            source: source.to_path_buf(),
            output: path.clone(),
            width,
            height,
            compression: config.compression,
        })?;

        variants.push(GeneratedVariant {
            target_width: target,
            path,
            width,
            height,
            status,
        });
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1920,
            height: 1080,
        }]);

        let dims = get_dimensions(&backend, Path::new("/mojito.png")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn create_variants_small_then_medium() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();

        let variants = create_variants(
            &backend,
            Path::new("/src/margarita.jpg"),
            tmp.path(),
            "margarita",
            (2048, 1536),
            &VariantConfig::default(),
        )
        .unwrap();

        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].target_width, 512);
        assert_eq!(variants[0].path, tmp.path().join("margarita_512.png"));
        assert_eq!(variants[1].target_width, 1024);
        assert_eq!(variants[1].path, tmp.path().join("margarita_1024.png"));

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize { width: 512, height: 384, output, .. }
                if output.ends_with("margarita_512.png")
        ));
        assert!(matches!(
            &ops[1],
            RecordedOp::Resize { width: 1024, height: 768, output, .. }
                if output.ends_with("margarita_1024.png")
        ));
    }

    #[test]
    fn create_variants_does_not_upscale() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();

        let variants = create_variants(
            &backend,
            Path::new("/src/tiny.png"),
            tmp.path(),
            "tiny",
            (300, 150),
            &VariantConfig::default(),
        )
        .unwrap();

        assert!(variants.iter().all(|v| v.width == 300 && v.height == 150));
    }

    #[test]
    fn create_variants_reports_existing_outputs() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("mojito_512.png"), b"old").unwrap();
        let backend = MockBackend::new();

        let variants = create_variants(
            &backend,
            Path::new("/src/mojito.png"),
            tmp.path(),
            "mojito",
            (2000, 2000),
            &VariantConfig::default(),
        )
        .unwrap();

        assert_eq!(variants[0].status, OutputStatus::Overwritten);
        assert_eq!(variants[1].status, OutputStatus::Created);
    }

    #[test]
    fn create_variants_passes_compression() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::new();
        let config = VariantConfig {
            widths: vec![512],
            compression: PngCompression::Best,
        };

        create_variants(
            &backend,
            Path::new("/src/negroni.png"),
            tmp.path(),
            "negroni",
            (1000, 1000),
            &config,
        )
        .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                compression: PngCompression::Best,
                ..
            }
        ));
    }
}
