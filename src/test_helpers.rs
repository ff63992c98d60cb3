//! Shared test utilities for the drink-catalog test suite.
//!
//! Provides fixture setup, synthetic image writers, catalog entry builders,
//! and [`AssetLookup`] doubles for the validator.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let result = validate(tmp.path(), &CatalogConfig::default(), true).unwrap();
//! assert!(result.success());
//!
//! let entry = valid_entry("margarita");
//! assert_eq!(entry["imagePath"], "drinks/margarita.png");
//! ```

use crate::validate::AssetLookup;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/catalog/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/catalog");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Synthetic images
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

/// Write a gradient PNG of the given size.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// Write a gradient JPEG of the given size.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    gradient(width, height)
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

// =========================================================================
// Catalog builders
// =========================================================================

/// A catalog entry that passes every rule with the stock config.
///
/// Paths follow the naming convention for `id`, so tests only need to
/// override the field under test.
pub fn valid_entry(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Test Drink",
        "category": "sour",
        "popularity": 50,
        "imagePath": format!("drinks/{id}.png"),
        "imageVariants": {
            "sm": format!("drinks/_thumbs/{id}_512.png"),
            "md": format!("drinks/_thumbs/{id}_1024.png"),
        },
    })
}

// =========================================================================
// Asset lookups
// =========================================================================

/// In-memory asset set.
#[derive(Debug, Default)]
pub struct FakeAssets(pub HashSet<String>);

impl AssetLookup for FakeAssets {
    fn exists(&self, path: &str) -> bool {
        self.0.contains(path)
    }
}

/// Asset lookup that must never be consulted.
pub struct UnreachableAssets;

impl AssetLookup for UnreachableAssets {
    fn exists(&self, path: &str) -> bool {
        panic!("asset lookup consulted for {path} with file checks off")
    }
}
