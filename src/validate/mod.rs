//! Catalog validation.
//!
//! Checks `drinks.json` (and the optional `flags.json`) the way the app will
//! consume them. Structural problems with the document as a whole stop the
//! run immediately; everything inside an entry is checked independently and
//! accumulated, so one run reports every problem in the file.
//!
//! ## Passes
//!
//! 1. **Document**: the catalog must exist, parse as JSON, and be an array.
//!    Any failure here is the only error reported.
//! 2. **Entries**: the per-entry rule set for every element.
//! 3. **Cross-references**: `relatedDrinkIds` must name catalog entries.
//! 4. **Files** (opt-in): every asset path must exist under the catalog root.
//! 5. **Flags**: type checks on the recognized keys of `flags.json`.
//!
//! [`validate_documents`] is the pure core: it takes document contents and an
//! [`AssetLookup`], so tests never touch the filesystem. [`validate`] wires it
//! to files under a catalog root.

mod entry;
mod fields;

use crate::config::CatalogConfig;
use crate::types::CatalogFlags;
use entry::CatalogScan;
use fields::type_name;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Everything one validation run found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Number of catalog elements examined (0 if the document was rejected).
    pub drinks_checked: usize,
    /// Parsed flags, when `flags.json` exists and is an object.
    pub flags: Option<CatalogFlags>,
}

impl ValidationResult {
    /// A run succeeds when it found no errors. Warnings never fail it.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Settings for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateConfig {
    /// Catalog file name, used in messages.
    pub catalog_file: String,
    /// Flags file name, used in messages.
    pub flags_file: String,
    /// Required prefix of `imagePath`.
    pub image_root: String,
    /// Required prefix of `imageVariants` values.
    pub thumb_root: String,
    /// Check that referenced assets exist.
    pub check_files: bool,
}

impl ValidateConfig {
    pub fn from_catalog_config(config: &CatalogConfig, check_files: bool) -> Self {
        Self {
            catalog_file: config.catalog.clone(),
            flags_file: config.flags.clone(),
            image_root: config.assets.image_root.clone(),
            thumb_root: config.assets.thumb_root.clone(),
            check_files,
        }
    }
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self::from_catalog_config(&CatalogConfig::default(), false)
    }
}

/// Answers whether an asset path exists.
pub trait AssetLookup {
    /// `path` is relative to the catalog root, as written in the catalog.
    fn exists(&self, path: &str) -> bool;
}

/// Asset lookup against files under a catalog root.
#[derive(Debug, Clone)]
pub struct DiskAssets {
    root: PathBuf,
}

impl DiskAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetLookup for DiskAssets {
    fn exists(&self, path: &str) -> bool {
        self.root.join(path).is_file()
    }
}

/// Validate catalog and flags contents.
///
/// `None` means the file does not exist. `assets` is consulted only when
/// `config.check_files` is set.
pub fn validate_documents(
    catalog: Option<&str>,
    flags: Option<&str>,
    config: &ValidateConfig,
    assets: &impl AssetLookup,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    let Some(content) = catalog else {
        result.error(format!("{} not found", config.catalog_file));
        return result;
    };
    let document: Value = match serde_json::from_str(content) {
        Ok(document) => document,
        Err(e) => {
            result.error(format!("{} is not valid JSON: {e}", config.catalog_file));
            return result;
        }
    };
    let Value::Array(entries) = &document else {
        result.error(format!(
            "{} must be an array of drinks, got {}",
            config.catalog_file,
            type_name(&document)
        ));
        return result;
    };

    tracing::debug!(drinks = entries.len(), "checking catalog entries");
    result.drinks_checked = entries.len();

    let mut scan = CatalogScan::new(config);
    for (index, value) in entries.iter().enumerate() {
        scan.check_entry(index, value, &mut result);
    }
    scan.check_related_ids(&mut result);

    if config.check_files {
        tracing::debug!(paths = scan.assets().len(), "checking asset files");
        for asset in scan.assets() {
            if !assets.exists(&asset.path) {
                result.error(format!("{}: missing file {}", asset.label, asset.path));
            }
        }
    }

    check_flags(flags, config, &mut result);
    result
}

fn check_flags(flags: Option<&str>, config: &ValidateConfig, result: &mut ValidationResult) {
    let Some(content) = flags else {
        return;
    };
    let file = &config.flags_file;
    let document: Value = match serde_json::from_str(content) {
        Ok(document) => document,
        Err(e) => {
            result.error(format!("{file} is not valid JSON: {e}"));
            return;
        }
    };
    let Some(object) = document.as_object() else {
        result.warning(format!(
            "{file} should be an object, got {}; flags were not checked",
            type_name(&document)
        ));
        return;
    };

    if let Some(value) = object.get(CatalogFlags::FORCE_TEXT_ONLY)
        && !value.is_boolean()
    {
        result.error(format!(
            "{file}: {} must be a boolean, got {}",
            CatalogFlags::FORCE_TEXT_ONLY,
            type_name(value)
        ));
    }
    if let Some(value) = object.get(CatalogFlags::CATALOG_VERSION)
        && !value.is_string()
    {
        result.error(format!(
            "{file}: {} must be a string, got {}",
            CatalogFlags::CATALOG_VERSION,
            type_name(value)
        ));
    }
    result.flags = Some(CatalogFlags::from_object(object));
}

/// Read a file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, ValidateError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ValidateError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validate the catalog under `root`.
pub fn validate(
    root: &Path,
    config: &CatalogConfig,
    check_files: bool,
) -> Result<ValidationResult, ValidateError> {
    let catalog = read_optional(&root.join(&config.catalog))?;
    let flags = read_optional(&root.join(&config.flags))?;
    let rules = ValidateConfig::from_catalog_config(config, check_files);

    Ok(validate_documents(
        catalog.as_deref(),
        flags.as_deref(),
        &rules,
        &DiskAssets::new(root),
    ))
}
