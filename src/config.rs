//! Catalog configuration.
//!
//! An optional `catalog.toml` in the catalog root overrides where the
//! documents and asset trees live. Every key is optional; stock defaults match
//! the layout the mobile app's CDN feed uses:
//!
//! ```text
//! <root>/
//! ├── catalog.toml            # This file (optional)
//! ├── drinks.json             # Catalog (required by `validate`)
//! ├── flags.json              # Feature flags (optional)
//! └── drinks/                 # Asset root: source images
//!     ├── margarita.png
//!     └── _thumbs/            # Thumbnail root: generated variants
//!         ├── margarita_512.png
//!         └── margarita_1024.png
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! catalog = "drinks.json"
//! flags = "flags.json"
//!
//! [assets]
//! image_root = "drinks/"
//! thumb_root = "drinks/_thumbs/"
//!
//! [thumbnails]
//! compression = "default"   # PNG compression: fast | default | best
//! ```
//!
//! Unknown keys are rejected to catch typos early.
//!
//! The filesystem cross-check is not a config key: it follows the
//! `VALIDATE_IMAGE_FILES` environment variable (see [`image_checks_enabled`])
//! so CI jobs without checked-out binaries can share the same config file.

use crate::imaging::PngCompression;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the catalog root.
pub const CONFIG_FILENAME: &str = "catalog.toml";

/// Environment variable that enables on-disk existence checks.
pub const IMAGE_CHECK_ENV: &str = "VALIDATE_IMAGE_FILES";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Catalog configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog document, relative to the root.
    pub catalog: String,
    /// Flags document, relative to the root.
    pub flags: String,
    /// Asset path prefixes.
    pub assets: AssetsConfig,
    /// Thumbnail generator settings.
    pub thumbnails: ThumbnailsConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog: "drinks.json".to_string(),
            flags: "flags.json".to_string(),
            assets: AssetsConfig::default(),
            thumbnails: ThumbnailsConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.trim().is_empty() {
            return Err(ConfigError::Validation("catalog must not be empty".into()));
        }
        if self.flags.trim().is_empty() {
            return Err(ConfigError::Validation("flags must not be empty".into()));
        }
        for (key, root) in [
            ("assets.image_root", &self.assets.image_root),
            ("assets.thumb_root", &self.assets.thumb_root),
        ] {
            if root.is_empty() || !root.ends_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a non-empty prefix ending with '/'"
                )));
            }
        }
        if self.assets.image_root == self.assets.thumb_root {
            return Err(ConfigError::Validation(
                "assets.thumb_root must differ from assets.image_root".into(),
            ));
        }
        Ok(())
    }
}

/// Path prefixes every catalog asset must start with.
///
/// Both prefixes double as directories relative to the catalog root: the
/// thumbnail generator reads sources from `image_root` and writes variants to
/// `thumb_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Prefix of every `imagePath`.
    pub image_root: String,
    /// Prefix of every `imageVariants` path.
    pub thumb_root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_root: "drinks/".to_string(),
            thumb_root: "drinks/_thumbs/".to_string(),
        }
    }
}

/// Thumbnail generator settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailsConfig {
    /// PNG compression level for generated variants.
    pub compression: PngCompression,
}

/// Whether the raw value of [`IMAGE_CHECK_ENV`] enables file checks.
///
/// Only the exact string `"true"` does; `"TRUE"`, `"1"`, `"yes"`, an empty
/// value and an unset variable all leave the checks off.
pub fn image_checks_enabled(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Load config from `catalog.toml` in the given directory.
///
/// Returns the stock defaults when the file does not exist.
pub fn load_config(root: &Path) -> Result<CatalogConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(CatalogConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: CatalogConfig = toml::from_str(&content)?;
    config.validate()?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Drink Catalog Configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Paths are relative to the catalog root (--root).
# Unknown keys will cause an error.

# Catalog document: a JSON array of drink entries.
catalog = "drinks.json"

# Optional feature-flags document (forceTextOnly, catalogVersion).
flags = "flags.json"

# ---------------------------------------------------------------------------
# Asset prefixes
# ---------------------------------------------------------------------------
[assets]
# Every imagePath must start with this prefix. The thumbnail generator reads
# its source images from this directory.
image_root = "drinks/"

# Every imageVariants path must start with this prefix. Generated variants
# (<stem>_512.png, <stem>_1024.png) are written to this directory.
thumb_root = "drinks/_thumbs/"

# ---------------------------------------------------------------------------
# Thumbnail generation
# ---------------------------------------------------------------------------
[thumbnails]
# PNG compression: "fast", "default" or "best".
compression = "default"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.catalog, "drinks.json");
        assert_eq!(config.flags, "flags.json");
        assert_eq!(config.assets.image_root, "drinks/");
        assert_eq!(config.assets.thumb_root, "drinks/_thumbs/");
        assert_eq!(config.thumbnails.compression, PngCompression::Default);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[assets]
image_root = "img/"
"#;
        let config: CatalogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.assets.image_root, "img/");
        // Defaults preserved
        assert_eq!(config.assets.thumb_root, "drinks/_thumbs/");
        assert_eq!(config.catalog, "drinks.json");
    }

    #[test]
    fn parse_compression() {
        let toml = r#"
[thumbnails]
compression = "best"
"#;
        let config: CatalogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.thumbnails.compression, PngCompression::Best);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
catalog = "catalog/drinks.json"

[assets]
thumb_root = "drinks/thumbs/"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.catalog, "catalog/drinks.json");
        assert_eq!(config.assets.thumb_root, "drinks/thumbs/");
        assert_eq!(config.assets.image_root, "drinks/");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILENAME), "not valid toml [[[").unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILENAME),
            r#"
[assets]
image_root = "drinks"
"#,
        )
        .unwrap();

        let result = load_config(tmp.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // Unknown key rejection
    // =========================================================================

    #[test]
    fn unknown_key_rejected() {
        let result: Result<CatalogConfig, _> = toml::from_str("catalgo = \"x.json\"");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let toml = r#"
[assets]
thumbs = "drinks/_thumbs/"
"#;
        let result: Result<CatalogConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_compression_rejected() {
        let toml = r#"
[thumbnails]
compression = "maximum"
"#;
        let result: Result<CatalogConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(CatalogConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_catalog_name() {
        let config = CatalogConfig {
            catalog: "  ".to_string(),
            ..CatalogConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("catalog"));
    }

    #[test]
    fn validate_roots_need_trailing_slash() {
        let mut config = CatalogConfig::default();
        config.assets.thumb_root = "drinks/_thumbs".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("assets.thumb_root"));
    }

    #[test]
    fn validate_roots_must_differ() {
        let mut config = CatalogConfig::default();
        config.assets.thumb_root = config.assets.image_root.clone();
        assert!(config.validate().is_err());
    }

    // =========================================================================
    // Environment toggle
    // =========================================================================

    #[test]
    fn image_checks_only_for_exact_true() {
        assert!(image_checks_enabled(Some("true")));
        assert!(!image_checks_enabled(Some("TRUE")));
        assert!(!image_checks_enabled(Some("True")));
        assert!(!image_checks_enabled(Some("1")));
        assert!(!image_checks_enabled(Some("yes")));
        assert!(!image_checks_enabled(Some(" true")));
        assert!(!image_checks_enabled(Some("")));
        assert!(!image_checks_enabled(None));
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: CatalogConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[assets]"));
        assert!(content.contains("[thumbnails]"));
    }
}
