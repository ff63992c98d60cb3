//! Per-entry rule set.
//!
//! [`CatalogScan`] walks the catalog array one entry at a time. Besides
//! reporting each entry's findings it remembers what later passes need: the
//! ids seen so far (duplicates, cross-references), the `relatedDrinkIds`
//! lists, and every asset path for the optional filesystem pass.

use super::fields::{
    FieldRule, INGREDIENT_FIELDS, OPTIONAL_FIELDS, ORIGIN_FIELDS, is_integer, non_empty_str,
    type_name,
};
use super::{ValidateConfig, ValidationResult};
use crate::naming;
use crate::types::ModifiersSupported;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Display;

type Object = Map<String, Value>;

/// An asset path referenced by an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    /// Label of the referencing entry.
    pub label: String,
    /// Path relative to the catalog root.
    pub path: String,
}

#[derive(Debug)]
struct RelatedIds {
    label: String,
    id: Option<String>,
    related: Vec<String>,
}

/// Findings for one entry, prefixed with its label.
struct EntryReport<'r> {
    label: String,
    result: &'r mut ValidationResult,
}

impl EntryReport<'_> {
    fn error(&mut self, message: impl Display) {
        self.result.error(format!("{}: {message}", self.label));
    }

    fn warning(&mut self, message: impl Display) {
        self.result.warning(format!("{}: {message}", self.label));
    }
}

/// State carried across the entries of one catalog.
pub struct CatalogScan<'c> {
    config: &'c ValidateConfig,
    /// id → index of its first occurrence.
    first_seen: HashMap<String, usize>,
    related: Vec<RelatedIds>,
    assets: Vec<AssetRef>,
}

impl<'c> CatalogScan<'c> {
    pub fn new(config: &'c ValidateConfig) -> Self {
        Self {
            config,
            first_seen: HashMap::new(),
            related: Vec::new(),
            assets: Vec::new(),
        }
    }

    /// Asset paths collected so far, in catalog order.
    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }

    /// Run every per-entry rule on the element at `index`.
    pub fn check_entry(&mut self, index: usize, value: &Value, result: &mut ValidationResult) {
        let Some(entry) = value.as_object() else {
            result.error(format!(
                "drinks[{index}]: entry must be an object, got {}",
                type_name(value)
            ));
            return;
        };

        let id = non_empty_str(entry.get("id"));
        let label = match id {
            Some(id) => format!("drinks[{index}] ({id})"),
            None => format!("drinks[{index}] (unknown id)"),
        };
        let mut report = EntryReport { label, result };

        self.check_id(index, entry.get("id"), &mut report);
        check_name(entry, &mut report);
        check_category(entry, &mut report);
        check_popularity(entry, &mut report);
        check_fields(entry, "", &[("aliases", FieldRule::StringArray)], &mut report);
        let image_path = self.check_image_path(entry, &mut report);
        self.check_image_variants(entry, image_path, &mut report);
        check_modifiers(entry, &mut report);
        check_ingredients(entry, &mut report);
        check_garnish(entry, &mut report);
        check_origin(entry, &mut report);
        check_fields(entry, "", OPTIONAL_FIELDS, &mut report);

        if let Some(Value::Array(items)) = entry.get("relatedDrinkIds") {
            let related: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if !related.is_empty() {
                self.related.push(RelatedIds {
                    label: report.label,
                    id: id.map(str::to_string),
                    related,
                });
            }
        }
    }

    /// Warn about `relatedDrinkIds` that name no catalog entry, or the entry
    /// itself. Runs after every entry has been scanned.
    pub fn check_related_ids(&self, result: &mut ValidationResult) {
        for refs in &self.related {
            for related in &refs.related {
                if refs.id.as_deref() == Some(related.as_str()) {
                    result.warning(format!(
                        "{}: relatedDrinkIds lists the drink itself",
                        refs.label
                    ));
                } else if !self.first_seen.contains_key(related) {
                    result.warning(format!(
                        "{}: relatedDrinkIds references unknown drink \"{related}\"",
                        refs.label
                    ));
                }
            }
        }
    }

    fn check_id(&mut self, index: usize, value: Option<&Value>, report: &mut EntryReport) {
        let id = match value {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(Value::String(_)) => {
                report.error("id must not be empty");
                return;
            }
            Some(other) => {
                report.error(format!("id must be a string, got {}", type_name(other)));
                return;
            }
            None => {
                report.error("missing required field \"id\"");
                return;
            }
        };

        if let Some(first) = self.first_seen.get(id) {
            report.error(format!(
                "duplicate id \"{id}\", first defined at drinks[{first}]"
            ));
        } else {
            self.first_seen.insert(id.clone(), index);
        }

        if !naming::is_snake_case_id(id) {
            report.error(format!(
                "id \"{id}\" must contain only lowercase letters, digits and underscores"
            ));
        }
    }

    fn check_image_path<'v>(
        &mut self,
        entry: &'v Object,
        report: &mut EntryReport,
    ) -> Option<&'v str> {
        let value = required(entry, "imagePath", report)?;
        let Some(path) = value.as_str() else {
            report.error(format!(
                "imagePath must be a string, got {}",
                type_name(value)
            ));
            return None;
        };

        let image_root = &self.config.image_root;
        if !path.starts_with(image_root.as_str()) {
            report.error(format!(
                "imagePath \"{path}\" must start with \"{image_root}\""
            ));
        }
        if !naming::has_png_extension(path) {
            report.warning(format!("imagePath \"{path}\" is not a .png file"));
        }
        if !path.is_empty() {
            self.assets.push(AssetRef {
                label: report.label.clone(),
                path: path.to_string(),
            });
        }
        Some(path)
    }

    fn check_image_variants(
        &mut self,
        entry: &Object,
        image_path: Option<&str>,
        report: &mut EntryReport,
    ) {
        let Some(value) = required(entry, "imageVariants", report) else {
            return;
        };
        let Some(variants) = value.as_object() else {
            report.error(format!(
                "imageVariants must be an object, got {}",
                type_name(value)
            ));
            return;
        };
        if variants.is_empty() {
            report.error("imageVariants must contain at least one variant");
            return;
        }

        let thumb_root = &self.config.thumb_root;
        let stem = image_path.and_then(naming::image_stem);

        for (key, value) in variants {
            let Some(path) = non_empty_str(Some(value)) else {
                report.error(format!("imageVariants.{key} must be a non-empty string"));
                continue;
            };
            if !path.starts_with(thumb_root.as_str()) {
                report.error(format!(
                    "imageVariants.{key} \"{path}\" must start with \"{thumb_root}\""
                ));
            }
            if let (Some(stem), Some(width)) = (stem, naming::variant_key_width(key)) {
                let expected = naming::variant_path(thumb_root, stem, width);
                if path != expected {
                    report.warning(format!(
                        "imageVariants.{key} is \"{path}\", expected \"{expected}\""
                    ));
                }
            }
            self.assets.push(AssetRef {
                label: report.label.clone(),
                path: path.to_string(),
            });
        }

        if !naming::has_conventional_pair(variants.keys().map(String::as_str)) {
            report.warning("imageVariants has neither the sm/md pair nor the legacy 512/1024 pair");
        }
    }
}

/// Report a missing required field; returns the value when present.
fn required<'v>(entry: &'v Object, key: &str, report: &mut EntryReport) -> Option<&'v Value> {
    let value = entry.get(key);
    if value.is_none() {
        report.error(format!("missing required field \"{key}\""));
    }
    value
}

/// Apply a rule table to the keys present in `object`.
///
/// `prefix` is prepended to key names in messages (`ingredients[2]` →
/// `ingredients[2].unit`); pass `""` for top-level keys.
fn check_fields(
    object: &Object,
    prefix: &str,
    rules: &[(&str, FieldRule)],
    report: &mut EntryReport,
) {
    for &(key, rule) in rules {
        let Some(value) = object.get(key) else {
            continue;
        };
        let name = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };
        if let Some(message) = rule.check(&name, value) {
            report.error(message);
        }
    }
}

fn check_name(entry: &Object, report: &mut EntryReport) {
    match required(entry, "name", report) {
        Some(Value::String(name)) if name.trim().is_empty() => {
            report.error("name must not be blank");
        }
        Some(Value::String(_)) | None => {}
        Some(other) => report.error(format!("name must be a string, got {}", type_name(other))),
    }
}

fn check_category(entry: &Object, report: &mut EntryReport) {
    if let Some(value) = required(entry, "category", report)
        && !value.is_string()
    {
        report.error(format!(
            "category must be a string, got {}",
            type_name(value)
        ));
    }
}

fn check_popularity(entry: &Object, report: &mut EntryReport) {
    let Some(value) = required(entry, "popularity", report) else {
        return;
    };
    match value.as_f64() {
        Some(p) if (0.0..=100.0).contains(&p) => {}
        Some(_) => report.error(format!(
            "popularity must be between 0 and 100, got {value}"
        )),
        None => report.error(format!(
            "popularity must be a number, got {}",
            type_name(value)
        )),
    }
}

fn check_modifiers(entry: &Object, report: &mut EntryReport) {
    let value = entry.get("modifiersSupported");
    let Some(modifiers) = ModifiersSupported::from_field(value) else {
        let got = value.map_or("nothing", type_name);
        report.error(format!(
            "modifiersSupported must be a boolean or an array of strings, got {got}"
        ));
        return;
    };
    for name in modifiers.repeated_names() {
        report.warning(format!("modifiersSupported lists \"{name}\" more than once"));
    }
}

fn check_ingredients(entry: &Object, report: &mut EntryReport) {
    let Some(value) = entry.get("ingredients") else {
        return;
    };
    let Some(items) = value.as_array() else {
        report.error(format!(
            "ingredients must be an array, got {}",
            type_name(value)
        ));
        return;
    };

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("ingredients[{i}]");
        let Some(ingredient) = item.as_object() else {
            report.error(format!("{prefix} must be an object, got {}", type_name(item)));
            continue;
        };
        if non_empty_str(ingredient.get("name")).is_none() {
            report.error(format!("{prefix}.name must be a non-empty string"));
        }
        check_fields(ingredient, &prefix, INGREDIENT_FIELDS, report);
    }
}

fn check_garnish(entry: &Object, report: &mut EntryReport) {
    let Some(value) = entry.get("garnish") else {
        return;
    };
    let Some(items) = value.as_array() else {
        report.error(format!("garnish must be an array, got {}", type_name(value)));
        return;
    };
    for (i, item) in items.iter().enumerate() {
        if non_empty_str(Some(item)).is_none() {
            report.error(format!("garnish[{i}] must be a non-empty string"));
        }
    }
}

fn check_origin(entry: &Object, report: &mut EntryReport) {
    let Some(value) = entry.get("origin") else {
        return;
    };
    let Some(origin) = value.as_object() else {
        report.error(format!("origin must be an object, got {}", type_name(value)));
        return;
    };
    check_fields(origin, "origin", ORIGIN_FIELDS, report);
    if let Some(year) = origin.get("year")
        && !(year.is_null() || is_integer(year))
    {
        report.error(format!("origin.year must be an integer or null, got {year}"));
    }
}
