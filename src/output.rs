//! CLI output formatting for both commands.
//!
//! # Output Format
//!
//! ## Validate
//!
//! ```text
//! Errors
//!     drinks[1] (mojito): popularity must be between 0 and 100, got 101
//!
//! Warnings
//!     drinks[0] (margarita): imageVariants.sm is "drinks/_thumbs/marg_512.png", expected "drinks/_thumbs/margarita_512.png"
//!
//! Flags
//!     forceTextOnly: false
//!     catalogVersion: 2024.06
//!
//! Checked 3 drinks: 1 error, 1 warning
//! ```
//!
//! Sections with nothing to show are omitted.
//!
//! ## Thumbs
//!
//! ```text
//! Sources in ./drinks (2 images)
//!     001 margarita.png (2048x1536)
//!         512px: created (512x384)
//!         1024px: overwritten (1024x768)
//!     002 mojito.jpg (400x300)
//!         512px: created (400x300)
//!         1024px: created (400x300)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::imaging::OutputStatus;
use crate::thumbs::ThumbEvent;
use crate::validate::ValidationResult;
use serde::Serialize;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 error`, `2 errors`, `0 errors`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

// ============================================================================
// Validate
// ============================================================================

/// Format a validation result: errors, then warnings, then flags, then the
/// summary line.
pub fn format_validation_report(result: &ValidationResult) -> Vec<String> {
    let mut lines = Vec::new();

    for (title, messages) in [("Errors", &result.errors), ("Warnings", &result.warnings)] {
        if messages.is_empty() {
            continue;
        }
        lines.push(title.to_string());
        lines.extend(messages.iter().map(|m| format!("{}{}", indent(1), m)));
        lines.push(String::new());
    }

    if let Some(flags) = &result.flags {
        let mut flag_lines = Vec::new();
        if let Some(force) = flags.force_text_only {
            flag_lines.push(format!("{}forceTextOnly: {}", indent(1), force));
        }
        if let Some(version) = &flags.catalog_version {
            flag_lines.push(format!("{}catalogVersion: {}", indent(1), version));
        }
        if !flag_lines.is_empty() {
            lines.push("Flags".to_string());
            lines.extend(flag_lines);
            lines.push(String::new());
        }
    }

    lines.push(format!(
        "Checked {}: {}, {}",
        count(result.drinks_checked, "drink"),
        count(result.errors.len(), "error"),
        count(result.warnings.len(), "warning"),
    ));
    lines
}

/// Print a validation report to stdout.
pub fn print_validation_report(result: &ValidationResult) {
    for line in format_validation_report(result) {
        println!("{}", line);
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

/// Render a validation result as pretty JSON for machine consumers.
pub fn format_validation_json(result: &ValidationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        success: result.success(),
        result,
    })
}

// ============================================================================
// Thumbs
// ============================================================================

/// Format a single generator progress event as display lines.
pub fn format_thumb_event(event: &ThumbEvent) -> Vec<String> {
    match event {
        ThumbEvent::Started {
            source_dir,
            source_count: 0,
        } => vec![format!("No source images found in {}", source_dir.display())],
        ThumbEvent::Started {
            source_dir,
            source_count,
        } => vec![format!(
            "Sources in {} ({})",
            source_dir.display(),
            count(*source_count, "image")
        )],
        ThumbEvent::SourceDone {
            index,
            name,
            dimensions: (width, height),
            variants,
        } => {
            let mut lines = vec![format!(
                "{}{} {} ({}x{})",
                indent(1),
                format_index(index + 1),
                name,
                width,
                height
            )];
            for variant in variants {
                let status = match variant.status {
                    OutputStatus::Created => "created",
                    OutputStatus::Overwritten => "overwritten",
                };
                lines.push(format!(
                    "{}{}px: {} ({}x{})",
                    indent(2),
                    variant.target_width,
                    status,
                    variant.width,
                    variant.height
                ));
            }
            lines
        }
    }
}

/// Print a generator progress event to stdout.
pub fn print_thumb_event(event: &ThumbEvent) {
    for line in format_thumb_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
