//! # Drink Catalog
//!
//! Tooling for the static catalog behind the drinks app. The app downloads a
//! JSON catalog (`drinks.json`), an optional feature-flag document
//! (`flags.json`), and the images both reference from a CDN. This crate
//! keeps that tree consistent before it ships:
//!
//! ```text
//! validate   drinks.json + flags.json  →  errors / warnings, exit 0 or 1
//! thumbs     drinks/*.{png,jpg,webp}   →  drinks/_thumbs/<stem>_{512,1024}.png
//! ```
//!
//! The two commands never call each other. They agree on file names through
//! [`naming`]: a catalog entry whose `imagePath` is `drinks/margarita.png`
//! expects its variants at `drinks/_thumbs/margarita_512.png` and
//! `drinks/_thumbs/margarita_1024.png`, which is exactly where the generator
//! writes them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`validate`] | Catalog and flags validation: document checks, per-entry rules, cross-references, optional file checks |
//! | [`thumbs`] | Thumbnail generation over the asset root |
//! | [`imaging`] | Pure-Rust image operations: identify, resize, PNG encode |
//! | [`config`] | Optional `catalog.toml` loading and validation |
//! | [`types`] | Typed views over loosely-shaped catalog values |
//! | [`naming`] | Id format, image stems and variant file names |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Accumulate, Don't Stop
//!
//! Only problems with the catalog document as a whole (missing file, bad
//! JSON, not an array) stop validation. Every rule inside an entry is
//! checked independently, so one run reports every problem in the file and
//! an editor can fix them in one pass.
//!
//! ## Validate Raw JSON
//!
//! Entries are checked as `serde_json::Value` rather than deserialized into
//! a struct. A typed parse stops at the first mismatch and reports it
//! without the entry's id; walking the value lets every field report on its
//! own with a `drinks[3] (mojito)` label.
//!
//! ## Sequential, Deterministic Thumbnails
//!
//! Sources are processed one at a time in file-name order, and PNG output
//! is deterministic, so re-running the generator over unchanged sources
//! rewrites byte-identical files and leaves the CDN diff empty.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod thumbs;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
