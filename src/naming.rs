//! Naming conventions shared by the validator and the thumbnail generator.
//!
//! The catalog and the generator never talk to each other at runtime; they
//! agree only on how names are built. This module is that agreement:
//!
//! - **Drink ids** are snake_case: lowercase ASCII letters, digits, underscores.
//! - **Image stems** are the basename of `imagePath` without its extension:
//!   `drinks/margarita.png` → `margarita`.
//! - **Variant files** are `<stem>_<width>.png` under the thumbnail root:
//!   `drinks/_thumbs/margarita_512.png`.
//! - **Variant keys** in `imageVariants` map to widths: `sm` → 512,
//!   `md` → 1024, and the legacy numeric keys `512` / `1024` map to themselves.

/// Width of the small variant.
pub const SMALL_WIDTH: u32 = 512;

/// Width of the medium variant.
pub const MEDIUM_WIDTH: u32 = 1024;

/// Variant widths in generation order.
pub const VARIANT_WIDTHS: [u32; 2] = [SMALL_WIDTH, MEDIUM_WIDTH];

/// Returns true for non-empty ids made only of `[a-z0-9_]`.
///
/// - `"my_drink_1"` → true
/// - `"My-Drink"` → false (uppercase, hyphen)
/// - `"old fashioned"` → false (space)
pub fn is_snake_case_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Basename of an asset path without its extension.
///
/// Returns `None` when nothing is left (e.g. `"drinks/"` or `"drinks/.png"`).
pub fn image_stem(path: &str) -> Option<&str> {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let stem = match basename.rfind('.') {
        Some(dot) => &basename[..dot],
        None => basename,
    };
    if stem.is_empty() { None } else { Some(stem) }
}

/// Whether an asset path ends in `.png`, ignoring case.
pub fn has_png_extension(path: &str) -> bool {
    path.len() >= 4
        && path
            .get(path.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".png"))
}

/// File name of a generated variant: `margarita` + 512 → `margarita_512.png`.
pub fn variant_file_name(stem: &str, width: u32) -> String {
    format!("{}_{}.png", stem, width)
}

/// Catalog path of a generated variant under the thumbnail root.
///
/// `thumb_root` is used verbatim as a prefix, so it carries its own trailing
/// slash (`"drinks/_thumbs/"`).
pub fn variant_path(thumb_root: &str, stem: &str, width: u32) -> String {
    format!("{}{}", thumb_root, variant_file_name(stem, width))
}

/// Width a recognized `imageVariants` key stands for.
pub fn variant_key_width(key: &str) -> Option<u32> {
    match key {
        "sm" | "512" => Some(SMALL_WIDTH),
        "md" | "1024" => Some(MEDIUM_WIDTH),
        _ => None,
    }
}

/// Whether a set of variant keys holds a complete conventional pair,
/// either `sm`/`md` or the legacy `512`/`1024`.
pub fn has_conventional_pair<'a>(keys: impl IntoIterator<Item = &'a str> + Clone) -> bool {
    let has = |wanted: &str| keys.clone().into_iter().any(|k| k == wanted);
    (has("sm") && has("md")) || (has("512") && has("1024"))
}
