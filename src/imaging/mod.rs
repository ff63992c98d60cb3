//! Image processing for the thumbnail generator, in pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → PNG** | Lanczos3 + `PngEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{VariantSize, calculate_variant_size, plan_variants};
pub use operations::{
    GeneratedVariant, OutputStatus, VariantConfig, create_variants, get_dimensions,
};
pub use params::{PngCompression, ResizeParams};
pub use rust_backend::{RustBackend, is_supported_source, supported_input_extensions};
