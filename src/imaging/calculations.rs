//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for a width-bounded variant.
///
/// The output width is the target width, capped at the source width so a
/// variant is never upscaled. The height follows the source aspect ratio,
/// rounded, and never drops below one pixel.
///
/// # Examples
/// ```
/// # use drink_catalog::imaging::calculate_variant_size;
/// // 2048x1536 source at 512 → 512x384
/// assert_eq!(calculate_variant_size((2048, 1536), 512), (512, 384));
///
/// // 800x600 source at 1024 → kept at native 800x600
/// assert_eq!(calculate_variant_size((800, 600), 1024), (800, 600));
/// ```
pub fn calculate_variant_size(original: (u32, u32), target_width: u32) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    if orig_w == 0 {
        return (0, 0);
    }
    let width = target_width.min(orig_w);
    let height = (orig_h as f64 * width as f64 / orig_w as f64).round() as u32;
    (width, height.max(1))
}

/// A single variant to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSize {
    /// Nominal width, used in the output file name.
    pub target: u32,
    /// Calculated output width.
    pub width: u32,
    /// Calculated output height.
    pub height: u32,
}

/// Plan every variant of a source image, in the order of `widths`.
///
/// Unlike a responsive-breakpoint planner, nothing is skipped: a source
/// narrower than a target still gets a file under the target's name, written
/// at native width.
pub fn plan_variants(original: (u32, u32), widths: &[u32]) -> Vec<VariantSize> {
    widths
        .iter()
        .map(|&target| {
            let (width, height) = calculate_variant_size(original, target);
            VariantSize {
                target,
                width,
                height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_variant_size tests
    // =========================================================================

    #[test]
    fn landscape_downscale() {
        assert_eq!(calculate_variant_size((2048, 1536), 512), (512, 384));
        assert_eq!(calculate_variant_size((2048, 1536), 1024), (1024, 768));
    }

    #[test]
    fn portrait_downscale() {
        // 1000x2000 at 512 → 512x1024
        assert_eq!(calculate_variant_size((1000, 2000), 512), (512, 1024));
    }

    #[test]
    fn never_upscales() {
        assert_eq!(calculate_variant_size((300, 200), 512), (300, 200));
        assert_eq!(calculate_variant_size((300, 200), 1024), (300, 200));
    }

    #[test]
    fn exact_width_unchanged() {
        assert_eq!(calculate_variant_size((512, 700), 512), (512, 700));
    }

    #[test]
    fn height_rounds() {
        // 1000x333 at 512 → 170.496 → 170
        assert_eq!(calculate_variant_size((1000, 333), 512), (512, 170));
        // 1000x335 at 512 → 171.52 → 172
        assert_eq!(calculate_variant_size((1000, 335), 512), (512, 172));
    }

    #[test]
    fn extreme_panorama_keeps_one_pixel_height() {
        assert_eq!(calculate_variant_size((10000, 1), 512), (512, 1));
    }

    #[test]
    fn zero_width_source() {
        assert_eq!(calculate_variant_size((0, 100), 512), (0, 0));
    }

    // =========================================================================
    // plan_variants tests
    // =========================================================================

    #[test]
    fn plan_preserves_width_order() {
        let plan = plan_variants((4000, 3000), &[512, 1024]);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].target, 512);
        assert_eq!(plan[1].target, 1024);
        assert_eq!((plan[1].width, plan[1].height), (1024, 768));
    }

    #[test]
    fn plan_small_source_keeps_both_names() {
        let plan = plan_variants((600, 400), &[512, 1024]);
        assert_eq!(
            plan,
            vec![
                VariantSize {
                    target: 512,
                    width: 512,
                    height: 341,
                },
                VariantSize {
                    target: 1024,
                    width: 600,
                    height: 400,
                },
            ]
        );
    }

    #[test]
    fn plan_empty_widths() {
        assert!(plan_variants((600, 400), &[]).is_empty());
    }
}
