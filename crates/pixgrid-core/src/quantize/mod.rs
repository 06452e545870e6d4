//! Palette reduction for pixelated images.
//!
//! Three reducers share one fixed output palette:
//!
//! - **Palette sort**: contrast stretch, 4-colour median cut, then remap the
//!   resulting colours by brightness rank.
//! - **Fixed threshold**: deterministic banding of gray levels into 4 bands.
//! - **Binarize**: Gaussian-weighted adaptive threshold to pure black/white.
//!
//! The recolor ("red-green") step swaps the two mid-grays for red and light
//! green and is undone by re-running the quantizer, not by an inverse map.

mod adaptive;
mod median_cut;
mod palette_sort;
mod recolor;
mod threshold;

use image::{Rgb, RgbImage};

pub use adaptive::binarize;
pub use median_cut::median_cut;
pub use palette_sort::{quantize_palette_sort, remap_by_rank, stretch_contrast};
pub use recolor::apply_recolor;
pub use threshold::{band_level, quantize_fixed_threshold};

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const MID_GRAY_A: Rgb<u8> = Rgb([149, 149, 149]);
pub const MID_GRAY_B: Rgb<u8> = Rgb([186, 186, 186]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Replacement for [`MID_GRAY_B`] in recolor mode.
pub const LIGHT_GREEN: Rgb<u8> = Rgb([144, 238, 144]);
/// Replacement for [`MID_GRAY_A`] in recolor mode.
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Output colour for each brightness rank, darkest first.
pub const OUTPUT_PALETTE: [Rgb<u8>; 4] = [BLACK, MID_GRAY_A, MID_GRAY_B, WHITE];

/// Number of palette entries the 4-level quantizers produce.
pub const PALETTE_SIZE: usize = OUTPUT_PALETTE.len();

/// Which 4-level quantizer produced the current image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizeMethod {
    PaletteSort,
    FixedThreshold,
}

/// Run a 4-level quantizer against the base image.
pub fn quantize(base: &RgbImage, method: QuantizeMethod) -> RgbImage {
    match method {
        QuantizeMethod::PaletteSort => quantize_palette_sort(base),
        QuantizeMethod::FixedThreshold => quantize_fixed_threshold(base),
    }
}
