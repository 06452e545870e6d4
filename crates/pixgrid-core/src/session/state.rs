//! Session state and the pure transitions between states.
//!
//! Each transition borrows the current state and returns a new one. Images
//! are held behind `Arc`, so snapshots for the history share pixel buffers
//! instead of copying them; a transform always allocates a fresh buffer for
//! its output and never writes into a shared one.

use std::borrow::Cow;
use std::sync::Arc;

use image::RgbImage;

use super::{Operation, Precondition};
use crate::config::PipelineConfig;
use crate::quantize::{self, QuantizeMethod};
use crate::transform::{self, PixelateMode};

/// Images and flags for one editing session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    original: Option<Arc<RgbImage>>,
    base: Option<Arc<RgbImage>>,
    current: Option<Arc<RgbImage>>,
    has_grid_overlay: bool,
    last_quantize: Option<QuantizeMethod>,
    recolor_active: bool,
    maintain_aspect_ratio: bool,
}

impl SessionState {
    /// State right after loading `image`. The aspect-ratio choice carries over.
    pub fn loaded(image: RgbImage, maintain_aspect_ratio: bool) -> Self {
        let image = Arc::new(image);
        Self {
            original: Some(Arc::clone(&image)),
            current: Some(image),
            maintain_aspect_ratio,
            ..Self::default()
        }
    }

    /// The image as it was loaded.
    pub fn original(&self) -> Option<&RgbImage> {
        self.original.as_deref()
    }

    /// The pixelated base image, if pixelation has run.
    pub fn base(&self) -> Option<&RgbImage> {
        self.base.as_deref()
    }

    /// Output of the most recent transform.
    pub fn current(&self) -> Option<&RgbImage> {
        self.current.as_deref()
    }

    pub fn has_grid_overlay(&self) -> bool {
        self.has_grid_overlay
    }

    pub fn last_quantize(&self) -> Option<QuantizeMethod> {
        self.last_quantize
    }

    pub fn recolor_active(&self) -> bool {
        self.recolor_active
    }

    pub fn maintain_aspect_ratio(&self) -> bool {
        self.maintain_aspect_ratio
    }

    fn require_current(&self) -> Result<&RgbImage, Precondition> {
        self.current().ok_or(Precondition::NoImage)
    }

    fn require_base(&self) -> Result<&Arc<RgbImage>, Precondition> {
        self.require_current()?;
        self.base.as_ref().ok_or(Precondition::NotPixelated)
    }

    fn with_current(&self, image: RgbImage) -> Self {
        Self {
            current: Some(Arc::new(image)),
            ..self.clone()
        }
    }

    /// Rotate the current image 90° clockwise.
    pub fn rotated(&self) -> Result<Self, Precondition> {
        let current = self.require_current()?;
        Ok(self.with_current(transform::rotate_clockwise(current)))
    }

    /// Pixelate the current image onto the canvas, producing a new base.
    pub fn pixelated(&self, config: &PipelineConfig) -> Result<Self, Precondition> {
        let current = self.require_current()?;
        let mode = PixelateMode::from_maintain_aspect(self.maintain_aspect_ratio);
        let base = Arc::new(transform::pixelate(current, config.canvas(), mode));

        Ok(Self {
            base: Some(Arc::clone(&base)),
            current: Some(base),
            has_grid_overlay: false,
            last_quantize: None,
            recolor_active: false,
            ..self.clone()
        })
    }

    /// Run a 4-level quantizer against the base image.
    pub fn quantized(&self, method: QuantizeMethod) -> Result<Self, Precondition> {
        let base = self.require_base()?;
        Ok(Self {
            current: Some(Arc::new(quantize::quantize(base, method))),
            has_grid_overlay: false,
            last_quantize: Some(method),
            recolor_active: false,
            ..self.clone()
        })
    }

    /// Binarize the base image. Clears the quantize method: a two-level image
    /// has no mid-tones to recolor.
    pub fn binarized(&self, config: &PipelineConfig) -> Result<Self, Precondition> {
        let base = self.require_base()?;
        let image = quantize::binarize(base, config.adaptive_block_size, config.adaptive_offset);
        Ok(Self {
            current: Some(Arc::new(image)),
            has_grid_overlay: false,
            last_quantize: None,
            recolor_active: false,
            ..self.clone()
        })
    }

    /// Enter or leave red-green mode.
    ///
    /// Leaving re-runs the last quantizer from the base image rather than
    /// inverting the colour swap. Returns the new state and which direction
    /// the toggle went.
    pub fn recolor_toggled(&self) -> Result<(Self, Operation), Precondition> {
        let current = self.require_current()?;
        let method = self.last_quantize.ok_or(Precondition::NotQuantized)?;

        if self.recolor_active {
            let restored = self.quantized(method)?;
            Ok((restored, Operation::RecolorOff))
        } else {
            let next = Self {
                recolor_active: true,
                ..self.with_current(quantize::apply_recolor(current))
            };
            Ok((next, Operation::RecolorOn))
        }
    }

    /// Upscale and draw the pixel grid. Allowed once per base image.
    pub fn with_grid_overlay(&self, config: &PipelineConfig) -> Result<Self, Precondition> {
        self.require_base()?;
        if self.has_grid_overlay {
            return Err(Precondition::GridAlreadyApplied);
        }
        let current = self.require_current()?;
        let image = transform::apply_grid_overlay(current, config.grid_scale, config.grid_rgb());

        Ok(Self {
            has_grid_overlay: true,
            ..self.with_current(image)
        })
    }

    pub fn with_maintain_aspect_ratio(&self, maintain_aspect_ratio: bool) -> Self {
        Self {
            maintain_aspect_ratio,
            ..self.clone()
        }
    }

    /// The pixels an export should write.
    ///
    /// In precedence order: a gridded image is written as-is; otherwise, when
    /// aspect ratio is maintained, the image is forced back to the canvas size;
    /// otherwise it is written as-is.
    pub fn export_image(&self, config: &PipelineConfig) -> Result<Cow<'_, RgbImage>, Precondition> {
        let current = self.require_current()?;
        if self.has_grid_overlay || !self.maintain_aspect_ratio {
            return Ok(Cow::Borrowed(current));
        }
        let canvas = config.canvas();
        Ok(Cow::Owned(transform::resize_nearest(
            current,
            canvas.width,
            canvas.height,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::{LIGHT_GREEN, MID_GRAY_A, MID_GRAY_B, RED};
    use image::Rgb;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / width.max(1)) as u8;
            Rgb([v, v, v])
        })
    }

    fn pixelated(image: RgbImage) -> SessionState {
        SessionState::loaded(image, false).pixelated(&config()).unwrap()
    }

    #[test]
    fn test_default_state_has_no_image() {
        let state = SessionState::default();
        assert!(state.current().is_none());
        assert_eq!(state.rotated().unwrap_err(), Precondition::NoImage);
        assert_eq!(state.pixelated(&config()).unwrap_err(), Precondition::NoImage);
        assert_eq!(
            state.quantized(QuantizeMethod::FixedThreshold).unwrap_err(),
            Precondition::NoImage
        );
        assert!(state.export_image(&config()).is_err());
    }

    #[test]
    fn test_loaded_state() {
        let state = SessionState::loaded(gradient(10, 4), true);
        assert_eq!(state.original(), state.current());
        assert!(state.base().is_none());
        assert!(state.maintain_aspect_ratio());
    }

    #[test]
    fn test_quantize_requires_pixelation() {
        let state = SessionState::loaded(gradient(10, 4), false);
        assert_eq!(
            state.quantized(QuantizeMethod::PaletteSort).unwrap_err(),
            Precondition::NotPixelated
        );
        assert_eq!(state.binarized(&config()).unwrap_err(), Precondition::NotPixelated);
        assert_eq!(
            state.with_grid_overlay(&config()).unwrap_err(),
            Precondition::NotPixelated
        );
    }

    #[test]
    fn test_rotate_changes_only_current() {
        let state = pixelated(gradient(300, 100));
        let rotated = state.rotated().unwrap();
        assert_eq!(rotated.current().unwrap().dimensions(), (63, 192));
        assert_eq!(rotated.base().unwrap().dimensions(), (192, 63));
    }

    #[test]
    fn test_pixelate_sets_base_and_resets_flags() {
        let state = pixelated(gradient(300, 100))
            .quantized(QuantizeMethod::FixedThreshold)
            .unwrap()
            .with_grid_overlay(&config())
            .unwrap();
        assert!(state.has_grid_overlay());

        let again = state.pixelated(&config()).unwrap();
        assert!(!again.has_grid_overlay());
        assert!(again.last_quantize().is_none());
        assert!(!again.recolor_active());
        assert_eq!(again.base(), again.current());
        // Pixelating the gridded image still lands on the canvas
        assert_eq!(again.current().unwrap().dimensions(), (192, 63));
    }

    #[test]
    fn test_pixelate_honours_aspect_flag() {
        let state = SessionState::loaded(RgbImage::from_pixel(100, 400, Rgb([0, 0, 0])), true);
        let out = state.pixelated(&config()).unwrap();
        let current = out.current().unwrap();
        assert_eq!(*current.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*current.get_pixel(96, 30), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_recolor_requires_quantize() {
        let state = pixelated(gradient(300, 100));
        assert_eq!(state.recolor_toggled().unwrap_err(), Precondition::NotQuantized);
    }

    #[test]
    fn test_recolor_round_trip_fixed_threshold() {
        let quantized = pixelated(gradient(300, 100))
            .quantized(QuantizeMethod::FixedThreshold)
            .unwrap();

        let (on, op) = quantized.recolor_toggled().unwrap();
        assert_eq!(op, Operation::RecolorOn);
        assert!(on.recolor_active());
        let current = on.current().unwrap();
        assert!(current.pixels().any(|p| *p == RED));
        assert!(current.pixels().any(|p| *p == LIGHT_GREEN));
        assert!(!current.pixels().any(|p| *p == MID_GRAY_A || *p == MID_GRAY_B));

        let (off, op) = on.recolor_toggled().unwrap();
        assert_eq!(op, Operation::RecolorOff);
        assert!(!off.recolor_active());
        assert_eq!(off.current(), quantized.current());
    }

    #[test]
    fn test_recolor_off_clears_grid() {
        let (on, _) = pixelated(gradient(300, 100))
            .quantized(QuantizeMethod::PaletteSort)
            .unwrap()
            .recolor_toggled()
            .unwrap();
        let gridded = on.with_grid_overlay(&config()).unwrap();

        let (off, _) = gridded.recolor_toggled().unwrap();
        assert!(!off.has_grid_overlay());
        assert_eq!(off.current().unwrap().dimensions(), (192, 63));
    }

    #[test]
    fn test_binarize_disables_recolor() {
        let state = pixelated(gradient(300, 100))
            .quantized(QuantizeMethod::PaletteSort)
            .unwrap()
            .binarized(&config())
            .unwrap();
        assert!(state.last_quantize().is_none());
        assert_eq!(state.recolor_toggled().unwrap_err(), Precondition::NotQuantized);
    }

    #[test]
    fn test_grid_only_once() {
        let state = pixelated(gradient(300, 100)).with_grid_overlay(&config()).unwrap();
        assert_eq!(state.current().unwrap().dimensions(), (1152, 378));
        assert_eq!(
            state.with_grid_overlay(&config()).unwrap_err(),
            Precondition::GridAlreadyApplied
        );
    }

    #[test]
    fn test_export_rules() {
        let cfg = config();
        let stretched = pixelated(gradient(300, 100)).rotated().unwrap();

        // Not maintaining aspect: exported as-is, even though rotated off-canvas
        assert_eq!(stretched.export_image(&cfg).unwrap().dimensions(), (63, 192));

        // Maintaining aspect: forced back to the canvas
        let kept = stretched.with_maintain_aspect_ratio(true);
        assert_eq!(kept.export_image(&cfg).unwrap().dimensions(), (192, 63));

        // Gridded: as-is regardless of aspect flag
        let gridded = SessionState::loaded(gradient(300, 100), true)
            .pixelated(&cfg)
            .unwrap()
            .with_grid_overlay(&cfg)
            .unwrap();
        assert_eq!(gridded.export_image(&cfg).unwrap().dimensions(), (1152, 378));
    }
}
