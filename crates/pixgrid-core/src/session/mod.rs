//! The editing session: current state, undo history and configuration.
//!
//! Every mutating call follows the same shape: compute the next
//! [`SessionState`] from the current one, and only on success commit it and
//! record a history snapshot. A rejected call leaves the session untouched.

mod error;
mod operation;
mod state;

use std::path::Path;

use image::RgbImage;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::decode::{self, DecodeError};
use crate::encode::{self, ExportFormat};
use crate::history::History;
use crate::quantize::QuantizeMethod;

pub use error::{PipelineError, Precondition};
pub use operation::Operation;
pub use state::SessionState;

/// A single image editing session.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    history: History<SessionState>,
    config: PipelineConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl Session {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            state: SessionState::default(),
            history: History::new(config.history_capacity),
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn history(&self) -> &History<SessionState> {
        &self.history
    }

    pub fn current_image(&self) -> Option<&RgbImage> {
        self.state.current()
    }

    /// Decode and load an image file, replacing the session.
    pub fn load_path(&mut self, path: &Path) -> Result<(), PipelineError> {
        let image = decode::load_image(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Load rejected");
        })?;
        self.load_image(image)?;
        info!(path = %path.display(), "Loaded image");
        Ok(())
    }

    /// Decode and load encoded image bytes, replacing the session.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), PipelineError> {
        let image = decode::decode_image(bytes).inspect_err(|e| {
            warn!(error = %e, "Load rejected");
        })?;
        self.load_image(image)
    }

    /// Load an already-decoded image. History restarts with a `Load` entry.
    ///
    /// An image with zero width or height is rejected with
    /// `DecodeError::EmptyImage` and the session is left as it was.
    pub fn load_image(&mut self, image: RgbImage) -> Result<(), PipelineError> {
        if image.width() == 0 || image.height() == 0 {
            warn!(
                width = image.width(),
                height = image.height(),
                "Load rejected: empty image"
            );
            return Err(DecodeError::EmptyImage.into());
        }
        debug!(
            width = image.width(),
            height = image.height(),
            "Starting new session"
        );
        self.state = SessionState::loaded(image, self.state.maintain_aspect_ratio());
        self.history.clear();
        self.history.push(Operation::Load, self.state.clone());
        Ok(())
    }

    pub fn rotate(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::Rotate, |state, _| state.rotated())
    }

    pub fn pixelate(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::Pixelate, SessionState::pixelated)
    }

    pub fn quantize_palette_sort(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::QuantizePaletteSort, |state, _| {
            state.quantized(QuantizeMethod::PaletteSort)
        })
    }

    pub fn quantize_fixed_threshold(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::QuantizeFixedThreshold, |state, _| {
            state.quantized(QuantizeMethod::FixedThreshold)
        })
    }

    pub fn binarize(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::Binarize, SessionState::binarized)
    }

    /// Toggle red-green mode. Returns whether it is now active.
    pub fn toggle_recolor(&mut self) -> Result<bool, PipelineError> {
        let (next, operation) = self.state.recolor_toggled().inspect_err(|e| {
            warn!(operation = "recolor", error = %e, "Operation rejected");
        })?;
        self.commit(operation, next);
        Ok(self.state.recolor_active())
    }

    pub fn apply_grid_overlay(&mut self) -> Result<(), PipelineError> {
        self.apply(Operation::GridOverlay, SessionState::with_grid_overlay)
    }

    /// Choose letterboxing (`true`) or stretching for the next pixelation.
    ///
    /// Recorded in the history only when the value actually changes.
    pub fn set_maintain_aspect_ratio(&mut self, maintain: bool) {
        if self.state.maintain_aspect_ratio() == maintain {
            return;
        }
        let operation = if maintain {
            Operation::MaintainAspect
        } else {
            Operation::StretchAspect
        };
        let next = self.state.with_maintain_aspect_ratio(maintain);
        self.commit(operation, next);
    }

    /// Write the current image to `path`, choosing the format by extension.
    pub fn export(&self, path: &Path) -> Result<ExportFormat, PipelineError> {
        let image = self.state.export_image(&self.config)?;
        let format = encode::write_image(&image, path, self.config.jpeg_quality)?;
        Ok(format)
    }

    /// Encode the current image in memory.
    pub fn export_bytes(&self, format: ExportFormat) -> Result<Vec<u8>, PipelineError> {
        let image = self.state.export_image(&self.config)?;
        let bytes = encode::encode_image(&image, format, self.config.jpeg_quality)?;
        Ok(bytes)
    }

    /// Turn history recording on or off. Turning it off discards all entries.
    ///
    /// Turning it back on with an image loaded records the current state as
    /// the new first entry, so the next operation can still be undone.
    pub fn set_history_recording(&mut self, recording: bool) {
        let resumed = recording && !self.history.is_recording();
        self.history.set_recording(recording);
        if resumed && self.state.current().is_some() {
            self.history.push(Operation::HistoryResumed, self.state.clone());
        }
        info!(recording, "History recording changed");
    }

    /// Restore the snapshot at `index`, discarding every later entry.
    pub fn jump_to(&mut self, index: usize) -> Result<Operation, PipelineError> {
        let len = self.history.len();
        let entry = self
            .history
            .jump_to(index)
            .ok_or(Precondition::HistoryIndex { index, len })
            .inspect_err(|e| warn!(error = %e, "Jump rejected"))?;

        let operation = entry.operation;
        self.state = entry.snapshot.clone();
        debug!(index, operation = %operation, "Restored history entry");
        Ok(operation)
    }

    /// Step back one history entry.
    pub fn undo(&mut self) -> Result<Operation, PipelineError> {
        let len = self.history.len();
        if len < 2 {
            warn!("Nothing to undo");
            return Err(Precondition::NothingToUndo.into());
        }
        self.jump_to(len - 2)
    }

    fn apply<F>(&mut self, operation: Operation, transition: F) -> Result<(), PipelineError>
    where
        F: FnOnce(&SessionState, &PipelineConfig) -> Result<SessionState, Precondition>,
    {
        let next = transition(&self.state, &self.config).inspect_err(|e| {
            warn!(operation = %operation, error = %e, "Operation rejected");
        })?;
        self.commit(operation, next);
        Ok(())
    }

    /// Swap in `next` and record it. Nothing is recorded before an image is
    /// loaded.
    fn commit(&mut self, operation: Operation, next: SessionState) {
        self.state = next;
        let Some(current) = self.state.current() else {
            return;
        };
        debug!(
            operation = %operation,
            width = current.width(),
            height = current.height(),
            "Applied operation"
        );
        self.history.push(operation, self.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::{MID_GRAY_B, OUTPUT_PALETTE};
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((x + y) * 255 / (width + height)) as u8;
            Rgb([v, v / 2, 255 - v])
        })
    }

    fn loaded(width: u32, height: u32) -> Session {
        let mut session = Session::default();
        session.load_image(gradient(width, height)).unwrap();
        session
    }

    fn operations(session: &Session) -> Vec<Operation> {
        session.history().iter().map(|e| e.operation).collect()
    }

    #[test]
    fn test_operations_require_image() {
        let mut session = Session::default();
        assert!(matches!(
            session.rotate(),
            Err(PipelineError::Precondition(Precondition::NoImage))
        ));
        assert!(session.pixelate().is_err());
        assert!(session.toggle_recolor().is_err());
        assert!(session.export_bytes(ExportFormat::Png).is_err());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_load_starts_history() {
        let session = loaded(320, 200);
        assert_eq!(operations(&session), vec![Operation::Load]);
        assert_eq!(session.current_image().unwrap().dimensions(), (320, 200));
    }

    #[test]
    fn test_load_bytes_rejects_garbage() {
        let mut session = loaded(20, 20);
        let result = session.load_bytes(b"not an image");
        assert!(matches!(result, Err(PipelineError::Decode(_))));
        assert_eq!(session.current_image().unwrap().dimensions(), (20, 20));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_reload_resets_history() {
        let mut session = loaded(320, 200);
        session.rotate().unwrap();
        session.pixelate().unwrap();
        session.load_image(gradient(10, 10)).unwrap();
        assert_eq!(operations(&session), vec![Operation::Load]);
        assert!(session.state().base().is_none());
    }

    #[test]
    fn test_full_pipeline_records_history() {
        let mut session = loaded(320, 200);
        session.rotate().unwrap();
        session.pixelate().unwrap();
        session.quantize_palette_sort().unwrap();
        assert!(session.toggle_recolor().unwrap());
        session.apply_grid_overlay().unwrap();

        assert_eq!(
            operations(&session),
            vec![
                Operation::Load,
                Operation::Rotate,
                Operation::Pixelate,
                Operation::QuantizePaletteSort,
                Operation::RecolorOn,
                Operation::GridOverlay,
            ]
        );
        assert_eq!(session.current_image().unwrap().dimensions(), (1152, 378));
    }

    #[test]
    fn test_fixed_threshold_on_flat_gray() {
        let mut session = Session::default();
        session
            .load_image(RgbImage::from_pixel(50, 50, Rgb([128, 128, 128])))
            .unwrap();
        session.pixelate().unwrap();
        session.quantize_fixed_threshold().unwrap();
        assert!(session
            .current_image()
            .unwrap()
            .pixels()
            .all(|p| *p == MID_GRAY_B));
    }

    #[test]
    fn test_recolor_off_is_recorded() {
        let mut session = loaded(320, 200);
        session.pixelate().unwrap();
        session.quantize_fixed_threshold().unwrap();
        let quantized = session.current_image().unwrap().clone();

        assert!(session.toggle_recolor().unwrap());
        assert!(!session.toggle_recolor().unwrap());
        assert_eq!(session.current_image().unwrap(), &quantized);
        assert_eq!(
            operations(&session)[3..],
            [Operation::RecolorOn, Operation::RecolorOff]
        );
    }

    #[test]
    fn test_second_grid_rejected_without_change() {
        let mut session = loaded(320, 200);
        session.pixelate().unwrap();
        session.apply_grid_overlay().unwrap();
        let before = session.current_image().unwrap().clone();
        let len = session.history().len();

        let result = session.apply_grid_overlay();
        assert!(matches!(
            result,
            Err(PipelineError::Precondition(Precondition::GridAlreadyApplied))
        ));
        assert_eq!(session.current_image().unwrap(), &before);
        assert_eq!(session.history().len(), len);
    }

    #[test]
    fn test_rejected_operation_keeps_state() {
        let mut session = loaded(320, 200);
        let result = session.quantize_palette_sort();
        assert!(matches!(
            result,
            Err(PipelineError::Precondition(Precondition::NotPixelated))
        ));
        assert_eq!(session.current_image().unwrap().dimensions(), (320, 200));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_aspect_toggle_recorded_on_change_only() {
        let mut session = loaded(100, 400);
        session.set_maintain_aspect_ratio(false);
        assert_eq!(session.history().len(), 1);

        session.set_maintain_aspect_ratio(true);
        session.set_maintain_aspect_ratio(true);
        assert_eq!(
            operations(&session),
            vec![Operation::Load, Operation::MaintainAspect]
        );

        session.pixelate().unwrap();
        let current = session.current_image().unwrap();
        assert_eq!(*current.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*current.get_pixel(191, 62), Rgb([255, 255, 255]));
    }

    #[test]
    fn test_aspect_flag_survives_reload() {
        let mut session = loaded(10, 10);
        session.set_maintain_aspect_ratio(true);
        session.load_image(gradient(10, 10)).unwrap();
        assert!(session.state().maintain_aspect_ratio());
    }

    #[test]
    fn test_jump_restores_and_truncates() {
        let mut session = loaded(320, 200);
        session.pixelate().unwrap();
        session.quantize_fixed_threshold().unwrap();
        session.apply_grid_overlay().unwrap();

        assert_eq!(session.jump_to(1).unwrap(), Operation::Pixelate);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.current_image().unwrap().dimensions(), (192, 63));
        assert!(!session.state().has_grid_overlay());

        session.binarize().unwrap();
        assert_eq!(
            operations(&session),
            vec![Operation::Load, Operation::Pixelate, Operation::Binarize]
        );
    }

    #[test]
    fn test_jump_out_of_range() {
        let mut session = loaded(32, 32);
        let result = session.jump_to(4);
        assert!(matches!(
            result,
            Err(PipelineError::Precondition(Precondition::HistoryIndex { index: 4, len: 1 }))
        ));
    }

    #[test]
    fn test_undo() {
        let mut session = loaded(320, 200);
        assert!(matches!(
            session.undo(),
            Err(PipelineError::Precondition(Precondition::NothingToUndo))
        ));

        session.rotate().unwrap();
        assert_eq!(session.current_image().unwrap().dimensions(), (200, 320));
        assert_eq!(session.undo().unwrap(), Operation::Load);
        assert_eq!(session.current_image().unwrap().dimensions(), (320, 200));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_history_capacity_pins_load() {
        let mut session = loaded(16, 16);
        for _ in 0..20 {
            session.rotate().unwrap();
        }
        assert_eq!(session.history().len(), 15);
        assert_eq!(session.history().get(0).unwrap().operation, Operation::Load);

        // Entry 0 still restores the loaded image
        session.jump_to(0).unwrap();
        assert_eq!(session.current_image(), session.state().original());
    }

    #[test]
    fn test_recording_disabled() {
        let mut session = loaded(320, 200);
        session.set_history_recording(false);
        assert!(session.history().is_empty());

        session.pixelate().unwrap();
        session.quantize_palette_sort().unwrap();
        assert!(session.history().is_empty());
        assert!(session.undo().is_err());
        assert!(session
            .current_image()
            .unwrap()
            .pixels()
            .all(|p| OUTPUT_PALETTE.contains(p)));
    }

    #[test]
    fn test_export_bytes_respects_aspect_rule() {
        let mut session = loaded(320, 200);
        session.set_maintain_aspect_ratio(true);
        session.pixelate().unwrap();
        session.rotate().unwrap();

        let bytes = session.export_bytes(ExportFormat::Png).unwrap();
        let decoded = decode::decode_image(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (192, 63));
    }

    #[test]
    fn test_export_to_file() {
        let mut session = loaded(64, 64);
        session.pixelate().unwrap();
        let path = std::env::temp_dir().join("pixgrid-session-export.bmp");

        assert_eq!(session.export(&path).unwrap(), ExportFormat::Bmp);
        let reloaded = decode::load_image(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (192, 63));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_empty_image() {
        let mut session = Session::default();
        for (width, height) in [(0, 0), (0, 12), (12, 0)] {
            let result = session.load_image(RgbImage::new(width, height));
            assert!(matches!(
                result,
                Err(PipelineError::Decode(DecodeError::EmptyImage))
            ));
        }
        assert!(session.current_image().is_none());
        assert!(session.history().is_empty());
        assert!(session.pixelate().is_err());
    }

    #[test]
    fn test_empty_image_keeps_previous_session() {
        let mut session = loaded(320, 200);
        session.pixelate().unwrap();
        assert!(session.load_image(RgbImage::new(0, 0)).is_err());
        assert_eq!(session.current_image().unwrap().dimensions(), (192, 63));
        assert_eq!(
            operations(&session),
            vec![Operation::Load, Operation::Pixelate]
        );
    }

    #[test]
    fn test_resumed_recording_keeps_first_operation_undoable() {
        let mut session = loaded(320, 200);
        session.set_history_recording(false);
        session.set_history_recording(true);
        session.rotate().unwrap();
        session.pixelate().unwrap();

        assert_eq!(
            operations(&session),
            vec![
                Operation::HistoryResumed,
                Operation::Rotate,
                Operation::Pixelate
            ]
        );
        session.jump_to(0).unwrap();
        assert_eq!(session.current_image().unwrap().dimensions(), (320, 200));
    }

    #[test]
    fn test_enabling_recording_twice_adds_nothing() {
        let mut session = loaded(16, 16);
        session.set_history_recording(true);
        assert_eq!(operations(&session), vec![Operation::Load]);

        let mut empty = Session::default();
        empty.set_history_recording(false);
        empty.set_history_recording(true);
        assert!(empty.history().is_empty());
    }

    #[test]
    fn test_aspect_toggle_before_load_not_recorded() {
        let mut session = Session::default();
        session.set_maintain_aspect_ratio(true);
        assert!(session.state().maintain_aspect_ratio());
        assert!(session.history().is_empty());

        session.load_image(gradient(100, 400)).unwrap();
        assert_eq!(operations(&session), vec![Operation::Load]);
        assert!(session.state().maintain_aspect_ratio());
    }

    #[test]
    fn test_export_unknown_extension() {
        let session = loaded(8, 8);
        let path = std::env::temp_dir().join("pixgrid-session-export.tiff");
        assert!(matches!(
            session.export(&path),
            Err(PipelineError::Encode(_))
        ));
    }
}
