//! Pipeline steps given on the command line with `--op`.

use std::fmt;
use std::str::FromStr;

use pixgrid_core::{Operation, PipelineError, Session};

/// One step of a `process` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Rotate,
    Pixelate,
    Quantize,
    QuantizeFixed,
    Binarize,
    Recolor,
    Grid,
    Undo,
    Jump(usize),
}

impl Step {
    /// Run the step against the session.
    ///
    /// Returns the operation that was recorded or, for `undo`/`jump`, the
    /// operation of the entry that was restored.
    pub fn apply(self, session: &mut Session) -> Result<Operation, PipelineError> {
        let operation = match self {
            Step::Rotate => session.rotate().map(|_| Operation::Rotate)?,
            Step::Pixelate => session.pixelate().map(|_| Operation::Pixelate)?,
            Step::Quantize => session
                .quantize_palette_sort()
                .map(|_| Operation::QuantizePaletteSort)?,
            Step::QuantizeFixed => session
                .quantize_fixed_threshold()
                .map(|_| Operation::QuantizeFixedThreshold)?,
            Step::Binarize => session.binarize().map(|_| Operation::Binarize)?,
            Step::Recolor => {
                if session.toggle_recolor()? {
                    Operation::RecolorOn
                } else {
                    Operation::RecolorOff
                }
            }
            Step::Grid => session.apply_grid_overlay().map(|_| Operation::GridOverlay)?,
            Step::Undo => return session.undo(),
            Step::Jump(index) => return session.jump_to(index),
        };
        Ok(operation)
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(index) = s.strip_prefix("jump:") {
            return index
                .parse()
                .map(Step::Jump)
                .map_err(|_| format!("invalid history index in '{}'", s));
        }
        match s {
            "rotate" => Ok(Step::Rotate),
            "pixelate" => Ok(Step::Pixelate),
            "quantize" => Ok(Step::Quantize),
            "quantize-fixed" => Ok(Step::QuantizeFixed),
            "binarize" => Ok(Step::Binarize),
            "recolor" => Ok(Step::Recolor),
            "grid" => Ok(Step::Grid),
            "undo" => Ok(Step::Undo),
            other => Err(format!(
                "unknown step '{}' (expected rotate, pixelate, quantize, quantize-fixed, \
                 binarize, recolor, grid, undo or jump:<n>)",
                other
            )),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Rotate => f.write_str("rotate"),
            Step::Pixelate => f.write_str("pixelate"),
            Step::Quantize => f.write_str("quantize"),
            Step::QuantizeFixed => f.write_str("quantize-fixed"),
            Step::Binarize => f.write_str("binarize"),
            Step::Recolor => f.write_str("recolor"),
            Step::Grid => f.write_str("grid"),
            Step::Undo => f.write_str("undo"),
            Step::Jump(index) => write!(f, "jump:{}", index),
        }
    }
}
