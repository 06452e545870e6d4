//! Operation labels recorded in the history.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A mutating session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Load,
    Rotate,
    Pixelate,
    QuantizePaletteSort,
    QuantizeFixedThreshold,
    Binarize,
    RecolorOn,
    RecolorOff,
    GridOverlay,
    MaintainAspect,
    StretchAspect,
    /// First entry after recording was switched back on.
    HistoryResumed,
}

impl Operation {
    /// Human-readable label for list views.
    pub fn label(self) -> &'static str {
        match self {
            Operation::Load => "Load image",
            Operation::Rotate => "Rotate 90°",
            Operation::Pixelate => "Pixelate",
            Operation::QuantizePaletteSort => "4-level gray (palette sort)",
            Operation::QuantizeFixedThreshold => "4-level gray (fixed threshold)",
            Operation::Binarize => "2-level binarize",
            Operation::RecolorOn => "Red-green on",
            Operation::RecolorOff => "Red-green off",
            Operation::GridOverlay => "Grid overlay",
            Operation::MaintainAspect => "Keep aspect ratio",
            Operation::StretchAspect => "Stretch to canvas",
            Operation::HistoryResumed => "History resumed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
