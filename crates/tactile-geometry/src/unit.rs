//! Unit types: Dp, Mm and their pixel conversions

/// Pixels per inch of a baseline (density 1.0) screen.
const BASELINE_DPI: f32 = 160.0;

const MM_PER_INCH: f32 = 25.4;

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        Self(px / density)
    }
}

/// Physical millimetres on the screen surface.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mm(pub f32);

impl Mm {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density * BASELINE_DPI / MM_PER_INCH
    }

    pub fn from_px(px: f32, density: f32) -> Self {
        Self(px * MM_PER_INCH / (density * BASELINE_DPI))
    }
}
