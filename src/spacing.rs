//! Converts a requested on-screen line width into ground spacing between
//! parallel route lines.

use crate::constants::{BASE_ZOOM, MAX_SPACING, MIN_LINE_WIDTH, MIN_SPACING};

/// Unclamped spacing in kilometres for a line width at a zoom level.
///
/// Wider lines need more separation; each zoom level halves the ground
/// distance a pixel covers, so spacing halves with it.
#[must_use]
pub fn raw_spacing(width: f64, zoom: f64) -> f64 {
    let w = width.max(MIN_LINE_WIDTH);
    let z = (zoom * 100.0).round() / 100.0;
    let numerator = 0.025 * w * w - 0.04 * w + 0.1;
    numerator / 2f64.powf(z - BASE_ZOOM)
}

/// Spacing clamped to `[MIN_SPACING, MAX_SPACING]`.
///
/// A NaN zoom produces a NaN spacing, which is treated as the widest setting.
#[must_use]
pub fn spacing(width: f64, zoom: f64) -> f64 {
    let raw = raw_spacing(width, zoom);
    if raw.is_nan() {
        return MAX_SPACING;
    }
    raw.clamp(MIN_SPACING, MAX_SPACING)
}
