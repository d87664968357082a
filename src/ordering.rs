//! Deterministic stacking order for the colors sharing a segment.

use crate::topology::Color;
use geo::Coord;

const SRGB_GAMMA: f64 = 2.2;

/// Perceptual luminance of an sRGB color in `[0, 1]`.
#[must_use]
pub fn luminance(color: &Color) -> f64 {
    let [r, g, b] = color.rgb();
    let channel = |value: u8| (f64::from(value) / 255.0).powf(SRGB_GAMMA);
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// Colors sorted by ascending luminance, reversed when the segment runs
/// towards the origin.
///
/// Keying the order to the segment's own direction keeps offset index `i` on
/// the same physical side of the line whichever end the arc starts at. Equal
/// luminances keep their input order.
#[must_use]
pub fn order_colors<'a, I>(colors: I, start: Coord, end: Coord) -> Vec<Color>
where
    I: IntoIterator<Item = &'a Color>,
{
    let mut ordered: Vec<Color> = colors.into_iter().cloned().collect();
    ordered.sort_by(|a, b| luminance(a).total_cmp(&luminance(b)));

    if start.x.hypot(start.y) > end.x.hypot(end.y) {
        ordered.reverse();
    }
    ordered
}
