use super::clip::clip_line;
use super::registry::{EndpointRegistry, EndpointVariant};
use crate::constants::{
    JUNCTION_MARGIN_FACTOR, LINE_SMOOTHING_ITERATIONS, LINE_SMOOTHING_THRESHOLD,
    MIN_JUNCTION_MARGIN, SMOOTHING_FACTOR,
};
use crate::geometry::{offset_line, smooth};
use crate::ordering::order_colors;
use crate::topology::{Color, Segment};
use geo::LineString;
use indexmap::IndexMap;

/// Polylines drawn per color, in first-drawn order.
pub type RenderedLines = IndexMap<Color, Vec<LineString>>;

/// Length trimmed near junctions before offsetting.
#[must_use]
pub fn junction_margin(spacing: f64) -> f64 {
    MIN_JUNCTION_MARGIN.max(spacing * JUNCTION_MARGIN_FACTOR)
}

/// Sideways offset of line `index` in a stack of `count`, centered on the arc.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stack_offset(index: usize, count: usize, linespace: f64) -> f64 {
    index as f64 * linespace - (count.saturating_sub(1) as f64 * linespace) / 2.0
}

/// Draws one offset line per color of `segment` and records its endpoints.
pub fn build_segment_lines(
    segment: &Segment,
    spacing: f64,
    registry: &mut EndpointRegistry,
    lines: &mut RenderedLines,
) {
    let ordered = order_colors(&segment.colors, segment.top, segment.bottom);
    let linespace = spacing * 2.0;
    let margin = junction_margin(spacing);
    let trimmed = clip_line(&segment.geometry, margin);

    for (index, color) in ordered.iter().enumerate() {
        let offset = offset_line(&trimmed, stack_offset(index, ordered.len(), linespace));
        let buffer = clip_line(&offset, margin * 2.0);
        let invasive_clip = clip_line(&buffer, margin * 2.0);

        let drawn = if spacing < LINE_SMOOTHING_THRESHOLD {
            LineString::new(smooth(
                &invasive_clip.0,
                LINE_SMOOTHING_ITERATIONS,
                SMOOTHING_FACTOR,
            ))
        } else {
            invasive_clip
        };

        registry.insert_ends(segment.id, color, EndpointVariant::Actual, &drawn.0);
        registry.insert_ends(segment.id, color, EndpointVariant::Invasive, &offset.0);
        registry.insert_ends(segment.id, color, EndpointVariant::Buffer, &buffer.0);
        lines.entry(color.clone()).or_default().push(drawn);
    }
}
