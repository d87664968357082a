//! Per-request render pipeline: cull segments, draw offset lines per color,
//! stitch them across connections, and group the result by color.

mod assemble;
mod clip;
mod filter;
mod offset;
mod registry;
mod stitch;

pub use assemble::{assemble, Feature, FeatureCollection, FeatureProperties, MultiLineString};
pub use clip::clip_line;
pub use filter::visible_segments;
pub use offset::{build_segment_lines, junction_margin, stack_offset, RenderedLines};
pub use registry::{EndpointRegistry, EndpointVariant};
pub use stitch::{connection_chain, stitch_connections};

use crate::error::ProtocolError;
#[allow(unused_imports)]
use crate::logging::{log, Stopwatch};
use crate::spacing::spacing;
use crate::topology::Topology;
use geo::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};

/// Payload of a `request_render` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub width: f64,
    pub zoom: f64,
    /// Closed ring of `[lon, lat]` positions
    pub viewbox: Vec<[f64; 2]>,
}

impl RenderRequest {
    /// The viewbox as a polygon.
    ///
    /// # Errors
    /// Returns an error unless the viewbox is a closed ring of at least 4 positions.
    pub fn viewport(&self) -> Result<Polygon, ProtocolError> {
        if self.viewbox.len() < 4 {
            return Err(ProtocolError::ViewboxTooShort(self.viewbox.len()));
        }
        if self.viewbox.first() != self.viewbox.last() {
            return Err(ProtocolError::ViewboxNotClosed);
        }

        let ring: Vec<Coord> = self.viewbox.iter().map(|&[x, y]| Coord { x, y }).collect();
        Ok(Polygon::new(LineString::new(ring), vec![]))
    }
}

/// Everything one render call produced, before assembly.
#[derive(Debug)]
pub struct RenderPass {
    pub spacing: f64,
    pub registry: EndpointRegistry,
    pub lines: RenderedLines,
    pub stitched: usize,
}

impl RenderPass {
    /// Draws every visible segment and stitches the topology's connections.
    #[must_use]
    pub fn run(topology: &Topology, spacing: f64, viewport: &Polygon) -> Self {
        let mut registry = EndpointRegistry::default();
        let mut lines = RenderedLines::new();

        #[cfg(feature = "perf_timing")]
        let watch = Stopwatch::start();

        let mut drawn_segments = 0;
        for segment in visible_segments(topology.segments(), viewport) {
            build_segment_lines(segment, spacing, &mut registry, &mut lines);
            drawn_segments += 1;
        }

        #[cfg(feature = "perf_timing")]
        if let Some(elapsed) = watch.elapsed_ms() {
            log!("  Offset lines: {:.2}ms", elapsed);
        }

        let stitched = stitch_connections(topology.connections(), &registry, spacing, &mut lines);

        log!(
            "Rendered {} of {} segments, stitched {} of {} connections (spacing {:.5})",
            drawn_segments,
            topology.segments().len(),
            stitched,
            topology.connection_count(),
            spacing
        );

        Self {
            spacing,
            registry,
            lines,
            stitched,
        }
    }

    #[must_use]
    pub fn into_features(self) -> FeatureCollection {
        assemble(self.lines)
    }
}

/// Runs the full pipeline for one request.
///
/// # Errors
/// Returns an error if the request's viewbox is not a usable ring.
pub fn render(topology: &Topology, request: &RenderRequest) -> Result<FeatureCollection, ProtocolError> {
    let viewport = request.viewport()?;
    let spacing = spacing(request.width, request.zoom);
    Ok(RenderPass::run(topology, spacing, &viewport).into_features())
}
