use super::offset::RenderedLines;
use super::registry::{EndpointRegistry, EndpointVariant};
use crate::constants::{CONNECTION_SMOOTHING_ITERATIONS, CONNECTION_SMOOTHING_THRESHOLD, SMOOTHING_FACTOR};
use crate::geometry::smooth;
use crate::topology::Connection;
use geo::{Coord, LineString};

/// Control points running from deep inside the `from` segment, through the
/// junction, to deep inside the `to` segment.
///
/// `None` if any of the six endpoints was not drawn this pass.
#[must_use]
pub fn connection_chain(registry: &EndpointRegistry, connection: &Connection) -> Option<[Coord; 6]> {
    let color = &connection.color;
    let (from, to) = (connection.from, connection.to);
    Some([
        registry.get(from, color, EndpointVariant::Actual)?,
        registry.get(from, color, EndpointVariant::Buffer)?,
        registry.get(from, color, EndpointVariant::Invasive)?,
        registry.get(to, color, EndpointVariant::Invasive)?,
        registry.get(to, color, EndpointVariant::Buffer)?,
        registry.get(to, color, EndpointVariant::Actual)?,
    ])
}

/// Appends one joining polyline per connection whose endpoints were all drawn.
///
/// Connections touching a culled segment, or a color the segment never drew,
/// are dropped without a partial line. Returns how many were stitched.
pub fn stitch_connections<'a, I>(
    connections: I,
    registry: &EndpointRegistry,
    spacing: f64,
    lines: &mut RenderedLines,
) -> usize
where
    I: IntoIterator<Item = &'a Connection>,
{
    let mut stitched = 0;
    for connection in connections {
        let Some(chain) = connection_chain(registry, connection) else {
            continue;
        };

        let coords = if spacing < CONNECTION_SMOOTHING_THRESHOLD {
            smooth(&chain, CONNECTION_SMOOTHING_ITERATIONS, SMOOTHING_FACTOR)
        } else {
            chain.to_vec()
        };
        lines
            .entry(connection.color.clone())
            .or_default()
            .push(LineString::new(coords));
        stitched += 1;
    }
    stitched
}
