//! Shared-arc transit topology: segments, their route colors, and the
//! directed connections routes make between them.

mod color;
mod schema;

pub use color::Color;
pub use schema::{ArcRef, RouteProperties, TopoJson, TopoObject, Transform};

use crate::error::TopologyError;
#[allow(unused_imports)]
use crate::logging::{log, Stopwatch};
use geo::{Coord, LineString};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointTag {
    Top,
    Bottom,
}

/// One arc of the shared topology together with every route color using it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: usize,
    pub geometry: LineString,
    pub top: Coord,
    pub bottom: Coord,
    pub colors: IndexSet<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentEnd {
    pub segment: usize,
    pub tag: EndpointTag,
}

/// For one color, the flow leaves `from` and enters `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Connection {
    pub color: Color,
    pub from: SegmentEnd,
    pub to: SegmentEnd,
}

/// A colored route line and the arc references it follows, one list per part.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub color: Color,
    pub title: Option<String>,
    pub agency: Option<String>,
    pub parts: Vec<Vec<ArcRef>>,
}

impl Route {
    pub(crate) fn new(properties: &RouteProperties, parts: Vec<Vec<ArcRef>>) -> Self {
        Self {
            color: properties.color.clone(),
            title: properties.title.clone(),
            agency: properties.agency.clone(),
            parts,
        }
    }
}

/// Ingested topology. Built in one go and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    segments: Vec<Segment>,
    connections: IndexSet<Connection>,
    routes: Vec<Route>,
}

impl Topology {
    /// Decodes a topology into segments and deduplicated connections.
    ///
    /// # Errors
    /// Returns an error if an arc has fewer than two positions or a route
    /// references an arc outside the arc table.
    pub fn ingest(input: &TopoJson) -> Result<Self, TopologyError> {
        #[cfg(feature = "perf_timing")]
        let watch = Stopwatch::start();

        let arcs = input.decoded_arcs();
        if let Some(index) = arcs.iter().position(|arc| arc.len() < 2) {
            return Err(TopologyError::DegenerateArc(index));
        }

        let routes = input.routes();
        let mut colors_by_arc: Vec<IndexSet<Color>> = vec![IndexSet::new(); arcs.len()];
        let mut connections = IndexSet::new();

        for route in &routes {
            for part in &route.parts {
                for &reference in part {
                    let id = resolve(reference, arcs.len())?;
                    colors_by_arc[id].insert(route.color.clone());
                }

                for pair in part.windows(2) {
                    let (prev, cur) = (pair[0], pair[1]);
                    connections.insert(Connection {
                        color: route.color.clone(),
                        from: SegmentEnd {
                            segment: resolve(prev, arcs.len())?,
                            tag: prev.exit_tag(),
                        },
                        to: SegmentEnd {
                            segment: resolve(cur, arcs.len())?,
                            tag: cur.entry_tag(),
                        },
                    });
                }
            }
        }

        let segments: Vec<Segment> = arcs
            .into_iter()
            .zip(colors_by_arc)
            .enumerate()
            .map(|(id, (coords, colors))| Segment {
                id,
                top: coords[0],
                bottom: coords[coords.len() - 1],
                geometry: LineString::new(coords),
                colors,
            })
            .collect();

        log!(
            "Ingested {} segments, {} connections from {} routes",
            segments.len(),
            connections.len(),
            routes.len()
        );
        #[cfg(feature = "perf_timing")]
        if let Some(elapsed) = watch.elapsed_ms() {
            log!("  Ingestion took {:.2}ms", elapsed);
        }

        Ok(Self {
            segments,
            connections,
            routes,
        })
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn resolve(reference: ArcRef, arc_count: usize) -> Result<usize, TopologyError> {
    usize::try_from(reference.arc_index())
        .ok()
        .filter(|&id| id < arc_count)
        .ok_or(TopologyError::ArcOutOfRange {
            reference: reference.0,
            arc_count,
        })
}
