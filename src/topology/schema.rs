//! Serde schema for the inbound TopoJSON-shaped topology.

#[allow(unused_imports)]
use crate::logging::log;
use geo::Coord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Color, EndpointTag, Route};

/// Signed reference into the arc table.
///
/// Non-negative values traverse arc `i` forward; `!i` (that is `-i - 1`)
/// traverses it reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcRef(pub i64);

impl ArcRef {
    #[must_use]
    pub fn forward(index: i64) -> Self {
        Self(index)
    }

    #[must_use]
    pub fn reversed(index: i64) -> Self {
        Self(!index)
    }

    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.0 < 0
    }

    /// Unsigned arc index, always non-negative.
    #[must_use]
    pub fn arc_index(self) -> i64 {
        if self.is_reversed() {
            !self.0
        } else {
            self.0
        }
    }

    /// Endpoint at which a route leaves this arc.
    #[must_use]
    pub fn exit_tag(self) -> EndpointTag {
        if self.is_reversed() {
            EndpointTag::Top
        } else {
            EndpointTag::Bottom
        }
    }

    /// Endpoint at which a route enters this arc.
    #[must_use]
    pub fn entry_tag(self) -> EndpointTag {
        if self.is_reversed() {
            EndpointTag::Bottom
        } else {
            EndpointTag::Top
        }
    }
}

/// Quantization transform; when present, arcs are delta-encoded integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub color: Color,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TopoObject {
    GeometryCollection {
        geometries: Vec<TopoObject>,
    },
    LineString {
        arcs: Vec<ArcRef>,
        properties: RouteProperties,
    },
    MultiLineString {
        arcs: Vec<Vec<ArcRef>>,
        properties: RouteProperties,
    },
    /// Points, polygons and anything else carried alongside the routes
    #[serde(other)]
    Unsupported,
}

/// The topology handed over by the host in an `init` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopoJson {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<[f64; 2]>>,
    pub objects: IndexMap<String, TopoObject>,
}

impl TopoJson {
    /// Arc table in absolute coordinates.
    #[must_use]
    pub fn decoded_arcs(&self) -> Vec<Vec<Coord>> {
        match self.transform {
            None => self
                .arcs
                .iter()
                .map(|arc| arc.iter().map(|&[x, y]| Coord { x, y }).collect())
                .collect(),
            Some(transform) => self.arcs.iter().map(|arc| transform.decode(arc)).collect(),
        }
    }

    /// Every route line in object order, with nested collections flattened.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = Vec::new();
        for (name, object) in &self.objects {
            collect_routes(name, object, &mut routes);
        }
        routes
    }
}

impl Transform {
    fn decode(&self, arc: &[[f64; 2]]) -> Vec<Coord> {
        let (mut x, mut y) = (0.0, 0.0);
        arc.iter()
            .map(|&[dx, dy]| {
                x += dx;
                y += dy;
                Coord {
                    x: x * self.scale[0] + self.translate[0],
                    y: y * self.scale[1] + self.translate[1],
                }
            })
            .collect()
    }
}

fn collect_routes(name: &str, object: &TopoObject, routes: &mut Vec<Route>) {
    match object {
        TopoObject::GeometryCollection { geometries } => {
            for geometry in geometries {
                collect_routes(name, geometry, routes);
            }
        }
        TopoObject::LineString { arcs, properties } => {
            routes.push(Route::new(properties, vec![arcs.clone()]));
        }
        TopoObject::MultiLineString { arcs, properties } => {
            routes.push(Route::new(properties, arcs.clone()));
        }
        TopoObject::Unsupported => {
            log!("Skipping non-line geometry in object {:?}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arc_ref_sign_convention() {
        let forward = ArcRef(3);
        let reversed = ArcRef(-4);

        assert_eq!(forward.arc_index(), 3);
        assert_eq!(reversed.arc_index(), 3);
        assert!(!forward.is_reversed());
        assert!(reversed.is_reversed());
        assert_eq!(ArcRef::reversed(3), reversed);
        assert_eq!(ArcRef::forward(3), forward);
        assert_eq!(ArcRef(-1).arc_index(), 0);
    }

    #[test]
    fn test_arc_ref_tags() {
        assert_eq!(ArcRef(0).exit_tag(), EndpointTag::Bottom);
        assert_eq!(ArcRef(0).entry_tag(), EndpointTag::Top);
        assert_eq!(ArcRef(-1).exit_tag(), EndpointTag::Top);
        assert_eq!(ArcRef(-1).entry_tag(), EndpointTag::Bottom);
    }

    #[test]
    fn test_arc_ref_extreme_value_does_not_overflow() {
        assert_eq!(ArcRef(i64::MIN).arc_index(), i64::MAX);
    }

    #[test]
    fn test_parse_topology_with_nested_collection() {
        let json = r##"{
            "type": "Topology",
            "arcs": [[[0, 0], [1, 1]], [[1, 1], [2, 2]]],
            "objects": {
                "routes": {
                    "type": "GeometryCollection",
                    "geometries": [
                        {"type": "LineString", "arcs": [0, 1],
                         "properties": {"color": "#FF0000", "title": "Red", "agency": "Metro"}},
                        {"type": "MultiLineString", "arcs": [[0], [-2]],
                         "properties": {"color": "#0000FF"}},
                        {"type": "Point", "coordinates": [0, 0]}
                    ]
                }
            }
        }"##;
        let topo: TopoJson = serde_json::from_str(json).expect("valid topology");
        let routes = topo.routes();

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].color.as_str(), "#FF0000");
        assert_eq!(routes[0].title.as_deref(), Some("Red"));
        assert_eq!(routes[0].agency.as_deref(), Some("Metro"));
        assert_eq!(routes[0].parts, vec![vec![ArcRef(0), ArcRef(1)]]);
        assert_eq!(routes[1].parts, vec![vec![ArcRef(0)], vec![ArcRef(-2)]]);
        assert_eq!(routes[1].title, None);
    }

    #[test]
    fn test_decode_quantized_arcs() {
        let json = r#"{
            "transform": {"scale": [0.5, 0.25], "translate": [10.0, 20.0]},
            "arcs": [[[2, 4], [2, 0], [0, -4]]],
            "objects": {}
        }"#;
        let topo: TopoJson = serde_json::from_str(json).expect("valid topology");
        let arcs = topo.decoded_arcs();

        assert_eq!(
            arcs[0],
            vec![
                Coord { x: 11.0, y: 21.0 },
                Coord { x: 12.0, y: 21.0 },
                Coord { x: 12.0, y: 20.0 },
            ]
        );
    }

    #[test]
    fn test_route_without_color_is_rejected() {
        let json = r#"{
            "arcs": [[[0, 0], [1, 1]]],
            "objects": {"r": {"type": "LineString", "arcs": [0], "properties": {"title": "x"}}}
        }"#;
        assert!(serde_json::from_str::<TopoJson>(json).is_err());
    }

    #[test]
    fn test_route_with_malformed_color_is_rejected() {
        let json = r#"{
            "arcs": [[[0, 0], [1, 1]]],
            "objects": {"r": {"type": "LineString", "arcs": [0], "properties": {"color": "red"}}}
        }"#;
        assert!(serde_json::from_str::<TopoJson>(json).is_err());
    }
}
