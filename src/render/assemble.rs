use super::offset::RenderedLines;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    #[must_use]
    pub fn empty() -> Self {
        Self { features: Vec::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
    pub geometry: MultiLineString,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct MultiLineString {
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

/// Both fields carry the route color's hex string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub id: String,
    pub stroke: String,
}

/// One multi-line feature per color, in the order colors were first drawn.
#[must_use]
pub fn assemble(lines: RenderedLines) -> FeatureCollection {
    let features = lines
        .into_iter()
        .map(|(color, polylines)| Feature {
            geometry: MultiLineString {
                coordinates: polylines
                    .iter()
                    .map(|line| line.coords().map(|c| [c.x, c.y]).collect())
                    .collect(),
            },
            properties: FeatureProperties {
                id: color.to_string(),
                stroke: color.to_string(),
            },
        })
        .collect();
    FeatureCollection { features }
}
