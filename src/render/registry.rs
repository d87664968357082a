use crate::topology::{Color, EndpointTag, SegmentEnd};
use geo::Coord;
use indexmap::IndexMap;

/// Successive clipping stages recorded per segment end for stitching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointVariant {
    /// End of the drawn line after all clipping and smoothing
    Actual,
    /// End of the offset line after the first junction trim
    Buffer,
    /// End of the offset line before any junction trim
    Invasive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EndpointKey {
    segment: usize,
    color: Color,
    tag: EndpointTag,
    variant: EndpointVariant,
}

/// Offset endpoints of one render pass, keyed by segment, color, tag and variant.
#[derive(Debug, Default)]
pub struct EndpointRegistry {
    endpoints: IndexMap<EndpointKey, Coord>,
}

impl EndpointRegistry {
    pub fn insert(
        &mut self,
        segment: usize,
        color: &Color,
        tag: EndpointTag,
        variant: EndpointVariant,
        position: Coord,
    ) {
        self.endpoints.insert(
            EndpointKey {
                segment,
                color: color.clone(),
                tag,
                variant,
            },
            position,
        );
    }

    /// Records the first and last position of `coords` as the top and bottom
    /// of one variant. Empty lines record nothing.
    pub fn insert_ends(
        &mut self,
        segment: usize,
        color: &Color,
        variant: EndpointVariant,
        coords: &[Coord],
    ) {
        if let (Some(&top), Some(&bottom)) = (coords.first(), coords.last()) {
            self.insert(segment, color, EndpointTag::Top, variant, top);
            self.insert(segment, color, EndpointTag::Bottom, variant, bottom);
        }
    }

    #[must_use]
    pub fn get(&self, end: SegmentEnd, color: &Color, variant: EndpointVariant) -> Option<Coord> {
        self.endpoints
            .get(&EndpointKey {
                segment: end.segment,
                color: color.clone(),
                tag: end.tag,
                variant,
            })
            .copied()
    }

    /// Whether any endpoint was recorded for this segment
    #[must_use]
    pub fn has_segment(&self, segment: usize) -> bool {
        self.endpoints.keys().any(|key| key.segment == segment)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
