use crate::topology::Segment;
use geo::{Intersects, Polygon};

/// Segments whose line actually touches the viewport polygon.
pub fn visible_segments<'a>(
    segments: &'a [Segment],
    viewport: &'a Polygon,
) -> impl Iterator<Item = &'a Segment> + 'a {
    segments
        .iter()
        .filter(move |segment| segment.geometry.intersects(viewport))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;
    use indexmap::IndexSet;

    fn segment(id: usize, coords: Vec<[f64; 2]>) -> Segment {
        let geometry = LineString::from(coords);
        Segment {
            id,
            top: geometry.0[0],
            bottom: geometry.0[geometry.0.len() - 1],
            geometry,
            colors: IndexSet::new(),
        }
    }

    fn unit_square() -> Polygon {
        Polygon::new(
            LineString::from(vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]),
            vec![],
        )
    }

    #[test]
    fn test_inside_crossing_and_outside() {
        let segments = vec![
            segment(0, vec![[0.2, 0.2], [0.8, 0.8]]),
            segment(1, vec![[-1.0, 0.5], [2.0, 0.5]]),
            segment(2, vec![[3.0, 3.0], [4.0, 4.0]]),
        ];
        let viewport = unit_square();
        let ids: Vec<usize> = visible_segments(&segments, &viewport).map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_bounding_box_overlap_is_not_enough() {
        // Triangle viewport; the segment sits in its bounding box but outside the shape
        let viewport = Polygon::new(
            LineString::from(vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]),
            vec![],
        );
        let segments = vec![segment(0, vec![[0.8, 0.8], [0.9, 0.9]])];
        assert_eq!(visible_segments(&segments, &viewport).count(), 0);
    }
}
