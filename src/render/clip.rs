use crate::constants::MIN_CLIP_VERTICES;
use crate::geometry::{line_length_km, slice_along};
use geo::LineString;

/// Trims up to `distance_km` off both ends of a line.
///
/// Lines shorter than three clip distances, or with too few vertices to trim
/// safely, come back unchanged. Otherwise at most a third of the line is
/// removed from either end.
#[must_use]
pub fn clip_line(line: &LineString, distance_km: f64) -> LineString {
    let length = line_length_km(line);
    let min_third = length / 3.0;
    if min_third <= distance_km || line.0.len() < MIN_CLIP_VERTICES {
        return line.clone();
    }

    let start = min_third.min(distance_km);
    let end = (2.0 * min_third).max(length - distance_km);
    slice_along(line, start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meridian(points: usize) -> LineString {
        #[allow(clippy::cast_precision_loss)]
        let coords: Vec<[f64; 2]> = (0..points).map(|i| [0.0, i as f64 * 0.01]).collect();
        LineString::from(coords)
    }

    #[test]
    fn test_short_vertex_count_is_untouched() {
        let line = LineString::from(vec![[0.0, 0.0], [0.0, 1.0], [0.0, 2.0]]);
        assert_eq!(clip_line(&line, 1.0), line);
    }

    #[test]
    fn test_short_length_is_untouched() {
        // About 3.3km long, a third is below the clip distance
        let line = meridian(4);
        assert_eq!(clip_line(&line, 1.2), line);
    }

    #[test]
    fn test_clip_trims_both_ends() {
        let line = meridian(10);
        let length = line_length_km(&line);
        let clipped = clip_line(&line, 1.0);

        assert!((line_length_km(&clipped) - (length - 2.0)).abs() < 1e-6);
        let first = clipped.0.first().expect("start");
        let last = clipped.0.last().expect("end");
        assert!(first.y > 0.0);
        assert!(last.y < 0.09);
    }

    #[test]
    fn test_clip_is_never_longer_and_keeps_two_vertices() {
        let line = LineString::from(vec![[0.0, 0.0], [0.3, 0.1], [0.5, 0.4], [0.9, 0.5], [1.2, 0.4]]);
        let length = line_length_km(&line);
        for distance in [0.0, 0.5, 5.0, 20.0, 40.0, 1000.0] {
            let clipped = clip_line(&line, distance);
            assert!(clipped.0.len() >= 2, "distance {distance}");
            assert!(line_length_km(&clipped) <= length + 1e-9, "distance {distance}");
        }
    }

    #[test]
    fn test_zero_length_line_is_untouched() {
        let line = LineString::from(vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
        assert_eq!(clip_line(&line, 0.1), line);
    }
}
