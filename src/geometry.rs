//! Planar and spherical line helpers used by the render pipeline.
//!
//! Coordinates are `(longitude, latitude)` in degrees. Lengths are measured on
//! the sphere in kilometres, offsets are applied in degree space.

use crate::constants::{EARTH_RADIUS_KM, PARALLEL_EPSILON};
use geo::{Coord, HaversineDistance, HaversineLength, LineString, Point};

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
    Point::from(a).haversine_distance(&Point::from(b)) / 1000.0
}

/// Total great-circle length of a line in kilometres.
#[must_use]
pub fn line_length_km(line: &LineString) -> f64 {
    line.haversine_length() / 1000.0
}

/// Converts a ground distance into an arc angle in degrees.
#[must_use]
pub fn km_to_degrees(km: f64) -> f64 {
    (km / EARTH_RADIUS_KM).to_degrees()
}

/// Intersection point of the infinite lines through `a1`-`a2` and `b1`-`b2`.
///
/// Returns `None` when the lines are parallel or coincident.
#[must_use]
pub fn line_intersection(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> Option<Coord> {
    let d = (a2.x - a1.x) * (b2.y - b1.y) - (a2.y - a1.y) * (b2.x - b1.x);
    if d.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = ((b1.x - a1.x) * (b2.y - b1.y) - (b1.y - a1.y) * (b2.x - b1.x)) / d;
    Some(Coord {
        x: a1.x + t * (a2.x - a1.x),
        y: a1.y + t * (a2.y - a1.y),
    })
}

fn interpolate(a: Coord, b: Coord, ratio: f64) -> Coord {
    if !ratio.is_finite() {
        return a;
    }
    Coord {
        x: a.x + (b.x - a.x) * ratio,
        y: a.y + (b.y - a.y) * ratio,
    }
}

/// Sub-line between two distances (km) measured along `line`.
///
/// Falls back to a copy of the input when the requested window does not
/// contain at least two positions.
#[must_use]
pub fn slice_along(line: &LineString, start_km: f64, stop_km: f64) -> LineString {
    let mut sliced: Vec<Coord> = Vec::new();
    let mut travelled = 0.0;

    for pair in line.0.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = haversine_km(a, b);
        let next = travelled + length;

        if sliced.is_empty() {
            if next < start_km {
                travelled = next;
                continue;
            }
            sliced.push(interpolate(a, b, (start_km - travelled) / length));
        }

        if next >= stop_km {
            sliced.push(interpolate(a, b, (stop_km - travelled) / length));
            return LineString::new(sliced);
        }

        sliced.push(b);
        travelled = next;
    }

    if sliced.len() < 2 {
        return line.clone();
    }
    LineString::new(sliced)
}

/// Shifts a line sideways by `distance_km`; positive values move it to the
/// right of the direction of travel.
///
/// Every segment is moved along its own normal and neighbouring segments are
/// re-joined where their supporting lines cross. Repeated positions are
/// dropped first since they have no normal.
#[must_use]
pub fn offset_line(line: &LineString, distance_km: f64) -> LineString {
    let offset = km_to_degrees(distance_km);
    let mut coords = line.0.clone();
    coords.dedup();
    if coords.len() < 2 || offset == 0.0 {
        return line.clone();
    }

    let shifted: Vec<(Coord, Coord)> = coords
        .windows(2)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let length = (a.x - b.x).hypot(a.y - b.y);
            let nx = offset * (b.y - a.y) / length;
            let ny = offset * (a.x - b.x) / length;
            (
                Coord { x: a.x + nx, y: a.y + ny },
                Coord { x: b.x + nx, y: b.y + ny },
            )
        })
        .collect();

    let mut joined = Vec::with_capacity(coords.len());
    joined.push(shifted[0].0);
    for pair in shifted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        joined.push(line_intersection(prev.0, prev.1, next.0, next.1).unwrap_or(prev.1));
    }
    if let Some(last) = shifted.last() {
        joined.push(last.1);
    }

    LineString::new(joined)
}

/// Chaikin corner cutting that keeps both endpoints fixed.
///
/// `factor` is the weight kept on the nearer vertex when cutting each corner,
/// so 0.75 yields the classic quarter points.
#[must_use]
pub fn smooth(coords: &[Coord], iterations: usize, factor: f64) -> Vec<Coord> {
    let mut current = coords.to_vec();
    for _ in 0..iterations {
        if current.len() < 3 {
            break;
        }
        let mut next = Vec::with_capacity(current.len() * 2);
        next.push(current[0]);
        for pair in current.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            next.push(interpolate(p1, p2, 1.0 - factor));
            next.push(interpolate(p1, p2, factor));
        }
        next.push(current[current.len() - 1]);
        current = next;
    }
    current
}
