//! Numeric tunables for spacing, clipping and smoothing.
//!
//! Distances are in kilometres unless noted otherwise.

/// Lower clamp bound for the spacing between parallel route lines
pub const MIN_SPACING: f64 = 0.000_05;

/// Upper clamp bound for the spacing between parallel route lines
pub const MAX_SPACING: f64 = 0.3;

/// Zoom level at which the spacing formula is unscaled
pub const BASE_ZOOM: f64 = 10.0;

/// Smallest line width fed into the spacing formula
pub const MIN_LINE_WIDTH: f64 = 1.0;

/// Floor of the margin trimmed from segment ends near junctions
pub const MIN_JUNCTION_MARGIN: f64 = 0.049;

/// Junction margin grows with spacing by this factor
pub const JUNCTION_MARGIN_FACTOR: f64 = 5.0;

/// Segment lines are smoothed only below this spacing
pub const LINE_SMOOTHING_THRESHOLD: f64 = 0.007;
pub const LINE_SMOOTHING_ITERATIONS: usize = 2;

/// Stitched connection chains are smoothed only below this spacing
pub const CONNECTION_SMOOTHING_THRESHOLD: f64 = 0.11;
pub const CONNECTION_SMOOTHING_ITERATIONS: usize = 7;

/// Chaikin corner-cutting weight kept on the nearer vertex
pub const SMOOTHING_FACTOR: f64 = 0.75;

/// Lines with fewer vertices than this are never clipped
pub const MIN_CLIP_VERTICES: usize = 4;

/// Mean earth radius used to turn kilometres into degrees
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Parallel-line tolerance for offset joins
pub const PARALLEL_EPSILON: f64 = 1e-12;
