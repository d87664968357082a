use thiserror::Error;

/// Top-level error for everything rejected at the worker boundary.
///
/// Nothing inside the render pipeline produces one of these; they are raised
/// while decoding messages or validating a topology, before any state changes.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors decoding an inbound message envelope.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("viewbox must be a closed ring of at least 4 positions, got {0} positions")]
    ViewboxTooShort(usize),

    #[error("viewbox ring is not closed")]
    ViewboxNotClosed,
}

/// Errors validating an inbound topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("arc reference {reference} points past the arc table ({arc_count} arcs)")]
    ArcOutOfRange { reference: i64, arc_count: usize },

    #[error("arc {0} has fewer than two positions")]
    DegenerateArc(usize),

    #[error("invalid route color {0:?}, expected six hex digits")]
    InvalidColor(String),
}
