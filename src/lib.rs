#![allow(unknown_lints)]

pub mod logging;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod topology;
pub mod spacing;
pub mod ordering;
pub mod render;
pub mod protocol;
pub mod engine;
pub mod bridge_signals;

#[cfg(target_arch = "wasm32")]
pub mod render_worker;

#[cfg(target_arch = "wasm32")]
#[path = "worker_bridge.rs"]
pub mod worker_bridge;

#[cfg(not(target_arch = "wasm32"))]
#[path = "worker_bridge_sync.rs"]
pub mod worker_bridge;

pub use engine::Engine;
pub use protocol::{Inbound, Outbound};
pub use render::{FeatureCollection, RenderRequest};
pub use topology::{TopoJson, Topology};
