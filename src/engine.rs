use crate::error::{EngineError, ProtocolError, TopologyError};
#[allow(unused_imports)]
use crate::logging::{log, Stopwatch};
use crate::protocol::{Inbound, Outbound};
use crate::render::{render, FeatureCollection, RenderRequest};
use crate::topology::{TopoJson, Topology};

/// Owns the ingested topology and answers inbound messages one at a time.
#[derive(Debug, Default)]
pub struct Engine {
    topology: Option<Topology>,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn topology(&self) -> Option<&Topology> {
        self.topology.as_ref()
    }

    /// Replaces the held topology. On error the previous one is kept.
    ///
    /// # Errors
    /// Returns an error if the topology fails validation.
    pub fn load(&mut self, input: &TopoJson) -> Result<(), TopologyError> {
        self.topology = Some(Topology::ingest(input)?);
        Ok(())
    }

    /// Renders against the held topology; empty until a topology is loaded.
    ///
    /// # Errors
    /// Returns an error if the request's viewbox is not a usable ring.
    pub fn render(&self, request: &RenderRequest) -> Result<FeatureCollection, ProtocolError> {
        match &self.topology {
            Some(topology) => render(topology, request),
            None => {
                request.viewport()?;
                log!("Render requested before any topology was loaded");
                Ok(FeatureCollection::empty())
            }
        }
    }

    /// Handles one message, bracketing the work with loading notifications.
    pub fn handle(&mut self, message: Inbound, emit: &mut impl FnMut(Outbound)) {
        #[cfg(feature = "perf_timing")]
        let watch = Stopwatch::start();
        emit(Outbound::AddLoadingItem);

        match self.process(message) {
            Ok(reply) => emit(reply),
            Err(err) => {
                log!("Rejected message: {}", err);
                emit(Outbound::error(&err));
            }
        }

        emit(Outbound::RemoveLoadingItem);
        #[cfg(feature = "perf_timing")]
        if let Some(elapsed) = watch.elapsed_ms() {
            log!("Message handled in {:.2}ms", elapsed);
        }
    }

    /// Decodes a loosely typed message and handles it.
    ///
    /// Payloads matching no message shape are answered with a single error
    /// and never reach the pipeline.
    pub fn handle_value(&mut self, value: serde_json::Value, emit: &mut impl FnMut(Outbound)) {
        match Inbound::from_value(value) {
            Ok(message) => self.handle(message, emit),
            Err(err) => {
                log!("Rejected message: {}", err);
                emit(Outbound::error(&err));
            }
        }
    }

    fn process(&mut self, message: Inbound) -> Result<Outbound, EngineError> {
        match message {
            Inbound::Init(input) => {
                self.load(&input)?;
                Ok(Outbound::FinishedInit)
            }
            Inbound::RequestRender(request) => Ok(Outbound::Rendered(self.render(&request)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn init_message() -> serde_json::Value {
        json!({
            "type": "init",
            "data": {
                "arcs": [[[0, 0], [1, 1]], [[1, 1], [2, 2]]],
                "objects": {"r": {"type": "LineString", "arcs": [0, 1],
                    "properties": {"color": "#FF0000"}}}
            }
        })
    }

    fn render_message() -> serde_json::Value {
        json!({
            "type": "request_render",
            "data": {"width": 3, "zoom": 10,
                     "viewbox": [[-1, -1], [3, -1], [3, 3], [-1, 3], [-1, -1]]}
        })
    }

    fn collect(engine: &mut Engine, value: serde_json::Value) -> Vec<Outbound> {
        let mut out = Vec::new();
        engine.handle_value(value, &mut |msg| out.push(msg));
        out
    }

    #[test]
    fn test_init_is_bracketed_by_loading_items() {
        let mut engine = Engine::new();
        let out = collect(&mut engine, init_message());

        assert_eq!(
            out,
            vec![Outbound::AddLoadingItem, Outbound::FinishedInit, Outbound::RemoveLoadingItem]
        );
        assert_eq!(engine.topology().map(|t| t.segments().len()), Some(2));
    }

    #[test]
    fn test_render_after_init() {
        let mut engine = Engine::new();
        collect(&mut engine, init_message());
        let out = collect(&mut engine, render_message());

        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Outbound::AddLoadingItem);
        assert_eq!(out[2], Outbound::RemoveLoadingItem);
        let Outbound::Rendered(collection) = &out[1] else {
            panic!("expected rendered, got {:?}", out[1]);
        };
        assert_eq!(collection.features.len(), 1);
        assert_eq!(collection.features[0].geometry.coordinates.len(), 3);
    }

    #[test]
    fn test_render_before_init_is_empty() {
        let mut engine = Engine::new();
        let out = collect(&mut engine, render_message());
        assert_eq!(out[1], Outbound::Rendered(FeatureCollection::empty()));
    }

    #[test]
    fn test_bad_viewbox_reports_error_inside_bracket() {
        let mut engine = Engine::new();
        collect(&mut engine, init_message());
        let out = collect(
            &mut engine,
            json!({"type": "request_render",
                   "data": {"width": 3, "zoom": 10, "viewbox": [[0, 0], [1, 1]]}}),
        );

        assert_eq!(out.len(), 3);
        assert!(matches!(out[1], Outbound::Error(_)));
        assert_eq!(out[2], Outbound::RemoveLoadingItem);
    }

    #[test]
    fn test_invalid_topology_keeps_previous() {
        let mut engine = Engine::new();
        collect(&mut engine, init_message());
        let out = collect(
            &mut engine,
            json!({"type": "init", "data": {
                "arcs": [[[0, 0], [1, 1]]],
                "objects": {"r": {"type": "LineString", "arcs": [5],
                    "properties": {"color": "#FF0000"}}}
            }}),
        );

        let Outbound::Error(report) = &out[1] else {
            panic!("expected error, got {:?}", out[1]);
        };
        assert!(report.message.contains("arc reference 5"));
        assert_eq!(engine.topology().map(|t| t.segments().len()), Some(2));
    }

    #[test]
    fn test_malformed_message_gets_single_error() {
        let mut engine = Engine::new();
        let out = collect(&mut engine, json!({"type": "init"}));
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Outbound::Error(_)));
    }

    #[test]
    fn test_reingesting_same_topology_is_stable() {
        let mut engine = Engine::new();
        collect(&mut engine, init_message());
        let first = engine.topology().cloned();
        collect(&mut engine, init_message());
        assert_eq!(engine.topology().cloned(), first);
    }
}
