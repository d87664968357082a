use crate::bridge_signals::{create_render_signals, RenderSignals, RenderState};
use crate::engine::Engine;
use crate::protocol::Inbound;
use crate::render::RenderRequest;
use crate::topology::TopoJson;

/// Synchronous version of `RenderBridge` for non-wasm32 targets (tests, etc.)
pub struct RenderBridge {
    engine: Engine,
    signals: RenderSignals,
}

impl RenderBridge {
    #[must_use]
    pub fn new(signals: RenderSignals) -> Self {
        Self {
            engine: Engine::new(),
            signals,
        }
    }

    pub fn init(&mut self, topology: &TopoJson) {
        self.dispatch(Inbound::Init(topology.clone()));
    }

    pub fn request_render(&mut self, request: RenderRequest) {
        self.dispatch(Inbound::RequestRender(request));
    }

    fn dispatch(&mut self, message: Inbound) {
        let signals = self.signals;
        self.engine.handle(message, &mut |reply| signals.apply(reply));
    }
}

#[must_use]
pub fn create_render_bridge() -> (RenderBridge, RenderState) {
    let (signals, state) = create_render_signals();
    (RenderBridge::new(signals), state)
}
