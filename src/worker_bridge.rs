use crate::bridge_signals::{create_render_signals, RenderSignals, RenderState};
#[allow(unused_imports)]
use crate::logging::log;
use crate::protocol::{Inbound, Outbound};
use crate::render::RenderRequest;
use crate::render_worker::{JsonCodec, RenderWorker};
use crate::topology::TopoJson;
use gloo_worker::Spawnable;

/// Host-side handle to the render worker.
pub struct RenderBridge {
    worker: gloo_worker::WorkerBridge<RenderWorker>,
}

impl RenderBridge {
    #[must_use]
    pub fn new(signals: RenderSignals) -> Self {
        let worker = RenderWorker::spawner()
            .encoding::<JsonCodec>()
            .callback(move |message: Outbound| signals.apply(message))
            .spawn("render_worker.js");
        Self { worker }
    }

    pub fn init(&mut self, topology: &TopoJson) {
        log!("Sending topology to worker: {} arcs", topology.arcs.len());
        self.send(&Inbound::Init(topology.clone()));
    }

    pub fn request_render(&mut self, request: RenderRequest) {
        self.send(&Inbound::RequestRender(request));
    }

    fn send(&mut self, message: &Inbound) {
        match serde_json::to_value(message) {
            Ok(value) => self.worker.send(value),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to encode worker message: {e}").into());
            }
        }
    }
}

/// Spawns the worker and the signals it reports into
#[must_use]
pub fn create_render_bridge() -> (RenderBridge, RenderState) {
    let (signals, state) = create_render_signals();
    (RenderBridge::new(signals), state)
}
