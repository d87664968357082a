use crate::engine::Engine;
use crate::protocol::Outbound;
use gloo_worker::{HandlerId, Worker, WorkerScope};

// Re-export the wire codec so the worker binary and the bridge agree on it
pub use crate::protocol::JsonCodec;

/// Web worker hosting the render engine.
///
/// Inputs arrive as loose JSON and are validated by the engine, so a host
/// posting a malformed object gets an `error` reply instead of a dead worker.
pub struct RenderWorker {
    engine: Engine,
}

impl Worker for RenderWorker {
    type Input = serde_json::Value;
    type Output = Outbound;
    type Message = ();

    fn create(_scope: &WorkerScope<Self>) -> Self {
        web_sys::console::log_1(&"Render worker created".into());
        Self {
            engine: Engine::new(),
        }
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {
        // No internal messages needed
    }

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        self.engine.handle_value(msg, &mut |reply| {
            if let Outbound::Error(report) = &reply {
                web_sys::console::error_1(&format!("Render worker: {}", report.message).into());
            }
            scope.respond(id, reply);
        });
    }
}
