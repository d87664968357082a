#[cfg(target_arch = "wasm32")]
fn main() {
    use transit_lines::render_worker::{JsonCodec, RenderWorker};
    use gloo_worker::Registrable;

    console_error_panic_hook::set_once();
    RenderWorker::registrar()
        .encoding::<JsonCodec>()
        .register();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    panic!("This binary is only for WASM targets");
}
