/// Conditional logging for development builds
///
/// The `log!` macro provides informational logging that is compiled out in
/// production (release) builds by default. Inside the render worker it writes to
/// the browser console; on native targets (tests, benches) it writes to stderr.
/// Errors raised at the worker boundary should keep using
/// `web_sys::console::error_1` directly.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// # Examples
///
/// ```rust
/// use transit_lines::logging::log;
///
/// log!("Ingested {} segments", 12);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(all(not(target_arch = "wasm32"), any(debug_assertions, feature = "console_logging")))]
        {
            eprintln!($($arg),+);
        }
    };
}

pub use log;

/// Get Performance API from either window (main thread) or worker global scope
#[cfg(target_arch = "wasm32")]
fn get_performance() -> Option<web_sys::Performance> {
    use wasm_bindgen::JsCast;

    if let Some(window) = web_sys::window() {
        return window.performance();
    }
    let global = js_sys::global();
    let worker_scope: web_sys::WorkerGlobalScope = global.dyn_into().ok()?;
    worker_scope.performance()
}

/// Wall-clock timer for phase timings.
///
/// Uses `Performance.now()` in the worker and `Instant` natively. The reading is
/// an `Option` because a worker scope without a Performance object is legal.
pub struct Stopwatch {
    #[cfg(target_arch = "wasm32")]
    start: Option<f64>,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    #[must_use]
    pub fn start() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            start: get_performance().map(|p| p.now()),
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> Option<f64> {
        #[cfg(target_arch = "wasm32")]
        {
            self.start.and_then(|s| get_performance().map(|p| p.now() - s))
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Some(self.start.elapsed().as_secs_f64() * 1000.0)
        }
    }
}
