use crate::protocol::Outbound;
use crate::render::FeatureCollection;
use leptos::{create_signal, ReadSignal, SignalSet, SignalUpdate, WriteSignal};

/// Read side of the render engine's state, for the host UI.
#[derive(Clone, Copy)]
pub struct RenderState {
    /// Number of operations in flight
    pub loading: ReadSignal<usize>,
    /// Set once a topology has been ingested
    pub ready: ReadSignal<bool>,
    pub rendered: ReadSignal<Option<FeatureCollection>>,
    pub error: ReadSignal<Option<String>>,
}

/// Write side, fed with every outbound message the engine emits.
#[derive(Clone, Copy)]
pub struct RenderSignals {
    set_loading: WriteSignal<usize>,
    set_ready: WriteSignal<bool>,
    set_rendered: WriteSignal<Option<FeatureCollection>>,
    set_error: WriteSignal<Option<String>>,
}

impl RenderSignals {
    pub fn apply(&self, message: Outbound) {
        match message {
            Outbound::AddLoadingItem => self.set_loading.update(|n| *n += 1),
            Outbound::RemoveLoadingItem => self.set_loading.update(|n| *n = n.saturating_sub(1)),
            Outbound::FinishedInit => {
                self.set_ready.set(true);
                self.set_error.set(None);
            }
            Outbound::Rendered(collection) => self.set_rendered.set(Some(collection)),
            Outbound::Error(report) => self.set_error.set(Some(report.message)),
        }
    }
}

#[must_use]
pub fn create_render_signals() -> (RenderSignals, RenderState) {
    let (loading, set_loading) = create_signal(0);
    let (ready, set_ready) = create_signal(false);
    let (rendered, set_rendered) = create_signal(None);
    let (error, set_error) = create_signal(None);
    (
        RenderSignals {
            set_loading,
            set_ready,
            set_rendered,
            set_error,
        },
        RenderState {
            loading,
            ready,
            rendered,
            error,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ErrorReport;
    use leptos::{create_runtime, SignalGetUntracked};

    #[test]
    fn test_loading_counter_never_underflows() {
        let runtime = create_runtime();
        let (signals, state) = create_render_signals();

        signals.apply(Outbound::AddLoadingItem);
        signals.apply(Outbound::AddLoadingItem);
        assert_eq!(state.loading.get_untracked(), 2);
        signals.apply(Outbound::RemoveLoadingItem);
        signals.apply(Outbound::RemoveLoadingItem);
        signals.apply(Outbound::RemoveLoadingItem);
        assert_eq!(state.loading.get_untracked(), 0);

        runtime.dispose();
    }

    #[test]
    fn test_finished_init_clears_error() {
        let runtime = create_runtime();
        let (signals, state) = create_render_signals();

        signals.apply(Outbound::Error(ErrorReport { message: "bad".to_string() }));
        assert_eq!(state.error.get_untracked().as_deref(), Some("bad"));
        signals.apply(Outbound::FinishedInit);
        assert!(state.ready.get_untracked());
        assert_eq!(state.error.get_untracked(), None);

        runtime.dispose();
    }
}
