use super::ResolutionEvent;
use tracing::{debug, info};

/// Receives resolution events as they happen.
///
/// Passed explicitly into each resolution call so the resolver itself holds no
/// global state.
pub trait ResolutionObserver {
    fn observe(&mut self, event: ResolutionEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResolutionObserver for NoopObserver {
    fn observe(&mut self, _event: ResolutionEvent) {}
}

/// Forwards events to `tracing`. Selections and outcomes are logged at `info`,
/// per-node inspection at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn observe(&mut self, event: ResolutionEvent) {
        match &event {
            ResolutionEvent::ShapeDetected { shape } => info!(%shape, "{}", event),
            ResolutionEvent::SamplerSelected {
                node_id,
                reaches_output,
                ..
            } => info!(node_id, reaches_output, "{}", event),
            ResolutionEvent::StrategyFinished {
                matched: true,
                strategy,
            } => info!(%strategy, "{}", event),
            _ => debug!("{}", event),
        }
    }
}

/// Keeps every event in order. Handy for tests and diagnostics output.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<ResolutionEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResolutionObserver for RecordingObserver {
    fn observe(&mut self, event: ResolutionEvent) {
        self.events.push(event);
    }
}
