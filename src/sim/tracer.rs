//! The ambient abstraction over the stdout trace protocol (§6).
//!
//! The kernel and algorithms never format strings for a terminal; they
//! emit structured [`TraceEvent`]s through this trait, so tests can assert
//! on exact trace content ([`RecordingTracer`]) and the `simulator` binary
//! can apply the `ALL`/10000ms suppression rule without the library caring
//! about either environment variables or stdout.

/// One line of the simulation's observable trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub time_ms: u64,
    pub message: String,
    /// Ready-queue process names, in the queue's current order, at the
    /// moment this event fired.
    pub queue_names: Vec<char>,
}

pub trait Tracer {
    fn event(&mut self, time_ms: u64, message: String, queue_names: Vec<char>);
}

/// Discards every event. The default tracer: zero overhead for callers
/// that only want [`Stats`][crate::stats::Stats].
#[derive(Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn event(&mut self, _time_ms: u64, _message: String, _queue_names: Vec<char>) {}
}

/// Records every event verbatim, in order. Used by tests that need to
/// assert exact trace content without capturing process stdout.
#[derive(Default)]
pub struct RecordingTracer {
    pub events: Vec<TraceEvent>,
}

impl Tracer for RecordingTracer {
    fn event(&mut self, time_ms: u64, message: String, queue_names: Vec<char>) {
        self.events.push(TraceEvent { time_ms, message, queue_names });
    }
}

impl RecordingTracer {
    /// Renders one event the way §6 specifies: `time <ms>ms: <message> [Q
    /// <names>]`, `<empty>` when the ready queue is empty.
    pub fn render(event: &TraceEvent) -> String {
        let q = if event.queue_names.is_empty() {
            "<empty>".to_string()
        } else {
            event
                .queue_names
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!("time {}ms: {} [Q {}]", event.time_ms, event.message, q)
    }
}
