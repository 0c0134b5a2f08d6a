//! Time-ordered event store with deterministic tie-breaking.
//!
//! Ordering here is load-bearing: SJF/SRT correctness depends on
//! `FINISH_CPU` being drained before a colliding `ARRIVAL` at the same
//! timestamp. See [`Kind`]'s declaration order, which doubles as its
//! ordinal.

use crate::process::ProcessId;

/// The closed, fixed set of event kinds. Declaration order is the ordinal
/// tie-break order used by [`Event`]'s `Ord` impl — do not reorder these
/// variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    FinishCpu = 1,
    Cpu = 2,
    FinishIo = 3,
    Io = 4,
    Preempt = 5,
    Arrival = 6,
    Exit = 7,
    Expire = 8,
}

/// A single scheduled occurrence: "at `time_ms`, fire `kind` for
/// `process`". Uniquely identified by `(time_ms, kind, process)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub time_ms: u64,
    pub kind: Kind,
    pub process: ProcessId,
    /// The process's name, carried alongside its id purely so tie-breaking
    /// can compare lexicographically without a back-reference to the
    /// process table.
    pub name: char,
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.time_ms, self.kind, self.name).cmp(&(other.time_ms, other.kind, other.name))
    }
}

/// A multiset of pending events with time-ordered extract-min.
///
/// Backed by a flat `Vec` rather than a heap: the live event count never
/// exceeds a handful per process, so linear scans for `pop_min` and
/// `remove_for` are cheaper in practice than heap bookkeeping, and a `Vec`
/// makes "does this duplicate already exist" trivial to check in debug
/// builds without a second index.
#[derive(Default, Debug)]
pub struct EventQueue {
    events: Vec<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Schedules `kind` for `process` at `now + delay_ms`.
    ///
    /// Debug builds assert that no event already exists for this exact
    /// `(time, kind, process)` triple: duplicates are a programmer bug
    /// (§7), never a condition the queue silently repairs.
    pub fn add(&mut self, now: u64, kind: Kind, process: ProcessId, name: char, delay_ms: u64) {
        let time_ms = now + delay_ms;
        debug_assert!(
            !self
                .events
                .iter()
                .any(|e| e.time_ms == time_ms && e.kind == kind && e.process == process),
            "{}",
            crate::error::KernelError::DuplicateEvent { time_ms, kind }
        );
        self.events.push(Event { time_ms, kind, process, name });
    }

    /// Discards every pending event for `process`, used when preempting it.
    pub fn remove_for(&mut self, process: ProcessId) {
        self.events.retain(|e| e.process != process);
    }

    /// Removes and returns the minimum event per the `(time, kind, name)`
    /// ordering, or `None` if the queue is empty.
    pub fn pop_min(&mut self) -> Option<Event> {
        let (idx, _) = self
            .events
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.cmp(b))?;
        Some(self.events.remove(idx))
    }

    /// Whether another pending event shares `time_ms` with the one just
    /// popped — the kernel uses this to decide whether to give the
    /// algorithm a dispatch opportunity yet.
    pub fn has_event_at(&self, time_ms: u64) -> bool {
        self.events.iter().any(|e| e.time_ms == time_ms)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_order_matches_spec() {
        assert!(Kind::FinishCpu < Kind::Cpu);
        assert!(Kind::Cpu < Kind::FinishIo);
        assert!(Kind::FinishIo < Kind::Io);
        assert!(Kind::Io < Kind::Preempt);
        assert!(Kind::Preempt < Kind::Arrival);
        assert!(Kind::Arrival < Kind::Exit);
        assert!(Kind::Exit < Kind::Expire);
    }

    #[test]
    fn finish_cpu_beats_arrival_at_equal_time() {
        let mut q = EventQueue::new();
        q.add(0, Kind::Arrival, 1, 'B', 100);
        q.add(0, Kind::FinishCpu, 0, 'A', 100);

        let first = q.pop_min().unwrap();
        assert_eq!(first.kind, Kind::FinishCpu);
        assert_eq!(first.name, 'A');

        let second = q.pop_min().unwrap();
        assert_eq!(second.kind, Kind::Arrival);
    }

    #[test]
    fn tie_break_falls_back_to_name() {
        let mut q = EventQueue::new();
        q.add(0, Kind::Arrival, 1, 'B', 50);
        q.add(0, Kind::Arrival, 0, 'A', 50);

        assert_eq!(q.pop_min().unwrap().name, 'A');
        assert_eq!(q.pop_min().unwrap().name, 'B');
    }

    #[test]
    fn remove_for_discards_only_that_process() {
        let mut q = EventQueue::new();
        q.add(0, Kind::FinishCpu, 0, 'A', 10);
        q.add(0, Kind::Arrival, 1, 'B', 10);
        q.remove_for(0);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_min().unwrap().process, 1);
    }

    #[test]
    fn has_event_at_reflects_remaining_queue() {
        let mut q = EventQueue::new();
        q.add(0, Kind::Arrival, 0, 'A', 10);
        q.add(0, Kind::Arrival, 1, 'B', 10);
        assert!(q.has_event_at(10));
        q.pop_min();
        assert!(q.has_event_at(10));
        q.pop_min();
        assert!(!q.has_event_at(10));
    }

    #[test]
    #[should_panic(expected = "duplicate event")]
    fn duplicate_add_panics_in_debug() {
        let mut q = EventQueue::new();
        q.add(0, Kind::Arrival, 0, 'A', 10);
        q.add(0, Kind::Arrival, 0, 'A', 10);
    }
}
