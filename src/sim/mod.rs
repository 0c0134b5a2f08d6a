//! The discrete-event simulation kernel: clock, event queue, CPU-occupancy
//! accounting, and the main dispatch loop. Scheduling *policy* (ready-queue
//! discipline, what to do on each event kind) lives in [`crate::algorithm`];
//! the kernel only knows how to drive the clock and hand events to whatever
//! policy it's given.

mod tracer;

pub use tracer::{NullTracer, RecordingTracer, TraceEvent, Tracer};

use crate::algorithm::Policy;
use crate::event::{Event, EventQueue, Kind};
use crate::process::{Process, ProcessId};
use crate::stats::Stats;
use crate::workload::{self, WorkloadParams};

/// Tunables that affect simulation timing but not the workload itself.
#[derive(Clone, Copy, Debug)]
pub struct SimParams {
    /// Full context-switch cost; half is charged on switch-in, half on
    /// switch-out.
    pub t_cs_ms: u64,
    /// Exponential-average smoothing factor for SJF/SRT's τ.
    pub alpha: f64,
    /// Round Robin time quantum.
    pub t_slice_ms: u64,
}

/// The mutable world a [`Policy`] observes and mutates while handling one
/// event. Owns the process table, the pending-event multiset, and the
/// single shared CPU's occupancy state.
pub struct Kernel {
    pub processes: Vec<Process>,
    pub queue: EventQueue,
    pub current: Option<ProcessId>,
    pub switching: bool,
    pub time_ms: u64,
    pub params: SimParams,
    pub lambda: f64,

    cpu_time_ms: u64,
    cpu_since_ms: u64,
    tracer: Box<dyn Tracer>,
    /// Bounds how long a single run may execute, purely as a safety net
    /// against a misbehaving policy looping forever; not a library-level
    /// correctness concern (§4.4).
    runaway_limit_ms: Option<u64>,
}

impl Kernel {
    pub fn new(params: SimParams, lambda: f64, tracer: Box<dyn Tracer>) -> Self {
        Self {
            processes: Vec::new(),
            queue: EventQueue::new(),
            current: None,
            switching: false,
            time_ms: 0,
            params,
            lambda,
            cpu_time_ms: 0,
            cpu_since_ms: 0,
            tracer,
            runaway_limit_ms: None,
        }
    }

    pub fn with_runaway_limit(mut self, limit_ms: u64) -> Self {
        self.runaway_limit_ms = Some(limit_ms);
        self
    }

    fn reset(&mut self) {
        self.processes.clear();
        self.queue.clear();
        self.current = None;
        self.switching = false;
        self.time_ms = 0;
        self.cpu_time_ms = 0;
        self.cpu_since_ms = 0;
    }

    pub fn process_name(&self, id: ProcessId) -> char {
        self.processes[id].name
    }

    /// Schedules `kind` for `process` at `now + delay_ms`.
    pub fn add_event(&mut self, kind: Kind, process: ProcessId, delay_ms: u64) {
        let name = self.process_name(process);
        self.queue.add(self.time_ms, kind, process, name, delay_ms);
    }

    pub fn remove_events_for(&mut self, process: ProcessId) {
        self.queue.remove_for(process);
    }

    /// Marks `process` as holding the CPU and starts its occupancy clock.
    pub fn run_process(&mut self, process: ProcessId) {
        self.current = Some(process);
        self.cpu_since_ms = self.time_ms;
        self.processes[process].start_cpu_ms = self.time_ms;
    }

    /// Clears the CPU slot and folds the elapsed run into `cpu_time`.
    pub fn stop_process(&mut self) {
        if self.current.take().is_some() {
            self.cpu_time_ms += self.time_ms - self.cpu_since_ms;
        }
    }

    /// Emits a trace line with the given ready-queue snapshot.
    pub fn trace(&mut self, message: impl Into<String>, queue_names: Vec<char>) {
        self.tracer.event(self.time_ms, message.into(), queue_names);
    }

    /// Runs one full simulation of `policy` over a freshly generated
    /// workload, returning the aggregate [`Stats`].
    ///
    /// Fully resets kernel state first: no process, event, or CPU-counter
    /// state leaks across algorithm invocations, even when called
    /// repeatedly on the same `Kernel` (§7).
    pub fn run(&mut self, policy: &mut dyn Policy, workload: &WorkloadParams) -> Stats {
        self.reset();
        self.processes = workload::generate(workload);

        for id in 0..self.processes.len() {
            let arrival_ms = self.processes[id].arrival_ms;
            self.add_event(Kind::Arrival, id, arrival_ms);
        }

        self.trace(format!("Simulator started for {}", policy.name()), vec![]);

        while let Some(event) = self.queue.pop_min() {
            self.time_ms = event.time_ms;

            if let Some(limit) = self.runaway_limit_ms {
                if self.time_ms >= limit {
                    break;
                }
            }

            dispatch(policy, &event, self);

            if !self.queue.has_event_at(self.time_ms) {
                policy.on_evented(self);
            }
        }

        crate::stats::aggregate(&self.processes, self.cpu_time_ms, self.time_ms)
    }
}

fn dispatch(policy: &mut dyn Policy, event: &Event, kernel: &mut Kernel) {
    let process = event.process;
    match event.kind {
        Kind::Arrival => policy.on_arrival(process, kernel),
        Kind::Cpu => policy.on_cpu(process, kernel),
        Kind::FinishCpu => policy.on_finish_cpu(process, kernel),
        Kind::Io => policy.on_io(process, kernel),
        Kind::FinishIo => policy.on_finish_io(process, kernel),
        Kind::Exit => policy.on_exit(process, kernel),
        Kind::Preempt => policy.on_preempt(process, kernel),
        Kind::Expire => policy.on_expire(process, kernel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Fcfs;

    fn params() -> SimParams {
        SimParams { t_cs_ms: 8, alpha: 0.5, t_slice_ms: 64 }
    }

    fn workload() -> WorkloadParams {
        WorkloadParams { n_processes: 4, n_cpu: 1, seed: 11, lambda: 0.01, threshold: 1000 }
    }

    #[test]
    fn run_terminates_and_resets_between_calls() {
        let mut kernel = Kernel::new(params(), 0.01, Box::new(NullTracer));
        let mut fcfs = Fcfs::default();
        let first = kernel.run(&mut fcfs, &workload());
        assert!(kernel.queue.is_empty());
        assert!(kernel.current.is_none());
        assert!(!kernel.switching);

        let mut fcfs2 = Fcfs::default();
        let second = kernel.run(&mut fcfs2, &workload());
        assert_eq!(first.cpu_utilization_pct, second.cpu_utilization_pct);
    }

    #[test]
    fn runaway_limit_stops_without_panicking() {
        let mut kernel = Kernel::new(params(), 0.01, Box::new(NullTracer)).with_runaway_limit(1);
        let mut fcfs = Fcfs::default();
        let _stats = kernel.run(&mut fcfs, &workload());
    }

    #[test]
    fn empty_workload_produces_zeroed_stats() {
        let mut kernel = Kernel::new(params(), 0.01, Box::new(NullTracer));
        let mut fcfs = Fcfs::default();
        let empty = WorkloadParams { n_processes: 0, n_cpu: 0, seed: 1, lambda: 0.01, threshold: 1000 };
        let stats = kernel.run(&mut fcfs, &empty);
        assert_eq!(stats.cpu_utilization_pct, 0.0);
        assert_eq!(stats.context_switches.total, 0);
    }
}
