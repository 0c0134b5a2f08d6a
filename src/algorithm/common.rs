//! Free functions shared across policies: the dispatch-opportunity
//! mechanics and ready-queue bookkeeping that every discipline needs, but
//! keyed to different queue shapes (FIFO vs. τ-ordered), so they're plain
//! functions rather than a shared base type.

use std::collections::VecDeque;

use crate::event::Kind;
use crate::process::ProcessId;
use crate::sim::Kernel;

/// If the CPU is free and nothing is switching, pops the FIFO head and
/// begins the switch-in. Returns the dispatched process, if any.
pub(super) fn try_dispatch_fifo(
    kernel: &mut Kernel,
    ready: &mut VecDeque<ProcessId>,
) -> Option<ProcessId> {
    if kernel.current.is_some() || kernel.switching {
        return None;
    }
    let pid = ready.pop_front()?;
    kernel.switching = true;
    kernel.add_event(Kind::Cpu, pid, kernel.params.t_cs_ms / 2);
    Some(pid)
}

/// Same dispatch opportunity for a τ-ordered ready queue, keyed
/// `(remaining_estimate_ms, name, process)` and kept sorted ascending.
pub(super) fn try_dispatch_tau(
    kernel: &mut Kernel,
    ready: &mut Vec<(f64, char, ProcessId)>,
) -> Option<ProcessId> {
    if kernel.current.is_some() || kernel.switching {
        return None;
    }
    if ready.is_empty() {
        return None;
    }
    let (_, _, pid) = ready.remove(0);
    kernel.switching = true;
    kernel.add_event(Kind::Cpu, pid, kernel.params.t_cs_ms / 2);
    Some(pid)
}

/// The bookkeeping every policy performs the instant a process's `CPU`
/// event fires: close the wait interval, count the switch, and hand the
/// CPU to the process. Returns its `cpu_left_ms` so the caller can decide
/// what to schedule next (a plain `FINISH_CPU`, or something slice-aware).
pub(super) fn begin_cpu_run(kernel: &mut Kernel, process: ProcessId) -> u64 {
    debug_assert!(
        kernel.processes[process].cpu_progress_is_consistent(),
        "{}",
        crate::error::KernelError::InvariantViolated(format!(
            "process {process} has inconsistent cpu_left/cpu_done before dispatch"
        ))
    );
    kernel.switching = false;
    let wait = kernel.time_ms - kernel.processes[process].start_wait_ms;
    kernel.processes[process].wait_times_ms.push(wait);
    kernel.processes[process].context_switches += 1;
    kernel.run_process(process);
    kernel.processes[process].cpu_left_ms
}

pub(super) fn fifo_names(kernel: &Kernel, ready: &VecDeque<ProcessId>) -> Vec<char> {
    ready.iter().map(|&pid| kernel.process_name(pid)).collect()
}

pub(super) fn tau_names(ready: &[(f64, char, ProcessId)]) -> Vec<char> {
    ready.iter().map(|&(_, name, _)| name).collect()
}

/// Inserts `(key, name, pid)` keeping `ready` sorted ascending by
/// `(key, name)`, the tie-break SJF/SRT use for equal τ estimates.
pub(super) fn insert_tau_sorted(
    ready: &mut Vec<(f64, char, ProcessId)>,
    key: f64,
    name: char,
    pid: ProcessId,
) {
    let pos = ready.partition_point(|&(k, n, _)| k < key || (k == key && n < name));
    ready.insert(pos, (key, name, pid));
}

/// Cancels `pid`'s pending events, closes its CPU-occupancy interval, rolls
/// back its in-flight burst progress, counts the preemption, and schedules
/// the switch-out (`PREEMPT` after half a context switch). Shared by
/// SRT (§4.5) and RR's slice-expiry preemption, which both preempt the
/// same way and differ only in how the process is re-queued once PREEMPT
/// fires.
pub(super) fn preempt_running(kernel: &mut Kernel, pid: ProcessId) {
    let elapsed = kernel.time_ms - kernel.processes[pid].start_cpu_ms;
    kernel.remove_events_for(pid);
    kernel.stop_process();
    kernel.processes[pid].rollback_cpu_progress(elapsed);
    kernel.processes[pid].preemptions += 1;
    kernel.add_event(Kind::Preempt, pid, kernel.params.t_cs_ms / 2);
    kernel.switching = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Bound, Burst, Process};
    use crate::sim::{NullTracer, SimParams};

    #[test]
    fn insert_tau_sorted_keeps_ascending_order() {
        let mut ready = Vec::new();
        insert_tau_sorted(&mut ready, 50.0, 'C', 2);
        insert_tau_sorted(&mut ready, 10.0, 'A', 0);
        insert_tau_sorted(&mut ready, 10.0, 'B', 1);
        assert_eq!(
            ready,
            vec![(10.0, 'A', 0), (10.0, 'B', 1), (50.0, 'C', 2)]
        );
    }

    #[test]
    #[should_panic(expected = "inconsistent cpu_left/cpu_done")]
    fn begin_cpu_run_panics_in_debug_on_inconsistent_progress() {
        let params = SimParams { t_cs_ms: 4, alpha: 0.5, t_slice_ms: 32 };
        let mut kernel = Kernel::new(params, 0.01, Box::new(NullTracer));
        let p = Process::new('A', 0, vec![Burst { cpu_ms: 100, io_ms: None }], Bound::Cpu);
        kernel.processes.push(p);
        kernel.processes[0].cpu_left_ms = 10;
        kernel.processes[0].cpu_done_ms = 10;

        begin_cpu_run(&mut kernel, 0);
    }
}
