//! Shortest-Remaining-Time: SJF plus preemption whenever a newly-ready
//! process's full τ, or a running process's true remaining time, flips
//! the ordering. Built on top of [`Sjf`] rather than duplicating its
//! ready-queue and τ bookkeeping.

use super::common::{insert_tau_sorted, preempt_running, tau_names};
use super::{Policy, Sjf};
use crate::process::ProcessId;
use crate::sim::Kernel;

#[derive(Default)]
pub struct Srt {
    sjf: Sjf,
}

/// A running process's true remaining estimate *as of now*: its estimate
/// at the start of this dispatch, minus whatever it has run since.
fn true_remaining_now(kernel: &Kernel, running: ProcessId) -> f64 {
    let p = &kernel.processes[running];
    p.remaining_tau_ms() - (kernel.time_ms - p.start_cpu_ms) as f64
}

impl Policy for Srt {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn on_arrival(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_arrival(process, kernel);
    }

    fn on_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_cpu(process, kernel);
    }

    fn on_finish_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_finish_cpu(process, kernel);
    }

    fn on_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_io(process, kernel);
    }

    /// Unlike plain SJF, a process returning from I/O can immediately beat
    /// whatever's running — checked here rather than deferred to the next
    /// dispatch opportunity, since the running process may not yield one
    /// for a long time.
    fn on_finish_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.processes[process].current_burst += 1;
        kernel.processes[process].reset_cpu_progress();
        kernel.processes[process].start_wait_ms = kernel.time_ms;
        kernel.processes[process].start_ta_ms = kernel.time_ms;

        let tau = kernel.processes[process].tau_ms;
        let name = kernel.process_name(process);
        insert_tau_sorted(&mut self.sjf.ready, tau, name, process);

        if let Some(running) = kernel.current {
            if !kernel.switching && true_remaining_now(kernel, running) > tau {
                let rname = kernel.process_name(running);
                preempt_running(kernel, running);
                kernel.trace(
                    format!("{name} (tau {tau}ms) finished I/O and will preempt {rname}"),
                    tau_names(&self.sjf.ready),
                );
                return;
            }
        }

        let names = tau_names(&self.sjf.ready);
        kernel.trace(
            format!("{name} (tau {tau}ms) finished I/O and rejoined the ready queue"),
            names,
        );
    }

    fn on_exit(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_exit(process, kernel);
    }

    /// Re-inserts the preempted process keyed by its remaining estimate
    /// (not its full τ), so a process preempted twice is correctly
    /// compared against fresh arrivals on what it has left to run.
    fn on_preempt(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let key = kernel.processes[process].remaining_tau_ms();
        let name = kernel.process_name(process);
        insert_tau_sorted(&mut self.sjf.ready, key, name, process);
        kernel.switching = false;
    }

    fn on_expire(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.sjf.on_expire(process, kernel);
    }

    fn on_evented(&mut self, kernel: &mut Kernel) {
        self.sjf.on_evented(kernel);

        let Some(running) = kernel.current else { return };
        if kernel.switching {
            return;
        }
        let Some(&(_, _, candidate)) = self.sjf.ready.first() else { return };

        let true_left = true_remaining_now(kernel, running);
        let best_left = kernel.processes[candidate].remaining_tau_ms();
        if true_left > best_left {
            let rname = kernel.process_name(running);
            let cname = kernel.process_name(candidate);
            preempt_running(kernel, running);
            kernel.trace(format!("{cname} will preempt {rname}"), tau_names(&self.sjf.ready));
        }
    }
}
