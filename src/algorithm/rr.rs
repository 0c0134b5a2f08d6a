//! Round Robin: FCFS's FIFO discipline plus a time quantum. Built on top
//! of [`Fcfs`] — arrival, I/O, and exit handling are identical; only
//! dispatch-onto-CPU and slice expiry differ.

use super::common::{begin_cpu_run, fifo_names, preempt_running};
use super::{Fcfs, Policy};
use crate::event::Kind;
use crate::process::ProcessId;
use crate::sim::Kernel;

#[derive(Default)]
pub struct Rr {
    fcfs: Fcfs,
}

impl Policy for Rr {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn on_arrival(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.fcfs.on_arrival(process, kernel);
    }

    fn on_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let cpu_left = begin_cpu_run(kernel, process);
        if cpu_left <= kernel.params.t_slice_ms {
            kernel.add_event(Kind::FinishCpu, process, cpu_left);
        } else {
            kernel.add_event(Kind::Expire, process, kernel.params.t_slice_ms);
        }

        let name = kernel.process_name(process);
        let burst_ms = kernel.processes[process].current_burst().cpu_ms;
        if kernel.processes[process].cpu_done_ms == 0 {
            kernel.trace(
                format!("{name} started a {burst_ms}ms CPU burst"),
                fifo_names(kernel, &self.fcfs.ready),
            );
        } else {
            kernel.trace(
                format!("{name} resumed with {cpu_left}ms left of its {burst_ms}ms CPU burst"),
                fifo_names(kernel, &self.fcfs.ready),
            );
        }
    }

    fn on_finish_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.fcfs.on_finish_cpu(process, kernel);
    }

    fn on_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.fcfs.on_io(process, kernel);
    }

    fn on_finish_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.fcfs.on_finish_io(process, kernel);
    }

    fn on_exit(&mut self, process: ProcessId, kernel: &mut Kernel) {
        self.fcfs.on_exit(process, kernel);
    }

    /// Re-appends to the FIFO tail rather than the head: a preempted
    /// process is just another process that's used up its slice.
    fn on_preempt(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.processes[process].start_wait_ms = kernel.time_ms;
        self.fcfs.ready.push_back(process);
        kernel.switching = false;
    }

    /// The one genuinely RR-specific decision (§4.5, §9): an empty ready
    /// queue at expiry means nobody is waiting for the CPU, so the running
    /// process simply continues into another slice instead of paying a
    /// pointless context-switch round trip.
    fn on_expire(&mut self, process: ProcessId, kernel: &mut Kernel) {
        if self.fcfs.ready.is_empty() {
            kernel.processes[process].rollback_cpu_progress(kernel.params.t_slice_ms);
            kernel.processes[process].start_cpu_ms = kernel.time_ms;

            let name = kernel.process_name(process);
            kernel.trace(
                format!("{name}'s time slice expired; ready queue empty, continuing on the CPU"),
                fifo_names(kernel, &self.fcfs.ready),
            );

            let cpu_left = kernel.processes[process].cpu_left_ms;
            if cpu_left <= kernel.params.t_slice_ms {
                kernel.add_event(Kind::FinishCpu, process, cpu_left);
            } else {
                kernel.add_event(Kind::Expire, process, kernel.params.t_slice_ms);
            }
            return;
        }

        let name = kernel.process_name(process);
        preempt_running(kernel, process);
        let cpu_left = kernel.processes[process].cpu_left_ms;
        kernel.trace(
            format!("{name}'s time slice expired with {cpu_left}ms remaining; switching out"),
            fifo_names(kernel, &self.fcfs.ready),
        );
    }

    fn on_evented(&mut self, kernel: &mut Kernel) {
        self.fcfs.on_evented(kernel);
    }
}
