//! Shortest-Job-First: non-preemptive, ready queue ordered by estimated
//! next CPU burst length τ.

use super::common::{begin_cpu_run, insert_tau_sorted, tau_names, try_dispatch_tau};
use super::Policy;
use crate::event::Kind;
use crate::process::ProcessId;
use crate::sim::Kernel;

#[derive(Default)]
pub struct Sjf {
    /// `(remaining_estimate_ms, name, process)`, ascending.
    pub(super) ready: Vec<(f64, char, ProcessId)>,
}

/// `ceil(α·t + (1−α)·τ)`, narrowing each product to single precision
/// before summing — matches the reference's use of 32-bit float
/// arithmetic for this one computation (§4.5).
pub(super) fn recompute_tau(alpha: f64, just_ran_ms: u64, old_tau_ms: f64) -> f64 {
    let term1 = (alpha * just_ran_ms as f64) as f32 as f64;
    let term2 = ((1.0 - alpha) * old_tau_ms) as f32 as f64;
    (term1 + term2).ceil()
}

impl Policy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn on_arrival(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.processes[process].start_wait_ms = kernel.time_ms;
        kernel.processes[process].start_ta_ms = kernel.time_ms;

        let tau = (1.0 / kernel.lambda).ceil();
        kernel.processes[process].tau_ms = tau;
        let name = kernel.process_name(process);
        insert_tau_sorted(&mut self.ready, tau, name, process);

        let names = tau_names(&self.ready);
        kernel.trace(format!("{name} (tau {tau}ms) arrived and joined the ready queue"), names);
    }

    fn on_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let cpu_left = begin_cpu_run(kernel, process);
        kernel.add_event(Kind::FinishCpu, process, cpu_left);

        let name = kernel.process_name(process);
        let tau = kernel.processes[process].tau_ms;
        let burst_ms = kernel.processes[process].current_burst().cpu_ms;
        if kernel.processes[process].cpu_done_ms == 0 {
            kernel.trace(
                format!("{name} (tau {tau}ms) started a {burst_ms}ms CPU burst"),
                tau_names(&self.ready),
            );
        } else {
            kernel.trace(
                format!(
                    "{name} (tau {tau}ms) resumed with {cpu_left}ms left of its {burst_ms}ms CPU burst"
                ),
                tau_names(&self.ready),
            );
        }
    }

    fn on_finish_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.stop_process();
        let burst_cpu_ms = kernel.processes[process].current_burst().cpu_ms;
        kernel.processes[process].cpu_done_ms = burst_cpu_ms;
        kernel.processes[process].cpu_left_ms = 0;

        let name = kernel.process_name(process);
        let old_tau = kernel.processes[process].tau_ms;

        if kernel.processes[process].is_last_burst() {
            kernel.trace(format!("{name} terminated"), tau_names(&self.ready));
            kernel.add_event(Kind::Exit, process, kernel.params.t_cs_ms / 2);
        } else {
            let bursts_left =
                kernel.processes[process].bursts.len() - kernel.processes[process].current_burst - 1;
            let io_ms = kernel.processes[process].current_burst().io_ms.unwrap();
            let io_done = kernel.time_ms + io_ms + kernel.params.t_cs_ms / 2;

            let new_tau = recompute_tau(kernel.params.alpha, burst_cpu_ms, old_tau);
            kernel.processes[process].tau_ms = new_tau;

            kernel.add_event(Kind::Io, process, kernel.params.t_cs_ms / 2);
            kernel.trace(
                format!("{name} (tau {old_tau}ms) finished a CPU burst ({bursts_left} burst(s) left)"),
                tau_names(&self.ready),
            );
            kernel.trace(
                format!("recalculated tau for {name}: {old_tau}ms -> {new_tau}ms"),
                tau_names(&self.ready),
            );
            kernel.trace(
                format!("{name} is switching out to block on I/O until {io_done}ms"),
                tau_names(&self.ready),
            );
        }
    }

    fn on_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let start_ta = kernel.processes[process].start_ta_ms;
        kernel.processes[process].ta_times_ms.push(kernel.time_ms - start_ta);

        let io_ms = kernel.processes[process].current_burst().io_ms.unwrap();
        kernel.add_event(Kind::FinishIo, process, io_ms);
    }

    fn on_finish_io(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.processes[process].current_burst += 1;
        kernel.processes[process].reset_cpu_progress();
        kernel.processes[process].start_wait_ms = kernel.time_ms;
        kernel.processes[process].start_ta_ms = kernel.time_ms;

        let tau = kernel.processes[process].tau_ms;
        let name = kernel.process_name(process);
        insert_tau_sorted(&mut self.ready, tau, name, process);

        let names = tau_names(&self.ready);
        kernel.trace(format!("{name} (tau {tau}ms) finished I/O and rejoined the ready queue"), names);
    }

    fn on_exit(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let start_ta = kernel.processes[process].start_ta_ms;
        kernel.processes[process].ta_times_ms.push(kernel.time_ms - start_ta);
    }

    fn on_preempt(&mut self, _process: ProcessId, _kernel: &mut Kernel) {
        // Non-preemptive: unreachable in practice.
    }

    fn on_expire(&mut self, _process: ProcessId, _kernel: &mut Kernel) {
        // No time slice: unreachable in practice.
    }

    fn on_evented(&mut self, kernel: &mut Kernel) {
        if let Some(pid) = try_dispatch_tau(kernel, &mut self.ready) {
            let name = kernel.process_name(pid);
            let names = tau_names(&self.ready);
            kernel.trace(format!("{name} was dispatched to the CPU"), names);
        }
    }
}
