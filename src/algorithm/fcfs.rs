//! First-Come First-Served: a plain FIFO ready queue, no preemption.

use std::collections::VecDeque;

use super::common::{begin_cpu_run, fifo_names, try_dispatch_fifo};
use super::Policy;
use crate::event::Kind;
use crate::process::ProcessId;
use crate::sim::Kernel;

#[derive(Default)]
pub struct Fcfs {
    pub(super) ready: VecDeque<ProcessId>,
}

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn on_arrival(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.processes[process].start_wait_ms = kernel.time_ms;
        kernel.processes[process].start_ta_ms = kernel.time_ms;
        self.ready.push_back(process);

        let name = kernel.process_name(process);
        let names = fifo_names(kernel, &self.ready);
        kernel.trace(format!("{name} arrived and joined the ready queue"), names);
    }

    fn on_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let cpu_left = begin_cpu_run(kernel, process);
        kernel.add_event(Kind::FinishCpu, process, cpu_left);

        let name = kernel.process_name(process);
        let burst_ms = kernel.processes[process].current_burst().cpu_ms;
        if kernel.processes[process].cpu_done_ms == 0 {
            kernel.trace(
                format!("{name} started a {burst_ms}ms CPU burst"),
                fifo_names(kernel, &self.ready),
            );
        } else {
            kernel.trace(
                format!("{name} resumed with {cpu_left}ms left of its {burst_ms}ms CPU burst"),
                fifo_names(kernel, &self.ready),
            );
        }
    }

    fn on_finish_cpu(&mut self, process: ProcessId, kernel: &mut Kernel) {
        kernel.stop_process();
        let burst_cpu_ms = kernel.processes[process].current_burst().cpu_ms;
        kernel.processes[process].cpu_done_ms = burst_cpu_ms;
        kernel.processes[process].cpu_left_ms = 0;

        let name = kernel.process_name(process);
        if kernel.processes[process].is_last_burst() {
            kernel.trace(format!("{name} terminated"), fifo_names(kernel, &self.ready));
            kernel.add_event(Kind::Exit, process, kernel.params.t_cs_ms / 2);
        } else {
            let bursts_left =
                kernel.processes[process].bursts.len() - kernel.processes[process].current_burst - 1;
            let io_ms = kernel.processes[process].current_burst().io_ms.unwrap();
            let io_done = kernel.time_ms + io_ms + kernel.params.t_cs_ms / 2;

            kernel.add_event(Kind::Io, process, kernel.params.t_cs_ms / 2);
            kernel.trace(
                format!("{name} finished a CPU burst ({bursts_left} burst(s) left)"),
                fifo_names(kernel, &self.ready),
            );
            kernel.trace(
                format!("{name} is switching out to block on I/O until {io_done}ms"),
                fifo_names(kernel, &self.ready),
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

        self.ready.push_back(process);

        let name = kernel.process_name(process);
        let names = fifo_names(kernel, &self.ready);
        kernel.trace(format!("{name} finished I/O and rejoined the ready queue"), names);
    }

    fn on_exit(&mut self, process: ProcessId, kernel: &mut Kernel) {
        let start_ta = kernel.processes[process].start_ta_ms;
        kernel.processes[process].ta_times_ms.push(kernel.time_ms - start_ta);
    }

    fn on_preempt(&mut self, _process: ProcessId, _kernel: &mut Kernel) {
        // FCFS never preempts; this handler is unreachable in practice.
    }

    fn on_expire(&mut self, _process: ProcessId, _kernel: &mut Kernel) {
        // FCFS has no time slice; this handler is unreachable in practice.
    }

    fn on_evented(&mut self, kernel: &mut Kernel) {
        if let Some(pid) = try_dispatch_fifo(kernel, &mut self.ready) {
            let name = kernel.process_name(pid);
            let names = fifo_names(kernel, &self.ready);
            kernel.trace(format!("{name} was dispatched to the CPU"), names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Bound, Burst, Process};
    use crate::sim::{NullTracer, SimParams};

    fn kernel() -> Kernel {
        let params = SimParams { t_cs_ms: 4, alpha: 0.5, t_slice_ms: 32 };
        Kernel::new(params, 0.01, Box::new(NullTracer))
    }

    fn push_process(kernel: &mut Kernel, name: char, cpu_ms: u64) -> ProcessId {
        let p = Process::new(
            name,
            0,
            vec![Burst { cpu_ms, io_ms: Some(10) }, Burst { cpu_ms: 20, io_ms: None }],
            Bound::Cpu,
        );
        kernel.processes.push(p);
        kernel.processes.len() - 1
    }

    #[test]
    fn fifo_order_is_preserved_across_arrivals() {
        let mut kernel = kernel();
        let mut fcfs = Fcfs::default();
        let a = push_process(&mut kernel, 'A', 100);
        let b = push_process(&mut kernel, 'B', 50);

        fcfs.on_arrival(a, &mut kernel);
        fcfs.on_arrival(b, &mut kernel);

        assert_eq!(fcfs.ready, VecDeque::from([a, b]));
    }

    #[test]
    fn on_cpu_schedules_finish_cpu_for_remaining_time() {
        let mut kernel = kernel();
        let mut fcfs = Fcfs::default();
        let a = push_process(&mut kernel, 'A', 100);
        fcfs.on_arrival(a, &mut kernel);
        fcfs.on_evented(&mut kernel);

        kernel.time_ms = kernel.params.t_cs_ms / 2;
        fcfs.on_cpu(a, &mut kernel);

        assert_eq!(kernel.current, Some(a));
        assert!(!kernel.switching);
        assert_eq!(kernel.processes[a].wait_times_ms, vec![kernel.time_ms]);
        assert_eq!(kernel.processes[a].context_switches, 1);
    }

    #[test]
    fn finish_cpu_on_last_burst_schedules_exit() {
        let mut kernel = kernel();
        let mut fcfs = Fcfs::default();
        let a = push_process(&mut kernel, 'A', 100);
        kernel.processes[a].current_burst = 1;
        kernel.run_process(a);
        kernel.time_ms = 20;

        fcfs.on_finish_cpu(a, &mut kernel);

        assert_eq!(kernel.current, None);
        assert!(kernel.queue.has_event_at(20 + kernel.params.t_cs_ms / 2));
    }
}
