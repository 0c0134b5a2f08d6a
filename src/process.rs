//! Per-process lifecycle state: bursts, timers, and the accounting that
//! feeds the statistics aggregator.

/// A stable index into the workload's process table. The event queue and
/// ready queues hold these instead of owning references.
pub type ProcessId = usize;

/// One (CPU, optional I/O) unit of a process's execution sequence.
///
/// The final burst of a process always has `io == None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Burst {
    pub cpu_ms: u64,
    pub io_ms: Option<u64>,
}

/// Classification fixed at generation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bound {
    Cpu,
    Io,
}

impl Bound {
    pub fn label(self) -> &'static str {
        match self {
            Bound::Cpu => "CPU",
            Bound::Io => "I/O",
        }
    }
}

/// A simulated process: static identity plus the dynamic state the kernel
/// and algorithms mutate as events fire.
#[derive(Clone, Debug)]
pub struct Process {
    pub name: char,
    pub arrival_ms: u64,
    pub bursts: Vec<Burst>,
    pub bound: Bound,

    pub current_burst: usize,
    pub cpu_left_ms: u64,
    pub cpu_done_ms: u64,

    /// Exponential-average estimate of the next CPU burst length. Only
    /// meaningful for SJF/SRT; FCFS/RR never read it.
    pub tau_ms: f64,

    pub start_cpu_ms: u64,
    pub start_wait_ms: u64,
    pub start_ta_ms: u64,

    pub wait_times_ms: Vec<u64>,
    pub ta_times_ms: Vec<u64>,
    pub context_switches: u64,
    pub preemptions: u64,
}

impl Process {
    pub fn new(name: char, arrival_ms: u64, bursts: Vec<Burst>, bound: Bound) -> Self {
        let cpu_left_ms = bursts.first().map(|b| b.cpu_ms).unwrap_or(0);
        Self {
            name,
            arrival_ms,
            bursts,
            bound,
            current_burst: 0,
            cpu_left_ms,
            cpu_done_ms: 0,
            tau_ms: 0.0,
            start_cpu_ms: 0,
            start_wait_ms: 0,
            start_ta_ms: 0,
            wait_times_ms: Vec::new(),
            ta_times_ms: Vec::new(),
            context_switches: 0,
            preemptions: 0,
        }
    }

    pub fn current_burst(&self) -> &Burst {
        &self.bursts[self.current_burst]
    }

    pub fn is_last_burst(&self) -> bool {
        self.current_burst + 1 >= self.bursts.len()
    }

    /// `cpu_left_ms + cpu_done_ms == bursts[current_burst].cpu_ms`, the
    /// invariant that must hold whenever the process is not actively on-CPU.
    pub fn cpu_progress_is_consistent(&self) -> bool {
        self.cpu_left_ms + self.cpu_done_ms == self.current_burst().cpu_ms
    }

    /// Resets the CPU-progress split back to "not yet started" for the
    /// current burst. Used when a fresh burst begins (after I/O, or at
    /// arrival for the first burst).
    pub fn reset_cpu_progress(&mut self) {
        self.cpu_left_ms = self.current_burst().cpu_ms;
        self.cpu_done_ms = 0;
    }

    /// Rolls back in-flight CPU progress after running for `elapsed_ms`
    /// without completing the burst (preemption, or RR expiry).
    pub fn rollback_cpu_progress(&mut self, elapsed_ms: u64) {
        self.cpu_done_ms += elapsed_ms;
        self.cpu_left_ms = self.cpu_left_ms.saturating_sub(elapsed_ms);
    }

    /// Remaining estimated time `tau - cpu_done`, the SRT preemption key.
    pub fn remaining_tau_ms(&self) -> f64 {
        self.tau_ms - self.cpu_done_ms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_process() -> Process {
        Process::new(
            'A',
            0,
            vec![
                Burst { cpu_ms: 100, io_ms: Some(50) },
                Burst { cpu_ms: 80, io_ms: None },
            ],
            Bound::Cpu,
        )
    }

    #[test]
    fn new_seeds_cpu_left_from_first_burst() {
        let p = sample_process();
        assert_eq!(p.cpu_left_ms, 100);
        assert_eq!(p.cpu_done_ms, 0);
        assert!(p.cpu_progress_is_consistent());
    }

    #[test]
    fn is_last_burst_tracks_index() {
        let mut p = sample_process();
        assert!(!p.is_last_burst());
        p.current_burst = 1;
        assert!(p.is_last_burst());
    }

    #[test]
    fn rollback_moves_time_from_left_to_done() {
        let mut p = sample_process();
        p.rollback_cpu_progress(30);
        assert_eq!(p.cpu_done_ms, 30);
        assert_eq!(p.cpu_left_ms, 70);
        assert!(p.cpu_progress_is_consistent());
    }

    #[test]
    fn rollback_never_underflows() {
        let mut p = sample_process();
        p.rollback_cpu_progress(1000);
        assert_eq!(p.cpu_left_ms, 0);
    }

    #[test]
    fn reset_cpu_progress_uses_current_burst() {
        let mut p = sample_process();
        p.current_burst = 1;
        p.reset_cpu_progress();
        assert_eq!(p.cpu_left_ms, 80);
        assert_eq!(p.cpu_done_ms, 0);
    }
}
