//! Turns `(seed, λ, threshold, n, n_cpu)` into a deterministic process set.
//!
//! The order of RNG draws below is part of the observable contract (§4.2):
//! one arrival draw, one burst-count draw, then per burst a CPU draw and
//! (for all but the last burst) an I/O draw. Reordering these, even while
//! preserving their individual distributions, changes every downstream
//! process set.

use crate::process::{Bound, Burst, Process};
use crate::rng::Rand48;

const NAMES: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Parameters that fully determine a workload.
#[derive(Clone, Copy, Debug)]
pub struct WorkloadParams {
    pub n_processes: u32,
    pub n_cpu: u32,
    pub seed: i64,
    pub lambda: f64,
    pub threshold: u32,
}

/// Generates `params.n_processes` processes, named `A`, `B`, … in arrival
/// order, the first `n_processes - n_cpu` of which are I/O-bound and the
/// remainder CPU-bound.
pub fn generate(params: &WorkloadParams) -> Vec<Process> {
    let mut rng = Rand48::new(params.seed);
    let n_io = params.n_processes - params.n_cpu;

    let mut processes = Vec::with_capacity(params.n_processes as usize);
    for i in 0..params.n_processes {
        let name = NAMES.as_bytes()[i as usize] as char;
        let bound = if i >= n_io { Bound::Cpu } else { Bound::Io };

        let arrival_ms = rng.next_exp(params.lambda, params.threshold).floor() as u64;
        let n_bursts = (64.0 * rng.drand()).ceil() as u32;

        let mut bursts = Vec::with_capacity(n_bursts as usize);
        for j in 0..n_bursts {
            let mut cpu_ms = rng.next_exp(params.lambda, params.threshold).ceil() as u64;

            let io_ms = if j < n_bursts - 1 {
                let mut io = 10 * rng.next_exp(params.lambda, params.threshold).ceil() as u64;
                if bound == Bound::Cpu {
                    io /= 8;
                }
                Some(io)
            } else {
                None
            };

            if bound == Bound::Cpu {
                cpu_ms *= 4;
            }

            bursts.push(Burst { cpu_ms, io_ms });
        }

        processes.push(Process::new(name, arrival_ms, bursts, bound));
    }

    processes
}
