//! A deterministic discrete-event simulator of single-CPU process
//! scheduling: FCFS, SJF, SRT, and Round Robin over a synthetic workload
//! drawn from a bit-exact reimplementation of POSIX `drand48`.
//!
//! The library half of this crate (this module tree) is independent of
//! the `simulator` binary: it has no notion of stdout, environment
//! variables, or command-line arguments. Given a seed and a set of
//! parameters, [`sim::Kernel::run`] always produces byte-identical
//! [`stats::Stats`] — that determinism is the whole point.
//!
//! ## Example
//!
//! ```rust
//! use cpusim::algorithm::Fcfs;
//! use cpusim::sim::{Kernel, NullTracer, SimParams};
//! use cpusim::workload::WorkloadParams;
//!
//! let params = SimParams { t_cs_ms: 8, alpha: 0.5, t_slice_ms: 64 };
//! let workload = WorkloadParams { n_processes: 6, n_cpu: 2, seed: 42, lambda: 0.01, threshold: 3000 };
//!
//! let mut kernel = Kernel::new(params, workload.lambda, Box::new(NullTracer));
//! let mut fcfs = Fcfs::default();
//! let stats = kernel.run(&mut fcfs, &workload);
//! println!("CPU utilization: {}%", stats.cpu_utilization_pct);
//! ```

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod event;
pub mod process;
pub mod rng;
pub mod sim;
pub mod stats;
pub mod workload;
