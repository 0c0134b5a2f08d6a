//! Per-algorithm statistics: CPU utilization, burst/wait/turnaround means,
//! and context-switch/preemption counts, each split by CPU-bound vs
//! I/O-bound where §4.6 calls for it.

use crate::process::{Bound, Process};

/// A mean reported three ways: across all processes, and split by bound.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Split {
    pub overall: f64,
    pub cpu_bound: f64,
    pub io_bound: f64,
}

/// A count reported three ways: total, and split by bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CountSplit {
    pub total: u64,
    pub cpu_bound: u64,
    pub io_bound: u64,
}

/// The full per-algorithm summary written into one `simout.txt` block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    pub cpu_utilization_pct: f64,
    pub avg_cpu_burst_ms: Split,
    pub avg_wait_ms: Split,
    pub avg_turnaround_ms: Split,
    pub context_switches: CountSplit,
    pub preemptions: CountSplit,
}

/// Ceils `x` to three decimal places (`ceil(1000x)/1000`), per §4.6 — means
/// in this system are never rounded, only ceiled.
fn ceil3(x: f64) -> f64 {
    if x.is_finite() {
        (x * 1000.0).ceil() / 1000.0
    } else {
        0.0
    }
}

fn mean_u64(xs: &[u64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<u64>() as f64 / xs.len() as f64
    }
}

fn split_mean<'a>(processes: &'a [Process], pick: impl Fn(&'a Process) -> &'a [u64]) -> Split {
    let mut all = Vec::new();
    let mut cpu = Vec::new();
    let mut io = Vec::new();
    for p in processes {
        let xs = pick(p);
        all.extend_from_slice(xs);
        match p.bound {
            Bound::Cpu => cpu.extend_from_slice(xs),
            Bound::Io => io.extend_from_slice(xs),
        }
    }
    Split {
        overall: ceil3(mean_u64(&all)),
        cpu_bound: ceil3(mean_u64(&cpu)),
        io_bound: ceil3(mean_u64(&io)),
    }
}

fn split_count(processes: &[Process], pick: impl Fn(&Process) -> u64) -> CountSplit {
    let mut total = 0;
    let mut cpu = 0;
    let mut io = 0;
    for p in processes {
        let v = pick(p);
        total += v;
        match p.bound {
            Bound::Cpu => cpu += v,
            Bound::Io => io += v,
        }
    }
    CountSplit { total, cpu_bound: cpu, io_bound: io }
}

/// Computes the aggregate [`Stats`] for one completed (or runaway-capped)
/// simulation run.
pub fn aggregate(processes: &[Process], cpu_time_ms: u64, total_time_ms: u64) -> Stats {
    let cpu_utilization_pct = if total_time_ms == 0 {
        0.0
    } else {
        ceil3(100.0 * cpu_time_ms as f64 / total_time_ms as f64)
    };

    let avg_cpu_burst_ms = {
        // Bursts don't live behind a Vec<u64> on Process, so gather per-call.
        let bursts: Vec<Vec<u64>> = processes
            .iter()
            .map(|p| p.bursts.iter().map(|b| b.cpu_ms).collect())
            .collect();
        let mut all = Vec::new();
        let mut cpu = Vec::new();
        let mut io = Vec::new();
        for (p, xs) in processes.iter().zip(bursts.iter()) {
            all.extend_from_slice(xs);
            match p.bound {
                Bound::Cpu => cpu.extend_from_slice(xs),
                Bound::Io => io.extend_from_slice(xs),
            }
        }
        Split {
            overall: ceil3(mean_u64(&all)),
            cpu_bound: ceil3(mean_u64(&cpu)),
            io_bound: ceil3(mean_u64(&io)),
        }
    };

    let avg_wait_ms = split_mean(processes, |p| &p.wait_times_ms);
    let avg_turnaround_ms = split_mean(processes, |p| &p.ta_times_ms);
    let context_switches = split_count(processes, |p| p.context_switches);
    let preemptions = split_count(processes, |p| p.preemptions);

    Stats {
        cpu_utilization_pct,
        avg_cpu_burst_ms,
        avg_wait_ms,
        avg_turnaround_ms,
        context_switches,
        preemptions,
    }
}

/// Renders one `Algorithm <name>` block in the exact grammar of §6.
pub fn render_block(algorithm_name: &str, stats: &Stats) -> String {
    format!(
        "Algorithm {name}\n\
         -- CPU utilization: {util:.3}%\n\
         -- average CPU burst time: {burst_all:.3} ms ({burst_cpu:.3} ms/{burst_io:.3} ms)\n\
         -- average wait time: {wait_all:.3} ms ({wait_cpu:.3} ms/{wait_io:.3} ms)\n\
         -- average turnaround time: {ta_all:.3} ms ({ta_cpu:.3} ms/{ta_io:.3} ms)\n\
         -- number of context switches: {cs_all} ({cs_cpu}/{cs_io})\n\
         -- number of preemptions: {pre_all} ({pre_cpu}/{pre_io})\n",
        name = algorithm_name,
        util = stats.cpu_utilization_pct,
        burst_all = stats.avg_cpu_burst_ms.overall,
        burst_cpu = stats.avg_cpu_burst_ms.cpu_bound,
        burst_io = stats.avg_cpu_burst_ms.io_bound,
        wait_all = stats.avg_wait_ms.overall,
        wait_cpu = stats.avg_wait_ms.cpu_bound,
        wait_io = stats.avg_wait_ms.io_bound,
        ta_all = stats.avg_turnaround_ms.overall,
        ta_cpu = stats.avg_turnaround_ms.cpu_bound,
        ta_io = stats.avg_turnaround_ms.io_bound,
        cs_all = stats.context_switches.total,
        cs_cpu = stats.context_switches.cpu_bound,
        cs_io = stats.context_switches.io_bound,
        pre_all = stats.preemptions.total,
        pre_cpu = stats.preemptions.cpu_bound,
        pre_io = stats.preemptions.io_bound,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Burst, Process};

    fn proc(name: char, bound: Bound, cpu_bursts: &[u64], waits: &[u64], tas: &[u64]) -> Process {
        let bursts = cpu_bursts
            .iter()
            .enumerate()
            .map(|(i, &cpu_ms)| Burst {
                cpu_ms,
                io_ms: if i + 1 == cpu_bursts.len() { None } else { Some(10) },
            })
            .collect();
        let mut p = Process::new(name, 0, bursts, bound);
        p.wait_times_ms = waits.to_vec();
        p.ta_times_ms = tas.to_vec();
        p
    }

    #[test]
    fn ceil3_ceils_not_rounds() {
        assert_eq!(ceil3(1.0001), 1.001);
        assert_eq!(ceil3(1.0), 1.0);
        assert_eq!(ceil3(0.0), 0.0);
    }

    #[test]
    fn zero_total_time_gives_zero_utilization() {
        let stats = aggregate(&[], 0, 0);
        assert_eq!(stats.cpu_utilization_pct, 0.0);
    }

    #[test]
    fn utilization_is_ceiled_percentage() {
        let stats = aggregate(&[], 333, 1000);
        assert_eq!(stats.cpu_utilization_pct, 33.3);
    }

    #[test]
    fn split_means_separate_by_bound() {
        let processes = vec![
            proc('A', Bound::Cpu, &[100, 200], &[5], &[50]),
            proc('B', Bound::Io, &[10], &[2], &[20]),
        ];
        let stats = aggregate(&processes, 0, 1);
        assert_eq!(stats.avg_cpu_burst_ms.cpu_bound, 150.0);
        assert_eq!(stats.avg_cpu_burst_ms.io_bound, 10.0);
        assert_eq!(stats.avg_cpu_burst_ms.overall, ceil3((100.0 + 200.0 + 10.0) / 3.0));
    }

    #[test]
    fn split_with_no_io_bound_processes_is_zero_not_nan() {
        let processes = vec![proc('A', Bound::Cpu, &[40], &[], &[])];
        let stats = aggregate(&processes, 0, 1);
        assert_eq!(stats.avg_cpu_burst_ms.io_bound, 0.0);
        assert_eq!(stats.avg_wait_ms.io_bound, 0.0);
    }

    #[test]
    fn render_block_matches_grammar() {
        let stats = Stats {
            cpu_utilization_pct: 50.0,
            avg_cpu_burst_ms: Split { overall: 100.0, cpu_bound: 120.0, io_bound: 80.0 },
            avg_wait_ms: Split { overall: 10.0, cpu_bound: 12.0, io_bound: 8.0 },
            avg_turnaround_ms: Split { overall: 200.0, cpu_bound: 220.0, io_bound: 180.0 },
            context_switches: CountSplit { total: 10, cpu_bound: 6, io_bound: 4 },
            preemptions: CountSplit { total: 2, cpu_bound: 1, io_bound: 1 },
        };
        let block = render_block("FCFS", &stats);
        assert!(block.starts_with("Algorithm FCFS\n"));
        assert!(block.contains("-- CPU utilization: 50.000%\n"));
        assert!(block.contains("-- average CPU burst time: 100.000 ms (120.000 ms/80.000 ms)\n"));
        assert!(block.contains("-- number of context switches: 10 (6/4)\n"));
        assert!(block.contains("-- number of preemptions: 2 (1/1)\n"));
    }
}
