//! The `simulator` binary: validates arguments, runs all four scheduling
//! disciplines over the same generated workload, prints the stdout trace,
//! and writes `simout.txt`.

use cpusim::algorithm::{Fcfs, Policy, Rr, Sjf, Srt};
use cpusim::cli::{self, Config, StdoutTracer, ERROR_BANNER};
use cpusim::sim::{Kernel, SimParams};
use cpusim::stats::{render_block, Stats};
use cpusim::workload::WorkloadParams;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    if cli::print_help_if_requested(&argv) {
        return;
    }

    let config = match cli::parse_config(&argv) {
        Ok(config) => config,
        Err(_) => {
            eprintln!("{ERROR_BANNER}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let workload = WorkloadParams {
        n_processes: config.n,
        n_cpu: config.n_cpu,
        seed: config.seed,
        lambda: config.lambda,
        threshold: config.threshold,
    };
    let params = SimParams { t_cs_ms: config.t_cs, alpha: config.alpha, t_slice_ms: config.t_slice };

    let mut blocks = String::new();
    blocks.push_str(&run_algorithm("FCFS", &mut Fcfs::default(), params, &workload));
    blocks.push_str(&run_algorithm("SJF", &mut Sjf::default(), params, &workload));
    blocks.push_str(&run_algorithm("SRT", &mut Srt::default(), params, &workload));
    blocks.push_str(&run_algorithm("RR", &mut Rr::default(), params, &workload));

    cli::write_report(std::path::Path::new("simout.txt"), &blocks)?;
    Ok(())
}

#[tracing::instrument(skip(policy, workload))]
fn run_algorithm(
    label: &str,
    policy: &mut dyn Policy,
    params: SimParams,
    workload: &WorkloadParams,
) -> String {
    let mut kernel = Kernel::new(params, workload.lambda, Box::new(StdoutTracer::new()))
        .with_runaway_limit(cli::RUNAWAY_LIMIT_MS);
    let stats: Stats = kernel.run(policy, workload);
    render_block(label, &stats)
}
