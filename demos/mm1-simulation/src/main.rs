use anyhow::Context;
use mm1queue::{run_trials, QueueLengthProcess, SimulationConfig, TrialReport};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // optional JSON config path as the only argument
    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        None => SimulationConfig::default(),
    };
    config.validate()?;
    info!(?config, "starting simulation");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut process = QueueLengthProcess::buffered(config.process, config.capacity)?;
    for _ in 0..config.steps {
        match process.advance(&mut rng) {
            Ok(_) => {
                if let Some(queue) = process.queue() {
                    println!("{queue}");
                }
            }
            Err(err) => {
                warn!(step = process.step_count(), "{err}");
                println!("OVERFLOW!");
                break;
            }
        }
    }
    let counters = process.counters();
    info!(
        steps = process.step_count(),
        arrivals = counters.arrivals,
        departures = counters.departures,
        evicted = counters.evicted,
        mean_wait = ?process.mean_wait(),
        "buffer-backed run finished"
    );

    let summaries = run_trials(&config.process, config.steps, config.trials, config.seed)?;
    let report = TrialReport::from_summaries(&summaries);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
