use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use blockcollide::export::{named_series, write_json};
use blockcollide::{Histogram, ScenarioConfig, Summary};

#[derive(Parser, Debug)]
#[command(version, about = "Run a 1D elastic-collision scenario and summarize tracked bodies")]
struct Args {
    /// Scenario YAML; the built-in reference scenario is used when omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's step count.
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    steps: Option<i64>,

    #[arg(long, default_value_t = 10)]
    position_bins: usize,

    #[arg(long, default_value_t = 100)]
    velocity_bins: usize,

    /// Write the tracked history as JSON to this path.
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn print_histogram(label: &str, h: &Histogram) {
    println!("  {label} histogram ({} bins):", h.bins());
    let last = h.bins().saturating_sub(1);
    for (k, count) in h.counts.iter().enumerate() {
        if *count > 0 {
            // only the last bin includes its right edge
            let close = if k == last { ']' } else { ')' };
            println!(
                "    [{:>10.4}, {:>10.4}{close} {count}",
                h.edges[k],
                h.edges[k + 1]
            );
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = ScenarioConfig::load(args.scenario.as_deref(), args.steps).with_context(|| {
        match &args.scenario {
            Some(path) => format!("failed to load scenario {}", path.display()),
            None => "failed to load reference scenario".to_string(),
        }
    })?;
    let mut sim = cfg.build().context("invalid scenario")?;
    sim.run(cfg.simulation.steps)?;

    println!(
        "{} steps, {} bodies, {} collisions",
        sim.steps_taken(),
        sim.world().len(),
        sim.collisions()
    );

    for series in sim.history().series() {
        let name = cfg.label_for(series.body);
        let positions = series.positions();
        let velocities = series.velocities();
        println!("{name}:");
        for (label, values) in [("position", &positions), ("velocity", &velocities)] {
            if let Some(s) = Summary::from_values(values) {
                println!(
                    "  {label}: n={} min={:.4} max={:.4} mean={:.4}",
                    s.count, s.min, s.max, s.mean
                );
            }
        }
        print_histogram("position", &Histogram::from_values(&positions, args.position_bins, None)?);
        print_histogram("velocity", &Histogram::from_values(&velocities, args.velocity_bins, None)?);
    }

    if let Some(path) = &args.export {
        write_json(path, &named_series(&cfg, sim.history()))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("history written to {}", path.display());
    }

    Ok(())
}
