//! boids — 3D spatial flocking demo for the rust_flock engine.
//!
//! Generates `POPULATION_TO_GENERATE` boids uniformly in the unit cube
//! centred on the origin, runs the two-layer flocking model and writes CSV
//! output under `output_dir`.
//!
//! ```text
//! boids [config.json]
//! ```
//!
//! Every config field is optional:
//!
//! ```json
//! {
//!   "sim":        { "total_steps": 200, "seed": 7, "output_interval_steps": 20 },
//!   "population": 4096,
//!   "alignment":  "averaged",
//!   "output_dir": "output/boids",
//!   "env":        { "GLOBAL_SCALE": 0.1 }
//! }
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fl_boids::env::POPULATION_TO_GENERATE;
use fl_boids::{
    AGENT_TYPE, AlignmentRule, Boid, FlockStats, build_model, default_environment,
    generate_population,
};
use fl_core::{SimConfig, Step};
use fl_output::{CsvWriter, SimOutputObserver};
use fl_sim::{Populations, SimBuilder, SimObserver, StepStats};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DemoConfig {
    sim:        SimConfig,
    /// Overrides `POPULATION_TO_GENERATE`.
    population: Option<u32>,
    alignment:  AlignmentRule,
    output_dir: PathBuf,
    /// Environment overrides by property name.
    env:        BTreeMap<String, f64>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:        SimConfig {
                total_steps:           100,
                seed:                  42,
                num_threads:           None, // all logical cores
                output_interval_steps: 10,
            },
            population: None,
            alignment:  AlignmentRule::default(),
            output_dir: PathBuf::from("output/boids"),
            env:        BTreeMap::new(),
        }
    }
}

fn load_config() -> Result<DemoConfig> {
    match std::env::args_os().nth(1) {
        None => Ok(DemoConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.to_string_lossy()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.to_string_lossy()))
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Writes CSV output and logs a flock summary at every snapshot.
struct FlockLogger {
    inner: SimOutputObserver<CsvWriter>,
    steps: u64,
}

impl SimObserver<Boid> for FlockLogger {
    fn on_step_start(&mut self, step: Step) {
        SimObserver::<Boid>::on_step_start(&mut self.inner, step);
    }

    fn on_step_end(&mut self, stats: &StepStats) {
        self.steps += 1;
        SimObserver::<Boid>::on_step_end(&mut self.inner, stats);
    }

    fn on_snapshot(&mut self, completed: Step, populations: &Populations<Boid>) {
        if let Some(store) = populations.get(AGENT_TYPE) {
            let s = FlockStats::of(store);
            info!(
                step       = %completed,
                count      = s.count,
                centroid   = %s.centroid,
                mean_speed = s.mean_speed,
                max_speed  = s.max_speed,
                "flock"
            );
        }
        SimObserver::<Boid>::on_snapshot(&mut self.inner, completed, populations);
    }

    fn on_sim_end(&mut self, completed: Step) {
        SimObserver::<Boid>::on_sim_end(&mut self.inner, completed);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    // 1. Configuration.
    let cfg = load_config()?;
    if let Some(n) = cfg.sim.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring the thread pool")?;
    }

    // 2. Environment.
    let mut env = default_environment()?;
    if let Some(n) = cfg.population {
        env.write(POPULATION_TO_GENERATE, n)?;
    }
    env.apply_overrides(cfg.env.iter().map(|(k, v)| (k, *v)))?;

    // 3. Population and model.
    let boids = generate_population(&env, cfg.sim.seed)?;
    info!(stats = ?FlockStats::of(&boids), "initial flock");
    let model = build_model(env, cfg.alignment)?;
    let mut sim = SimBuilder::new(cfg.sim.clone(), model)
        .population(AGENT_TYPE, boids)
        .build()?;

    // 4. Output.
    let writer = CsvWriter::new(&cfg.output_dir)?;
    let mut obs = FlockLogger { inner: SimOutputObserver::new(writer), steps: 0 };

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }

    // 6. Summary.
    let final_stats = sim.population(AGENT_TYPE).map(FlockStats::of).unwrap_or_default();
    info!(
        steps      = obs.steps,
        secs       = elapsed.as_secs_f64(),
        centroid   = %final_stats.centroid,
        mean_speed = final_stats.mean_speed,
        output     = %cfg.output_dir.display(),
        "simulation complete"
    );
    Ok(())
}
