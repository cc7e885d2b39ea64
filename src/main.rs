//! Sunsplash entry point
//!
//! Native builds run headless rounds driven by the autopilot and print a
//! JSON summary per round. The browser build starts from `web::wasm_start`.
//!
//! Example:
//!   cargo run -- --seed 7 --rounds 3 --duration 60 --tuning tuning.json

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use serde::Serialize;

    use sunsplash::sim::{Autopilot, EndReason, GameEvent, RoundPhase, Simulation};
    use sunsplash::snapshot::Snapshot;
    use sunsplash::tuning::Tuning;

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run headless Sunsplash rounds", long_about = None)]
    struct Args {
        /// Seed for plant placement and orb spawns
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Round length in seconds (overrides the tuning file)
        #[arg(long)]
        duration: Option<f32>,
        /// JSON tuning file; missing keys keep their defaults
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Simulated frame length in milliseconds
        #[arg(long, default_value_t = 1000.0 / 60.0)]
        frame_ms: f32,
        #[arg(long, default_value_t = 1)]
        rounds: u32,
    }

    #[derive(Serialize)]
    struct RoundSummary {
        round: u32,
        seed: u64,
        phase: RoundPhase,
        end_reason: Option<EndReason>,
        score: u32,
        time_left: f32,
        sunlight: f32,
        super_ready: bool,
        plants: usize,
        plants_alive: usize,
        average_thirst: f32,
        frames: u64,
    }

    impl RoundSummary {
        fn new(round: u32, seed: u64, frames: u64, snap: &Snapshot) -> Self {
            Self {
                round,
                seed,
                phase: snap.phase,
                end_reason: snap.end_reason,
                score: snap.score,
                time_left: snap.time_left,
                sunlight: snap.sunlight,
                super_ready: snap.super_ready,
                plants: snap.plants.len(),
                plants_alive: snap.plants.iter().filter(|p| p.alive).count(),
                average_thirst: snap.hud.average_thirst,
                frames,
            }
        }
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        if !(args.frame_ms.is_finite() && args.frame_ms > 0.0) {
            anyhow::bail!("--frame-ms must be positive, got {}", args.frame_ms);
        }

        let mut tuning = match &args.tuning {
            Some(path) => Tuning::load_from_file(path)?,
            None => Tuning::default(),
        };
        if let Some(secs) = args.duration {
            tuning.round_duration_secs = secs;
        }
        for warning in tuning.validate() {
            log::warn!("Tuning: {warning}");
        }

        let mut sim = Simulation::seeded(tuning, args.seed);
        for round in 1..=args.rounds {
            if round == 1 {
                sim.start();
            } else {
                sim.reset_round();
            }
            let frames = play_round(&mut sim, args.frame_ms);
            let summary = RoundSummary::new(round, args.seed, frames, &sim.snapshot());
            let json = serde_json::to_string(&summary).context("serialize round summary")?;
            println!("{json}");
        }
        Ok(())
    }

    fn play_round(sim: &mut Simulation, frame_ms: f32) -> u64 {
        let mut pilot = Autopilot::default();
        let mut frames = 0;
        while sim.state.is_running() {
            let intent = pilot.decide(&sim.state, frame_ms);
            sim.advance(frame_ms, intent);
            frames += 1;
            for event in sim.drain_events() {
                log_event(&event);
            }
        }
        frames
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::RoundEnded { reason, score } => {
                log::info!("Round over ({reason:?}), score {score}");
            }
            GameEvent::PlantDied { id } => log::info!("Plant {id} died"),
            other => log::debug!("{other:?}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Sunsplash (native) starting...");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
