//! A round bundled with its random source

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::lifecycle;
use super::state::{GameEvent, RoundState};
use super::tick::{self, Intent};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

/// Owns a [`RoundState`] and the random source used for spawns.
///
/// Any [`Rng`] can be injected; [`Simulation::seeded`] uses PCG32 so runs
/// are reproducible from a seed.
#[derive(Debug, Clone)]
pub struct Simulation<R: Rng = Pcg32> {
    pub state: RoundState,
    rng: R,
}

impl Simulation<Pcg32> {
    pub fn seeded(tuning: Tuning, seed: u64) -> Self {
        log::info!("Simulation created with seed {seed}");
        Self::with_rng(tuning, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(tuning: Tuning, rng: R) -> Self {
        Self {
            state: RoundState::new(tuning),
            rng,
        }
    }

    /// `NotStarted -> Running`; false if the round already started
    pub fn start(&mut self) -> bool {
        lifecycle::start_round(&mut self.state, &mut self.rng)
    }

    /// Fresh round from any phase
    pub fn reset_round(&mut self) {
        lifecycle::reset_round(&mut self.state, &mut self.rng);
    }

    pub fn advance(&mut self, elapsed_ms: f32, intent: Option<Intent>) {
        tick::advance(&mut self.state, &mut self.rng, elapsed_ms, intent);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
