//! Round lifecycle: start, reset and plant layout

use glam::Vec2;
use rand::Rng;

use super::state::{Plant, Player, RoundPhase, RoundState};
use crate::consts::{PLANT_PLACEMENT_ATTEMPTS, PLANT_PLACEMENT_PADDING};
use crate::tuning::Tuning;

/// Uniform draw in `[lo, hi)`, or `lo` when the range is empty
pub(crate) fn uniform<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Begin the first round. Only valid from `NotStarted`; returns whether the
/// round was started.
pub fn start_round<R: Rng>(state: &mut RoundState, rng: &mut R) -> bool {
    if state.phase != RoundPhase::NotStarted {
        log::debug!("start_round ignored in phase {:?}", state.phase);
        return false;
    }
    reset_round(state, rng);
    true
}

/// Throw away the current round and begin a fresh one. Valid from any phase
/// and the only way out of `Ended`.
pub fn reset_round<R: Rng>(state: &mut RoundState, rng: &mut R) {
    state.score = 0;
    state.time_left = state.tuning.round_duration_secs;
    state.sunlight = 0.0;
    state.super_ready = false;
    state.drops.clear();
    state.particles.clear();
    state.orb = None;
    state.orb_cooldown_ms = 0.0;
    state.end_reason = None;
    state.player = Player::centered(&state.tuning);
    state.drain_events();

    spawn_plants(state, rng);

    state.phase = RoundPhase::Running;
    log::info!(
        "Round started: {} plants, {:.0}s until nightfall",
        state.plants.len(),
        state.time_left
    );
}

/// Replace the garden with a fresh batch of plants
pub fn spawn_plants<R: Rng>(state: &mut RoundState, rng: &mut R) {
    let tuning = state.tuning.clone();
    let (min, max) = if tuning.plant_count_min <= tuning.plant_count_max {
        (tuning.plant_count_min, tuning.plant_count_max)
    } else {
        (tuning.plant_count_max, tuning.plant_count_min)
    };
    let count = rng.random_range(min..=max);
    let size = Vec2::new(tuning.plant_width, tuning.plant_height);

    state.plants.clear();
    for _ in 0..count {
        let pos = place_plant(&tuning, &state.plants, rng);
        let id = state.next_entity_id();
        state.plants.push(Plant::new(id, pos, size));
    }
}

/// Pick a spot in the middle band, retrying a few times to avoid overlapping
/// earlier plants. The last attempt is kept if every one overlaps.
fn place_plant<R: Rng>(tuning: &Tuning, placed: &[Plant], rng: &mut R) -> Vec2 {
    let (x_lo, x_hi) = tuning.plant_x_range();
    let (y_lo, y_hi) = tuning.plant_band();
    let size = Vec2::new(tuning.plant_width, tuning.plant_height);

    let mut pos = Vec2::ZERO;
    for _ in 0..PLANT_PLACEMENT_ATTEMPTS {
        pos = Vec2::new(uniform(rng, x_lo, x_hi), uniform(rng, y_lo, y_hi));
        let clear = placed.iter().all(|other| !boxes_overlap(pos, size, other.pos, other.size));
        if clear {
            return pos;
        }
    }
    pos
}

fn boxes_overlap(a: Vec2, a_size: Vec2, b: Vec2, b_size: Vec2) -> bool {
    let reach = (a_size + b_size) / 2.0 + Vec2::splat(PLANT_PLACEMENT_PADDING);
    let d = (a - b).abs();
    d.x < reach.x && d.y < reach.y
}
