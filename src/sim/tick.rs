//! Variable timestep simulation tick
//!
//! Advances a round by an arbitrary elapsed time. Order within a call:
//! intent, player easing, drops, orb, particles, plant thirst, round timer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{
    ScoreEvent, drop_expired, first_plant_hit, orb_caught, orb_missed, score_for,
};
use super::lifecycle::uniform;
use super::state::{
    EffectKind, EndReason, GameEvent, Orb, Particle, ParticleKind, PlantHealth, RoundPhase,
    RoundState, WaterDrop,
};
use crate::consts::MAX_SUBSTEPS;
use crate::frames_for;

/// Player intent for a single call (at most one per frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// Walk toward this x (clamped to the field)
    MoveTo(f32),
    /// Throw along the gesture vector (screen pixels, up is negative)
    Throw { dx: f32, dy: f32 },
}

/// Advance the round by `elapsed_ms`, applying `intent` first.
///
/// Physics runs in equal sub-steps of at most `max_substep_ms`, capped at
/// `MAX_SUBSTEPS` per call; the round timer consumes the whole elapsed time
/// afterwards. A drop thrown this call is
/// placed at the player and starts moving on the next call.
pub fn advance<R: Rng>(
    state: &mut RoundState,
    rng: &mut R,
    elapsed_ms: f32,
    intent: Option<Intent>,
) {
    // NaN and negative count as no time; infinity as the largest finite gap
    let elapsed_ms = if elapsed_ms.is_nan() { 0.0 } else { elapsed_ms.clamp(0.0, f32::MAX) };

    match state.phase {
        RoundPhase::NotStarted => return,
        RoundPhase::Ended => {
            // Gameplay is frozen; let bursts and the throw pose finish
            state.player.update_facing(elapsed_ms);
            update_particles(state, elapsed_ms);
            return;
        }
        RoundPhase::Running => {}
    }

    let thrown = intent.and_then(|intent| apply_intent(state, rng, intent));

    let (substeps, dt) = substep_plan(elapsed_ms, state.tuning.max_substep_ms);
    for _ in 0..substeps {
        step(state, rng, dt);
    }

    if let Some(drop) = thrown {
        state.drops.push(drop);
    }

    update_timer(state, elapsed_ms);
}

/// Split `elapsed_ms` into equal physics slices of at most `max_substep_ms`.
///
/// At most `MAX_SUBSTEPS` slices run; time beyond that budget is skipped by
/// the physics (the round timer still sees all of it).
fn substep_plan(elapsed_ms: f32, max_substep_ms: f32) -> (u32, f32) {
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        return (0, 0.0);
    }
    let max_substep = max_substep_ms.max(1.0);
    let wanted = (elapsed_ms / max_substep).ceil().max(1.0);
    let substeps = wanted.min(MAX_SUBSTEPS as f32) as u32;
    let simulated = elapsed_ms.min(max_substep * substeps as f32);
    (substeps, simulated / substeps as f32)
}

/// One physics sub-step (steps 2 through 6)
fn step<R: Rng>(state: &mut RoundState, rng: &mut R, dt: f32) {
    let frames = frames_for(dt);

    state.player.ease_toward_target(frames);
    state.player.update_facing(dt);

    update_drops(state, rng, dt, frames);
    update_orb(state, rng, dt, frames);
    update_particles(state, dt);
    update_plants(state, dt);
}

fn apply_intent<R: Rng>(state: &mut RoundState, rng: &mut R, intent: Intent) -> Option<WaterDrop> {
    match intent {
        Intent::MoveTo(x) => {
            let (lo, hi) = state.tuning.player_x_bounds();
            let x = if x.is_nan() { state.player.x } else { x.clamp(lo, hi) };
            state.player.target_x = Some(x);
            None
        }
        Intent::Throw { dx, dy } => {
            state.player.face_front(state.tuning.front_facing_ms);
            if state.super_ready {
                super_throw(state, rng);
                return None;
            }
            let vel = Vec2::new(
                scaled(dx, state.tuning.throw_scale_x),
                scaled(dy, state.tuning.throw_scale_y),
            );
            let drop = WaterDrop {
                id: state.next_entity_id(),
                pos: Vec2::new(state.player.x, state.player.y),
                vel,
                life_ms: state.tuning.drop_life_ms,
            };
            log::debug!("Drop {} thrown with velocity {:?}", drop.id, drop.vel);
            Some(drop)
        }
    }
}

/// Gesture component divided by its scale; zero for degenerate input
#[inline]
fn scaled(value: f32, scale: f32) -> f32 {
    if scale == 0.0 || !value.is_finite() {
        0.0
    } else {
        value / scale
    }
}

/// Revive the whole garden and spend the sunlight meter
fn super_throw<R: Rng>(state: &mut RoundState, rng: &mut R) {
    let per_plant = state.tuning.super_particles_per_plant;
    let life = state.tuning.particle_life_secs * 1.5;
    let mut bloom = Vec::new();
    for plant in &mut state.plants {
        plant.revive();
        bloom.extend(burst(rng, plant.pos, per_plant, ParticleKind::Bloom, 4.0, life));
    }
    state.push_particles(bloom);

    state.sunlight = 0.0;
    state.super_ready = false;
    state.score += score_for(
        ScoreEvent::SuperThrow,
        state.tuning.hit_score,
        state.tuning.super_throw_bonus,
    );
    let at = Vec2::new(state.player.x, state.player.y);
    state.play_effect(EffectKind::SuperSplash, at);
    log::info!("Super throw! {} plants revived", state.plants.len());
}

fn update_drops<R: Rng>(state: &mut RoundState, rng: &mut R, dt: f32, frames: f32) {
    let gravity = state.tuning.drop_gravity;
    for drop in &mut state.drops {
        drop.vel.y += gravity * frames;
        drop.pos += drop.vel * frames;
        drop.life_ms -= dt;
    }

    // Collect hits first, then mutate plants
    let (width, height, margin) = (
        state.tuning.field_width,
        state.tuning.field_height,
        state.tuning.drop_field_margin,
    );
    let mut hits: Vec<(usize, Vec2)> = Vec::new();
    let plants = &state.plants;
    state.drops.retain(|drop| {
        if let Some(index) = first_plant_hit(drop, plants) {
            hits.push((index, drop.pos));
            return false;
        }
        !drop_expired(drop, width, height, margin)
    });

    for (index, at) in hits {
        let refill = state.tuning.refill_thirst;
        set_plant_thirst(state, index, refill);
        state.plants[index].grow = 1.0;
        state.score += score_for(
            ScoreEvent::Hit,
            state.tuning.hit_score,
            state.tuning.super_throw_bonus,
        );
        state.play_effect(EffectKind::Splash, at);
        let splash = burst(
            rng,
            at,
            state.tuning.hit_particles,
            ParticleKind::Splash,
            3.0,
            state.tuning.particle_life_secs,
        );
        state.push_particles(splash);
    }
}

fn update_orb<R: Rng>(state: &mut RoundState, rng: &mut R, dt: f32, frames: f32) {
    state.orb_cooldown_ms += dt;

    if let Some(orb) = state.orb.as_mut() {
        orb.pos.y += orb.fall_speed * frames;
        let at = orb.pos;

        if orb_caught(orb, &state.player, state.tuning.orb_catch_radius) {
            state.orb = None;
            let was_ready = state.super_ready;
            state.add_sunlight(state.tuning.sunlight_per_orb);
            if state.super_ready && !was_ready {
                log::info!("Sunlight meter full - super throw ready");
            }
            state.play_effect(EffectKind::OrbCollect, at);
            let sparkle = burst(
                rng,
                at,
                state.tuning.catch_particles,
                ParticleKind::Sunlight,
                2.5,
                state.tuning.particle_life_secs,
            );
            state.push_particles(sparkle);
        } else if orb_missed(orb, state.tuning.field_height) {
            state.orb = None;
            let penalty = state.tuning.orb_miss_penalty;
            for index in 0..state.plants.len() {
                if state.plants[index].is_alive() {
                    let thirst = state.plants[index].thirst - penalty;
                    set_plant_thirst(state, index, thirst);
                }
            }
            state.emit(GameEvent::OrbMissed);
            log::debug!("Orb missed, plants lose {penalty} thirst");
        }
    }

    if state.orb.is_none() && state.orb_cooldown_ms >= state.tuning.orb_spawn_interval_ms {
        let radius = state.tuning.orb_radius;
        let x = uniform(rng, radius, state.tuning.field_width - radius);
        let orb = Orb {
            id: state.next_entity_id(),
            pos: Vec2::new(x, -radius),
            radius,
            fall_speed: state.tuning.orb_fall_speed,
        };
        state.play_effect(EffectKind::OrbSpawn, orb.pos);
        state.orb = Some(orb);
        state.orb_cooldown_ms = 0.0;
    }
}

fn update_particles(state: &mut RoundState, dt: f32) {
    let frames = frames_for(dt);
    let secs = dt / 1000.0;
    let gravity = state.tuning.particle_gravity;
    for particle in state.particles.iter_mut() {
        particle.vel.y += gravity * frames;
        particle.pos += particle.vel * frames;
        particle.life -= secs;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn update_plants(state: &mut RoundState, dt: f32) {
    let secs = dt / 1000.0;
    let decay = state.tuning.thirst_decay_per_sec * secs;
    let grow_decay = state.tuning.grow_decay_per_sec * secs;
    for index in 0..state.plants.len() {
        if state.plants[index].is_alive() {
            let thirst = state.plants[index].thirst - decay;
            set_plant_thirst(state, index, thirst);
        }
        state.plants[index].decay_grow(grow_decay);
    }
}

fn update_timer(state: &mut RoundState, elapsed_ms: f32) {
    state.time_left -= elapsed_ms / 1000.0;
    if state.time_left <= 0.0 {
        state.time_left = 0.0;
        end_round(state, EndReason::Nightfall);
    } else if state.tuning.end_when_all_plants_dead
        && !state.plants.is_empty()
        && state.alive_plants().next().is_none()
    {
        end_round(state, EndReason::AllPlantsDead);
    }
}

fn end_round(state: &mut RoundState, reason: EndReason) {
    state.phase = RoundPhase::Ended;
    state.end_reason = Some(reason);
    state.emit(GameEvent::RoundEnded {
        reason,
        score: state.score,
    });
    log::info!("Round ended ({:?}) with score {}", reason, state.score);
}

/// Set a plant's thirst and report any health change
fn set_plant_thirst(state: &mut RoundState, index: usize, thirst: f32) {
    let wilt = state.tuning.wilt_threshold;
    let plant = &mut state.plants[index];
    let id = plant.id;
    match plant.set_thirst(thirst, wilt) {
        Some(PlantHealth::Wilting) => state.emit(GameEvent::PlantWilted { id }),
        Some(PlantHealth::Dead) => {
            log::debug!("Plant {id} died of thirst");
            state.emit(GameEvent::PlantDied { id });
        }
        Some(PlantHealth::Healthy) | None => {}
    }
}

/// Radial burst with a slight upward bias
fn burst<R: Rng>(
    rng: &mut R,
    at: Vec2,
    count: u32,
    kind: ParticleKind,
    speed: f32,
    life: f32,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let angle = uniform(rng, 0.0, std::f32::consts::TAU);
            let speed = speed * uniform(rng, 0.5, 1.0);
            let life = life * uniform(rng, 0.75, 1.25);
            Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin() - 0.5) * speed,
                kind,
                life,
                max_life: life,
            }
        })
        .collect()
}
