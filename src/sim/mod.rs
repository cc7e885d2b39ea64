//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is an input, never read from a clock
//! - Injected RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod engine;
pub mod lifecycle;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{ScoreEvent, drop_hits_plant, orb_caught, orb_missed, score_for};
pub use engine::Simulation;
pub use lifecycle::{reset_round, start_round};
pub use state::{
    EffectKind, EndReason, Facing, GameEvent, Orb, Particle, ParticleKind, Plant, PlantHealth,
    Player, RoundPhase, RoundState, WaterDrop,
};
pub use tick::{Intent, advance};
