//! Sunsplash - a day-to-night watering arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, scoring, round lifecycle)
//! - `tuning`: Data-driven game balance
//! - `input`: Pointer gesture to player intent translation
//! - `snapshot`: Read-only view of a round for rendering
//! - `audio`: Procedural sound cues for simulation events

pub mod audio;
pub mod input;
pub mod sim;
pub mod snapshot;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Gesture, GestureTracker, translate_gesture};
pub use sim::{Intent, Simulation};
pub use snapshot::Snapshot;
pub use tuning::Tuning;

/// Game configuration constants that are not part of the tunable balance
pub mod consts {
    /// Duration of one reference frame in milliseconds. Per-frame velocities
    /// and accelerations are scaled by `elapsed_ms / REFERENCE_FRAME_MS`.
    pub const REFERENCE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Maximum physics sub-steps per `advance` call; longer gaps are not
    /// simulated beyond this budget
    pub const MAX_SUBSTEPS: u32 = 1200;

    /// Maximum live particles
    pub const MAX_PARTICLES: usize = 256;

    /// Attempts made to find a non-overlapping spot for each plant
    pub const PLANT_PLACEMENT_ATTEMPTS: u32 = 12;

    /// Padding around plant boxes when checking for overlap
    pub const PLANT_PLACEMENT_PADDING: f32 = 10.0;
}

/// Number of reference frames covered by `elapsed_ms`.
///
/// Negative and NaN inputs count as zero elapsed time.
#[inline]
pub fn frames_for(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_nan() || elapsed_ms <= 0.0 {
        0.0
    } else {
        elapsed_ms / consts::REFERENCE_FRAME_MS
    }
}

/// Frame-rate independent exponential blend factor.
///
/// Returns the fraction of the remaining distance covered after `frames`
/// reference frames when `per_frame` of it is covered each frame.
#[inline]
pub fn ease_blend(per_frame: f32, frames: f32) -> f32 {
    let per_frame = per_frame.clamp(0.0, 1.0);
    1.0 - (1.0 - per_frame).powf(frames.max(0.0))
}
