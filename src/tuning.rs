//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults are the shipped
//! balance; a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Gameplay constants for one round.
///
/// Distances are pixels, speeds are pixels per reference frame (1/60 s),
/// durations are milliseconds unless the name says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom of the field to the player's top edge
    pub player_bottom_offset: f32,
    /// Fraction of the remaining distance to `target_x` covered per frame
    pub player_ease: f32,
    /// How long the player faces the camera after a throw
    pub front_facing_ms: f32,

    // === Water drops ===
    /// Gesture dx is divided by this to get the drop's x velocity
    pub throw_scale_x: f32,
    /// Gesture dy is divided by this to get the drop's y velocity
    pub throw_scale_y: f32,
    pub drop_gravity: f32,
    pub drop_life_ms: f32,
    /// How far outside the field a drop may travel before it is removed
    pub drop_field_margin: f32,

    // === Plants ===
    pub plant_width: f32,
    pub plant_height: f32,
    pub plant_count_min: u32,
    pub plant_count_max: u32,
    /// Vertical spawn band for plant centres, as fractions of field height
    pub plant_band_top: f32,
    pub plant_band_bottom: f32,
    pub thirst_decay_per_sec: f32,
    /// Plants at or below this thirst are wilting
    pub wilt_threshold: f32,
    /// Thirst a plant is set to when a drop hits it
    pub refill_thirst: f32,
    pub grow_decay_per_sec: f32,

    // === Sunlight orbs ===
    pub orb_radius: f32,
    pub orb_fall_speed: f32,
    pub orb_spawn_interval_ms: f32,
    pub orb_catch_radius: f32,
    pub sunlight_per_orb: f32,
    /// Thirst taken from every alive plant when an orb is missed
    pub orb_miss_penalty: f32,

    // === Scoring ===
    pub hit_score: u32,
    pub super_throw_bonus: u32,

    // === Round ===
    pub round_duration_secs: f32,
    pub end_when_all_plants_dead: bool,
    /// Longest slice of time simulated in one physics sub-step
    pub max_substep_ms: f32,

    // === Particles ===
    pub particle_gravity: f32,
    pub particle_life_secs: f32,
    pub hit_particles: u32,
    pub catch_particles: u32,
    pub super_particles_per_plant: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            player_width: 80.0,
            player_height: 100.0,
            player_bottom_offset: 150.0,
            player_ease: 0.2,
            front_facing_ms: 200.0,

            throw_scale_x: 25.0,
            throw_scale_y: 36.0,
            drop_gravity: 0.3,
            drop_life_ms: 3000.0,
            drop_field_margin: 50.0,

            plant_width: 70.0,
            plant_height: 60.0,
            plant_count_min: 4,
            plant_count_max: 5,
            plant_band_top: 0.25,
            plant_band_bottom: 0.6,
            thirst_decay_per_sec: 3.0,
            wilt_threshold: 25.0,
            refill_thirst: 100.0,
            grow_decay_per_sec: 2.0,

            orb_radius: 15.0,
            orb_fall_speed: 2.0,
            orb_spawn_interval_ms: 5000.0,
            // Orb radius plus half the player width
            orb_catch_radius: 55.0,
            sunlight_per_orb: 20.0,
            orb_miss_penalty: 10.0,

            hit_score: 10,
            super_throw_bonus: 50,

            round_duration_secs: 120.0,
            end_when_all_plants_dead: false,
            max_substep_ms: 50.0,

            particle_gravity: 0.1,
            particle_life_secs: 0.8,
            hit_particles: 8,
            catch_particles: 10,
            super_particles_per_plant: 12,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parse tuning JSON")
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read tuning file {}", path.display()))?;
        Self::from_json_str(&data).with_context(|| format!("load tuning from {}", path.display()))
    }

    /// Load from `path`, falling back to defaults. The error (if any) is
    /// returned alongside so the caller can report it.
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(path) {
            Ok(tuning) => (tuning, None),
            Err(e) => (Self::default(), Some(format!("{e:#}"))),
        }
    }

    /// Top edge of the player sprite
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_bottom_offset
    }

    /// Allowed range for the player's centre x
    #[inline]
    pub fn player_x_bounds(&self) -> (f32, f32) {
        let half = self.player_width / 2.0;
        let lo = half.min(self.field_width / 2.0);
        let hi = (self.field_width - half).max(lo);
        (lo, hi)
    }

    /// Vertical range for plant centres
    #[inline]
    pub fn plant_band(&self) -> (f32, f32) {
        let top = self.field_height * self.plant_band_top;
        let bottom = self.field_height * self.plant_band_bottom;
        (top.min(bottom), top.max(bottom))
    }

    /// Horizontal range for plant centres
    #[inline]
    pub fn plant_x_range(&self) -> (f32, f32) {
        let half = self.plant_width / 2.0;
        let lo = half.min(self.field_width / 2.0);
        let hi = (self.field_width - half).max(lo);
        (lo, hi)
    }

    /// Sanity-check the values. Returns human-readable warnings; nothing is
    /// rejected.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.field_width <= 0.0 || self.field_height <= 0.0 {
            w.push("field dimensions must be > 0".into());
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            w.push("player dimensions must be > 0".into());
        }
        if self.player_bottom_offset <= 0.0 || self.player_bottom_offset > self.field_height {
            w.push(format!(
                "player_bottom_offset {} puts the player outside the field",
                self.player_bottom_offset
            ));
        }
        if !(0.0..=1.0).contains(&self.player_ease) || self.player_ease == 0.0 {
            w.push(format!(
                "player_ease {} outside (0, 1]; the player may never move",
                self.player_ease
            ));
        }
        if self.throw_scale_x == 0.0 || self.throw_scale_y == 0.0 {
            w.push("throw scales must be non-zero".into());
        }
        if self.drop_gravity <= 0.0 {
            w.push(format!(
                "drop_gravity {} is not positive; drops will float away",
                self.drop_gravity
            ));
        }
        if self.plant_width <= 0.0 || self.plant_height <= 0.0 {
            w.push("plant dimensions must be > 0".into());
        }
        if self.plant_count_min > self.plant_count_max {
            w.push(format!(
                "plant_count_min ({}) greater than plant_count_max ({})",
                self.plant_count_min, self.plant_count_max
            ));
        }
        if self.plant_count_max == 0 {
            w.push("plant_count_max is 0; nothing will spawn".into());
        }
        if self.plant_band_top > self.plant_band_bottom {
            w.push("plant band top is below its bottom".into());
        }
        for (label, value) in [
            ("wilt_threshold", self.wilt_threshold),
            ("refill_thirst", self.refill_thirst),
            ("orb_miss_penalty", self.orb_miss_penalty),
            ("sunlight_per_orb", self.sunlight_per_orb),
        ] {
            if !(0.0..=100.0).contains(&value) {
                w.push(format!("{label} {value} outside 0..=100"));
            }
        }
        if self.refill_thirst <= self.wilt_threshold {
            w.push("refill_thirst does not lift plants above the wilt threshold".into());
        }
        if self.orb_spawn_interval_ms <= 0.0 {
            w.push("orb_spawn_interval_ms must be > 0".into());
        }
        if self.round_duration_secs <= 0.0 {
            w.push("round_duration_secs must be > 0".into());
        }
        if self.max_substep_ms <= 0.0 {
            w.push("max_substep_ms must be > 0".into());
        }
        w
    }
}
