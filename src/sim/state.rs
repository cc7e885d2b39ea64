//! Round state and core simulation types
//!
//! Everything a round owns lives in [`RoundState`]; nothing is global.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_PARTICLES;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Entities empty, waiting for a start trigger
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Night fell (or every plant died); gameplay frozen until reset
    Ended,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Nightfall,
    AllPlantsDead,
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Back,
    Front,
}

/// The gardener
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Centre x
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
    /// Counts down to the moment the player turns back around
    pub front_facing_remaining_ms: f32,
    /// Where the player is easing toward
    pub target_x: Option<f32>,
    pub ease: f32,
}

impl Player {
    /// A player standing in the middle of the field
    pub fn centered(tuning: &Tuning) -> Self {
        let x = tuning.field_width / 2.0;
        Self {
            x,
            y: tuning.player_y(),
            width: tuning.player_width,
            height: tuning.player_height,
            facing: Facing::Back,
            front_facing_remaining_ms: 0.0,
            target_x: None,
            ease: tuning.player_ease,
        }
    }

    /// Point the player at the camera for `duration_ms`
    pub fn face_front(&mut self, duration_ms: f32) {
        self.facing = Facing::Front;
        self.front_facing_remaining_ms = duration_ms.max(0.0);
    }

    /// Count down the front-facing timer
    pub fn update_facing(&mut self, elapsed_ms: f32) {
        if self.facing == Facing::Front {
            self.front_facing_remaining_ms -= elapsed_ms;
            if self.front_facing_remaining_ms <= 0.0 {
                self.front_facing_remaining_ms = 0.0;
                self.facing = Facing::Back;
            }
        }
    }

    /// Move toward `target_x` with the frame-normalized ease factor
    pub fn ease_toward_target(&mut self, frames: f32) {
        if let Some(target) = self.target_x {
            let t = crate::ease_blend(self.ease, frames);
            self.x += (target - self.x) * t;
            if (target - self.x).abs() < 0.01 {
                self.x = target;
            }
        }
    }
}

/// Plant health derived from thirst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlantHealth {
    Healthy,
    /// Thirsty but still revivable with a single drop
    Wilting,
    /// Thirst reached zero; only a super throw brings it back
    Dead,
}

/// A potted plant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: u32,
    /// Centre of the bounding box
    pub pos: Vec2,
    pub size: Vec2,
    /// 0 (parched) to 100 (fully watered)
    pub thirst: f32,
    pub health: PlantHealth,
    /// Bloom animation progress (1 right after watering, decays to 0)
    pub grow: f32,
}

impl Plant {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            pos,
            size,
            thirst: 100.0,
            health: PlantHealth::Healthy,
            grow: 0.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health != PlantHealth::Dead
    }

    /// Top-left and bottom-right corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = self.size / 2.0;
        (self.pos - half, self.pos + half)
    }

    /// Set thirst (clamped to [0, 100]) and update health.
    ///
    /// Dead plants stay dead; use [`Plant::revive`] to bring them back.
    /// Returns the new health if it changed.
    pub fn set_thirst(&mut self, thirst: f32, wilt_threshold: f32) -> Option<PlantHealth> {
        if !self.is_alive() {
            return None;
        }
        self.thirst = thirst.clamp(0.0, 100.0);
        let health = if self.thirst <= 0.0 {
            PlantHealth::Dead
        } else if self.thirst <= wilt_threshold {
            PlantHealth::Wilting
        } else {
            PlantHealth::Healthy
        };
        if health != self.health {
            self.health = health;
            Some(health)
        } else {
            None
        }
    }

    /// Full water and bloom, regardless of current health
    pub fn revive(&mut self) {
        self.thirst = 100.0;
        self.health = PlantHealth::Healthy;
        self.grow = 1.0;
    }

    /// Decay the bloom animation
    pub fn decay_grow(&mut self, amount: f32) {
        if self.grow > 0.0 {
            self.grow = (self.grow - amount).max(0.0);
        }
    }
}

/// A thrown water drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterDrop {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    /// Remaining time to live (ms)
    pub life_ms: f32,
}

/// A falling sunlight orb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per reference frame
    pub fall_speed: f32,
}

/// What spawned a particle (for color lookup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Splash,
    Sunlight,
    Bloom,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Seconds remaining
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// 1 when fresh, 0 when expired
    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Sound cues the presentation layer may play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    Splash,
    SuperSplash,
    OrbSpawn,
    OrbCollect,
}

/// Fire-and-forget notifications produced by a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PlayEffect { kind: EffectKind, x: f32, y: f32 },
    PlantWilted { id: u32 },
    PlantDied { id: u32 },
    OrbMissed,
    RoundEnded { reason: EndReason, score: u32 },
}

/// Complete round state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub tuning: Tuning,
    pub phase: RoundPhase,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    /// Seconds until nightfall
    pub time_left: f32,
    /// 0 to 100
    pub sunlight: f32,
    pub super_ready: bool,
    pub player: Player,
    /// Sorted by id
    pub plants: Vec<Plant>,
    /// Sorted by id
    pub drops: Vec<WaterDrop>,
    /// At most one live orb
    pub orb: Option<Orb>,
    /// Time since the last orb spawn (or round start)
    pub orb_cooldown_ms: f32,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Pending events for the presentation layer
    #[serde(skip)]
    events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl RoundState {
    /// A round that has not started yet
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::centered(&tuning);
        Self {
            time_left: tuning.round_duration_secs,
            tuning,
            phase: RoundPhase::NotStarted,
            end_reason: None,
            score: 0,
            sunlight: 0.0,
            super_ready: false,
            player,
            plants: Vec::new(),
            drops: Vec::new(),
            orb: None,
            orb_cooldown_ms: 0.0,
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue an event for the presentation layer
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play_effect(&mut self, kind: EffectKind, at: Vec2) {
        self.emit(GameEvent::PlayEffect {
            kind,
            x: at.x,
            y: at.y,
        });
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add particles, dropping any beyond the cap
    pub fn push_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        self.particles.extend(particles.into_iter().take(room));
    }

    /// Add to the sunlight meter, arming the super throw when it fills
    pub fn add_sunlight(&mut self, amount: f32) {
        self.sunlight = (self.sunlight + amount).clamp(0.0, 100.0);
        if self.sunlight >= 100.0 {
            self.sunlight = 100.0;
            self.super_ready = true;
        }
    }

    pub fn alive_plants(&self) -> impl Iterator<Item = &Plant> {
        self.plants.iter().filter(|p| p.is_alive())
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }
}
