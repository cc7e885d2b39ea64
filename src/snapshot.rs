//! Read-only view of a round for the presentation layer
//!
//! Captured after `advance` returns; holds no references into the round.

use serde::{Deserialize, Serialize};

use crate::sim::state::{
    EndReason, Facing, Orb, Particle, ParticleKind, Plant, PlantHealth, Player, RoundPhase,
    RoundState, WaterDrop,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub facing: Facing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub thirst: f32,
    pub alive: bool,
    pub health: PlantHealth,
    pub grow: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropView {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub kind: ParticleKind,
}

/// Values the HUD and sky backdrop are drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    /// 0 at dawn, 1 at nightfall
    pub day_progress: f32,
    /// Mean thirst over all plants (0 when there are none)
    pub average_thirst: f32,
    pub sky_rgb: [u8; 3],
    /// Horizontal position of the sun crossing the sky
    pub sun_x: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RoundPhase,
    pub end_reason: Option<EndReason>,
    pub field_width: f32,
    pub field_height: f32,
    pub score: u32,
    pub time_left: f32,
    pub sunlight: f32,
    pub super_ready: bool,
    pub player: PlayerView,
    pub plants: Vec<PlantView>,
    pub drops: Vec<DropView>,
    pub orb: Option<OrbView>,
    pub particles: Vec<ParticleView>,
    pub hud: HudView,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            x: p.x,
            y: p.y,
            width: p.width,
            height: p.height,
            facing: p.facing,
        }
    }
}

impl From<&Plant> for PlantView {
    fn from(p: &Plant) -> Self {
        Self {
            id: p.id,
            x: p.pos.x,
            y: p.pos.y,
            width: p.size.x,
            height: p.size.y,
            thirst: p.thirst,
            alive: p.is_alive(),
            health: p.health,
            grow: p.grow,
        }
    }
}

impl From<&WaterDrop> for DropView {
    fn from(d: &WaterDrop) -> Self {
        Self {
            x: d.pos.x,
            y: d.pos.y,
        }
    }
}

impl From<&Orb> for OrbView {
    fn from(o: &Orb) -> Self {
        Self {
            x: o.pos.x,
            y: o.pos.y,
            radius: o.radius,
        }
    }
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            alpha: p.alpha(),
            kind: p.kind,
        }
    }
}

impl Snapshot {
    pub fn capture(state: &RoundState) -> Self {
        Self {
            phase: state.phase,
            end_reason: state.end_reason,
            field_width: state.tuning.field_width,
            field_height: state.tuning.field_height,
            score: state.score,
            time_left: state.time_left,
            sunlight: state.sunlight,
            super_ready: state.super_ready,
            player: PlayerView::from(&state.player),
            plants: state.plants.iter().map(PlantView::from).collect(),
            drops: state.drops.iter().map(DropView::from).collect(),
            orb: state.orb.as_ref().map(OrbView::from),
            particles: state.particles.iter().map(ParticleView::from).collect(),
            hud: HudView::compute(state),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl HudView {
    fn compute(state: &RoundState) -> Self {
        let t = day_progress(state.time_left, state.tuning.round_duration_secs);
        let width = state.tuning.field_width;
        Self {
            day_progress: t,
            average_thirst: average_thirst(&state.plants),
            sky_rgb: sky_color(t),
            sun_x: width - 100.0 - t * (width - 200.0),
        }
    }
}

/// Fraction of the day gone, clamped to [0, 1]
pub fn day_progress(time_left: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (1.0 - time_left / duration).clamp(0.0, 1.0)
}

pub fn average_thirst(plants: &[Plant]) -> f32 {
    if plants.is_empty() {
        return 0.0;
    }
    plants.iter().map(|p| p.thirst).sum::<f32>() / plants.len() as f32
}

/// Daylight blue fading toward dusk as the day progresses
pub fn sky_color(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let channel = |from: f32, drop: f32| (from - drop * t).round().clamp(0.0, 255.0) as u8;
    [channel(200.0, 100.0), channel(230.0, 80.0), channel(255.0, 200.0)]
}
