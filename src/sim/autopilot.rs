//! Demo player that drives a round without pointer input

use super::state::{PlantHealth, RoundState};
use super::tick::Intent;

/// Horizontal slack before the autopilot considers itself under a plant
const ALIGN_TOLERANCE: f32 = 8.0;

/// Plants above this thirst are left alone
const WATER_BELOW_THIRST: f32 = 80.0;

/// Extra height the throw aims above the plant centre
const APEX_MARGIN: f32 = 10.0;

/// Simple scripted player: super throw when it helps, chase falling orbs,
/// otherwise water the thirstiest plant.
#[derive(Debug, Clone)]
pub struct Autopilot {
    pub throw_cooldown_ms: f32,
    cooldown_ms: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            throw_cooldown_ms: 600.0,
            cooldown_ms: 0.0,
        }
    }
}

impl Autopilot {
    /// Pick at most one intent for the coming frame
    pub fn decide(&mut self, state: &RoundState, elapsed_ms: f32) -> Option<Intent> {
        if !state.is_running() {
            return None;
        }
        self.cooldown_ms = (self.cooldown_ms - elapsed_ms.max(0.0)).max(0.0);
        let player = &state.player;

        if state.super_ready
            && self.cooldown_ms == 0.0
            && state.plants.iter().any(|p| p.health != PlantHealth::Healthy)
        {
            self.cooldown_ms = self.throw_cooldown_ms;
            return Some(Intent::Throw { dx: 0.0, dy: -100.0 });
        }

        // Chase the orb while it can still be caught
        if let Some(orb) = &state.orb {
            if orb.pos.y <= player.y + player.height {
                return self.walk_to(state, orb.pos.x);
            }
        }

        let target = state
            .alive_plants()
            .filter(|p| p.thirst < WATER_BELOW_THIRST)
            .min_by(|a, b| {
                a.thirst
                    .partial_cmp(&b.thirst)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;

        if (player.x - target.pos.x).abs() > ALIGN_TOLERANCE {
            return self.walk_to(state, target.pos.x);
        }
        if self.cooldown_ms > 0.0 {
            return None;
        }

        // Aim the apex just above the plant centre: v = sqrt(2 g h)
        let rise = (player.y - target.pos.y + APEX_MARGIN).max(APEX_MARGIN);
        let vy = -(2.0 * state.tuning.drop_gravity.max(0.0) * rise).sqrt();
        self.cooldown_ms = self.throw_cooldown_ms;
        Some(Intent::Throw {
            dx: 0.0,
            dy: vy * state.tuning.throw_scale_y,
        })
    }

    fn walk_to(&self, state: &RoundState, x: f32) -> Option<Intent> {
        let (lo, hi) = state.tuning.player_x_bounds();
        let x = x.clamp(lo, hi);
        match state.player.target_x {
            Some(current) if (current - x).abs() < 0.5 => None,
            _ => Some(Intent::MoveTo(x)),
        }
    }
}
