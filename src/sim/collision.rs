//! Collision tests and scoring rules
//!
//! Pure functions only; the tick applies the resulting mutations.

use glam::Vec2;

use super::state::{Orb, Plant, Player, WaterDrop};

/// Events that score points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// A drop watered a plant
    Hit,
    /// A super throw revived the garden
    SuperThrow,
}

/// Points awarded for a scoring event. Catching an orb scores nothing by
/// itself; it only charges the super throw.
pub fn score_for(event: ScoreEvent, hit_score: u32, super_bonus: u32) -> u32 {
    match event {
        ScoreEvent::Hit => hit_score,
        ScoreEvent::SuperThrow => super_bonus,
    }
}

/// Strict point-in-rectangle test against a box centred on `center`
#[inline]
pub fn point_in_box(point: Vec2, center: Vec2, size: Vec2) -> bool {
    let half = size / 2.0;
    point.x > center.x - half.x
        && point.x < center.x + half.x
        && point.y > center.y - half.y
        && point.y < center.y + half.y
}

/// Whether a drop's position lies strictly inside a plant's bounding box
#[inline]
pub fn drop_hits_plant(drop: &WaterDrop, plant: &Plant) -> bool {
    point_in_box(drop.pos, plant.pos, plant.size)
}

/// Index of the first alive plant hit by the drop, in collection order
pub fn first_plant_hit(drop: &WaterDrop, plants: &[Plant]) -> Option<usize> {
    plants
        .iter()
        .position(|plant| plant.is_alive() && drop_hits_plant(drop, plant))
}

/// Whether the orb has reached the player's band while horizontally within
/// `catch_radius` of the player's centre
#[inline]
pub fn orb_caught(orb: &Orb, player: &Player, catch_radius: f32) -> bool {
    let in_band = orb.pos.y >= player.y && orb.pos.y <= player.y + player.height;
    in_band && (orb.pos.x - player.x).abs() < catch_radius
}

/// Whether the orb has fallen fully past the bottom of the field
#[inline]
pub fn orb_missed(orb: &Orb, field_height: f32) -> bool {
    orb.pos.y >= field_height + orb.radius
}

/// Whether a drop has left the play field (or run out of life)
#[inline]
pub fn drop_expired(drop: &WaterDrop, field_width: f32, field_height: f32, margin: f32) -> bool {
    drop.life_ms <= 0.0
        || drop.pos.y > field_height + margin
        || drop.pos.x < -margin
        || drop.pos.x > field_width + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn drop_at(x: f32, y: f32) -> WaterDrop {
        WaterDrop {
            id: 1,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            life_ms: 1000.0,
        }
    }

    fn orb_at(x: f32, y: f32) -> Orb {
        Orb {
            id: 1,
            pos: Vec2::new(x, y),
            radius: 15.0,
            fall_speed: 2.0,
        }
    }

    #[test]
    fn test_drop_hits_plant_inside() {
        let plant = Plant::new(1, Vec2::new(200.0, 200.0), Vec2::new(100.0, 70.0));
        assert!(drop_hits_plant(&drop_at(200.0, 200.0), &plant));
        assert!(drop_hits_plant(&drop_at(151.0, 166.0), &plant));
    }

    #[test]
    fn test_drop_on_edge_misses() {
        let plant = Plant::new(1, Vec2::new(200.0, 200.0), Vec2::new(100.0, 70.0));
        // Edges are exclusive
        assert!(!drop_hits_plant(&drop_at(150.0, 200.0), &plant));
        assert!(!drop_hits_plant(&drop_at(200.0, 235.0), &plant));
        assert!(!drop_hits_plant(&drop_at(300.0, 200.0), &plant));
    }

    #[test]
    fn test_first_plant_hit_skips_dead_and_keeps_order() {
        let mut plants = vec![
            Plant::new(1, Vec2::new(200.0, 200.0), Vec2::new(100.0, 70.0)),
            Plant::new(2, Vec2::new(210.0, 200.0), Vec2::new(100.0, 70.0)),
            Plant::new(3, Vec2::new(220.0, 200.0), Vec2::new(100.0, 70.0)),
        ];
        let drop = drop_at(215.0, 200.0);
        assert_eq!(first_plant_hit(&drop, &plants), Some(0));

        plants[0].set_thirst(0.0, 25.0);
        assert_eq!(first_plant_hit(&drop, &plants), Some(1));
    }

    #[test]
    fn test_orb_caught_requires_band_and_radius() {
        let player = Player::centered(&Tuning::default()); // x=400, y=450, h=100
        assert!(orb_caught(&orb_at(420.0, 460.0), &player, 55.0));
        // Above the band
        assert!(!orb_caught(&orb_at(400.0, 440.0), &player, 55.0));
        // Too far sideways
        assert!(!orb_caught(&orb_at(460.0, 460.0), &player, 55.0));
        // Below the player
        assert!(!orb_caught(&orb_at(400.0, 560.0), &player, 55.0));
    }

    #[test]
    fn test_orb_missed() {
        assert!(!orb_missed(&orb_at(0.0, 600.0), 600.0));
        assert!(orb_missed(&orb_at(0.0, 615.0), 600.0));
    }

    #[test]
    fn test_drop_expired() {
        assert!(!drop_expired(&drop_at(100.0, 100.0), 800.0, 600.0, 50.0));
        assert!(drop_expired(&drop_at(100.0, 651.0), 800.0, 600.0, 50.0));
        assert!(drop_expired(&drop_at(-51.0, 100.0), 800.0, 600.0, 50.0));
        assert!(drop_expired(&drop_at(851.0, 100.0), 800.0, 600.0, 50.0));
        let mut spent = drop_at(100.0, 100.0);
        spent.life_ms = 0.0;
        assert!(drop_expired(&spent, 800.0, 600.0, 50.0));
    }

    #[test]
    fn test_score_table() {
        assert_eq!(score_for(ScoreEvent::Hit, 10, 50), 10);
        assert_eq!(score_for(ScoreEvent::SuperThrow, 10, 50), 50);
    }
}
