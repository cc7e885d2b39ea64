//! Whole-round behaviour driven through the public API

use glam::Vec2;
use proptest::prelude::*;

use sunsplash::sim::{GameEvent, Intent, Plant, PlantHealth, RoundPhase, Simulation};
use sunsplash::tuning::Tuning;

fn quiet_tuning() -> Tuning {
    Tuning {
        // No orbs unless a test asks for them
        orb_spawn_interval_ms: 1.0e9,
        ..Tuning::default()
    }
}

fn running(tuning: Tuning, seed: u64) -> Simulation {
    let mut sim = Simulation::seeded(tuning, seed);
    assert!(sim.start());
    sim
}

fn intent_strategy() -> impl Strategy<Value = Option<Intent>> {
    prop_oneof![
        3 => Just(None),
        1 => (0.0f32..800.0).prop_map(|x| Some(Intent::MoveTo(x))),
        1 => (-100.0f32..100.0, -300.0f32..-30.0)
            .prop_map(|(dx, dy)| Some(Intent::Throw { dx, dy })),
    ]
}

fn steps_strategy() -> impl Strategy<Value = Vec<(f32, Option<Intent>)>> {
    prop::collection::vec((0.0f32..250.0, intent_strategy()), 1..120)
}

proptest! {
    #[test]
    fn thirst_and_sunlight_stay_in_range(seed in any::<u64>(), steps in steps_strategy()) {
        let tuning = Tuning {
            orb_spawn_interval_ms: 300.0,
            orb_fall_speed: 12.0,
            ..Tuning::default()
        };
        let mut sim = running(tuning, seed);
        for (elapsed, intent) in steps {
            sim.advance(elapsed, intent);
            let state = &sim.state;
            prop_assert!((0.0..=100.0).contains(&state.sunlight));
            for plant in &state.plants {
                prop_assert!((0.0..=100.0).contains(&plant.thirst));
                prop_assert!((0.0..=1.0).contains(&plant.grow));
            }
            prop_assert!(state.orb.iter().count() <= 1);
        }
    }

    #[test]
    fn thirst_decays_linearly_without_hits(
        seed in any::<u64>(),
        start in 30.0f32..100.0,
        chunks in prop::collection::vec(1.0f32..120.0, 1..80),
    ) {
        let mut sim = running(quiet_tuning(), seed);
        for plant in &mut sim.state.plants {
            plant.set_thirst(start, 25.0);
        }
        let rate = sim.state.tuning.thirst_decay_per_sec;
        let total_ms: f32 = chunks.iter().sum();
        for elapsed in chunks {
            sim.advance(elapsed, None);
        }
        let expected = (start - rate * total_ms / 1000.0).max(0.0);
        for plant in &sim.state.plants {
            prop_assert!((plant.thirst - expected).abs() < 0.05,
                "thirst {} expected {}", plant.thirst, expected);
        }
    }

    #[test]
    fn round_ends_exactly_once_and_freezes(
        seed in any::<u64>(),
        steps in prop::collection::vec((1.0f32..400.0, intent_strategy()), 1..60),
    ) {
        let tuning = Tuning {
            round_duration_secs: 2.0,
            ..quiet_tuning()
        };
        let mut sim = running(tuning, seed);
        let mut ended_events = 0;
        let mut elapsed_total = 0.0;
        // Play past nightfall, then keep feeding steps
        while sim.state.phase == RoundPhase::Running {
            for &(elapsed, intent) in &steps {
                sim.advance(elapsed, intent);
                elapsed_total += elapsed;
                ended_events += sim
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
                    .count();
                if sim.state.phase == RoundPhase::Ended {
                    break;
                }
            }
        }
        prop_assert!(elapsed_total >= 2000.0 - 1.0);
        prop_assert_eq!(sim.state.time_left, 0.0);

        let score = sim.state.score;
        let thirst: Vec<f32> = sim.state.plants.iter().map(|p| p.thirst).collect();
        let drops = sim.state.drops.len();
        for &(elapsed, intent) in &steps {
            sim.advance(elapsed, intent);
            ended_events += sim
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
                .count();
        }
        prop_assert_eq!(ended_events, 1);
        prop_assert_eq!(sim.state.phase, RoundPhase::Ended);
        prop_assert_eq!(sim.state.score, score);
        prop_assert_eq!(sim.state.drops.len(), drops);
        prop_assert!(sim.state.orb.is_none());
        let after: Vec<f32> = sim.state.plants.iter().map(|p| p.thirst).collect();
        prop_assert_eq!(after, thirst);
    }

    #[test]
    fn reset_always_yields_fresh_round(
        seed in any::<u64>(),
        steps in steps_strategy(),
        end_first in any::<bool>(),
    ) {
        let mut sim = running(Tuning::default(), seed);
        for (elapsed, intent) in steps {
            sim.advance(elapsed, intent);
        }
        sim.state.score += 70;
        sim.state.sunlight = 55.0;
        if end_first && sim.state.is_running() {
            sim.state.time_left = 0.001;
            sim.advance(16.0, None);
            prop_assert_eq!(sim.state.phase, RoundPhase::Ended);
        }

        sim.reset_round();
        let state = &sim.state;
        prop_assert_eq!(state.phase, RoundPhase::Running);
        prop_assert_eq!(state.score, 0);
        prop_assert_eq!(state.time_left, state.tuning.round_duration_secs);
        prop_assert_eq!(state.sunlight, 0.0);
        prop_assert!(!state.super_ready);
        prop_assert!(state.drops.is_empty());
        prop_assert!(state.particles.is_empty());
        prop_assert!(state.orb.is_none());
        prop_assert!((4..=5).contains(&state.plants.len()));
        for plant in &state.plants {
            prop_assert!(plant.is_alive());
            prop_assert_eq!(plant.thirst, 100.0);
        }
        prop_assert!(state.pending_events().is_empty());
    }
}

#[test]
fn thrown_drop_waters_plant_below() {
    let tuning = Tuning {
        field_height: 250.0,
        player_bottom_offset: 150.0,
        round_duration_secs: 60.0,
        ..quiet_tuning()
    };
    let mut sim = running(tuning, 11);
    let player_y = sim.state.tuning.player_y();
    assert_eq!(player_y, 100.0);

    let id = sim.state.next_entity_id();
    sim.state.plants = vec![Plant::new(
        id,
        Vec2::new(200.0, 200.0),
        Vec2::new(100.0, 70.0),
    )];
    sim.state.player.x = 200.0;
    sim.state.player.target_x = None;
    assert!(!sim.state.super_ready);

    sim.advance(1000.0, Some(Intent::Throw { dx: 0.0, dy: -40.0 }));
    assert_eq!(sim.state.drops.len(), 1);
    let drop = &sim.state.drops[0];
    assert_eq!(drop.pos, Vec2::new(200.0, player_y));
    assert_eq!(drop.vel.x, 0.0);
    assert!((drop.vel.y - (-40.0 / 36.0)).abs() < 1e-5);
    let thirst_before = sim.state.plants[0].thirst;
    assert!(thirst_before < 100.0);

    for _ in 0..60 {
        sim.advance(16.0, None);
        if sim.state.drops.is_empty() {
            break;
        }
    }
    assert!(sim.state.drops.is_empty());
    assert_eq!(sim.state.score, sim.state.tuning.hit_score);
    let plant = &sim.state.plants[0];
    assert!(plant.thirst > 99.0);
    assert_eq!(plant.health, PlantHealth::Healthy);
    assert!(plant.grow > 0.9);
}

#[test]
fn dead_plant_needs_super_throw() {
    let mut sim = running(quiet_tuning(), 12);
    let wilt = sim.state.tuning.wilt_threshold;
    sim.state.plants[0].set_thirst(0.0, wilt);
    assert!(!sim.state.plants[0].is_alive());

    sim.state.add_sunlight(100.0);
    assert!(sim.state.super_ready);
    let score = sim.state.score;
    sim.advance(16.0, Some(Intent::Throw { dx: 0.0, dy: -60.0 }));

    assert!(sim.state.drops.is_empty());
    assert!(!sim.state.super_ready);
    assert_eq!(sim.state.sunlight, 0.0);
    assert_eq!(score + sim.state.tuning.super_throw_bonus, sim.state.score);
    assert!(sim.state.plants.iter().all(|p| p.is_alive() && p.thirst > 99.0));
}
