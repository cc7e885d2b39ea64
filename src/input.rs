//! Pointer gesture to player intent translation
//!
//! A gesture is a pointer-down/pointer-up pair in screen pixels. Short
//! horizontal swipes near the bottom of the field walk the player; upward
//! swipes anywhere throw water.

use glam::Vec2;

use crate::sim::Intent;

/// Maximum vertical drift for a swipe to count as a walk
pub const MOVE_MAX_ABS_DY: f32 = 50.0;
/// Minimum horizontal travel for a walk
pub const MOVE_MIN_ABS_DX: f32 = 20.0;
/// Walks must start within this distance of the bottom edge
pub const MOVE_START_BAND: f32 = 180.0;
/// Upward travel (negative dy) needed for a throw
pub const THROW_MIN_DY: f32 = -28.0;

/// A completed pointer gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub start: Vec2,
    pub end: Vec2,
}

impl Gesture {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn delta(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Decode a gesture. Walks take priority over throws; anything else is
/// ignored.
pub fn translate_gesture(gesture: &Gesture, field_height: f32, player_x: f32) -> Option<Intent> {
    let Vec2 { x: dx, y: dy } = gesture.delta();
    if !dx.is_finite() || !dy.is_finite() {
        return None;
    }

    let is_walk = dy.abs() < MOVE_MAX_ABS_DY
        && dx.abs() > MOVE_MIN_ABS_DX
        && gesture.start.y > field_height - MOVE_START_BAND;
    if is_walk {
        return Some(Intent::MoveTo(player_x + dx));
    }
    if dy < THROW_MIN_DY {
        return Some(Intent::Throw { dx, dy });
    }
    None
}

/// Pairs pointer-down and pointer-up events into gestures
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    start: Option<Vec2>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_down(&mut self, at: Vec2) {
        self.start = Some(at);
    }

    /// Finish the gesture; `None` if no pointer-down preceded it
    pub fn pointer_up(&mut self, at: Vec2) -> Option<Gesture> {
        self.start.take().map(|start| Gesture::new(start, at))
    }

    /// Drop a gesture in progress (pointer left the canvas)
    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn in_progress(&self) -> bool {
        self.start.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gesture(sx: f32, sy: f32, ex: f32, ey: f32) -> Gesture {
        Gesture::new(Vec2::new(sx, sy), Vec2::new(ex, ey))
    }

    #[test]
    fn test_walk_near_bottom() {
        // Field 600 high: walks must start below y = 420
        let intent = translate_gesture(&gesture(300.0, 500.0, 360.0, 510.0), 600.0, 400.0);
        assert_eq!(intent, Some(Intent::MoveTo(460.0)));
    }

    #[test]
    fn test_horizontal_swipe_high_up_is_ignored() {
        assert_eq!(
            translate_gesture(&gesture(300.0, 200.0, 360.0, 190.0), 600.0, 400.0),
            None
        );
    }

    #[test]
    fn test_throw_anywhere() {
        let intent = translate_gesture(&gesture(300.0, 100.0, 310.0, 40.0), 600.0, 400.0);
        assert_eq!(intent, Some(Intent::Throw { dx: 10.0, dy: -60.0 }));

        // Upward swipe that starts in the walk band but is too steep to walk
        let intent = translate_gesture(&gesture(300.0, 550.0, 330.0, 450.0), 600.0, 400.0);
        assert_eq!(intent, Some(Intent::Throw { dx: 30.0, dy: -100.0 }));
    }

    #[test]
    fn test_small_or_downward_swipes_ignored() {
        assert_eq!(translate_gesture(&gesture(300.0, 300.0, 305.0, 280.0), 600.0, 400.0), None);
        assert_eq!(translate_gesture(&gesture(300.0, 300.0, 300.0, 400.0), 600.0, 400.0), None);
        // Exactly at the threshold is not a throw
        assert_eq!(translate_gesture(&gesture(300.0, 300.0, 300.0, 272.0), 600.0, 400.0), None);
    }

    #[test]
    fn test_walk_wins_over_throw() {
        // dy = -40 is both a throw and (with |dx| > 20) a walk
        let intent = translate_gesture(&gesture(300.0, 500.0, 250.0, 460.0), 600.0, 400.0);
        assert_eq!(intent, Some(Intent::MoveTo(350.0)));
    }

    #[test]
    fn test_tracker_pairs_events() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.pointer_up(Vec2::ZERO), None);

        tracker.pointer_down(Vec2::new(10.0, 20.0));
        assert!(tracker.in_progress());
        let g = tracker.pointer_up(Vec2::new(15.0, -30.0)).unwrap();
        assert_eq!(g.delta(), Vec2::new(5.0, -50.0));
        assert!(!tracker.in_progress());

        tracker.pointer_down(Vec2::ZERO);
        tracker.cancel();
        assert_eq!(tracker.pointer_up(Vec2::ZERO), None);
    }
}
