//! The traveller sprite that walks the road from gate to gate.

use std::time::Duration;

use glam::Vec3;
use procgen::waypoint;

use crate::camera_rig::{frame_blend, POSITION_SMOOTHING};
use crate::progression::Phase;

/// Height the traveller hovers above the road.
pub const FOLLOWER_HEIGHT: f32 = 1.25;

/// Glides toward the gate of the current step with the camera's position smoothing.
/// Hidden once the journey completes, when the finale pair takes over.
#[derive(Debug, Clone)]
pub struct Follower {
    total: usize,
    position: Vec3,
    target: Vec3,
    visible: bool,
}

impl Follower {
    /// A traveller standing at the first gate.
    pub fn new(total: usize) -> Self {
        let start = waypoint(0).position(FOLLOWER_HEIGHT);
        Self {
            total,
            position: start,
            target: start,
            visible: true,
        }
    }

    pub fn sync(&mut self, step: usize, phase: Phase) {
        self.target = waypoint(step.min(self.total)).position(FOLLOWER_HEIGHT);
        self.visible = phase != Phase::Completed;
    }

    pub fn update(&mut self, dt: Duration) {
        self.position += (self.target - self.position) * frame_blend(POSITION_SMOOTHING, dt);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_60: Duration = Duration::from_nanos(16_666_667);

    #[test]
    fn walks_toward_current_gate() {
        let mut f = Follower::new(12);
        f.sync(2, Phase::Active);
        let gate = waypoint(2).position(FOLLOWER_HEIGHT);
        assert_eq!(f.target(), gate);

        let d0 = f.position().distance(gate);
        for _ in 0..100 {
            f.update(FRAME_60);
        }
        let expected = d0 * (1.0 - POSITION_SMOOTHING).powi(100);
        assert!((f.position().distance(gate) - expected).abs() < expected * 0.01);
        assert_eq!(f.position().y, FOLLOWER_HEIGHT);
    }

    #[test]
    fn hides_on_completion() {
        let mut f = Follower::new(3);
        assert!(f.is_visible());
        f.sync(3, Phase::Active);
        assert!(f.is_visible());
        f.sync(3, Phase::Completed);
        assert!(!f.is_visible());
    }

    #[test]
    fn clamps_overshoot() {
        let mut f = Follower::new(3);
        f.sync(9, Phase::Active);
        assert_eq!(f.target(), waypoint(3).position(FOLLOWER_HEIGHT));
    }
}
