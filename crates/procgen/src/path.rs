//! Procedurally curved route: lateral offset, heading and gate waypoints.
//!
//! The route runs down the negative Z axis. Its lateral (X) offset is the sum of
//! two periodic terms at unrelated frequencies, so the curve never visibly repeats
//! over the length of a session and stays smooth (C-infinity) everywhere.

use glam::Vec3;

/// Distance between consecutive gates along the route. Scenery placement uses the
/// same value so decorations line up with the gates.
pub const GATE_SPACING: f32 = 20.0;

/// Main sweep of the road.
const CURVE_AMPLITUDE: f32 = 8.0;
const CURVE_FREQUENCY: f32 = 0.018;

/// Slow drift layered on top of the main sweep.
const DRIFT_AMPLITUDE: f32 = 3.0;
const DRIFT_FREQUENCY: f32 = 0.0081;

/// How far past the last gate the completion vantage point sits.
const FINALE_RUNOUT: f32 = 50.0;

/// Lateral (X) offset of the route centre at longitudinal coordinate `z`.
pub fn lateral_offset(z: f32) -> f32 {
    (z * CURVE_FREQUENCY).sin() * CURVE_AMPLITUDE + (z * DRIFT_FREQUENCY).cos() * DRIFT_AMPLITUDE
}

/// d(lateral_offset)/dz, computed analytically.
pub fn lateral_slope(z: f32) -> f32 {
    (z * CURVE_FREQUENCY).cos() * CURVE_AMPLITUDE * CURVE_FREQUENCY
        - (z * DRIFT_FREQUENCY).sin() * DRIFT_AMPLITUDE * DRIFT_FREQUENCY
}

/// Local tangent direction of the route in radians (0 = straight down the Z axis).
pub fn heading(z: f32) -> f32 {
    lateral_slope(z).atan()
}

/// Longitudinal coordinate of the gate for `step`.
pub fn longitudinal(step: usize) -> f32 {
    -(step as f32) * GATE_SPACING
}

/// Longitudinal coordinate of the completion vantage point for a route of
/// `total` gates. An empty route is treated as a single gate at the origin.
pub fn finale_longitudinal(total: usize) -> f32 {
    longitudinal(total.max(1) - 1) - FINALE_RUNOUT
}

/// A point on the route centre line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    /// X offset of the route at this point.
    pub lateral: f32,
    /// Z coordinate along the route.
    pub longitudinal: f32,
}

impl Waypoint {
    /// The route centre at an arbitrary longitudinal coordinate.
    pub fn at(longitudinal: f32) -> Self {
        Self {
            lateral: lateral_offset(longitudinal),
            longitudinal,
        }
    }

    /// World position of this waypoint lifted `height` above the ground plane.
    pub fn position(&self, height: f32) -> Vec3 {
        Vec3::new(self.lateral, height, self.longitudinal)
    }

    /// Route heading at this waypoint.
    pub fn heading(&self) -> f32 {
        heading(self.longitudinal)
    }
}

/// Waypoint of the gate for `step`.
pub fn waypoint(step: usize) -> Waypoint {
    Waypoint::at(longitudinal(step))
}
