//! Path-following camera rig with exponential smoothing and optional free look.

use std::time::Duration;

use engine_core::Transform;
use glam::{Mat4, Vec3};
use procgen::{finale_longitudinal, lateral_offset, longitudinal, Waypoint};

use crate::progression::Phase;

/// Fraction of the remaining distance the camera position covers per reference frame.
pub const POSITION_SMOOTHING: f32 = 0.04;
/// Fraction of the remaining distance the look target covers per reference frame.
pub const LOOK_SMOOTHING: f32 = 0.06;
/// Frame rate the smoothing factors are expressed at. Other frame rates are rescaled
/// so the decay per second stays the same.
pub const REFERENCE_FPS: f32 = 60.0;
/// A transition counts as settled once the remaining offset drops below this share
/// of the initial offset.
pub const SETTLE_TOLERANCE: f32 = 0.01;

/// Camera height above the path while following it.
const RIG_HEIGHT: f32 = 3.2;
/// How far behind the gate the camera trails.
const RIG_DISTANCE: f32 = 9.0;
/// How far past the gate the camera looks.
const LOOK_AHEAD: f32 = 12.0;
const LOOK_HEIGHT: f32 = 1.2;

const FINALE_HEIGHT: f32 = 4.5;
const FINALE_DISTANCE: f32 = 15.0;
const FINALE_LOOK_HEIGHT: f32 = 1.5;

/// Free-look polar angle limits (from straight up), keeping the camera above ground.
const MIN_POLAR: f32 = 0.4;
const MAX_POLAR: f32 = std::f32::consts::PI / 2.1;

/// Number of frames an exponential approach with per-frame `smoothing` needs to close
/// all but `tolerance` of its initial offset.
pub fn settle_frames(smoothing: f32, tolerance: f32) -> u32 {
    (tolerance.ln() / (1.0 - smoothing).ln()).ceil() as u32
}

/// Wall-clock settle time, independent of the host frame rate.
pub fn settle_time(smoothing: f32, tolerance: f32) -> Duration {
    Duration::from_secs_f32(settle_frames(smoothing, tolerance) as f32 / REFERENCE_FPS)
}

/// Share of the remaining distance to cover in a frame lasting `dt`.
///
/// Equals `smoothing` for a frame at [`REFERENCE_FPS`]; longer frames compound it as
/// `1 - (1 - smoothing)^(dt * REFERENCE_FPS)`, so the decay law holds at any frame rate.
pub fn frame_blend(smoothing: f32, dt: Duration) -> f32 {
    1.0 - (1.0 - smoothing).powf(dt.as_secs_f32() * REFERENCE_FPS)
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_target: Vec3,
}

impl CameraPose {
    /// Trailing pose behind the gate for `step`, looking down the road.
    pub fn for_step(step: usize) -> Self {
        let z = longitudinal(step);
        let ahead = z - LOOK_AHEAD;
        Self {
            position: Vec3::new(lateral_offset(z), RIG_HEIGHT, z + RIG_DISTANCE),
            look_target: Vec3::new(lateral_offset(ahead), LOOK_HEIGHT, ahead),
        }
    }

    /// Off-path vantage point overlooking the end of a route of `total` gates.
    pub fn finale(total: usize) -> Self {
        let end = Waypoint::at(finale_longitudinal(total));
        Self {
            position: Vec3::new(end.lateral, FINALE_HEIGHT, end.longitudinal + FINALE_DISTANCE),
            look_target: end.position(FINALE_LOOK_HEIGHT),
        }
    }
}

/// Smoothly follows the desired pose derived from the current step and phase.
///
/// The desired pose only changes in [`CameraRig::sync`]; [`CameraRig::update`] runs
/// once per rendered frame and closes a share of the gap scaled by the frame time.
#[derive(Debug, Clone)]
pub struct CameraRig {
    total: usize,
    current: CameraPose,
    desired: CameraPose,
    target_step: usize,
    target_phase: Phase,
    input_locked: bool,
}

impl CameraRig {
    /// A rig already resting at the first gate.
    pub fn new(total: usize) -> Self {
        let pose = CameraPose::for_step(0);
        Self {
            total,
            current: pose,
            desired: pose,
            target_step: 0,
            target_phase: Phase::NotStarted,
            input_locked: false,
        }
    }

    /// Feed the latest progression state. Recomputes the desired pose only when the
    /// step or phase changed, so it is cheap to call after every transition.
    pub fn sync(&mut self, step: usize, phase: Phase, input_locked: bool) {
        self.input_locked = input_locked;
        let step = step.min(self.total);
        if step == self.target_step && phase == self.target_phase {
            return;
        }
        self.target_step = step;
        self.target_phase = phase;
        self.desired = match phase {
            Phase::Completed => CameraPose::finale(self.total),
            Phase::NotStarted | Phase::Active => CameraPose::for_step(step),
        };
        log::debug!(
            "Camera retarget: step {} {:?} -> {:?}",
            step,
            phase,
            self.desired.position
        );
    }

    /// One frame of exponential approach toward the desired pose. Never overshoots.
    pub fn update(&mut self, dt: Duration) {
        self.current.position +=
            (self.desired.position - self.current.position) * frame_blend(POSITION_SMOOTHING, dt);
        self.current.look_target +=
            (self.desired.look_target - self.current.look_target) * frame_blend(LOOK_SMOOTHING, dt);
    }

    /// Remaining distance to the desired position as a share of `from`'s distance.
    pub fn residual_from(&self, from: CameraPose) -> f32 {
        let initial = from.position.distance(self.desired.position);
        if initial <= f32::EPSILON {
            return 0.0;
        }
        self.current.position.distance(self.desired.position) / initial
    }

    /// Free look is available whenever no step transition is playing.
    pub fn free_look_permitted(&self) -> bool {
        !self.input_locked
    }

    /// Orbit the camera around its current look target by `yaw` and `pitch` radians.
    ///
    /// Rotates the current pose only, so the automatic drift toward the desired pose
    /// keeps pulling on both the position and the orbit centre. Returns false while
    /// free look is locked.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) -> bool {
        if !self.free_look_permitted() {
            return false;
        }
        let offset = self.current.position - self.current.look_target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        let polar = (polar + pitch).clamp(MIN_POLAR, MAX_POLAR);
        let azimuth = azimuth + yaw;
        let rotated = Vec3::new(
            radius * polar.sin() * azimuth.sin(),
            radius * polar.cos(),
            radius * polar.sin() * azimuth.cos(),
        );
        self.current.position = self.current.look_target + rotated;
        true
    }

    pub fn position(&self) -> Vec3 {
        self.current.position
    }

    pub fn look_target(&self) -> Vec3 {
        self.current.look_target
    }

    pub fn pose(&self) -> CameraPose {
        self.current
    }

    pub fn desired(&self) -> CameraPose {
        self.desired
    }

    /// Camera transform facing the current look target.
    pub fn transform(&self) -> Transform {
        let mut t = Transform::from_position(self.current.position);
        t.look_at(self.current.look_target, Vec3::Y);
        t
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.current.position, self.current.look_target, Vec3::Y)
    }
}
