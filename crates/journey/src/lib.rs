//! Progression and camera-motion core for a scene-driven challenge journey.
//!
//! A player answers a fixed sequence of challenges; every correct answer moves the
//! camera to the next gate along a procedurally curved road, and the ambience
//! (sky colour, fog, light) brightens with progress until the journey completes.
//!
//! - [`ambience`]: pure progress -> ambience mapping
//! - [`progression`]: phase / step state machine with the transition input lock
//! - [`camera_rig`]: exponential-smoothing camera that follows the route
//! - [`follower`]: the traveller gliding from gate to gate
//! - [`session`]: the owned [`Journey`] object the host drives once per frame

pub mod ambience;
pub mod camera_rig;
pub mod challenges;
pub mod config;
pub mod events;
pub mod follower;
pub mod progression;
pub mod session;
pub mod uniform;

pub use ambience::AmbienceSample;
pub use camera_rig::{CameraPose, CameraRig};
pub use challenges::{BuiltinChallenges, Challenge, ChallengeKind, ChallengeProvider, Hint, TOTAL_STEPS};
pub use config::JourneyConfig;
pub use events::JourneyEvent;
pub use follower::Follower;
pub use progression::{Phase, Progression, Rejection};
pub use session::{Journey, SubmitOutcome};
pub use uniform::FrameUniform;
