//! The owned journey session: challenges, progression, camera rig and frame clock.
//!
//! Presentation talks to the journey only through this type. Illegal operations are
//! turned away silently (a `false`/[`SubmitOutcome::Rejected`] result plus a debug log
//! line); they are ordinary contention from double clicks and animation timers.

use std::time::Duration;

use engine_core::Time;

use crate::ambience::AmbienceSample;
use crate::camera_rig::CameraRig;
use crate::challenges::{BuiltinChallenges, Challenge, ChallengeProvider};
use crate::config::JourneyConfig;
use crate::events::{EventQueue, JourneyEvent};
use crate::follower::Follower;
use crate::progression::{Phase, Progression, Rejection};
use crate::uniform::FrameUniform;

/// Result of handing an answer to the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// Not accepted at all: wrong phase, input locked or completion pending.
    Rejected,
}

pub struct Journey<P: ChallengeProvider = BuiltinChallenges> {
    provider: P,
    progression: Progression,
    camera: CameraRig,
    follower: Follower,
    time: Time,
    events: EventQueue,
    orbit_sensitivity: f32,
}

impl Journey<BuiltinChallenges> {
    /// A session over the built-in challenge table, configured from `config`.
    pub fn from_config(config: &JourneyConfig) -> Self {
        Self::new(BuiltinChallenges).with_orbit_sensitivity(config.orbit_sensitivity)
    }
}

impl<P: ChallengeProvider> Journey<P> {
    pub fn new(provider: P) -> Self {
        let total = provider.count();
        if total == 0 {
            log::warn!("Journey created with no challenges; it will complete on start");
        }
        Self {
            provider,
            progression: Progression::new(total),
            camera: CameraRig::new(total),
            follower: Follower::new(total),
            time: Time::new(),
            events: EventQueue::new(),
            orbit_sensitivity: JourneyConfig::default().orbit_sensitivity,
        }
    }

    pub fn with_orbit_sensitivity(mut self, sensitivity: f32) -> Self {
        self.orbit_sensitivity = sensitivity;
        self
    }

    pub fn start(&mut self) -> bool {
        let result = self.progression.start();
        self.settle("start", result)
    }

    /// Check `submitted` against the current challenge and apply the verdict.
    pub fn submit_answer(&mut self, submitted: &str) -> SubmitOutcome {
        let correct = self.provider.answer_matches(self.progression.step(), submitted);
        let result = self.progression.submit_answer(correct);
        match (self.settle("submit", result), correct) {
            (false, _) => SubmitOutcome::Rejected,
            (true, true) => SubmitOutcome::Correct,
            (true, false) => SubmitOutcome::Incorrect,
        }
    }

    /// Return to an already completed step.
    pub fn jump_to_step(&mut self, target: usize) -> bool {
        let result = self.progression.jump_to_step(target);
        self.settle("jump", result)
    }

    /// Orbit the camera by raw angles in radians. Ignored while input is locked.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) -> bool {
        self.camera.orbit(yaw, pitch)
    }

    /// Orbit from a pointer drag in pixels, scaled by the configured sensitivity.
    pub fn drag(&mut self, dx: f32, dy: f32) -> bool {
        self.orbit(-dx * self.orbit_sensitivity, -dy * self.orbit_sensitivity)
    }

    /// Run one rendered frame that lasted `dt`: timers first, then camera smoothing.
    pub fn advance(&mut self, dt: Duration) {
        self.time.advance(dt);
        self.progression.tick(dt);
        self.sync();
        self.camera.update(dt);
        self.follower.update(dt);
    }

    /// Take the events raised since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<JourneyEvent> {
        self.events.drain()
    }

    pub fn step(&self) -> usize {
        self.progression.step()
    }

    pub fn total(&self) -> usize {
        self.progression.total()
    }

    pub fn phase(&self) -> Phase {
        self.progression.phase()
    }

    pub fn is_input_locked(&self) -> bool {
        self.progression.is_input_locked()
    }

    pub fn is_incorrect_signal_active(&self) -> bool {
        self.progression.is_incorrect_signal_active()
    }

    pub fn is_completion_pending(&self) -> bool {
        self.progression.is_completion_pending()
    }

    pub fn free_look_permitted(&self) -> bool {
        self.camera.free_look_permitted()
    }

    /// The challenge waiting for an answer, if the journey is running.
    pub fn current_challenge(&self) -> Option<&Challenge> {
        if self.phase() != Phase::Active {
            return None;
        }
        self.provider.challenge(self.step())
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn follower(&self) -> &Follower {
        &self.follower
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn ambience(&self) -> AmbienceSample {
        AmbienceSample::at(self.step(), self.total(), self.phase() == Phase::Completed)
    }

    pub fn frame_uniform(&self) -> FrameUniform {
        let mut uniform = FrameUniform::new();
        uniform.update(
            &self.camera,
            &self.ambience(),
            self.step(),
            self.phase(),
            self.is_input_locked(),
        );
        uniform
    }

    /// Push the progression state into the camera rig and follower and collect its events.
    fn sync(&mut self) {
        let (step, phase) = (self.progression.step(), self.progression.phase());
        self.camera.sync(step, phase, self.progression.is_input_locked());
        self.follower.sync(step, phase);
        self.progression.flush_events(&mut self.events);
    }

    fn settle(&mut self, op: &str, result: Result<(), Rejection>) -> bool {
        match result {
            Ok(()) => {
                self.sync();
                true
            }
            Err(e) => {
                log::debug!("{} rejected: {}", op, e);
                false
            }
        }
    }
}
