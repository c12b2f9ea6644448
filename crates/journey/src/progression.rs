//! Session progression: phase, step index and the transition input lock.
//!
//! Timers are owned here and advanced by [`Progression::tick`]; each is a
//! [`OneShot`], so re-arming replaces a pending deadline instead of stacking it.

use std::time::Duration;

use engine_core::OneShot;
use thiserror::Error;

use crate::events::{EventQueue, JourneyEvent};

/// How long free look and step jumps stay disabled after a step change.
/// Must outlast the camera settle time (see `camera_rig::settle_frames`).
pub const INPUT_LOCK_DURATION: Duration = Duration::from_millis(2200);
/// How long the wrong-answer signal stays raised.
pub const INCORRECT_SIGNAL_DURATION: Duration = Duration::from_millis(600);
/// Delay between reaching the final step and entering [`Phase::Completed`].
pub const COMPLETION_DELAY: Duration = Duration::from_millis(2500);

/// Top-level session state. Transitions only run NotStarted -> Active -> Completed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    NotStarted,
    Active,
    Completed,
}

/// Why an operation was turned away. Rejections never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("operation requires phase {expected:?} but the journey is {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("input is locked while the camera is moving")]
    InputLocked,
    #[error("can only return to an earlier step (target {target}, current {current})")]
    NotBehind { target: usize, current: usize },
    #[error("final step reached, waiting for completion")]
    CompletionPending,
}

#[derive(Debug)]
pub struct Progression {
    total: usize,
    step: usize,
    phase: Phase,
    input_lock: OneShot,
    incorrect_signal: OneShot,
    completion: OneShot,
    events: EventQueue,
}

impl Progression {
    /// A fresh session over `total` challenges: step 0, not started.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            step: 0,
            phase: Phase::NotStarted,
            input_lock: OneShot::idle(),
            incorrect_signal: OneShot::idle(),
            completion: OneShot::idle(),
            events: EventQueue::new(),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a step-change transition is still playing out.
    pub fn is_input_locked(&self) -> bool {
        self.input_lock.is_pending()
    }

    /// True for a short while after a wrong answer.
    pub fn is_incorrect_signal_active(&self) -> bool {
        self.incorrect_signal.is_pending()
    }

    /// True between reaching the final step and entering [`Phase::Completed`].
    pub fn is_completion_pending(&self) -> bool {
        self.completion.is_pending()
    }

    /// NotStarted -> Active. An empty journey completes immediately.
    pub fn start(&mut self) -> Result<(), Rejection> {
        self.require_phase(Phase::NotStarted)?;
        self.set_phase(Phase::Active);
        if self.total == 0 {
            self.set_phase(Phase::Completed);
        }
        Ok(())
    }

    /// Apply the verdict on the current challenge.
    ///
    /// A correct answer advances one step; on the last challenge it also schedules
    /// completion. A wrong answer raises the incorrect signal and leaves the step alone.
    pub fn submit_answer(&mut self, correct: bool) -> Result<(), Rejection> {
        self.require_phase(Phase::Active)?;
        self.require_not_finishing()?;
        self.require_unlocked()?;

        if !correct {
            self.incorrect_signal.arm(INCORRECT_SIGNAL_DURATION);
            self.events.push(JourneyEvent::IncorrectAnswer);
            return Ok(());
        }

        let next = (self.step + 1).min(self.total);
        self.change_step(next);
        if next == self.total {
            self.completion.arm(COMPLETION_DELAY);
        }
        Ok(())
    }

    /// Return to an already completed step. Skipping ahead is never allowed.
    pub fn jump_to_step(&mut self, target: usize) -> Result<(), Rejection> {
        self.require_phase(Phase::Active)?;
        self.require_not_finishing()?;
        self.require_unlocked()?;
        if target >= self.step {
            return Err(Rejection::NotBehind {
                target,
                current: self.step,
            });
        }
        self.change_step(target);
        Ok(())
    }

    /// Advance every pending timer by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        if self.input_lock.tick(dt) {
            log::debug!("Input unlocked at step {}", self.step);
        }
        self.incorrect_signal.tick(dt);
        if self.completion.tick(dt) {
            self.set_phase(Phase::Completed);
        }
    }

    /// Move all events raised so far onto `out`.
    pub fn flush_events(&mut self, out: &mut EventQueue) {
        out.append(&mut self.events);
    }

    fn change_step(&mut self, step: usize) {
        log::debug!("Step {} -> {}", self.step, step);
        self.step = step;
        // A new gate means a new challenge; any wrong-answer shake belongs to the old one.
        self.incorrect_signal.cancel();
        self.input_lock.arm(INPUT_LOCK_DURATION);
        self.events.push(JourneyEvent::StepChanged(step));
    }

    fn set_phase(&mut self, phase: Phase) {
        log::info!("Journey phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.events.push(JourneyEvent::PhaseChanged(phase));
    }

    fn require_phase(&self, expected: Phase) -> Result<(), Rejection> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Rejection::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn require_unlocked(&self) -> Result<(), Rejection> {
        if self.is_input_locked() {
            Err(Rejection::InputLocked)
        } else {
            Ok(())
        }
    }

    fn require_not_finishing(&self) -> Result<(), Rejection> {
        if self.is_completion_pending() {
            Err(Rejection::CompletionPending)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(p: &mut Progression) -> Vec<JourneyEvent> {
        let mut q = EventQueue::new();
        p.flush_events(&mut q);
        q.drain()
    }

    fn started(total: usize) -> Progression {
        let mut p = Progression::new(total);
        p.start().unwrap();
        drain(&mut p);
        p
    }

    /// Answer correctly and wait out the lock.
    fn advance_one(p: &mut Progression) {
        p.submit_answer(true).unwrap();
        p.tick(INPUT_LOCK_DURATION);
    }

    #[test]
    fn start_activates_once() {
        let mut p = Progression::new(12);
        assert_eq!(p.phase(), Phase::NotStarted);
        assert_eq!(p.start(), Ok(()));
        assert_eq!(p.phase(), Phase::Active);
        assert_eq!(p.step(), 0);
        assert_eq!(drain(&mut p), vec![JourneyEvent::PhaseChanged(Phase::Active)]);

        assert_eq!(
            p.start(),
            Err(Rejection::WrongPhase {
                expected: Phase::NotStarted,
                actual: Phase::Active
            })
        );
        assert!(drain(&mut p).is_empty());
        assert_eq!(p.phase(), Phase::Active);
    }

    #[test]
    fn full_run_reaches_completion() {
        const N: usize = 12;
        let mut p = started(N);

        for expected in 1..N {
            p.submit_answer(true).unwrap();
            assert_eq!(p.step(), expected);
            assert!(p.is_input_locked());
            assert_eq!(drain(&mut p), vec![JourneyEvent::StepChanged(expected)]);
            p.tick(INPUT_LOCK_DURATION);
            assert!(!p.is_input_locked());
        }
        assert_eq!(p.step(), N - 1);

        p.submit_answer(true).unwrap();
        assert_eq!(p.step(), N);
        assert_eq!(p.phase(), Phase::Active);
        assert!(p.is_completion_pending());

        p.tick(COMPLETION_DELAY - Duration::from_millis(1));
        assert_eq!(p.phase(), Phase::Active);
        p.tick(Duration::from_millis(1));
        assert_eq!(p.phase(), Phase::Completed);
        assert_eq!(
            drain(&mut p),
            vec![
                JourneyEvent::StepChanged(N),
                JourneyEvent::PhaseChanged(Phase::Completed)
            ]
        );

        // Completed is terminal.
        assert!(p.submit_answer(true).is_err());
        assert!(p.jump_to_step(0).is_err());
        assert!(p.start().is_err());
        assert_eq!(p.step(), N);
    }

    #[test]
    fn wrong_answer_only_signals() {
        let mut p = started(5);
        advance_one(&mut p);
        advance_one(&mut p);
        drain(&mut p);

        p.submit_answer(false).unwrap();
        assert_eq!(p.step(), 2);
        assert_eq!(p.phase(), Phase::Active);
        assert!(!p.is_input_locked());
        assert!(p.is_incorrect_signal_active());
        assert_eq!(drain(&mut p), vec![JourneyEvent::IncorrectAnswer]);

        p.tick(INCORRECT_SIGNAL_DURATION);
        assert!(!p.is_incorrect_signal_active());
        assert!(drain(&mut p).is_empty());
    }

    #[test]
    fn wrong_answer_at_every_step() {
        let mut p = started(4);
        for step in 0..4 {
            p.submit_answer(false).unwrap();
            assert_eq!(p.step(), step);
            assert_eq!(drain(&mut p), vec![JourneyEvent::IncorrectAnswer]);
            advance_one(&mut p);
            drain(&mut p);
        }
    }

    #[test]
    fn repeated_wrong_answers_restart_the_signal() {
        let mut p = started(3);
        p.submit_answer(false).unwrap();
        p.tick(Duration::from_millis(500));
        p.submit_answer(false).unwrap();
        p.tick(Duration::from_millis(500));
        assert!(p.is_incorrect_signal_active());
        p.tick(Duration::from_millis(100));
        assert!(!p.is_incorrect_signal_active());
    }

    #[test]
    fn step_change_clears_wrong_answer_signal() {
        let mut p = started(4);
        p.submit_answer(false).unwrap();
        assert!(p.is_incorrect_signal_active());
        p.submit_answer(true).unwrap();
        assert!(!p.is_incorrect_signal_active());
        assert_eq!(p.step(), 1);
    }

    #[test]
    fn jump_only_goes_back() {
        let mut p = started(6);
        for _ in 0..3 {
            advance_one(&mut p);
        }
        drain(&mut p);

        assert_eq!(
            p.jump_to_step(3),
            Err(Rejection::NotBehind {
                target: 3,
                current: 3
            })
        );
        assert!(p.jump_to_step(5).is_err());
        assert_eq!(p.step(), 3);
        assert!(drain(&mut p).is_empty());

        assert_eq!(p.jump_to_step(1), Ok(()));
        assert_eq!(p.step(), 1);
        assert!(p.is_input_locked());
        assert_eq!(drain(&mut p), vec![JourneyEvent::StepChanged(1)]);
    }

    #[test]
    fn locked_input_rejects_jumps_and_answers() {
        let mut p = started(6);
        advance_one(&mut p);
        p.submit_answer(true).unwrap();
        drain(&mut p);
        assert!(p.is_input_locked());

        assert_eq!(p.jump_to_step(0), Err(Rejection::InputLocked));
        assert_eq!(p.submit_answer(true), Err(Rejection::InputLocked));
        assert_eq!(p.submit_answer(false), Err(Rejection::InputLocked));
        assert_eq!(p.step(), 2);
        assert!(drain(&mut p).is_empty());

        p.tick(INPUT_LOCK_DURATION - Duration::from_millis(1));
        assert!(p.is_input_locked());
        p.tick(Duration::from_millis(1));
        assert_eq!(p.jump_to_step(0), Ok(()));
    }

    #[test]
    fn nothing_is_allowed_before_start() {
        let mut p = Progression::new(3);
        assert!(matches!(p.submit_answer(true), Err(Rejection::WrongPhase { .. })));
        assert!(matches!(p.jump_to_step(0), Err(Rejection::WrongPhase { .. })));
        assert_eq!(p.step(), 0);
        assert!(drain(&mut p).is_empty());
    }

    #[test]
    fn final_step_blocks_further_input() {
        let mut p = started(2);
        advance_one(&mut p);
        p.submit_answer(true).unwrap();
        p.tick(INPUT_LOCK_DURATION);
        assert!(!p.is_input_locked());
        assert_eq!(p.phase(), Phase::Active);

        assert_eq!(p.jump_to_step(0), Err(Rejection::CompletionPending));
        assert_eq!(p.submit_answer(true), Err(Rejection::CompletionPending));
        assert_eq!(p.step(), 2);

        p.tick(COMPLETION_DELAY);
        assert_eq!(p.phase(), Phase::Completed);
    }

    #[test]
    fn empty_journey_completes_on_start() {
        let mut p = Progression::new(0);
        p.start().unwrap();
        assert_eq!(p.phase(), Phase::Completed);
        assert_eq!(
            drain(&mut p),
            vec![
                JourneyEvent::PhaseChanged(Phase::Active),
                JourneyEvent::PhaseChanged(Phase::Completed)
            ]
        );
        assert!(p.submit_answer(true).is_err());
    }

    #[test]
    fn lock_clears_after_frame_ticks() {
        let mut p = started(3);
        p.submit_answer(true).unwrap();
        // 133 frames at 60 fps is just past 2.2 s.
        for _ in 0..133 {
            p.tick(Duration::from_secs_f64(1.0 / 60.0));
        }
        assert!(!p.is_input_locked());
    }
}
