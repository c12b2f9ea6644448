//! Discrete notifications emitted to the presentation layer.
//!
//! Presentation may use these for transient effects (shake, progress bar fill);
//! they never feed back into journey state.

use crate::progression::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyEvent {
    /// The step index changed, either forward after a correct answer or back via a jump.
    StepChanged(usize),
    /// A submitted answer was wrong.
    IncorrectAnswer,
    /// The session moved to a new phase.
    PhaseChanged(Phase),
}

/// FIFO of events produced during one call into the journey.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<JourneyEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: JourneyEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<JourneyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move every event from `other` onto the end of this queue.
    pub fn append(&mut self, other: &mut EventQueue) {
        self.events.append(&mut other.events);
    }
}
