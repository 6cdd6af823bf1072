//! Cadence events, phases and the common timer interface

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::Millis;

/// What a station should do with its generators after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CadenceEvent {
    /// Tone starts
    TurnOn,
    /// Tone continues
    LeaveOn,
    /// Tone stops
    TurnOff,
    /// Silence continues
    LeaveOff,
    /// Tone continues at a different frequency
    ChangeFreq,
    /// The whole sequence finished
    CycleEnd,
}

impl CadenceEvent {
    /// Whether this event changes what the generators are doing
    pub fn is_transition(self) -> bool {
        !matches!(self, CadenceEvent::LeaveOn | CadenceEvent::LeaveOff)
    }
}

/// Phase a cadence timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CadenceState {
    /// Started but not yet stepped, or stopped
    Idle,
    /// First (or only) tone
    ToneA,
    /// Second tone of an alternating pattern
    ToneB,
    /// Off between tones
    Silence,
    /// Pause between digits or elements
    InterGap,
    /// Non-repeating sequence finished
    Complete,
}

impl CadenceState {
    /// Whether a tone is sounding in this phase
    pub fn is_tone(self) -> bool {
        matches!(self, CadenceState::ToneA | CadenceState::ToneB)
    }
}

/// Interface shared by every cadence flavor
///
/// A cadence is a pure function of its own state, the supplied time and the
/// supplied random source. It never touches hardware.
pub trait Cadence {
    /// Rewind to the beginning; the next step returns `TurnOn`
    fn start(&mut self, repeat: bool);

    /// Go inactive without completing
    fn stop(&mut self);

    /// Advance to `now`
    fn step<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent;

    /// Current phase
    fn state(&self) -> CadenceState;

    /// Whether the timer is running
    fn is_active(&self) -> bool;

    /// Whether a tone is currently keyed
    fn is_transmitting(&self) -> bool;

    /// Completed cycles since construction
    fn cycles(&self) -> u32;

    /// Deadline of the current phase, if armed
    fn next_event(&self) -> Option<Millis>;
}
