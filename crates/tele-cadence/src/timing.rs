//! Duration ranges and the deadline bookkeeping shared by every cadence

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::clock::{after, deadline_reached};
use tele_core::Millis;

use crate::event::{CadenceEvent, CadenceState};

/// Inclusive range of milliseconds a phase may last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl DurationRange {
    /// Range spanning `min_ms..=max_ms`
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    /// Range that always yields `ms`
    pub const fn fixed(ms: u32) -> Self {
        Self::new(ms, ms)
    }

    /// Draw a duration
    ///
    /// A reversed range yields `min_ms`.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rng.random_range(self.min_ms..=self.max_ms)
        }
    }
}

/// Phase bookkeeping embedded in each cadence flavor
#[derive(Debug, Clone)]
pub(crate) struct TimerCore {
    pub state: CadenceState,
    pub next_event: Option<Millis>,
    pub active: bool,
    pub transmitting: bool,
    pub repeat: bool,
    pub cycles: u32,
}

impl TimerCore {
    pub fn new() -> Self {
        Self {
            state: CadenceState::Idle,
            next_event: None,
            active: false,
            transmitting: false,
            repeat: false,
            cycles: 0,
        }
    }

    /// Reset to the start of a sequence, ready to fire on the next step
    pub fn start(&mut self, repeat: bool) {
        self.state = CadenceState::Idle;
        self.next_event = None;
        self.active = true;
        self.transmitting = false;
        self.repeat = repeat;
    }

    pub fn stop(&mut self) {
        self.state = CadenceState::Idle;
        self.next_event = None;
        self.active = false;
        self.transmitting = false;
    }

    /// The sequence ran out and the timer goes inactive
    pub fn complete(&mut self) {
        self.state = CadenceState::Complete;
        self.next_event = None;
        self.active = false;
        self.transmitting = false;
        self.cycles = self.cycles.wrapping_add(1);
    }

    /// First deadline after `start`
    pub fn arm(&mut self, now: Millis, duration: u32) {
        self.next_event = Some(after(now, duration));
    }

    /// Schedule the next phase from the deadline that just expired
    ///
    /// When the caller stepped so late that the anchored deadline is already
    /// behind `now`, the phase restarts from `now` instead of bursting.
    pub fn advance(&mut self, now: Millis, duration: u32) {
        let anchor = self.next_event.unwrap_or(now);
        let candidate = after(anchor, duration);
        self.next_event = if candidate != now && deadline_reached(now, candidate) {
            Some(after(now, duration))
        } else {
            Some(candidate)
        };
    }

    /// Whether the current phase has expired
    pub fn due(&self, now: Millis) -> bool {
        self.next_event
            .is_some_and(|deadline| deadline_reached(now, deadline))
    }

    /// Event for a step that changes nothing
    pub fn hold(&self) -> CadenceEvent {
        if self.transmitting {
            CadenceEvent::LeaveOn
        } else {
            CadenceEvent::LeaveOff
        }
    }
}
