//! Digit-sequence cadence for DTMF dialing
//!
//! Each digit is keyed for a random tone length, released for a short
//! silence, then followed by a gap that depends on where the dialer is in the
//! number: quick for a repeated digit, a thinking pause after the country
//! code, area code and exchange, and an ordinary random gap otherwise.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::Millis;
use tracing::debug;

use crate::event::{Cadence, CadenceEvent, CadenceState};
use crate::timing::{DurationRange, TimerCore};

/// Positions after which a person dialing an 11-digit number pauses
pub const GROUP_BREAKS: [usize; 3] = [0, 3, 6];

/// Timing of a dialing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitTiming {
    /// Key-down time per digit
    pub tone: DurationRange,
    /// Key-up time after each digit
    pub silence: DurationRange,
    /// Extra gap before a repeat of the same digit
    pub repeat_gap: DurationRange,
    /// Extra gap at a group break
    pub group_gap: DurationRange,
    /// Extra gap everywhere else
    pub default_gap: DurationRange,
}

impl Default for DigitTiming {
    fn default() -> Self {
        Self {
            tone: DurationRange::new(100, 400),
            silence: DurationRange::new(50, 100),
            repeat_gap: DurationRange::fixed(100),
            group_gap: DurationRange::new(500, 1500),
            default_gap: DurationRange::new(100, 400),
        }
    }
}

/// Cadence timer that dials a digit string once per start
#[derive(Debug, Clone)]
pub struct DigitCadence {
    timing: DigitTiming,
    digits: Vec<char>,
    cursor: usize,
    core: TimerCore,
}

impl DigitCadence {
    /// Create an idle dialer for `sequence`
    pub fn new(timing: DigitTiming, sequence: &str) -> Self {
        Self {
            timing,
            digits: sequence.chars().collect(),
            cursor: 0,
            core: TimerCore::new(),
        }
    }

    /// Current timing
    pub fn timing(&self) -> DigitTiming {
        self.timing
    }

    /// Replace the digit string and rewind to the first digit
    ///
    /// The timer is left stopped; call `start` to dial it.
    pub fn set_sequence(&mut self, sequence: &str) {
        debug!("Dial sequence set to {}", sequence);
        self.digits = sequence.chars().collect();
        self.cursor = 0;
        self.core.stop();
    }

    /// The digit string being dialed
    pub fn sequence(&self) -> String {
        self.digits.iter().collect()
    }

    /// Digit under the cursor
    pub fn current_digit(&self) -> Option<char> {
        self.digits.get(self.cursor).copied()
    }

    /// Position of the digit under the cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Rewind to the first digit, keeping the repeat flag
    pub fn restart(&mut self) {
        let repeat = self.core.repeat;
        self.start(repeat);
    }

    /// Whether the owner should dial the sequence again after a pause
    pub fn is_repeating(&self) -> bool {
        self.core.repeat
    }

    fn gap_after(&self, position: usize) -> DurationRange {
        let next_same = self
            .digits
            .get(position + 1)
            .is_some_and(|next| Some(*next) == self.digits.get(position).copied());
        if next_same {
            self.timing.repeat_gap
        } else if GROUP_BREAKS.contains(&position) {
            self.timing.group_gap
        } else {
            self.timing.default_gap
        }
    }

    fn key_down<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        self.core.state = CadenceState::ToneA;
        self.core.transmitting = true;
        let tone = self.timing.tone.draw(rng);
        if self.core.next_event.is_none() {
            self.core.arm(now, tone);
        } else {
            self.core.advance(now, tone);
        }
        CadenceEvent::TurnOn
    }
}

impl Cadence for DigitCadence {
    fn start(&mut self, repeat: bool) {
        self.cursor = 0;
        self.core.start(repeat);
    }

    fn stop(&mut self) {
        self.core.stop();
    }

    fn step<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        if !self.core.active {
            return CadenceEvent::LeaveOff;
        }

        if self.core.next_event.is_none() {
            if self.digits.is_empty() {
                self.core.complete();
                return CadenceEvent::CycleEnd;
            }
            return self.key_down(now, rng);
        }

        if !self.core.due(now) {
            return self.core.hold();
        }

        match self.core.state {
            CadenceState::ToneA => {
                self.core.state = CadenceState::Silence;
                self.core.transmitting = false;
                self.core.advance(now, self.timing.silence.draw(rng));
                CadenceEvent::TurnOff
            }
            CadenceState::Silence if self.cursor + 1 < self.digits.len() => {
                self.core.state = CadenceState::InterGap;
                let gap = self.gap_after(self.cursor).draw(rng);
                self.core.advance(now, gap);
                CadenceEvent::LeaveOff
            }
            CadenceState::InterGap => {
                self.cursor += 1;
                self.key_down(now, rng)
            }
            _ => {
                self.core.complete();
                CadenceEvent::CycleEnd
            }
        }
    }

    fn state(&self) -> CadenceState {
        self.core.state
    }

    fn is_active(&self) -> bool {
        self.core.active
    }

    fn is_transmitting(&self) -> bool {
        self.core.transmitting
    }

    fn cycles(&self) -> u32 {
        self.core.cycles
    }

    fn next_event(&self) -> Option<Millis> {
        self.core.next_event
    }
}
