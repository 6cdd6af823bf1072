//! Telephone network cadences: ringback, busy, reorder and dial tone
//!
//! One timer type covers all four. Switching between them swaps the
//! profile in place with [`TwoToneCadence::configure`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_core::Millis;
use tracing::debug;

use crate::event::{Cadence, CadenceEvent, CadenceState};
use crate::timing::{DurationRange, TimerCore};

/// On/off durations of a two-tone cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoToneProfile {
    /// First tone phase (ms)
    pub tone_a_ms: u32,
    /// Optional second tone phase (ms), 0 to skip
    pub tone_b_ms: u32,
    /// Silence after the tones
    pub silence: DurationRange,
}

impl TwoToneProfile {
    /// North American ringback: 2 s on, 4 s off
    pub const RINGBACK: Self = Self {
        tone_a_ms: 2000,
        tone_b_ms: 0,
        silence: DurationRange::fixed(4000),
    };

    /// Busy: 0.5 s on, 0.5 s off
    pub const BUSY: Self = Self {
        tone_a_ms: 500,
        tone_b_ms: 0,
        silence: DurationRange::fixed(500),
    };

    /// Reorder (fast busy): 0.25 s on, 0.25 s off
    pub const REORDER: Self = Self {
        tone_a_ms: 250,
        tone_b_ms: 0,
        silence: DurationRange::fixed(250),
    };

    /// Dial tone: 15 s on with a 2 s break
    pub const DIAL_TONE: Self = Self {
        tone_a_ms: 15000,
        tone_b_ms: 0,
        silence: DurationRange::fixed(2000),
    };
}

impl Default for TwoToneProfile {
    fn default() -> Self {
        Self::RINGBACK
    }
}

/// Cadence timer for two-phase telephone tones
#[derive(Debug, Clone)]
pub struct TwoToneCadence {
    profile: TwoToneProfile,
    core: TimerCore,
}

impl TwoToneCadence {
    /// Create an idle timer
    pub fn new(profile: TwoToneProfile) -> Self {
        Self {
            profile,
            core: TimerCore::new(),
        }
    }

    /// Current profile
    pub fn profile(&self) -> TwoToneProfile {
        self.profile
    }

    /// Swap durations without rebuilding the timer
    ///
    /// A running cadence keeps its current deadline; the new durations apply
    /// from the next phase on.
    pub fn configure(&mut self, profile: TwoToneProfile) {
        debug!(
            "Cadence retargeted: {}ms/{}ms on, {}..{}ms off",
            profile.tone_a_ms, profile.tone_b_ms, profile.silence.min_ms, profile.silence.max_ms
        );
        self.profile = profile;
    }

    /// Whether the timer repeats after the silence
    pub fn is_repeating(&self) -> bool {
        self.core.repeat
    }

    fn enter_silence<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        self.core.state = CadenceState::Silence;
        self.core.transmitting = false;
        self.core.advance(now, self.profile.silence.draw(rng));
        CadenceEvent::TurnOff
    }
}

impl Cadence for TwoToneCadence {
    fn start(&mut self, repeat: bool) {
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
            self.core.state = CadenceState::ToneA;
            self.core.transmitting = true;
            self.core.arm(now, self.profile.tone_a_ms);
            return CadenceEvent::TurnOn;
        }

        if !self.core.due(now) {
            return self.core.hold();
        }

        match self.core.state {
            CadenceState::ToneA if self.profile.tone_b_ms > 0 => {
                self.core.state = CadenceState::ToneB;
                self.core.advance(now, self.profile.tone_b_ms);
                CadenceEvent::ChangeFreq
            }
            CadenceState::ToneA | CadenceState::ToneB => self.enter_silence(now, rng),
            CadenceState::Silence if self.core.repeat => {
                self.core.cycles = self.core.cycles.wrapping_add(1);
                self.core.state = CadenceState::ToneA;
                self.core.transmitting = true;
                self.core.advance(now, self.profile.tone_a_ms);
                CadenceEvent::TurnOn
            }
            _ => {
                self.core.complete();
                CadenceEvent::LeaveOff
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
