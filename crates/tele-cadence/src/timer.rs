//! A cadence of any flavor behind one type
//!
//! Stations hold a `CadenceTimer` so that an exchange line can switch from
//! dial tone to busy, or from the error sequence to a dead line, by
//! retargeting the timer it already has.

use rand::Rng;
use tele_core::Millis;

use crate::digits::DigitCadence;
use crate::event::{Cadence, CadenceEvent, CadenceState};
use crate::morse::MorseCadence;
use crate::stepped::{SteppedCadence, ToneStep};
use crate::two_tone::{TwoToneCadence, TwoToneProfile};

/// Any cadence flavor
#[derive(Debug, Clone)]
pub enum CadenceTimer {
    TwoTone(TwoToneCadence),
    Digits(DigitCadence),
    Morse(MorseCadence),
    Stepped(SteppedCadence),
}

impl CadenceTimer {
    /// Switch to a two-tone profile
    ///
    /// A two-tone timer is reconfigured in place; any other flavor is
    /// replaced. Either way the timer is left stopped.
    pub fn retarget_two_tone(&mut self, profile: TwoToneProfile) {
        match self {
            CadenceTimer::TwoTone(cadence) => {
                cadence.configure(profile);
                cadence.stop();
            }
            other => *other = CadenceTimer::TwoTone(TwoToneCadence::new(profile)),
        }
    }

    /// Switch to a stepped sequence, in place when already stepped
    ///
    /// The timer is left stopped.
    pub fn retarget_steps(&mut self, steps: &[ToneStep]) {
        match self {
            CadenceTimer::Stepped(cadence) => cadence.set_steps(steps),
            other => *other = CadenceTimer::Stepped(SteppedCadence::new(steps)),
        }
    }

    /// Audio tone dictated by the cadence itself, for stepped sequences
    pub fn current_tone(&self) -> Option<f64> {
        match self {
            CadenceTimer::Stepped(cadence) => cadence.current_tone(),
            _ => None,
        }
    }

    /// Digit under the cursor, for dialing sequences
    pub fn current_digit(&self) -> Option<char> {
        match self {
            CadenceTimer::Digits(cadence) => cadence.current_digit(),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($timer:expr, $c:ident => $body:expr) => {
        match $timer {
            CadenceTimer::TwoTone($c) => $body,
            CadenceTimer::Digits($c) => $body,
            CadenceTimer::Morse($c) => $body,
            CadenceTimer::Stepped($c) => $body,
        }
    };
}

impl Cadence for CadenceTimer {
    fn start(&mut self, repeat: bool) {
        dispatch!(self, c => c.start(repeat))
    }

    fn stop(&mut self) {
        dispatch!(self, c => c.stop())
    }

    fn step<R: Rng>(&mut self, now: Millis, rng: &mut R) -> CadenceEvent {
        dispatch!(self, c => c.step(now, rng))
    }

    fn state(&self) -> CadenceState {
        dispatch!(self, c => c.state())
    }

    fn is_active(&self) -> bool {
        dispatch!(self, c => c.is_active())
    }

    fn is_transmitting(&self) -> bool {
        dispatch!(self, c => c.is_transmitting())
    }

    fn cycles(&self) -> u32 {
        dispatch!(self, c => c.cycles())
    }

    fn next_event(&self) -> Option<Millis> {
        dispatch!(self, c => c.next_event())
    }
}

impl From<TwoToneCadence> for CadenceTimer {
    fn from(c: TwoToneCadence) -> Self {
        CadenceTimer::TwoTone(c)
    }
}

impl From<DigitCadence> for CadenceTimer {
    fn from(c: DigitCadence) -> Self {
        CadenceTimer::Digits(c)
    }
}

impl From<MorseCadence> for CadenceTimer {
    fn from(c: MorseCadence) -> Self {
        CadenceTimer::Morse(c)
    }
}

impl From<SteppedCadence> for CadenceTimer {
    fn from(c: SteppedCadence) -> Self {
        CadenceTimer::Stepped(c)
    }
}
