//! Station kinds and their per-kind constants

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tele_cadence::TwoToneProfile;

/// Audio pitch of a zero-beat CW carrier before BFO offset (Hz)
pub const MORSE_PITCH_HZ: f64 = 700.0;

/// What a station transmits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// 440 + 480 Hz, 2 s on / 4 s off
    Ringback,
    /// 480 + 620 Hz, 0.5 s on / 0.5 s off
    Busy,
    /// 480 + 620 Hz, 0.25 s on / 0.25 s off
    Reorder,
    /// 350 + 440 Hz, near continuous
    DialTone,
    /// Dials phone numbers with DTMF pairs
    Dtmf,
    /// Calls CQ in Morse
    MorseCq,
    /// Exchange line cycling through call-progress signals
    Exchange,
}

/// What a station does with its generators while it is silent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Retention {
    /// Keep generators through the off-phase of the cadence
    KeepThroughSilence,
    /// Release after every sequence and re-acquire for the next one
    ReleaseBetweenCycles,
}

impl SignalKind {
    /// Every kind, in display order
    pub const ALL: [SignalKind; 7] = [
        SignalKind::Ringback,
        SignalKind::Busy,
        SignalKind::Reorder,
        SignalKind::DialTone,
        SignalKind::Dtmf,
        SignalKind::MorseCq,
        SignalKind::Exchange,
    ];

    /// Generators needed to play this kind
    pub fn required_generators(self) -> usize {
        match self {
            SignalKind::MorseCq => 1,
            _ => 2,
        }
    }

    /// Fixed tone pair for call-progress kinds
    pub fn tone_pair(self) -> Option<(f64, f64)> {
        match self {
            SignalKind::Ringback => Some((440.0, 480.0)),
            SignalKind::Busy | SignalKind::Reorder => Some((480.0, 620.0)),
            SignalKind::DialTone => Some((350.0, 440.0)),
            _ => None,
        }
    }

    /// Cadence for call-progress kinds
    pub fn profile(self) -> Option<TwoToneProfile> {
        match self {
            SignalKind::Ringback => Some(TwoToneProfile::RINGBACK),
            SignalKind::Busy => Some(TwoToneProfile::BUSY),
            SignalKind::Reorder => Some(TwoToneProfile::REORDER),
            SignalKind::DialTone => Some(TwoToneProfile::DIAL_TONE),
            _ => None,
        }
    }

    pub fn retention(self) -> Retention {
        match self {
            SignalKind::Dtmf | SignalKind::MorseCq => Retention::ReleaseBetweenCycles,
            _ => Retention::KeepThroughSilence,
        }
    }

    /// Cycles an operator sits through before moving frequency
    ///
    /// `None` for kinds that never relocate.
    pub fn patience(self) -> Option<RangeInclusive<u32>> {
        match self {
            SignalKind::Ringback
            | SignalKind::Busy
            | SignalKind::Reorder
            | SignalKind::DialTone => Some(30..=59),
            SignalKind::Dtmf => Some(3..=10),
            SignalKind::MorseCq => Some(3..=8),
            SignalKind::Exchange => None,
        }
    }

    /// Short label for logs
    pub fn label(self) -> &'static str {
        match self {
            SignalKind::Ringback => "RING",
            SignalKind::Busy => "BUSY",
            SignalKind::Reorder => "REORDER",
            SignalKind::DialTone => "DIAL",
            SignalKind::Dtmf => "DTMF",
            SignalKind::MorseCq => "CQ",
            SignalKind::Exchange => "EXCH",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
