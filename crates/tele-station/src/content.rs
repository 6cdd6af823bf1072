//! Randomized station content: phone numbers, callsigns and exchange signals

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tele_cadence::{
    CadenceTimer, SteppedCadence, ToneStep, TwoToneCadence, TwoToneProfile, ERROR_TONE, QUIET,
};

/// Geographic area codes used for generated numbers
pub const AREA_CODES: [u16; 127] = [
    212, 213, 214, 215, 216, 217, 301, 302, 303, 304, 305, 307, 309, 312, 313, 314, 315, 316,
    317, 318, 319, 401, 402, 403, 404, 405, 406, 407, 408, 409, 410, 412, 413, 414, 415, 416,
    417, 418, 419, 501, 502, 503, 504, 505, 507, 508, 509, 510, 512, 513, 514, 515, 516, 517,
    518, 519, 601, 602, 603, 604, 605, 606, 607, 608, 609, 610, 612, 613, 614, 615, 616, 617,
    618, 619, 701, 702, 703, 704, 705, 706, 707, 708, 709, 712, 713, 714, 715, 716, 717, 718,
    719, 801, 802, 803, 804, 805, 806, 807, 808, 809, 810, 812, 813, 814, 815, 816, 817, 818,
    819, 901, 902, 903, 904, 905, 906, 907, 908, 909, 910, 912, 913, 914, 915, 916, 917, 918,
    919,
];

/// Central office codes never handed out
const RESERVED_EXCHANGES: [u16; 4] = [555, 911, 411, 611];

/// Slowest and fastest CW operators
pub const WPM_RANGE: std::ops::RangeInclusive<u32> = 8..=25;

/// Speed wander applied when an operator moves
pub const WPM_DRIFT: i32 = 4;

/// An 11-digit North American number: `1` + area code + exchange + line
pub fn nanp_number<R: Rng>(rng: &mut R) -> String {
    let area = AREA_CODES[rng.random_range(0..AREA_CODES.len())];

    let exchange = loop {
        let candidate = rng.random_range(2..=9u16) * 100 + rng.random_range(0..100u16);
        if !RESERVED_EXCHANGES.contains(&candidate) {
            break candidate;
        }
    };

    let line: [u8; 4] = loop {
        let digits = [
            rng.random_range(0..10u8),
            rng.random_range(0..10u8),
            rng.random_range(0..10u8),
            rng.random_range(0..10u8),
        ];
        let all_same = digits.iter().all(|d| *d == digits[0]);
        if !all_same && digits != [1, 2, 3, 4] {
            break digits;
        }
    };

    format!(
        "1{:03}{:03}{}{}{}{}",
        area, exchange, line[0], line[1], line[2], line[3]
    )
}

/// A fictional amateur callsign such as `K55QR`
///
/// The doubled digit keeps generated calls out of the real allocation.
pub fn callsign<R: Rng>(rng: &mut R) -> String {
    const PREFIXES: [char; 3] = ['W', 'K', 'N'];
    let prefix = PREFIXES[rng.random_range(0..PREFIXES.len())];
    let digit = rng.random_range(0..10u8);
    let suffix_len = rng.random_range(2..=3);

    let mut call = format!("{}{}{}", prefix, digit, digit);
    for _ in 0..suffix_len {
        call.push(char::from(b'A' + rng.random_range(0..26u8)));
    }
    call
}

/// Standard CQ call for a callsign
pub fn cq_message(callsign: &str) -> String {
    format!("CQ CQ DE {} {} K", callsign, callsign)
}

/// Keying speed after an operator change
pub fn drift_wpm<R: Rng>(rng: &mut R, base_wpm: u32) -> u32 {
    let drifted = base_wpm as i32 + rng.random_range(-WPM_DRIFT..=WPM_DRIFT);
    (drifted.max(*WPM_RANGE.start() as i32) as u32).min(*WPM_RANGE.end())
}

/// Dial tone as heard on an exchange line: 30 s on, 2 s off
pub const EXCHANGE_DIAL_TONE: TwoToneProfile = TwoToneProfile {
    tone_a_ms: 30_000,
    tone_b_ms: 0,
    silence: tele_cadence::DurationRange::fixed(2000),
};

/// Call-progress signal an exchange line is currently playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExchangeSignal {
    DialTone,
    Ringing,
    Busy,
    Reorder,
    ErrorTone,
    Silent,
}

impl ExchangeSignal {
    /// Pick a signal with the weights of a typical exchange
    ///
    /// Dial tone 30 %, busy 20 %, ringing 20 %, reorder 15 %, error tone
    /// 10 %, silent 5 %.
    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..100u8) {
            0..=29 => ExchangeSignal::DialTone,
            30..=49 => ExchangeSignal::Busy,
            50..=69 => ExchangeSignal::Ringing,
            70..=84 => ExchangeSignal::Reorder,
            85..=94 => ExchangeSignal::ErrorTone,
            _ => ExchangeSignal::Silent,
        }
    }

    /// Fixed dual-tone pair, if the signal has one
    pub fn tone_pair(self) -> Option<(f64, f64)> {
        match self {
            ExchangeSignal::DialTone => Some((350.0, 440.0)),
            ExchangeSignal::Ringing => Some((440.0, 480.0)),
            ExchangeSignal::Busy | ExchangeSignal::Reorder => Some((480.0, 620.0)),
            ExchangeSignal::ErrorTone | ExchangeSignal::Silent => None,
        }
    }

    /// Two-tone cadence profile, if the signal is a call-progress tone
    pub fn profile(self) -> Option<TwoToneProfile> {
        match self {
            ExchangeSignal::DialTone => Some(EXCHANGE_DIAL_TONE),
            ExchangeSignal::Ringing => Some(TwoToneProfile::RINGBACK),
            ExchangeSignal::Busy => Some(TwoToneProfile::BUSY),
            ExchangeSignal::Reorder => Some(TwoToneProfile::REORDER),
            ExchangeSignal::ErrorTone | ExchangeSignal::Silent => None,
        }
    }

    /// Step sequence for signals that are not a tone pair
    pub fn steps(self) -> Option<&'static [ToneStep]> {
        match self {
            ExchangeSignal::ErrorTone => Some(&ERROR_TONE),
            ExchangeSignal::Silent => Some(&QUIET),
            _ => None,
        }
    }

    /// Fresh (stopped) cadence for this signal
    pub fn cadence(self) -> CadenceTimer {
        match self.profile() {
            Some(profile) => TwoToneCadence::new(profile).into(),
            None => SteppedCadence::new(self.steps().unwrap_or(&QUIET)).into(),
        }
    }

    /// Point an existing timer at this signal, reusing it when the flavor
    /// already matches; the timer is left stopped
    pub fn retarget(self, timer: &mut CadenceTimer) {
        match self.profile() {
            Some(profile) => timer.retarget_two_tone(profile),
            None => timer.retarget_steps(self.steps().unwrap_or(&QUIET)),
        }
    }
}

impl fmt::Display for ExchangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeSignal::DialTone => "DIAL_TONE",
            ExchangeSignal::Ringing => "RINGING",
            ExchangeSignal::Busy => "BUSY",
            ExchangeSignal::Reorder => "REORDER",
            ExchangeSignal::ErrorTone => "ERROR_TONE",
            ExchangeSignal::Silent => "SILENT",
        };
        f.write_str(name)
    }
}
