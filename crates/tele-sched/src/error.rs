//! Error types for the scheduler

use tele_station::SignalKind;
use thiserror::Error;

/// Problems found in a simulator configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Nothing to simulate
    #[error("configuration has no stations")]
    NoStations,

    /// No generators to play anything on
    #[error("configuration has no wave generators")]
    NoGenerators,

    /// The generator list handed in does not match the configuration
    #[error("configuration expects {expected} generators, got {actual}")]
    GeneratorCountMismatch { expected: usize, actual: usize },

    /// A station could never be realized
    #[error("station {index} ({kind}) needs {required} generators, only {available} fitted")]
    StationNeedsMoreGenerators {
        index: usize,
        kind: SignalKind,
        required: usize,
        available: usize,
    },

    /// A CW station with no speed
    #[error("station {index} has a keying speed of 0 wpm")]
    ZeroWpm { index: usize },

    /// A carrier that is not a usable frequency
    #[error("station {index} has an invalid frequency: {hz}")]
    InvalidFrequency { index: usize, hz: f64 },
}
