//! Receiver tuning and tone frequency arithmetic

use serde::{Deserialize, Serialize};

/// Highest offset a station can be heard at (Hz)
pub const MAX_AUDIBLE_FREQ: f64 = 5000.0;

/// Lowest offset a station can be heard at (Hz)
pub const MIN_AUDIBLE_FREQ: f64 = -700.0;

/// Frequency programmed into a generator to make it inaudible (Hz)
pub const SILENT_FREQ: f64 = 0.1;

/// Snapshot of the receiver tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// VFO frequency in whole Hz
    pub frequency: u64,
    /// Tenths of a Hz on top of `frequency`
    pub sub_frequency: u8,
    /// BFO offset added to every tone (Hz)
    pub bfo_offset_hz: f64,
}

impl Tuning {
    /// Tuning at a whole-Hz frequency with no BFO offset
    pub fn new(frequency: u64) -> Self {
        Self {
            frequency,
            sub_frequency: 0,
            bfo_offset_hz: 0.0,
        }
    }

    /// Same tuning with a BFO offset
    pub fn with_bfo(mut self, bfo_offset_hz: f64) -> Self {
        self.bfo_offset_hz = bfo_offset_hz;
        self
    }

    /// Effective VFO frequency including the sub-Hz part
    pub fn vfo_hz(&self) -> f64 {
        self.frequency as f64 + self.sub_frequency as f64 / 10.0
    }
}

/// Audio frequency produced for a station
///
/// `(vfo − fixed) + bfo + offset`
pub fn tone_frequency(vfo_hz: f64, fixed_hz: f64, bfo_hz: f64, offset_hz: f64) -> f64 {
    (vfo_hz - fixed_hz) + bfo_hz + offset_hz
}

/// Whether an audio frequency lies in the audible window
pub fn in_audible_window(hz: f64) -> bool {
    (MIN_AUDIBLE_FREQ..=MAX_AUDIBLE_FREQ).contains(&hz)
}

/// Move a frequency to the nearest point of the tuning grid
pub fn snap_to_step(hz: f64, step_hz: f64) -> f64 {
    if step_hz <= 0.0 {
        return hz;
    }
    (hz / step_hz).round() * step_hz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vfo_includes_sub_hz() {
        let t = Tuning {
            frequency: 555_123_400,
            sub_frequency: 5,
            bfo_offset_hz: 0.0,
        };
        assert_eq!(t.vfo_hz(), 555_123_400.5);
    }

    #[test]
    fn test_tone_frequency() {
        assert_eq!(tone_frequency(555_123_400.0, 555_123_400.0, 0.0, 440.0), 440.0);
        assert_eq!(tone_frequency(555_123_500.0, 555_123_400.0, 700.0, 480.0), 1280.0);
        assert_eq!(tone_frequency(555_120_000.0, 555_123_400.0, 0.0, 440.0), -2960.0);
    }

    #[test]
    fn test_audible_window_edges() {
        assert!(in_audible_window(MAX_AUDIBLE_FREQ));
        assert!(in_audible_window(MIN_AUDIBLE_FREQ));
        assert!(!in_audible_window(5000.01));
        assert!(!in_audible_window(-700.01));
    }

    #[test]
    fn test_snap() {
        assert_eq!(snap_to_step(555_123_456.0, 100.0), 555_123_500.0);
        assert_eq!(snap_to_step(555_123_449.0, 100.0), 555_123_400.0);
        assert_eq!(snap_to_step(1234.0, 0.0), 1234.0);
    }

    #[test]
    fn test_snap_is_symmetric() {
        for offset in [0.0, 10.0, 49.0, 51.0, 99.0, 149.0, 240.0] {
            let up = snap_to_step(7_000_000.0 + offset, 100.0) - 7_000_000.0;
            let down = snap_to_step(7_000_000.0 - offset, 100.0) - 7_000_000.0;
            assert_eq!(up, -down, "offset {}", offset);
            assert!((up - offset).abs() <= 50.0);
        }
    }
}
