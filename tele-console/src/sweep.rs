//! VFO trajectory for unattended runs

use serde::{Deserialize, Serialize};
use tele_core::Tuning;

/// How the VFO moves once the sweep reaches the end of its span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Stay on the start frequency
    Hold,
    /// Sweep once and park at the end of the span
    Once,
    /// Sweep back and forth across the span
    Bounce,
}

/// Sweep settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSettings {
    /// Start frequency; the simulator's VFO start when absent (Hz)
    pub start_hz: Option<u64>,
    /// Tuning rate, negative to tune down (Hz per second)
    pub rate_hz_per_s: f64,
    /// Distance covered before turning round or parking (Hz)
    pub span_hz: f64,
    pub mode: SweepMode,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            start_hz: None,
            rate_hz_per_s: 500.0,
            span_hz: 500_000.0,
            mode: SweepMode::Bounce,
        }
    }
}

/// A VFO trajectory anchored at a start frequency
#[derive(Debug, Clone, Copy)]
pub struct Sweep {
    start_hz: f64,
    settings: SweepSettings,
}

impl Sweep {
    pub fn new(settings: SweepSettings, default_start_hz: u64) -> Self {
        Self {
            start_hz: settings.start_hz.unwrap_or(default_start_hz) as f64,
            settings,
        }
    }

    /// Offset from the start frequency after `elapsed_ms` (Hz)
    pub fn offset_at(&self, elapsed_ms: u64) -> f64 {
        let rate = self.settings.rate_hz_per_s;
        let span = self.settings.span_hz.abs();
        let travelled = rate.abs() * elapsed_ms as f64 / 1000.0;
        let distance = match self.settings.mode {
            SweepMode::Hold => 0.0,
            SweepMode::Once => travelled.min(span),
            SweepMode::Bounce if span > 0.0 => {
                let phase = travelled % (2.0 * span);
                if phase <= span {
                    phase
                } else {
                    2.0 * span - phase
                }
            }
            SweepMode::Bounce => 0.0,
        };
        distance.copysign(rate)
    }

    /// Receiver tuning after `elapsed_ms`, resolved to tenths of a Hz
    pub fn tuning_at(&self, elapsed_ms: u64, bfo_offset_hz: f64) -> Tuning {
        let vfo = (self.start_hz + self.offset_at(elapsed_ms)).max(0.0);
        let tenths = (vfo * 10.0).round() as u64;
        Tuning {
            frequency: tenths / 10,
            sub_frequency: (tenths % 10) as u8,
            bfo_offset_hz,
        }
    }
}
