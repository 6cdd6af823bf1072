//! Virtual signal meter
//!
//! Charge pulses from stations pile up and leak away over time, like the
//! capacitor behind the panel meter. Negative pulses (a station locked
//! inside the lock window) count by magnitude.

use tele_core::{SignalMeter, MAX_CHARGE};

/// Full-scale reading
pub const FULL_SCALE: u32 = 100;

/// Simulated panel meter
#[derive(Debug, Clone, Default)]
pub struct VirtualSignalMeter {
    level: u32,
    peak: u32,
    pulses: u32,
    locked_pulses: u32,
}

impl VirtualSignalMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reading, `0..=FULL_SCALE`
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Highest reading since the last reset
    pub fn peak(&self) -> u32 {
        self.peak
    }

    /// Pulses received since the last reset
    pub fn pulses(&self) -> u32 {
        self.pulses
    }

    /// Pulses that came from a station inside the lock window
    pub fn locked_pulses(&self) -> u32 {
        self.locked_pulses
    }

    /// Leak `amount` of charge
    pub fn decay(&mut self, amount: u32) {
        self.level = self.level.saturating_sub(amount);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SignalMeter for VirtualSignalMeter {
    fn add_charge(&mut self, amount: i32) {
        let magnitude = amount.unsigned_abs().min(MAX_CHARGE as u32);
        self.pulses = self.pulses.saturating_add(1);
        if amount < 0 {
            self.locked_pulses = self.locked_pulses.saturating_add(1);
        }
        self.level = (self.level + magnitude).min(FULL_SCALE);
        self.peak = self.peak.max(self.level);
    }
}
