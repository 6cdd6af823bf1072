//! Sine-wave generator interface

use serde::{Deserialize, Serialize};

/// One of the two frequency registers of a generator
///
/// The primary register carries the tone. The secondary register is parked
/// at the silent frequency so that deselecting the primary mutes the output
/// without reprogramming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Register {
    Primary,
    Secondary,
}

impl Register {
    /// Array index for register-backed storage
    pub fn index(self) -> usize {
        match self {
            Register::Primary => 0,
            Register::Secondary => 1,
        }
    }
}

/// A hardware (or virtual) sine-wave generator
pub trait WaveGen {
    /// Program a frequency register
    fn set_frequency(&mut self, hz: f64, register: Register);

    /// Select the primary register (`true`) or the silent secondary (`false`)
    fn set_active_frequency(&mut self, active: bool);

    /// Re-send the current register contents to the device
    fn force_refresh(&mut self);

    /// Currently programmed frequency of a register
    fn frequency(&self, register: Register) -> f64;

    /// Whether the primary register is selected
    fn is_active(&self) -> bool;
}

impl<G: WaveGen + ?Sized> WaveGen for Box<G> {
    fn set_frequency(&mut self, hz: f64, register: Register) {
        (**self).set_frequency(hz, register)
    }

    fn set_active_frequency(&mut self, active: bool) {
        (**self).set_active_frequency(active)
    }

    fn force_refresh(&mut self) {
        (**self).force_refresh()
    }

    fn frequency(&self, register: Register) -> f64 {
        (**self).frequency(register)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
