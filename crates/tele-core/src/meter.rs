//! Signal meter charge pulses
//!
//! Transmitting stations push charge into the S-meter. The closer the
//! receiver is tuned, the bigger the pulse; inside the lock window the pulse
//! is negative, which the meter reads as a locked carrier.

/// Sink for signal-strength charge
pub trait SignalMeter {
    /// Add (or with a negative amount, drain) charge
    fn add_charge(&mut self, amount: i32);
}

/// Meter that discards every pulse
impl SignalMeter for () {
    fn add_charge(&mut self, _amount: i32) {}
}

/// Span over which a station contributes charge (Hz)
pub const CHARGE_RANGE_HZ: f64 = 5000.0;

/// Tuning error inside which the pulse is inverted (Hz)
pub const LOCK_WINDOW_HZ: f64 = 50.0;

/// Pulse size when tuned exactly onto a station
pub const MAX_CHARGE: i32 = 12;

/// Charge a station at `fixed_hz` contributes with the VFO at `vfo_hz`
///
/// Zero outside [`CHARGE_RANGE_HZ`], growing linearly to [`MAX_CHARGE`] at
/// zero offset and never below 1 while in range.
pub fn signal_charge(fixed_hz: f64, vfo_hz: f64) -> i32 {
    let diff = (vfo_hz - fixed_hz).abs();
    if diff > CHARGE_RANGE_HZ {
        return 0;
    }
    let scaled = (CHARGE_RANGE_HZ - diff) / CHARGE_RANGE_HZ * MAX_CHARGE as f64;
    let charge = (scaled.round() as i32).max(1);
    if diff <= LOCK_WINDOW_HZ {
        -charge
    } else {
        charge
    }
}
