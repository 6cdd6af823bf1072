//! Telephony Simulator Core
//!
//! This crate provides the resource layer shared by every station in the
//! simulator:
//!
//! - **WaveGenPool**: a fixed set of sine-wave generators handed out one slot
//!   at a time
//! - **Realization**: all-or-nothing acquisition of the slots a station needs
//! - **Frequency math**: VFO/BFO arithmetic and the audible window
//! - **Clock helpers**: wraparound-safe deadline comparisons on `Millis`
//!
//! Nothing here blocks. Acquisition failure is an ordinary `false` and the
//! caller is expected to retry on a later tick.
//!
//! # Example
//!
//! ```rust
//! use tele_core::{Realization, StationId, WaveGen, WaveGenPool, Register};
//!
//! #[derive(Default)]
//! struct Null {
//!     active: bool,
//!     regs: [f64; 2],
//! }
//!
//! impl WaveGen for Null {
//!     fn set_frequency(&mut self, hz: f64, register: Register) {
//!         self.regs[register.index()] = hz;
//!     }
//!     fn set_active_frequency(&mut self, active: bool) {
//!         self.active = active;
//!     }
//!     fn force_refresh(&mut self) {}
//!     fn frequency(&self, register: Register) -> f64 {
//!         self.regs[register.index()]
//!     }
//!     fn is_active(&self) -> bool {
//!         self.active
//!     }
//! }
//!
//! let mut pool = WaveGenPool::new((0..4).map(|_| Null::default()).collect());
//! let mut ring = Realization::new(StationId(1), 2);
//! assert!(ring.begin(&mut pool));
//! assert_eq!(pool.free_count(), 2);
//! ring.end(&mut pool);
//! assert_eq!(pool.free_count(), 4);
//! ```

pub mod clock;
pub mod error;
pub mod meter;
pub mod pool;
pub mod realization;
pub mod tuning;
pub mod wavegen;

pub use clock::Millis;
pub use error::PoolError;
pub use meter::{signal_charge, SignalMeter, CHARGE_RANGE_HZ, LOCK_WINDOW_HZ, MAX_CHARGE};
pub use pool::{SlotIndex, StationId, WaveGenPool, MAX_GENERATORS};
pub use realization::{Realization, MAX_REALIZERS_PER_STATION};
pub use tuning::{
    in_audible_window, snap_to_step, tone_frequency, Tuning, MAX_AUDIBLE_FREQ, MIN_AUDIBLE_FREQ,
    SILENT_FREQ,
};
pub use wavegen::{Register, WaveGen};
