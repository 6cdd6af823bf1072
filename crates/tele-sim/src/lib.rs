//! Simulation Library
//!
//! Stand-ins for the hardware a station simulator drives, so the scheduler
//! can run in tests and in the console runner:
//!
//! - **VirtualWaveGen**: a generator that tracks its registers and records
//!   every command it receives
//! - **VirtualSignalMeter**: a charge accumulator that decays between ticks
//!
//! # Example
//!
//! ```rust
//! use tele_core::{Register, WaveGen};
//! use tele_sim::{VirtualWaveGen, WaveGenCommand};
//!
//! let mut generator = VirtualWaveGen::new("AD9833 #0");
//! generator.set_frequency(440.0, Register::Primary);
//! generator.set_active_frequency(true);
//!
//! assert_eq!(generator.audible_frequency(), Some(440.0));
//! assert_eq!(generator.take_commands().len(), 2);
//! ```

pub mod generator;
pub mod meter;

pub use generator::{VirtualWaveGen, WaveGenCommand};
pub use meter::VirtualSignalMeter;
