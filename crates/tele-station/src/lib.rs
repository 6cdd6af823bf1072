//! Simulated Stations
//!
//! Each station plays one kind of signal on a fixed carrier frequency by
//! driving pooled wave generators from a cadence timer:
//!
//! - **Call progress**: ringback, busy, reorder and dial tone
//! - **DTMF**: dials generated (or fixed) phone numbers
//! - **Morse CQ**: calls CQ with a generated callsign
//! - **Exchange**: a line that wanders between call-progress signals
//!
//! Stations never talk to hardware directly. They borrow generators from a
//! [`tele_core::WaveGenPool`] through their realization and give them back
//! when they go quiet or lose priority.
//!
//! # Example
//!
//! ```rust
//! use tele_core::{StationId, Tuning, WaveGenPool};
//! use tele_sim::VirtualWaveGen;
//! use tele_station::{SignalKind, Station};
//!
//! let mut pool = WaveGenPool::new(VirtualWaveGen::bank("gen", 4));
//! let mut busy = Station::new(StationId(1), SignalKind::Busy, 7_000_000.0, 42);
//!
//! // Tuned 500 Hz above the carrier: 980 Hz and 1120 Hz
//! busy.update(&mut pool, &Tuning::new(7_000_500));
//! assert!(busy.begin(&mut pool, 0));
//! assert_eq!(pool.busy_count(), 2);
//! assert_eq!(busy.frequency(), 980.0);
//!
//! busy.end(&mut pool);
//! assert_eq!(pool.free_count(), 4);
//! ```

pub mod content;
pub mod dtmf;
pub mod signal;
pub mod station;

pub use content::{callsign, cq_message, nanp_number, ExchangeSignal};
pub use dtmf::dtmf_tones;
pub use signal::{Retention, SignalKind, MORSE_PITCH_HZ};
pub use station::{Station, StationState, StationSummary};
