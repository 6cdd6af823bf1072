//! Station Scheduler
//!
//! Decides which of many configured stations get to use the handful of wave
//! generators fitted, based on how close each one is to the VFO.
//!
//! # Station states
//!
//! - **Dormant**: parked, not tracked
//! - **Active**: on a frequency but too far away to hear
//! - **Audible**: in range and holding generators
//! - **Silent**: in range but outranked by closer stations
//!
//! # Dynamic pipelining
//!
//! As the operator tunes, stations left behind are parked and later moved
//! onto free spots ahead of the tuning direction, so a handful of stations
//! can populate an arbitrarily long sweep.
//!
//! # Example
//!
//! ```rust
//! use tele_core::Tuning;
//! use tele_sched::{SimulatorConfig, StationManager};
//! use tele_sim::{VirtualSignalMeter, VirtualWaveGen};
//!
//! let config = SimulatorConfig::default();
//! let generators = VirtualWaveGen::bank("gen", config.generators);
//! let mut manager = StationManager::from_config(&config, generators).unwrap();
//! let mut meter = VirtualSignalMeter::new();
//!
//! let tuning = Tuning::new(config.vfo_start_hz);
//! for now in (0..1000).step_by(10) {
//!     manager.tick(now, &tuning, &mut meter);
//! }
//! assert!(manager.audible_station_count() > 0);
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod manager;
pub mod pipeline;

pub use config::{PipelineConfig, SimulatorConfig, StationConfig};
pub use error::ConfigError;
pub use events::SchedulerEvent;
pub use manager::StationManager;
pub use pipeline::PipelineState;
