//! Scheduler events
//!
//! Every decision the manager takes about a station is recorded here and
//! handed out through `StationManager::drain_events`.

use tele_core::StationId;

/// Events emitted by the station manager
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerEvent {
    // -------------------------------------------------------------------------
    // Generator allocation
    // -------------------------------------------------------------------------
    /// A station won generators and is now audible
    StationPromoted { id: StationId, distance_hz: f64 },

    /// A station is in range but lost out to closer stations
    StationSilenced { id: StationId, distance_hz: f64 },

    /// An audible station left the audible range
    StationDemoted { id: StationId },

    // -------------------------------------------------------------------------
    // Pipelining
    // -------------------------------------------------------------------------
    /// A station was moved to a new carrier ahead of the tuning direction
    StationRelocated { id: StationId, from_hz: f64, to_hz: f64 },

    /// A station drifted out of the lookahead and was parked
    StationDormant { id: StationId },

    /// The pipeline re-centred on the VFO
    PipelineReallocated { center_hz: f64, direction: i8 },
}
