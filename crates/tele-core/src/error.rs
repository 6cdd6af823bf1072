//! Error types for the generator pool

use thiserror::Error;

use crate::pool::{SlotIndex, StationId};

/// Misuse of the generator pool
///
/// Running out of generators is not an error; these only report calls that
/// would corrupt ownership.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Slot index outside the pool
    #[error("generator slot {slot} out of range (pool has {capacity})")]
    InvalidSlot {
        /// Offending index
        slot: SlotIndex,
        /// Number of slots in the pool
        capacity: usize,
    },

    /// Release attempted by a station that does not hold the slot
    #[error("generator slot {slot} is held by station {owner}, not station {requester}")]
    OwnerMismatch {
        /// Slot being released
        slot: SlotIndex,
        /// Station actually holding it
        owner: StationId,
        /// Station that asked for the release
        requester: StationId,
    },
}
