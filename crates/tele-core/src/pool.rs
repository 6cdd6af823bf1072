//! Fixed pool of wave generators
//!
//! Slots are handed out first-free and tagged with the station that took
//! them. The pool never blocks and never grows.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PoolError;
use crate::wavegen::WaveGen;

/// Number of generators fitted to the reference hardware
pub const MAX_GENERATORS: usize = 4;

/// Unique identifier for a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub u32);

impl StationId {
    /// Get the raw id value
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a generator slot
///
/// Only produced by [`WaveGenPool::get_realizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Position of the slot in the pool
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Slot<G> {
    generator: G,
    owner: Option<StationId>,
}

/// Pool of generator slots
pub struct WaveGenPool<G> {
    slots: Vec<Slot<G>>,
}

impl<G: WaveGen> WaveGenPool<G> {
    /// Create a pool owning the given generators
    ///
    /// Pools are limited to 256 slots; any extra generators are dropped.
    pub fn new(generators: Vec<G>) -> Self {
        let slots = generators
            .into_iter()
            .take(u8::MAX as usize + 1)
            .map(|generator| Slot {
                generator,
                owner: None,
            })
            .collect();
        Self { slots }
    }

    /// Take the first free slot for `owner`
    ///
    /// Returns `None` when every slot is busy.
    pub fn get_realizer(&mut self, owner: StationId) -> Option<SlotIndex> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.owner.is_none())?;
        slot.owner = Some(owner);
        debug!("Generator {} assigned to station {}", index, owner);
        Some(SlotIndex(index as u8))
    }

    /// Release a slot held by `owner`
    ///
    /// `None` and already-free slots are no-ops. A slot held by another
    /// station is left untouched.
    pub fn free_realizer(
        &mut self,
        slot: Option<SlotIndex>,
        owner: StationId,
    ) -> Result<(), PoolError> {
        let Some(slot) = slot else {
            return Ok(());
        };
        let capacity = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot.as_usize())
            .ok_or(PoolError::InvalidSlot { slot, capacity })?;

        match entry.owner {
            None => {
                debug!("Generator {} already free (station {})", slot, owner);
                Ok(())
            }
            Some(holder) if holder == owner => {
                entry.owner = None;
                debug!("Generator {} released by station {}", slot, owner);
                Ok(())
            }
            Some(holder) => {
                warn!(
                    "Station {} tried to release generator {} held by station {}",
                    owner, slot, holder
                );
                Err(PoolError::OwnerMismatch {
                    slot,
                    owner: holder,
                    requester: owner,
                })
            }
        }
    }

    /// Direct access to a generator
    pub fn access_realizer(&mut self, slot: SlotIndex) -> Option<&mut G> {
        self.slots
            .get_mut(slot.as_usize())
            .map(|entry| &mut entry.generator)
    }

    /// Read-only access to a generator
    pub fn realizer(&self, slot: SlotIndex) -> Option<&G> {
        self.slots.get(slot.as_usize()).map(|entry| &entry.generator)
    }

    /// Iterate over every generator, busy or not
    pub fn generators(&self) -> impl Iterator<Item = &G> {
        self.slots.iter().map(|entry| &entry.generator)
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of busy slots
    pub fn busy_count(&self) -> usize {
        self.slots.iter().filter(|s| s.owner.is_some()).count()
    }

    /// Number of free slots
    pub fn free_count(&self) -> usize {
        self.capacity() - self.busy_count()
    }

    /// Station holding a slot, if any
    pub fn owner(&self, slot: SlotIndex) -> Option<StationId> {
        self.slots.get(slot.as_usize()).and_then(|s| s.owner)
    }

    /// Owner of every slot in pool order
    pub fn assignments(&self) -> Vec<Option<StationId>> {
        self.slots.iter().map(|s| s.owner).collect()
    }
}
