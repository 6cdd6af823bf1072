//! All-or-nothing acquisition of generator slots
//!
//! A station that needs two generators must never end up holding one. The
//! acquisition runs into a scratch array and only commits when every slot
//! was obtained; otherwise everything taken in the attempt goes back to the
//! pool before `begin` returns.

use tracing::{debug, warn};

use crate::pool::{SlotIndex, StationId, WaveGenPool};
use crate::wavegen::WaveGen;

/// Most generators a single station may hold
pub const MAX_REALIZERS_PER_STATION: usize = 4;

/// The set of generator slots held by one station
#[derive(Debug, Clone)]
pub struct Realization {
    owner: StationId,
    required: usize,
    slots: [Option<SlotIndex>; MAX_REALIZERS_PER_STATION],
}

impl Realization {
    /// Create an unprovisioned realization needing `required` slots
    ///
    /// `required` is clamped to `1..=MAX_REALIZERS_PER_STATION`.
    pub fn new(owner: StationId, required: usize) -> Self {
        Self {
            owner,
            required: required.clamp(1, MAX_REALIZERS_PER_STATION),
            slots: [None; MAX_REALIZERS_PER_STATION],
        }
    }

    /// Station the slots are tagged with
    pub fn owner(&self) -> StationId {
        self.owner
    }

    /// Acquire every required slot, or none
    ///
    /// Returns `true` when the station is fully provisioned. Calling this
    /// again while provisioned is a no-op that returns `true`.
    pub fn begin<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) -> bool {
        if self.has_all_realizers() {
            return true;
        }
        // Anything left over from an interrupted attempt goes back first.
        self.end(pool);

        let mut scratch = [None; MAX_REALIZERS_PER_STATION];
        for i in 0..self.required {
            match pool.get_realizer(self.owner) {
                Some(slot) => scratch[i] = Some(slot),
                None => {
                    for taken in scratch.iter().take(i) {
                        if let Err(e) = pool.free_realizer(*taken, self.owner) {
                            warn!("Rollback for station {} failed: {}", self.owner, e);
                        }
                    }
                    debug!(
                        "Station {} could not get {} generators ({} free)",
                        self.owner,
                        self.required,
                        pool.free_count()
                    );
                    return false;
                }
            }
        }

        self.slots = scratch;
        true
    }

    /// Release every held slot
    ///
    /// Safe to call when nothing is held.
    pub fn end<G: WaveGen>(&mut self, pool: &mut WaveGenPool<G>) {
        for slot in self.slots.iter_mut() {
            if let Some(index) = slot.take() {
                if let Err(e) = pool.free_realizer(Some(index), self.owner) {
                    warn!("Station {} release failed: {}", self.owner, e);
                }
            }
        }
    }

    /// Slot held at position `index`, if any
    pub fn realizer(&self, index: usize) -> Option<SlotIndex> {
        self.slots.get(index).copied().flatten()
    }

    /// Number of slots this station needs
    pub fn realizer_count(&self) -> usize {
        self.required
    }

    /// Number of slots currently held
    pub fn held_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Whether every required slot is held
    pub fn has_all_realizers(&self) -> bool {
        self.slots[..self.required].iter().all(Option::is_some)
    }

    /// Held slots in position order
    pub fn slots(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        self.slots[..self.required].iter().flatten().copied()
    }
}
