//! The center piece: a fixed hexagon supplying gems into play

use crate::pieces::Gem;
use serde::{Deserialize, Serialize};

/// Slot 0 is the middle; slots 1-5 form the ring around it
pub const CENTER_SLOTS: usize = 6;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterPiece {
    slots: [Option<Gem>; CENTER_SLOTS],
}

impl CenterPiece {
    /// Center holding `middle` in slot 0 and `ring` in slots 1-5
    pub fn new(middle: Gem, ring: [Gem; 5]) -> Self {
        let mut slots = [None; CENTER_SLOTS];
        slots[0] = Some(middle);
        for (i, gem) in ring.into_iter().enumerate() {
            slots[i + 1] = Some(gem);
        }
        Self { slots }
    }

    pub fn gem_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.gem_count() == 0
    }

    pub fn gem_at(&self, slot: usize) -> Option<Gem> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn gems(&self) -> impl Iterator<Item = Gem> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// Slot whose gem leaves the center towards a tile on board edge `direction`
    /// (the edge of the center cell facing that tile).
    ///
    /// Ring slot `(direction mod 5) + 1` is preferred. When it is empty the next slot
    /// up is tried (slot 5 falls back to 4), then the slot two below that; a search
    /// that wraps past the ring start tries 5 and then 1. Failing all of those, the
    /// highest occupied ring slot is used. The middle gem only leaves once the ring
    /// is empty.
    pub fn select_slot(&self, direction: u8) -> Option<usize> {
        let occupied = |slot: usize| self.slots[slot].is_some();
        let Some(highest) = (1..CENTER_SLOTS).rev().find(|&slot| occupied(slot)) else {
            return self.slots[0].map(|_| 0);
        };

        let mut slot = (direction % 6) as usize % 5 + 1;
        if !occupied(slot) {
            slot = if slot == 5 { 4 } else { slot + 1 };
            if !occupied(slot) {
                slot = (slot + 4) % 6;
            }
        }
        if slot == 0 {
            slot = if occupied(5) { 5 } else { 1 };
        }
        if !occupied(slot) {
            slot = highest;
        }
        Some(slot)
    }

    /// Remove and return the gem in `slot`
    pub fn take(&mut self, slot: usize) -> Option<Gem> {
        self.slots.get_mut(slot).and_then(Option::take)
    }
}
