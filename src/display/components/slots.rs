/*
 *  display/components/slots.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Fixed set of digit image slots, one per on-screen digit position
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

//! Only one digit image per screen position is ever resident, so the
//! memory bound is the slot count and no cache or eviction is needed.
//!
//! Slot layout on screen:
//!
//! ```text
//!     0 1     hour tens,   hour ones
//!     2 3     minute tens, minute ones
//! ```

use embedded_graphics::prelude::*;
use log::trace;

use crate::digit_font::DigitCatalog;
use crate::display::error::SlotError;
use crate::display::traits::{DisplaySurface, LayerId};

pub const TOTAL_SLOTS: usize = 4;
pub const SLOT_COLUMNS: usize = 2;
pub const MAX_DIGIT: u8 = 9;

/// Observable state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Loaded(u8),
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Empty,
    Loaded { digit: u8, layer: LayerId },
}

/// Resource traffic counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SlotStats {
    /// Images acquired from the catalog and attached
    pub acquired: u64,
    /// Images detached and released
    pub released: u64,
    /// Loads refused for bad arguments, an occupied slot or catalog failure
    pub rejected: u64,
}

/// Owns the slot array and the digit catalog feeding it
#[derive(Debug)]
pub struct SlotManager {
    catalog: DigitCatalog,
    slots: [Slot; TOTAL_SLOTS],
    stats: SlotStats,
}

impl SlotManager {
    pub fn new(catalog: DigitCatalog) -> Self {
        Self {
            catalog,
            slots: [Slot::Empty; TOTAL_SLOTS],
            stats: SlotStats::default(),
        }
    }

    pub fn catalog(&self) -> &DigitCatalog {
        &self.catalog
    }

    /// Fixed top-left corner of a slot; each slot is one digit cell
    pub fn slot_origin(&self, index: usize) -> Point {
        let cell = self.catalog.digit_size();
        Point::new(
            ((index % SLOT_COLUMNS) as u32 * cell.width) as i32,
            ((index / SLOT_COLUMNS) as u32 * cell.height) as i32,
        )
    }

    /// `None` for an index outside the slot array
    pub fn state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(|slot| match *slot {
            Slot::Empty => SlotState::Empty,
            Slot::Loaded { digit, .. } => SlotState::Loaded(digit),
        })
    }

    pub fn states(&self) -> [SlotState; TOTAL_SLOTS] {
        let mut out = [SlotState::Empty; TOTAL_SLOTS];
        for (i, s) in out.iter_mut().enumerate() {
            if let Slot::Loaded { digit, .. } = self.slots[i] {
                *s = SlotState::Loaded(digit);
            }
        }
        out
    }

    /// Number of slots currently holding an image
    pub fn resident(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Loaded { .. }))
            .count()
    }

    pub fn stats(&self) -> SlotStats {
        self.stats
    }

    /// Acquire `digit` and attach it at the slot's position.
    ///
    /// The slot must exist, be empty, and `digit` must be 0-9. A refused
    /// load touches neither the slot nor the surface.
    pub fn load<S>(&mut self, surface: &mut S, index: usize, digit: u8) -> Result<(), SlotError>
    where
        S: DisplaySurface + ?Sized,
    {
        let result = self.try_load(surface, index, digit);
        if result.is_err() {
            self.stats.rejected += 1;
        }
        result
    }

    fn try_load<S>(&mut self, surface: &mut S, index: usize, digit: u8) -> Result<(), SlotError>
    where
        S: DisplaySurface + ?Sized,
    {
        let slot = *self.slots.get(index).ok_or(SlotError::SlotOutOfRange(index))?;
        if digit > MAX_DIGIT {
            return Err(SlotError::DigitOutOfRange(digit));
        }
        if let Slot::Loaded { digit: held, .. } = slot {
            return Err(SlotError::Occupied { slot: index, digit: held });
        }

        let image = self.catalog.acquire(digit)?;
        let origin = self.slot_origin(index);
        let layer = surface.attach(image, origin);
        self.slots[index] = Slot::Loaded { digit, layer };
        self.stats.acquired += 1;
        trace!("slot {} <- {} at {:?}", index, digit, origin);
        Ok(())
    }

    /// Detach and release whatever the slot holds.
    ///
    /// Safe on an empty slot; returns the digit that was unloaded, if any.
    pub fn unload<S>(&mut self, surface: &mut S, index: usize) -> Option<u8>
    where
        S: DisplaySurface + ?Sized,
    {
        let Some(Slot::Loaded { digit, layer }) = self.slots.get(index).copied() else {
            return None;
        };
        // dropping the image releases it
        drop(surface.detach(layer));
        self.slots[index] = Slot::Empty;
        self.stats.released += 1;
        trace!("slot {} -> empty (was {})", index, digit);
        Some(digit)
    }

    /// Empty every slot, returns how many held an image
    pub fn unload_all<S>(&mut self, surface: &mut S) -> usize
    where
        S: DisplaySurface + ?Sized,
    {
        (0..TOTAL_SLOTS)
            .filter(|&i| self.unload(surface, i).is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digit_font::CatalogError;
    use crate::display::framebuffer::FrameSurface;

    fn setup() -> (SlotManager, FrameSurface) {
        (SlotManager::new(DigitCatalog::default()), FrameSurface::default())
    }

    #[test]
    fn test_starts_empty() {
        let (slots, _) = setup();
        assert_eq!(slots.states(), [SlotState::Empty; TOTAL_SLOTS]);
        assert_eq!(slots.resident(), 0);
        assert_eq!(slots.state(TOTAL_SLOTS), None);
    }

    #[test]
    fn test_slot_origins() {
        let (slots, _) = setup();
        assert_eq!(slots.slot_origin(0), Point::new(0, 0));
        assert_eq!(slots.slot_origin(1), Point::new(72, 0));
        assert_eq!(slots.slot_origin(2), Point::new(0, 84));
        assert_eq!(slots.slot_origin(3), Point::new(72, 84));
    }

    #[test]
    fn test_load_then_unload() {
        let (mut slots, mut surface) = setup();
        slots.load(&mut surface, 2, 7).unwrap();
        assert_eq!(slots.state(2), Some(SlotState::Loaded(7)));
        assert_eq!(surface.layer_count(), 1);
        assert_eq!(surface.attached_digits(), vec![7]);

        assert_eq!(slots.unload(&mut surface, 2), Some(7));
        assert_eq!(slots.state(2), Some(SlotState::Empty));
        assert_eq!(surface.layer_count(), 0);
        assert_eq!(slots.stats().acquired, 1);
        assert_eq!(slots.stats().released, 1);
    }

    #[test]
    fn test_unload_empty_is_noop() {
        let (mut slots, mut surface) = setup();
        assert_eq!(slots.unload(&mut surface, 1), None);
        assert_eq!(slots.unload(&mut surface, 1), None);
        assert_eq!(slots.unload(&mut surface, 99), None);
        assert_eq!(slots.state(1), Some(SlotState::Empty));
        assert_eq!(slots.stats(), SlotStats::default());
    }

    #[test]
    fn test_load_into_occupied_slot_is_refused() {
        let (mut slots, mut surface) = setup();
        slots.load(&mut surface, 0, 1).unwrap();
        assert_eq!(
            slots.load(&mut surface, 0, 2),
            Err(SlotError::Occupied { slot: 0, digit: 1 })
        );
        assert_eq!(slots.state(0), Some(SlotState::Loaded(1)));
        assert_eq!(surface.layer_count(), 1);
        assert_eq!(slots.stats().acquired, 1);
        assert_eq!(slots.stats().rejected, 1);
    }

    #[test]
    fn test_out_of_range_arguments_are_refused() {
        let (mut slots, mut surface) = setup();
        assert_eq!(slots.load(&mut surface, 4, 1), Err(SlotError::SlotOutOfRange(4)));
        assert_eq!(slots.load(&mut surface, 0, 10), Err(SlotError::DigitOutOfRange(10)));
        assert_eq!(slots.states(), [SlotState::Empty; TOTAL_SLOTS]);
        assert_eq!(surface.layer_count(), 0);
        assert_eq!(slots.stats().rejected, 2);
    }

    #[test]
    fn test_same_digit_in_two_slots_gets_two_layers() {
        let (mut slots, mut surface) = setup();
        slots.load(&mut surface, 0, 5).unwrap();
        slots.load(&mut surface, 1, 5).unwrap();
        assert_eq!(surface.layer_count(), 2);
        assert_eq!(slots.stats().acquired, 2);
    }

    #[test]
    fn test_resident_never_exceeds_slot_count() {
        let (mut slots, mut surface) = setup();
        for round in 0..3u8 {
            for i in 0..TOTAL_SLOTS + 2 {
                let _ = slots.load(&mut surface, i, round);
                assert!(slots.resident() <= TOTAL_SLOTS);
            }
        }
        assert_eq!(slots.resident(), TOTAL_SLOTS);
        assert_eq!(surface.layer_count(), TOTAL_SLOTS);
    }

    #[test]
    fn test_unload_all_releases_everything() {
        let (mut slots, mut surface) = setup();
        slots.load(&mut surface, 0, 1).unwrap();
        slots.load(&mut surface, 3, 9).unwrap();
        assert_eq!(slots.unload_all(&mut surface), 2);
        assert_eq!(slots.resident(), 0);
        assert_eq!(surface.layer_count(), 0);
        let stats = slots.stats();
        assert_eq!(stats.acquired, stats.released);
    }

    #[test]
    fn test_catalog_error_converts() {
        let err: SlotError = CatalogError::UnknownDigit(12).into();
        assert_eq!(err, SlotError::Catalog(CatalogError::UnknownDigit(12)));
    }
}
