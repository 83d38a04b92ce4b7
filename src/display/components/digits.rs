/*
 *  display/components/digits.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Two-digit row rendering onto the slot grid
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

use log::{error, warn};

use crate::display::components::slots::{SlotManager, SLOT_COLUMNS};
use crate::display::error::SlotError;
use crate::display::traits::DisplaySurface;

/// Which value a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Row 0, " 5" rather than "05"
    Hour,
    /// Row 1, always two digits
    Minute,
}

impl RowKind {
    pub fn row_index(self) -> usize {
        match self {
            RowKind::Hour => 0,
            RowKind::Minute => 1,
        }
    }

    pub fn suppress_leading_zero(self) -> bool {
        matches!(self, RowKind::Hour)
    }
}

pub fn slot_index(row_index: usize, column: usize) -> usize {
    row_index * SLOT_COLUMNS + column
}

/// Split a value into (tens, ones); only the last two digits are kept
pub fn decompose(value: u32) -> (u8, u8) {
    let value = value % 100;
    ((value / 10) as u8, (value % 10) as u8)
}

/// Show a value between 0 and 99 on one row of slots.
///
/// Every slot in the row is unloaded before it is (maybe) loaded again,
/// so there is never stale content and never more than one image per slot.
/// Returns the number of images loaded.
pub fn render_row<S>(
    slots: &mut SlotManager,
    surface: &mut S,
    value: u32,
    row_index: usize,
    suppress_leading_zero: bool,
) -> usize
where
    S: DisplaySurface + ?Sized,
{
    let mut value = value % 100;
    let mut loaded = 0;

    // right to left, so each digit is value % 10 before dividing down
    for column in (0..SLOT_COLUMNS).rev() {
        let slot = slot_index(row_index, column);
        slots.unload(surface, slot);

        let blank = column == 0 && value == 0 && suppress_leading_zero;
        if !blank {
            match slots.load(surface, slot, (value % 10) as u8) {
                Ok(()) => loaded += 1,
                Err(err @ SlotError::Catalog(_)) => error!("row {}: {}", row_index, err),
                Err(err) => warn!("row {}: {}", row_index, err),
            }
        }
        value /= 10;
    }
    loaded
}

pub fn render_value<S>(slots: &mut SlotManager, surface: &mut S, value: u32, row: RowKind) -> usize
where
    S: DisplaySurface + ?Sized,
{
    render_row(slots, surface, value, row.row_index(), row.suppress_leading_zero())
}
