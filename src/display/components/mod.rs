/*
 *  display/components/mod.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock face components
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

pub mod slots;
pub mod digits;
pub mod clock;
pub mod date_label;

// Re-exports
pub use slots::{SlotManager, SlotState, SlotStats, TOTAL_SLOTS};
pub use digits::{render_row, render_value, RowKind};
pub use clock::{BigClock, RenderPhase};
pub use date_label::DateLabel;
