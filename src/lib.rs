/*
 *  lib.rs
 *
 *  BigTime - large digit clock
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

//! Large digit clock face for small displays that cannot hold every
//! digit image at once. Four fixed slots, one per digit position, are
//! unloaded and reloaded on every minute tick.

pub mod config;
pub mod digit_font;
pub mod display;
pub mod ticker;
pub mod timefmt;
pub mod vframebuf;

pub use digit_font::{DigitCatalog, DigitImage};
pub use display::{BigClock, DisplaySurface, FrameSurface};
pub use ticker::{MinuteTicker, TickEvent, TimeUnits};
pub use timefmt::{display_hour, ClockStyle};
