/*
 *  display/components/clock.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock face: reacts to tick events by re-rendering the digit rows
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

use chrono::NaiveDateTime;
use embedded_graphics::prelude::*;
use log::{debug, info};

use crate::digit_font::DigitCatalog;
use crate::display::components::date_label::DateLabel;
use crate::display::components::digits::{render_value, RowKind};
use crate::display::components::slots::{SlotManager, SlotState, SLOT_COLUMNS, TOTAL_SLOTS};
use crate::display::error::DisplayError;
use crate::display::traits::DisplaySurface;
use crate::ticker::TickEvent;
use crate::timefmt::{display_hour, ClockStyle};

/// Render cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    Rendering,
}

/// Big digit clock face
///
/// Owns the surface, the slot array and the optional date label. Each
/// tick runs one synchronous render cycle; dropping the clock unloads
/// every slot.
pub struct BigClock<S: DisplaySurface> {
    surface: S,
    slots: SlotManager,
    date_label: Option<DateLabel>,
    phase: RenderPhase,
    renders: u64,
}

impl<S: DisplaySurface> BigClock<S> {
    pub fn new(
        surface: S,
        catalog: DigitCatalog,
        date_label: Option<DateLabel>,
    ) -> Result<Self, DisplayError> {
        let cell = catalog.digit_size();
        let grid = Size::new(
            cell.width * SLOT_COLUMNS as u32,
            cell.height * (TOTAL_SLOTS / SLOT_COLUMNS) as u32,
        );
        let screen = surface.size();
        if grid.width > screen.width || grid.height > screen.height {
            return Err(DisplayError::InvalidConfiguration(format!(
                "{}x{} digit grid does not fit a {}x{} display",
                grid.width, grid.height, screen.width, screen.height
            )));
        }

        Ok(Self {
            surface,
            slots: SlotManager::new(catalog),
            date_label,
            phase: RenderPhase::Idle,
            renders: 0,
        })
    }

    /// First render at `now`, so the screen is never blank waiting for a tick
    pub fn start(&mut self, now: NaiveDateTime, style: ClockStyle) -> Result<(), DisplayError> {
        info!("Clock face starting ({} style)", style);
        self.on_tick(&TickEvent::startup(now, style))
    }

    /// Handle a time-changed event: hour row, minute row, date, present
    pub fn on_tick(&mut self, tick: &TickEvent) -> Result<(), DisplayError> {
        debug_assert_eq!(self.phase, RenderPhase::Idle);
        self.phase = RenderPhase::Rendering;

        self.display_time(tick.hour(), tick.minute(), tick.style);
        if let Some(label) = self.date_label.as_mut() {
            if label.update(tick) {
                debug!("Date label now {:?}", label.text());
            }
        }
        let presented = self.surface.present(self.date_label.as_ref());

        self.phase = RenderPhase::Idle;
        self.renders += 1;
        debug!(
            "Rendered {:02}:{:02} -> {:?} (units {:#04x})",
            tick.hour(), tick.minute(), self.slots.states(), tick.units_changed.bits()
        );
        presented
    }

    /// Re-render both digit rows
    pub fn display_time(&mut self, hour_24: u32, minute: u32, style: ClockStyle) {
        let hour = display_hour(hour_24, style);
        render_value(&mut self.slots, &mut self.surface, hour, RowKind::Hour);
        render_value(&mut self.slots, &mut self.surface, minute, RowKind::Minute);
    }

    /// Unload every slot. Safe to call more than once.
    pub fn shutdown(&mut self) -> usize {
        let released = self.slots.unload_all(&mut self.surface);
        if released > 0 {
            debug!("Released {} digit images", released);
        }
        released
    }

    pub fn slots(&self) -> &SlotManager {
        &self.slots
    }

    pub fn slot_states(&self) -> [SlotState; TOTAL_SLOTS] {
        self.slots.states()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn date_label(&self) -> Option<&DateLabel> {
        self.date_label.as_ref()
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    /// Completed render cycles
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

impl<S: DisplaySurface> Drop for BigClock<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
