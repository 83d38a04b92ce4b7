/*
 *  ticker.rs
 *
 *  BigTime - large digit clock
 *	(c) 2020-26 Stuart Hunter
 *
 *	Minute tick source and the time-changed event it delivers
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

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use std::ops::{BitOr, BitOrAssign};
use std::time::Duration;

use crate::timefmt::ClockStyle;

// wall clock and the tokio timer drift apart a little, land just past the boundary
const TICK_SLACK: Duration = Duration::from_millis(20);

/// Bit set of the time units that changed since the previous tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: TimeUnits = TimeUnits(0);
    pub const SECOND: TimeUnits = TimeUnits(1 << 0);
    pub const MINUTE: TimeUnits = TimeUnits(1 << 1);
    pub const HOUR: TimeUnits = TimeUnits(1 << 2);
    pub const DAY: TimeUnits = TimeUnits(1 << 3);
    pub const MONTH: TimeUnits = TimeUnits(1 << 4);
    pub const YEAR: TimeUnits = TimeUnits(1 << 5);

    /// Flags used for the synthetic start-up render
    pub const STARTUP: TimeUnits =
        TimeUnits(Self::SECOND.0 | Self::MINUTE.0 | Self::HOUR.0 | Self::DAY.0);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: TimeUnits) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Units whose truncated value differs between two readings.
    /// A change in a coarse unit flags every finer unit too.
    pub fn between(prev: &NaiveDateTime, now: &NaiveDateTime) -> TimeUnits {
        let key = |t: &NaiveDateTime| {
            [t.year() as u32, t.month(), t.day(), t.hour(), t.minute(), t.second()]
        };
        let (a, b) = (key(prev), key(now));
        let units = [
            TimeUnits::YEAR,
            TimeUnits::MONTH,
            TimeUnits::DAY,
            TimeUnits::HOUR,
            TimeUnits::MINUTE,
            TimeUnits::SECOND,
        ];

        let mut changed = TimeUnits::NONE;
        for (depth, unit) in units.into_iter().enumerate() {
            if a[..=depth] != b[..=depth] {
                changed |= unit;
            }
        }
        changed
    }
}

impl BitOr for TimeUnits {
    type Output = TimeUnits;

    fn bitor(self, rhs: TimeUnits) -> TimeUnits {
        TimeUnits(self.0 | rhs.0)
    }
}

impl BitOrAssign for TimeUnits {
    fn bitor_assign(&mut self, rhs: TimeUnits) {
        self.0 |= rhs.0;
    }
}

/// Time-changed event handed to the clock face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub at: NaiveDateTime,
    pub units_changed: TimeUnits,
    pub style: ClockStyle,
}

impl TickEvent {
    pub fn new(at: NaiveDateTime, units_changed: TimeUnits, style: ClockStyle) -> Self {
        Self { at, units_changed, style }
    }

    /// Event for the first render, every unit counts as changed
    pub fn startup(at: NaiveDateTime, style: ClockStyle) -> Self {
        Self::new(at, TimeUnits::STARTUP, style)
    }

    pub fn hour(&self) -> u32 {
        self.at.hour()
    }

    pub fn minute(&self) -> u32 {
        self.at.minute()
    }

    pub fn date(&self) -> NaiveDate {
        self.at.date()
    }
}

/// Time left until the next wall-clock minute boundary
pub fn until_next_minute(now: &NaiveDateTime) -> Duration {
    // leap seconds report nanoseconds past 1e9
    let nanos = now.nanosecond().min(999_999_999) as u64;
    let into_minute = Duration::from_secs(now.second().min(59) as u64) + Duration::from_nanos(nanos);
    Duration::from_secs(60) - into_minute
}

/// Fires once per minute on the local wall clock
#[derive(Debug)]
pub struct MinuteTicker {
    style: ClockStyle,
    last: Option<NaiveDateTime>,
}

impl MinuteTicker {
    pub fn new(style: ClockStyle) -> Self {
        Self { style, last: None }
    }

    /// Event for the current time, used for the start-up render
    pub fn startup_event(&mut self) -> TickEvent {
        let now = Local::now().naive_local();
        self.last = Some(now);
        TickEvent::startup(now, self.style)
    }

    /// Sleep until the next minute boundary and report it
    pub async fn next_tick(&mut self) -> TickEvent {
        let now = Local::now().naive_local();
        tokio::time::sleep(until_next_minute(&now) + TICK_SLACK).await;
        self.event_at(Local::now().naive_local())
    }

    pub(crate) fn event_at(&mut self, at: NaiveDateTime) -> TickEvent {
        let units = match self.last {
            Some(prev) => TimeUnits::between(&prev, &at),
            None => TimeUnits::STARTUP,
        };
        self.last = Some(at);
        TickEvent::new(at, units, self.style)
    }
}
