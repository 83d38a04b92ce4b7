/*
 *  timefmt.rs
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

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hour representation on the hour row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum ClockStyle {
    #[default]
    #[serde(rename = "12h")]
    #[value(name = "12h")]
    TwelveHour,
    #[serde(rename = "24h")]
    #[value(name = "24h")]
    TwentyFourHour,
}

impl ClockStyle {
    pub fn is_24h(self) -> bool {
        self == ClockStyle::TwentyFourHour
    }
}

impl fmt::Display for ClockStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockStyle::TwelveHour => write!(f, "12h"),
            ClockStyle::TwentyFourHour => write!(f, "24h"),
        }
    }
}

/// Hour value to show for a 24-hour clock reading.
/// 12h style folds onto 1..=12, midnight and noon both read 12.
pub fn display_hour(hour_24: u32, style: ClockStyle) -> u32 {
    if style.is_24h() {
        return hour_24;
    }
    match hour_24 % 12 {
        0 => 12,
        h => h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_hour_folding() {
        assert_eq!(display_hour(0, ClockStyle::TwelveHour), 12);
        assert_eq!(display_hour(12, ClockStyle::TwelveHour), 12);
        assert_eq!(display_hour(13, ClockStyle::TwelveHour), 1);
        assert_eq!(display_hour(23, ClockStyle::TwelveHour), 11);
        assert_eq!(display_hour(9, ClockStyle::TwelveHour), 9);
    }

    #[test]
    fn test_twenty_four_hour_passthrough() {
        assert_eq!(display_hour(0, ClockStyle::TwentyFourHour), 0);
        assert_eq!(display_hour(5, ClockStyle::TwentyFourHour), 5);
        assert_eq!(display_hour(23, ClockStyle::TwentyFourHour), 23);
    }

    #[test]
    fn test_twelve_hour_range() {
        for h in 0..24 {
            let shown = display_hour(h, ClockStyle::TwelveHour);
            assert!((1..=12).contains(&shown), "hour {} shown as {}", h, shown);
        }
    }

    #[test]
    fn test_style_yaml_names() {
        let s: ClockStyle = serde_yaml::from_str("24h").unwrap();
        assert_eq!(s, ClockStyle::TwentyFourHour);
        assert_eq!(ClockStyle::TwelveHour.to_string(), "12h");
    }
}
