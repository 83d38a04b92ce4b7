/*
 *  display/error.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the slot manager and the display surface
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

use std::fmt;
use std::error::Error;

use crate::digit_font::CatalogError;

/// Why a slot load was refused. A refused load changes nothing.
#[derive(Debug, PartialEq, Eq)]
pub enum SlotError {
    /// Slot index outside 0..TOTAL_SLOTS
    SlotOutOfRange(usize),

    /// Digit outside 0..=9
    DigitOutOfRange(u8),

    /// Slot already holds an image; unload it first
    Occupied { slot: usize, digit: u8 },

    /// The digit catalog could not produce the image
    Catalog(CatalogError),
}

impl fmt::Display for SlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotError::SlotOutOfRange(slot) =>
                write!(f, "Slot {} out of range", slot),
            SlotError::DigitOutOfRange(digit) =>
                write!(f, "Digit {} out of range (must be 0-9)", digit),
            SlotError::Occupied { slot, digit } =>
                write!(f, "Slot {} already holds digit {}", slot, digit),
            SlotError::Catalog(err) =>
                write!(f, "Digit catalog error: {}", err),
        }
    }
}

impl Error for SlotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SlotError::Catalog(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CatalogError> for SlotError {
    fn from(err: CatalogError) -> Self {
        SlotError::Catalog(err)
    }
}

/// Errors raised while presenting or exporting a frame
#[derive(Debug)]
pub enum DisplayError {
    /// Display geometry cannot hold the 2x2 digit grid
    InvalidConfiguration(String),

    /// Snapshot export failed
    Io(std::io::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InvalidConfiguration(msg) =>
                write!(f, "Invalid configuration: {}", msg),
            DisplayError::Io(err) =>
                write!(f, "Display I/O error: {}", err),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}
