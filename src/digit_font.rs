/*
 *  digit_font.rs
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

use embedded_graphics::{
    image::ImageRaw,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use thiserror::Error;

use crate::vframebuf::VarFrameBuf;

pub const NUMBER_OF_IMAGES: usize = 10;

/// Reference glyph size, a quarter of a 144x168 screen.
pub const DEFAULT_DIGIT_WIDTH: u32 = 72;
pub const DEFAULT_DIGIT_HEIGHT: u32 = 84;

// segment bits: a=0 b=1 c=2 d=3 e=4 f=5 g=6
const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const DIGIT_SEGMENTS: [u8; NUMBER_OF_IMAGES] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,         // 0
    SEG_B | SEG_C,                                         // 1
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,                 // 2
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,                 // 3
    SEG_B | SEG_C | SEG_F | SEG_G,                         // 4
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,                 // 5
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,         // 6
    SEG_A | SEG_B | SEG_C,                                 // 7
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G, // 8
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,         // 9
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no digit image for id {0} (expected 0..=9)")]
    UnknownDigit(u8),
    #[error("digit images must be at least 8x8, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// An acquired digit bitmap. Owned outright: every acquisition is a
/// fresh buffer, even for a digit that is already on screen.
#[derive(Debug, PartialEq, Eq)]
pub struct DigitImage {
    digit: u8,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DigitImage {
    pub fn digit(&self) -> u8 { self.digit }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// Packed 1bpp view for drawing with `embedded_graphics::image::Image`
    pub fn as_image_raw(&self) -> ImageRaw<'_, BinaryColor> {
        ImageRaw::new(&self.data, self.width)
    }
}

/// Fixed catalog of the ten digit glyphs, all the same size with the
/// glyph centered in its cell.
#[derive(Debug, Clone)]
pub struct DigitCatalog {
    digit_width: u32,
    digit_height: u32,
}

impl Default for DigitCatalog {
    fn default() -> Self {
        Self {
            digit_width: DEFAULT_DIGIT_WIDTH,
            digit_height: DEFAULT_DIGIT_HEIGHT,
        }
    }
}

impl DigitCatalog {
    pub fn new(digit_width: u32, digit_height: u32) -> Result<Self, CatalogError> {
        if digit_width < 8 || digit_height < 8 {
            return Err(CatalogError::InvalidDimensions {
                width: digit_width,
                height: digit_height,
            });
        }
        Ok(Self { digit_width, digit_height })
    }

    pub fn digit_size(&self) -> Size {
        Size::new(self.digit_width, self.digit_height)
    }

    /// Retrieve a new copy of the image for `digit`.
    pub fn acquire(&self, digit: u8) -> Result<DigitImage, CatalogError> {
        let segments = *DIGIT_SEGMENTS
            .get(digit as usize)
            .ok_or(CatalogError::UnknownDigit(digit))?;

        let mut scratch = VarFrameBuf::new(self.digit_width, self.digit_height, BinaryColor::Off);
        let style = PrimitiveStyle::with_fill(BinaryColor::On);
        for rect in self.segment_rects(segments) {
            // scratch target is infallible
            let _ = rect.into_styled(style).draw(&mut scratch);
        }

        Ok(DigitImage {
            digit,
            width: self.digit_width,
            height: self.digit_height,
            data: scratch.to_packed(),
        })
    }

    fn segment_rects(&self, segments: u8) -> impl Iterator<Item = Rectangle> {
        let (w, h) = (self.digit_width as i32, self.digit_height as i32);
        // glyph box takes 2/3 of the width and 3/4 of the height, centered
        let gw = w * 2 / 3;
        let gh = h * 3 / 4;
        let ox = (w - gw) / 2;
        let oy = (h - gh) / 2;
        let t = (gw / 6).max(1);
        let half = gh / 2;

        let rect = |x: i32, y: i32, rw: i32, rh: i32| {
            Rectangle::new(Point::new(ox + x, oy + y), Size::new(rw as u32, rh as u32))
        };

        let all = [
            (SEG_A, rect(0, 0, gw, t)),
            (SEG_B, rect(gw - t, 0, t, half)),
            (SEG_C, rect(gw - t, half, t, gh - half)),
            (SEG_D, rect(0, gh - t, gw, t)),
            (SEG_E, rect(0, half, t, gh - half)),
            (SEG_F, rect(0, 0, t, half)),
            (SEG_G, rect(0, half - t / 2, gw, t)),
        ];
        all.into_iter()
            .filter(move |(bit, _)| segments & bit != 0)
            .map(|(_, r)| r)
    }
}
