/*
 *  vframebuf.rs
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{BinaryColor, PixelColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use std::io::Write;

/// Frame of any size the clock is configured for, drawn into with embedded-graphics
#[derive(Debug, Clone)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

impl<C: PixelColor + Clone> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    pub fn clear_color(&mut self, color: C) {
        self.buf.fill(color);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<C> {
        if x < self.w && y < self.h {
            Some(self.buf[y * self.w + x])
        } else {
            None
        }
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl VarFrameBuf<BinaryColor> {
    pub fn count_on(&self) -> usize {
        self.buf.iter().filter(|&&p| p == BinaryColor::On).count()
    }

    pub fn invert(&mut self) {
        for p in self.buf.iter_mut() {
            *p = p.invert();
        }
    }

    /// Pack into 1bpp rows, MSB first, each row padded to a whole byte.
    /// This is the layout `ImageRaw<BinaryColor>` reads.
    pub fn to_packed(&self) -> Vec<u8> {
        let stride = self.w.div_ceil(8);
        let mut out = vec![0u8; stride * self.h];
        for y in 0..self.h {
            for x in 0..self.w {
                if self.buf[y * self.w + x] == BinaryColor::On {
                    out[y * stride + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        out
    }

    /// Two rows per text line using half blocks, keeps previews roughly square.
    pub fn to_ascii(&self) -> String {
        let mut s = String::with_capacity((self.w + 1) * self.h.div_ceil(2));
        for y in (0..self.h).step_by(2) {
            for x in 0..self.w {
                let top = self.buf[y * self.w + x] == BinaryColor::On;
                let bottom = y + 1 < self.h && self.buf[(y + 1) * self.w + x] == BinaryColor::On;
                s.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            s.push('\n');
        }
        s
    }

    /// Plain PBM (P1), handy for eyeballing a frame.
    pub fn write_pbm<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        writeln!(out, "P1")?;
        writeln!(out, "{} {}", self.w, self.h)?;
        for row in self.buf.chunks(self.w.max(1)) {
            let line: Vec<&str> = row
                .iter()
                .map(|&p| if p == BinaryColor::On { "1" } else { "0" })
                .collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl<C: PixelColor> OriginDimensions for VarFrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor + Clone> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // clip first, primitives hand us rectangles that may hang off the edge
        let clipped = area.intersection(&self.bounding_box());
        let Size { width, height } = clipped.size;
        if width == 0 || height == 0 { return Ok(()); }
        let (x0, y0) = (clipped.top_left.x as usize, clipped.top_left.y as usize);
        for row in y0..y0 + height as usize {
            let base = row * self.w;
            self.buf[base + x0..base + x0 + width as usize].fill(color);
        }
        Ok(())
    }
}
