/*
 *  display/framebuffer.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory display surface composited into a monochrome framebuffer
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

use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use log::{trace, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::digit_font::DigitImage;
use crate::display::components::date_label::DateLabel;
use crate::display::error::DisplayError;
use crate::display::traits::{DisplaySurface, LayerId};
use crate::vframebuf::VarFrameBuf;

/// Reference screen, a 144x168 monochrome panel
pub const DEFAULT_WIDTH: u32 = 144;
pub const DEFAULT_HEIGHT: u32 = 168;

#[derive(Debug)]
struct Layer {
    id: LayerId,
    origin: Point,
    image: DigitImage,
}

/// Display surface backed by a `VarFrameBuf<BinaryColor>`
///
/// Layers are drawn opaque in attach order over a black background,
/// the date label is drawn last over them.
#[derive(Debug)]
pub struct FrameSurface {
    fb: VarFrameBuf<BinaryColor>,
    layers: Vec<Layer>,
    next_id: u32,
    invert: bool,
}

impl FrameSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fb: VarFrameBuf::new(width, height, BinaryColor::Off),
            layers: Vec::with_capacity(4),
            next_id: 0,
            invert: false,
        }
    }

    /// Black digits on white when set
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Last presented frame
    pub fn framebuffer(&self) -> &VarFrameBuf<BinaryColor> {
        &self.fb
    }

    /// Digits of the attached layers in attach order
    pub fn attached_digits(&self) -> Vec<u8> {
        self.layers.iter().map(|l| l.image.digit()).collect()
    }

    /// Origin of an attached layer
    pub fn layer_origin(&self, layer: LayerId) -> Option<Point> {
        self.layers.iter().find(|l| l.id == layer).map(|l| l.origin)
    }

    pub fn to_ascii(&self) -> String {
        self.fb.to_ascii()
    }

    /// Write the last presented frame as a PBM file
    pub fn save_pbm(&self, path: &Path) -> Result<(), DisplayError> {
        let file = File::create(path)?;
        self.fb.write_pbm(BufWriter::new(file))?;
        Ok(())
    }
}

impl Default for FrameSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl DisplaySurface for FrameSurface {
    fn size(&self) -> Size {
        self.fb.size()
    }

    fn attach(&mut self, image: DigitImage, origin: Point) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        trace!("attach layer {:?} digit {} at {:?}", id, image.digit(), origin);
        self.layers.push(Layer { id, origin, image });
        id
    }

    fn detach(&mut self, layer: LayerId) -> Option<DigitImage> {
        match self.layers.iter().position(|l| l.id == layer) {
            Some(pos) => {
                trace!("detach layer {:?}", layer);
                Some(self.layers.remove(pos).image)
            }
            None => {
                warn!("detach of unknown layer {:?}", layer);
                None
            }
        }
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn present(&mut self, label: Option<&DateLabel>) -> Result<(), DisplayError> {
        // the framebuffer is infallible, results below are always Ok
        let _ = self.fb.clear(BinaryColor::Off);
        for layer in &self.layers {
            let raw = layer.image.as_image_raw();
            let _ = Image::new(&raw, layer.origin).draw(&mut self.fb);
        }
        if let Some(label) = label {
            let _ = label.draw(&mut self.fb);
        }
        if self.invert {
            self.fb.invert();
        }
        Ok(())
    }
}
