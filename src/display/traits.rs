/*
 *  display/traits.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display surface abstraction the slot manager attaches digit layers to
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

use embedded_graphics::prelude::*;

use crate::digit_font::DigitImage;
use crate::display::components::date_label::DateLabel;
use crate::display::error::DisplayError;

/// Handle to a layer attached to a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u32);

/// Root of the display tree
///
/// A surface takes ownership of every image attached to it, so an image
/// can only ever have one parent. Detaching hands the image back to the
/// caller, who releases it by dropping it.
pub trait DisplaySurface {
    /// Display dimensions in pixels
    fn size(&self) -> Size;

    /// Attach a bitmap layer with its top-left corner at `origin`
    fn attach(&mut self, image: DigitImage, origin: Point) -> LayerId;

    /// Detach a layer, returning its image. `None` if the id is unknown.
    fn detach(&mut self, layer: LayerId) -> Option<DigitImage>;

    /// Number of layers currently attached
    fn layer_count(&self) -> usize;

    /// Composite attached layers and the optional date label into a frame
    fn present(&mut self, label: Option<&DateLabel>) -> Result<(), DisplayError>;
}
