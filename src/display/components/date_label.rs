/*
 *  display/components/date_label.rs
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 *
 *  Short day/date label under the digits
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

use arrayvec::ArrayString;
use chrono::NaiveDate;
use core::fmt::Write;
use embedded_graphics::mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::{HorizontalAlignment, VerticalAlignment};
use embedded_text::{style::TextBoxStyleBuilder, TextBox};

use crate::ticker::{TickEvent, TimeUnits};

/// "Mon 5" fits with room to spare
pub type DateText = ArrayString<8>;

/// Format as abbreviated weekday and day of month, without a leading zero
pub fn format_date(date: NaiveDate) -> DateText {
    let mut text = DateText::new();
    // "%a %d" is always 6 ASCII chars
    let _ = write!(text, "{}", date.format("%a %d"));
    if text.as_bytes().get(4) == Some(&b'0') {
        text.remove(4);
    }
    text
}

/// Date label with its own font, redrawn in place each frame
#[derive(Debug, Clone)]
pub struct DateLabel {
    text: DateText,
    frame: Rectangle,
    font: &'static MonoFont<'static>,
}

impl DateLabel {
    pub fn new(frame: Rectangle) -> Self {
        Self {
            text: DateText::new(),
            frame,
            font: &FONT_10X20,
        }
    }

    /// Frame scaled from the reference (1, 128, 144x42) on a 144x168 screen
    pub fn for_display(size: Size) -> Self {
        let y = (size.height * 128 / 168) as i32;
        let frame = Rectangle::new(
            Point::new(1, y),
            Size::new(size.width.saturating_sub(1), size.height.saturating_sub(y as u32)),
        );
        Self::new(frame)
    }

    /// Below the digit grid when the strip is tall enough for the font,
    /// otherwise the reference frame over the bottom of the minute row
    pub fn place(display: Size, grid: Size) -> Self {
        let free = display.height.saturating_sub(grid.height);
        if free >= FONT_10X20.character_size.height {
            Self::new(Rectangle::new(
                Point::new(0, grid.height as i32),
                Size::new(display.width, free),
            ))
        } else {
            Self::for_display(display)
        }
    }

    pub fn with_font(mut self, font: &'static MonoFont<'static>) -> Self {
        self.font = font;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.text = format_date(date);
    }

    /// Refresh the text when the day has rolled over. Returns true if it did.
    pub fn update(&mut self, tick: &TickEvent) -> bool {
        if !tick.units_changed.contains(TimeUnits::DAY) {
            return false;
        }
        self.set_date(tick.date());
        true
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if self.text.is_empty() {
            return Ok(());
        }
        // opaque background so the text reads over a digit cell
        let character_style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .vertical_alignment(VerticalAlignment::Top)
            .build();
        TextBox::with_textbox_style(&self.text, self.frame, character_style, textbox_style)
            .draw(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timefmt::ClockStyle;
    use crate::vframebuf::VarFrameBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_strips_leading_zero() {
        // 2024-03-04 was a Monday
        assert_eq!(format_date(date(2024, 3, 4)).as_str(), "Mon 4");
        assert_eq!(format_date(date(2024, 3, 10)).as_str(), "Sun 10");
        assert_eq!(format_date(date(2024, 3, 20)).as_str(), "Wed 20");
    }

    #[test]
    fn test_update_only_on_day_change() {
        let mut label = DateLabel::for_display(Size::new(144, 168));
        let t = date(2024, 3, 4).and_hms_opt(9, 5, 0).unwrap();

        let minute_tick = TickEvent::new(t, TimeUnits::MINUTE, ClockStyle::TwelveHour);
        assert!(!label.update(&minute_tick));
        assert_eq!(label.text(), "");

        assert!(label.update(&TickEvent::startup(t, ClockStyle::TwelveHour)));
        assert_eq!(label.text(), "Mon 4");
    }

    #[test]
    fn test_reference_frame() {
        let label = DateLabel::for_display(Size::new(144, 168));
        assert_eq!(label.frame(), Rectangle::new(Point::new(1, 128), Size::new(143, 40)));
    }

    #[test]
    fn test_place_below_grid_when_room() {
        let label = DateLabel::place(Size::new(144, 200), Size::new(144, 168));
        assert_eq!(label.frame(), Rectangle::new(Point::new(0, 168), Size::new(144, 32)));

        let cramped = DateLabel::place(Size::new(144, 168), Size::new(144, 168));
        assert_eq!(cramped.frame().top_left, Point::new(1, 128));
    }

    #[test]
    fn test_draw_stays_in_frame() {
        let mut label = DateLabel::for_display(Size::new(144, 168));
        label.set_date(date(2024, 3, 4));
        let mut fb = VarFrameBuf::new(144, 168, BinaryColor::Off);
        label.draw(&mut fb).unwrap();
        assert!(fb.count_on() > 0);
        for y in 0..128 {
            for x in 0..144 {
                assert_eq!(fb.pixel(x, y), Some(BinaryColor::Off));
            }
        }
    }
}
