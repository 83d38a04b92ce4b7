/*
 *  tests/big_clock.rs
 *
 *  Integration tests for the clock face
 *
 *  BigTime - large digit clock
 *  (c) 2020-26 Stuart Hunter
 */

use bigtime::display::components::digits::render_row;
use bigtime::display::components::{SlotManager, TOTAL_SLOTS};
use bigtime::display::error::DisplayError;
use bigtime::display::{BigClock, DateLabel, DisplaySurface, FrameSurface, LayerId};
use bigtime::{ClockStyle, DigitCatalog, DigitImage, TickEvent, TimeUnits};
use chrono::{NaiveDate, NaiveDateTime};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use bigtime::display::SlotState::{Empty, Loaded};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(h, m, 0).unwrap()
}

fn minute_tick(h: u32, m: u32, style: ClockStyle) -> TickEvent {
    TickEvent::new(at(h, m), TimeUnits::SECOND | TimeUnits::MINUTE, style)
}

fn clock() -> BigClock<FrameSurface> {
    BigClock::new(FrameSurface::default(), DigitCatalog::default(), None).unwrap()
}

/// Surface that records attach/detach traffic in order
#[derive(Default)]
struct RecordingSurface {
    next: u32,
    attached: Vec<(LayerId, DigitImage, Point)>,
    log: Vec<String>,
    max_layers: usize,
}

impl DisplaySurface for RecordingSurface {
    fn size(&self) -> Size {
        Size::new(144, 168)
    }

    fn attach(&mut self, image: DigitImage, origin: Point) -> LayerId {
        let id = LayerId(self.next);
        self.next += 1;
        self.log.push(format!("attach {} {},{}", image.digit(), origin.x, origin.y));
        self.attached.push((id, image, origin));
        self.max_layers = self.max_layers.max(self.attached.len());
        id
    }

    fn detach(&mut self, layer: LayerId) -> Option<DigitImage> {
        let pos = self.attached.iter().position(|(id, _, _)| *id == layer)?;
        let (_, image, origin) = self.attached.remove(pos);
        self.log.push(format!("detach {} {},{}", image.digit(), origin.x, origin.y));
        Some(image)
    }

    fn layer_count(&self) -> usize {
        self.attached.len()
    }

    fn present(&mut self, _label: Option<&DateLabel>) -> Result<(), DisplayError> {
        self.log.push("present".into());
        Ok(())
    }
}

#[test]
fn scenario_a_nine_oh_five_twelve_hour() {
    let mut c = clock();
    c.on_tick(&minute_tick(9, 5, ClockStyle::TwelveHour)).unwrap();
    assert_eq!(c.slot_states(), [Empty, Loaded(9), Loaded(0), Loaded(5)]);
}

#[test]
fn scenario_b_midnight_thirty_twelve_hour() {
    let mut c = clock();
    c.on_tick(&minute_tick(0, 30, ClockStyle::TwelveHour)).unwrap();
    assert_eq!(c.slot_states(), [Loaded(1), Loaded(2), Loaded(3), Loaded(0)]);
}

#[test]
fn scenario_c_five_twenty_four_hour() {
    let mut c = clock();
    c.on_tick(&minute_tick(5, 0, ClockStyle::TwentyFourHour)).unwrap();
    assert_eq!(c.slot_states()[0], Empty);
    assert_eq!(c.slot_states()[1], Loaded(5));
}

#[test]
fn scenario_d_repeated_tick_is_stable() {
    let mut c = clock();
    let tick = minute_tick(10, 42, ClockStyle::TwelveHour);

    c.on_tick(&tick).unwrap();
    let first_states = c.slot_states();
    let first_frame = c.surface().framebuffer().as_slice().to_vec();

    c.on_tick(&tick).unwrap();
    assert_eq!(c.slot_states(), first_states);
    assert_eq!(c.surface().framebuffer().as_slice(), first_frame.as_slice());

    // every slot was cycled both times
    let stats = c.slots().stats();
    assert_eq!(stats.acquired, 8);
    assert_eq!(stats.released, 4);
}

#[test]
fn unload_always_precedes_load_per_slot() {
    let mut slots = SlotManager::new(DigitCatalog::default());
    let mut surface = RecordingSurface::default();

    render_row(&mut slots, &mut surface, 47, 1, false);
    render_row(&mut slots, &mut surface, 47, 1, false);

    assert_eq!(
        surface.log,
        vec![
            "attach 7 72,84",
            "attach 4 0,84",
            "detach 7 72,84",
            "attach 7 72,84",
            "detach 4 0,84",
            "attach 4 0,84",
        ]
    );
    assert!(surface.max_layers <= 2);
}

#[test]
fn resident_images_bounded_through_a_day() {
    let mut c = clock();
    for style in [ClockStyle::TwelveHour, ClockStyle::TwentyFourHour] {
        for h in 0..24 {
            for m in 0..60 {
                c.on_tick(&minute_tick(h, m, style)).unwrap();
                assert!(c.slots().resident() <= TOTAL_SLOTS);
                assert_eq!(c.surface().layer_count(), c.slots().resident());
            }
        }
    }
    let stats = c.slots().stats();
    assert_eq!(stats.acquired - stats.released, c.slots().resident() as u64);
    assert_eq!(stats.rejected, 0);
}

#[test]
fn teardown_leaks_nothing() {
    let mut c = clock();
    c.start(at(12, 34), ClockStyle::TwelveHour).unwrap();
    assert_eq!(c.slots().resident(), 4);
    c.shutdown();
    let stats = c.slots().stats();
    assert_eq!(stats.acquired, stats.released);
    assert_eq!(c.surface().layer_count(), 0);
}

#[test]
fn date_label_drawn_under_digits() {
    let label = DateLabel::for_display(Size::new(144, 168));
    let mut c = BigClock::new(FrameSurface::default(), DigitCatalog::default(), Some(label)).unwrap();
    c.start(at(9, 5), ClockStyle::TwelveHour).unwrap();
    assert_eq!(c.date_label().unwrap().text(), "Mon 4");

    // a plain minute tick keeps the label
    c.on_tick(&minute_tick(9, 6, ClockStyle::TwelveHour)).unwrap();
    assert_eq!(c.date_label().unwrap().text(), "Mon 4");

    let mut plain = clock();
    plain.start(at(9, 6), ClockStyle::TwelveHour).unwrap();
    let with_label = c.surface().framebuffer();
    let without = plain.surface().framebuffer();
    // identical above the label frame, different inside it
    for y in 0..128 {
        for x in 0..144 {
            assert_eq!(with_label.pixel(x, y), without.pixel(x, y));
        }
    }
    assert_ne!(with_label.as_slice(), without.as_slice());
}

#[test]
fn label_below_grid_on_taller_display() {
    let display = Size::new(144, 200);
    let label = DateLabel::place(display, Size::new(144, 168));
    let mut c = BigClock::new(FrameSurface::new(144, 200), DigitCatalog::default(), Some(label)).unwrap();
    c.start(at(9, 5), ClockStyle::TwelveHour).unwrap();

    let fb = c.surface().framebuffer();
    let lit_strip = (168..200)
        .flat_map(|y| (0..144).map(move |x| (x, y)))
        .filter(|&(x, y)| fb.pixel(x, y) == Some(BinaryColor::On))
        .count();
    assert!(lit_strip > 0);
}
