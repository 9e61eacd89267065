//! # Watch Face Rendering
//!
//! This module draws the three event rows onto the watch display and
//! provides an ASCII rendition for development on desktop systems. It owns
//! no state: callers pass the current [`DisplayStrings`] after every
//! mutation and on each minute tick.
//!
//! On color-capable devices each row gets its own background strip (orange
//! for bottle, gold for diaper, sky blue for sleep); monochrome devices
//! render black-on-white text only, driven by the `supports_color` flag
//! resolved at startup.

use crate::app::DisplayStrings;
use crate::config::Config;
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_6X10, FONT_10X20},
        MonoTextStyle,
    },
    pixelcolor::{Rgb565, RgbColor, WebColors},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Text},
};

/// Row background colors: bottle, diaper, sleep.
const ROW_COLORS: [Rgb565; 3] = [
    Rgb565::CSS_ORANGE,
    Rgb565::CSS_GOLD,
    Rgb565::CSS_LIGHT_SKY_BLUE,
];

/// Render the watch face: three equal-height rows, each with the absolute
/// time (large font) above the relative "time since" text (small font).
///
/// Draw errors are ignored - a partially drawn frame is repaired by the
/// next redraw, at worst one minute later.
pub fn draw_watch_face<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    strings: &DisplayStrings,
    config: &Config,
) {
    let width = config.display.width;
    let height = config.display.height;
    let row_height = height / 3;

    display.clear(Rgb565::WHITE).ok();

    if config.display.supports_color {
        for (row, color) in ROW_COLORS.iter().enumerate() {
            Rectangle::new(
                Point::new(0, row as i32 * row_height),
                Size::new(width as u32, row_height as u32),
            )
            .into_styled(PrimitiveStyle::with_fill(*color))
            .draw(display)
            .ok();
        }
    }

    let time_style = MonoTextStyle::new(&FONT_10X20, Rgb565::BLACK);
    let since_style = MonoTextStyle::new(&FONT_6X10, Rgb565::BLACK);

    let rows = [
        (&strings.bottle_time, &strings.bottle_since),
        (&strings.diaper_time, &strings.diaper_since),
        (&strings.sleep_range, &strings.sleep_since),
    ];

    for (row, (time_text, since_text)) in rows.into_iter().enumerate() {
        let row_top = row as i32 * row_height;
        let center_x = width / 2;

        Text::with_alignment(
            time_text,
            Point::new(center_x, row_top + row_height / 2 - 4),
            time_style,
            Alignment::Center,
        )
        .draw(display)
        .ok();

        Text::with_alignment(
            since_text,
            Point::new(center_x, row_top + row_height / 2 + 14),
            since_style,
            Alignment::Center,
        )
        .draw(display)
        .ok();
    }
}

/// Render the watch face to the terminal for development mode.
pub fn draw_ascii(strings: &DisplayStrings) {
    println!("+----------------------------+");
    for (label, time_text, since_text) in [
        ("bottle", &strings.bottle_time, &strings.bottle_since),
        ("diaper", &strings.diaper_time, &strings.diaper_since),
        ("sleep", &strings.sleep_range, &strings.sleep_since),
    ] {
        println!("| {:<6} {:>19} |", label, time_text);
        println!("| {:>26} |", since_text);
        println!("+----------------------------+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use embedded_graphics::mock_display::MockDisplay;

    fn populated_strings() -> DisplayStrings {
        DisplayStrings {
            bottle_time: "13:05".to_string(),
            bottle_since: "(5 min ago)".to_string(),
            diaper_time: "12:40".to_string(),
            diaper_since: "(30 min ago)".to_string(),
            sleep_range: "12:00 - ...".to_string(),
            sleep_since: "just now".to_string(),
        }
    }

    fn mock_display() -> MockDisplay<Rgb565> {
        // The face is larger than the 64x64 mock and layers text over the
        // row strips, so relax both checks.
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    #[test]
    fn renders_color_face_without_panicking() {
        let mut display = mock_display();
        draw_watch_face(&mut display, &populated_strings(), &Config::default());

        let area = display.affected_area();
        assert!(area.size.width > 0 && area.size.height > 0);
    }

    #[test]
    fn renders_monochrome_face_without_panicking() {
        let mut config = Config::default();
        config.display.supports_color = false;

        let mut display = mock_display();
        draw_watch_face(&mut display, &populated_strings(), &config);

        let area = display.affected_area();
        assert!(area.size.width > 0 && area.size.height > 0);
    }

    #[test]
    fn renders_blank_face_after_reset() {
        // All-empty strings still draw the background without panicking.
        let mut display = mock_display();
        draw_watch_face(&mut display, &DisplayStrings::default(), &Config::default());
    }

    #[test]
    fn ascii_face_prints_all_rows() {
        draw_ascii(&populated_strings());
        draw_ascii(&DisplayStrings::default());
    }
}
