use heapless::String;
use ufmt::{uDisplay, uWrite, uwrite, Formatter};

use crate::sensors::Reading;

pub const COLUMNS: usize = 16;
pub const SPLASH: &str = "AgriBud System";

/// One full row of the LCD
pub type Line = String<COLUMNS>;

/// Errors that can occur while driving the character display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The driver rejected a command or a pin write failed
    Bus,
}

/// A 16x2 character display addressed by cursor position
pub trait CharDisplay {
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Moves the cursor; `col` 0-15, `row` 0-1
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    fn print(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Prints a float with exactly one decimal place, rounding half away from zero.
/// ufmt has no float support.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tenths(pub f32);

impl uDisplay for Tenths {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        // `as` saturates, NaN lands on 0
        let scaled = if self.0 >= 0.0 {
            (self.0 * 10.0 + 0.5) as i32
        } else {
            (self.0 * 10.0 - 0.5) as i32
        };
        if scaled < 0 {
            f.write_str("-")?;
        }
        let abs = scaled.unsigned_abs();
        uwrite!(f, "{}.{}", abs / 10, abs % 10)
    }
}

/// Cuts text at the display width and pads it with spaces,
/// so a shorter value overwrites a longer one completely
pub fn fit(text: &str) -> Line {
    let mut line = Line::new();
    for c in text.chars().take(COLUMNS) {
        if line.push(c).is_err() {
            break;
        }
    }
    while line.len() < COLUMNS {
        let _ = line.push(' ');
    }
    line
}

/// Top row: S:23.4C L:7k
/// Light is shown in whole kilolux, truncated
pub fn temperature_light_line(reading: &Reading) -> Line {
    let mut text: String<32> = String::new();
    // Overflow only loses what would be cut anyway
    let _ = uwrite!(
        text,
        "S:{}C L:{}k",
        Tenths(reading.temperature_c),
        reading.light_lux / 1000
    );
    fit(&text)
}

/// Bottom row: pH:6.5 J:42cm, or J:--cm without a distance
pub fn ph_distance_line(reading: &Reading, distance_cm: Option<u16>) -> Line {
    let mut text: String<32> = String::new();
    let _ = match distance_cm {
        Some(cm) => uwrite!(text, "pH:{} J:{}cm", Tenths(reading.ph), cm),
        None => uwrite!(text, "pH:{} J:--cm", Tenths(reading.ph)),
    };
    fit(&text)
}

/// Basic function for rendering text onto the LCD
/// param line: text to render
/// param top_line: if the top line is to be written to
/// param lcd: LCD instance
pub fn render_screen<D: CharDisplay>(line: &str, top_line: bool, lcd: &mut D) -> Result<(), DisplayError> {
    if top_line {
        lcd.set_cursor(0, 0)?;
    } else {
        lcd.set_cursor(0, 1)?;
    }
    lcd.print(line)
}

/// Renders both rows of a reading
/// param reading: the cycle's values
/// param distance_cm: rangefinder result, if any
/// param lcd: LCD instance
pub fn render_reading<D: CharDisplay>(
    reading: &Reading,
    distance_cm: Option<u16>,
    lcd: &mut D,
) -> Result<(), DisplayError> {
    render_screen(&temperature_light_line(reading), true, lcd)?;
    render_screen(&ph_distance_line(reading, distance_cm), false, lcd)
}

/// Clears the screen and shows the boot banner on the top row
pub fn render_splash<D: CharDisplay>(lcd: &mut D) -> Result<(), DisplayError> {
    lcd.clear()?;
    render_screen(SPLASH, true, lcd)
}
