//! Telemetry line format
//!
//! Every cycle the station sends one ASCII record over the serial link:
//!
//! ```text
//! AGRIBUD_DATA:<temperature>,<light>,<ph>\n
//! ```
//!
//! - `temperature`: degrees Celsius, one decimal place
//! - `light`: whole lux
//! - `ph`: one decimal place
//!
//! The host matches the literal prefix, splits on commas and treats the
//! newline as the record delimiter. There is no version field and no
//! checksum; the format must stay exactly as is.

use heapless::String;
use ufmt::uwrite;

use crate::rendering::Tenths;
use crate::sensors::Reading;

pub const PREFIX: &str = "AGRIBUD_DATA:";

/// Fits the longest possible record with room to spare
pub const MAX_LINE_LEN: usize = 64;

pub type TelemetryLine = String<MAX_LINE_LEN>;

/// Errors from building or reading a telemetry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Line buffer too small
    Overflow,
    /// Line does not start with `AGRIBUD_DATA:`
    MissingPrefix,
    /// Not exactly three comma-separated fields
    FieldCount,
    /// Temperature field is not a number
    Temperature,
    /// Light field is not an unsigned integer
    Light,
    /// pH field is not a number
    Ph,
}

/// Builds the serial record for a reading, newline included
pub fn encode(reading: &Reading) -> Result<TelemetryLine, ProtocolError> {
    let mut line = TelemetryLine::new();
    uwrite!(
        line,
        "{}{},{},{}\n",
        PREFIX,
        Tenths(reading.temperature_c),
        reading.light_lux,
        Tenths(reading.ph)
    )
    .map_err(|_| ProtocolError::Overflow)?;
    Ok(line)
}

/// Reads one record back into a `Reading`.
/// Accepts any float formatting for temperature and pH, and an optional
/// `\n` or `\r\n` terminator.
pub fn parse(line: &str) -> Result<Reading, ProtocolError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let payload = line
        .strip_prefix(PREFIX)
        .ok_or(ProtocolError::MissingPrefix)?;

    let mut fields = payload.split(',');
    let (Some(temperature), Some(light), Some(ph), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ProtocolError::FieldCount);
    };

    Ok(Reading {
        temperature_c: temperature
            .trim()
            .parse()
            .map_err(|_| ProtocolError::Temperature)?,
        light_lux: light.trim().parse().map_err(|_| ProtocolError::Light)?,
        ph: ph.trim().parse().map_err(|_| ProtocolError::Ph)?,
    })
}
