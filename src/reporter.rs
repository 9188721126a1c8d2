use crate::protocol::{self, ProtocolError};
use crate::rendering::{self, CharDisplay, DisplayError};
use crate::sensors::Reading;

/// Errors that can occur while sending a telemetry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// The line could not be built
    Encode(ProtocolError),
    /// The transmitter refused the bytes
    Write,
}

impl From<ProtocolError> for SerialError {
    fn from(err: ProtocolError) -> Self {
        SerialError::Encode(err)
    }
}

/// Outgoing half of the serial link to the host.
/// Writes are fire and forget: nobody acknowledges them.
pub trait SerialSink {
    fn write_line(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

/// Sends each reading to the display and to the host
pub struct Reporter<D, S> {
    display: D,
    serial: S,
}

impl<D: CharDisplay, S: SerialSink> Reporter<D, S> {
    pub fn new(display: D, serial: S) -> Self {
        Self { display, serial }
    }

    pub fn splash(&mut self) -> Result<(), DisplayError> {
        rendering::render_splash(&mut self.display)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear()
    }

    /// Writes both display rows for a reading
    pub fn show(&mut self, reading: &Reading, distance_cm: Option<u16>) -> Result<(), DisplayError> {
        rendering::render_reading(reading, distance_cm, &mut self.display)
    }

    /// Sends the `AGRIBUD_DATA:` record for a reading
    pub fn transmit(&mut self, reading: &Reading) -> Result<(), SerialError> {
        let line = protocol::encode(reading)?;
        self.serial.write_line(line.as_bytes())
    }

    /// Best effort: a failing display never holds back the serial line
    /// and neither failure is retried
    pub fn report(&mut self, reading: &Reading, distance_cm: Option<u16>) {
        if let Err(_err) = self.show(reading, distance_cm) {
            #[cfg(feature = "defmt")]
            defmt::warn!("display update failed: {}", _err);
        }
        if let Err(_err) = self.transmit(reading) {
            #[cfg(feature = "defmt")]
            defmt::warn!("telemetry send failed: {}", _err);
        }
    }

    pub fn release(self) -> (D, S) {
        (self.display, self.serial)
    }
}
