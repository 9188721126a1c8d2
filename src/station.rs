use embedded_hal::delay::DelayNs;

use crate::ranging::Rangefinder;
use crate::rendering::CharDisplay;
use crate::reporter::{Reporter, SerialSink};
use crate::sensors::{AnalogSource, Reading, Sampler};

/// Every peripheral the station uses, owned in one place for the life of the program
pub struct Station<A, R, D, S> {
    sampler: Sampler<A>,
    ranger: R,
    reporter: Reporter<D, S>,
}

impl<A, R, D, S> Station<A, R, D, S>
where
    A: AnalogSource,
    R: Rangefinder,
    D: CharDisplay,
    S: SerialSink,
{
    pub fn new(sampler: Sampler<A>, ranger: R, reporter: Reporter<D, S>) -> Self {
        Self {
            sampler,
            ranger,
            reporter,
        }
    }

    /// Shows the boot banner for `splash_ms`, then blanks the screen
    pub fn start<T: DelayNs>(&mut self, delay: &mut T, splash_ms: u32) {
        if let Err(_err) = self.reporter.splash() {
            #[cfg(feature = "defmt")]
            defmt::warn!("splash failed: {}", _err);
        }
        delay.delay_ms(splash_ms);
        if let Err(_err) = self.reporter.clear() {
            #[cfg(feature = "defmt")]
            defmt::warn!("clear failed: {}", _err);
        }
    }

    /// One sample, display and transmit pass.
    /// Returns the reading so the caller can log it
    pub fn cycle(&mut self) -> Reading {
        let reading = self.sampler.sample();
        let distance_cm = self.ranger.distance_cm();
        self.reporter.report(&reading, distance_cm);
        reading
    }

    pub fn release(self) -> (Sampler<A>, R, Reporter<D, S>) {
        (self.sampler, self.ranger, self.reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::SerialError;
    use crate::rendering::DisplayError;
    use crate::sensors::SensorChannel;
    use crate::settings::Calibration;
    use std::string::{String, ToString};
    use std::vec::Vec;

    struct Inputs([u16; 3]);

    impl AnalogSource for Inputs {
        fn read_raw(&mut self, channel: SensorChannel) -> u16 {
            match channel {
                SensorChannel::Temperature => self.0[0],
                SensorChannel::Light => self.0[1],
                SensorChannel::Ph => self.0[2],
            }
        }
    }

    struct FixedRange(Option<u16>);

    impl Rangefinder for FixedRange {
        fn distance_cm(&mut self) -> Option<u16> {
            self.0
        }
    }

    #[derive(Default)]
    struct Lcd {
        log: Vec<String>,
    }

    impl CharDisplay for Lcd {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.log.push("<clear>".to_string());
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) -> Result<(), DisplayError> {
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), DisplayError> {
            self.log.push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct Wire(Vec<u8>);

    impl SerialSink for Wire {
        fn write_line(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
            self.0.extend_from_slice(bytes);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Clock {
        waited_ms: u64,
    }

    impl DelayNs for Clock {
        fn delay_ns(&mut self, ns: u32) {
            self.waited_ms += ns as u64 / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.waited_ms += ms as u64;
        }
    }

    fn station(raw: [u16; 3], distance: Option<u16>) -> Station<Inputs, FixedRange, Lcd, Wire> {
        Station::new(
            Sampler::new(Inputs(raw), Calibration::AGRIBUD),
            FixedRange(distance),
            Reporter::new(Lcd::default(), Wire::default()),
        )
    }

    #[test]
    fn test_start_shows_splash_then_clears() {
        let mut station = station([0, 0, 0], None);
        let mut clock = Clock::default();
        station.start(&mut clock, 2000);
        assert_eq!(clock.waited_ms, 2000);
        let (_, _, reporter) = station.release();
        let (lcd, wire) = reporter.release();
        assert_eq!(lcd.log, vec!["<clear>", "AgriBud System", "<clear>"]);
        assert!(wire.0.is_empty());
    }

    #[test]
    fn test_cycle_end_to_end() {
        let mut station = station([480, 512, 512], Some(37));
        let reading = station.cycle();
        assert!((reading.temperature_c - 234.6048).abs() < 1e-3);
        assert_eq!(reading.light_lux, 7507);
        assert_eq!(reading.ph, 6.5);

        let (_, _, reporter) = station.release();
        let (lcd, wire) = reporter.release();
        assert_eq!(lcd.log, vec!["S:234.6C L:7k   ", "pH:6.5 J:37cm   "]);
        assert_eq!(wire.0, b"AGRIBUD_DATA:234.6,7507,6.5\n");
    }

    #[test]
    fn test_cycles_are_independent() {
        let mut station = station([100, 200, 300], None);
        let first = station.cycle();
        let second = station.cycle();
        assert_eq!(first, second);
        let (_, _, reporter) = station.release();
        let (_, wire) = reporter.release();
        let text = core::str::from_utf8(&wire.0).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], lines[1]);
    }
}
