use crate::settings::Calibration;

/// The three analog inputs of the station
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorChannel {
    /// LM35 on ADC0
    Temperature,
    /// LDR divider on ADC2
    Light,
    /// pH probe stand-in on ADC1
    Ph,
}

/// Source of raw 10-bit analog counts.
///
/// Implementations never fail: a conversion that cannot be taken reads as 0,
/// which lands on the low end of every mapped range.
pub trait AnalogSource {
    fn read_raw(&mut self, channel: SensorChannel) -> u16;
}

/// One cycle's worth of converted values. Never retained past the cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Degrees Celsius
    pub temperature_c: f32,
    /// 0 - 15000 lux
    pub light_lux: u16,
    /// Simulated, 4.5 - 8.5
    pub ph: f32,
}

impl Reading {
    pub const fn new(temperature_c: f32, light_lux: u16, ph: f32) -> Self {
        Self {
            temperature_c,
            light_lux,
            ph,
        }
    }

    /// Converts a raw triple with the given calibration
    pub fn from_raw(temperature: u16, light: u16, ph: u16, calibration: &Calibration) -> Self {
        Self {
            temperature_c: temperature_from_raw(temperature, calibration),
            light_lux: light_from_raw(light, calibration),
            ph: ph_from_raw(ph, calibration),
        }
    }
}

/// Integer linear rescale, truncating toward zero.
/// Inputs outside of [in_min, in_max] extrapolate; nothing is clamped.
pub fn map_range(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Gets temperature in Celsius
pub fn temperature_from_raw(raw: u16, calibration: &Calibration) -> f32 {
    raw as f32 * calibration.temperature_scale
}

/// Gets illuminance in whole lux
pub fn light_from_raw(raw: u16, calibration: &Calibration) -> u16 {
    let lux = map_range(
        raw as i32,
        0,
        calibration.raw_max,
        0,
        calibration.light_max_lux,
    );
    u16::try_from(lux).unwrap_or(u16::MAX)
}

/// Gets the simulated pH, always a whole number of tenths
pub fn ph_from_raw(raw: u16, calibration: &Calibration) -> f32 {
    let (low, high) = calibration.ph_tenths;
    map_range(raw as i32, 0, calibration.raw_max, low, high) as f32 / 10.0
}

/// Brings a 12-bit RP2040 conversion onto the 10-bit scale the calibration expects
pub const fn twelve_to_ten_bit(counts: u16) -> u16 {
    (counts & 0x0FFF) >> 2
}

/// Reads the three channels and converts them.
/// Holds no state between samples besides the source itself.
pub struct Sampler<A> {
    source: A,
    calibration: Calibration,
}

impl<A: AnalogSource> Sampler<A> {
    pub fn new(source: A, calibration: Calibration) -> Self {
        Self {
            source,
            calibration,
        }
    }

    /// Raw counts in Temperature, Light, Ph order
    pub fn sample_raw(&mut self) -> (u16, u16, u16) {
        (
            self.source.read_raw(SensorChannel::Temperature),
            self.source.read_raw(SensorChannel::Light),
            self.source.read_raw(SensorChannel::Ph),
        )
    }

    pub fn sample(&mut self) -> Reading {
        let (temperature, light, ph) = self.sample_raw();
        Reading::from_raw(temperature, light, ph, &self.calibration)
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn release(self) -> A {
        self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: Calibration = Calibration::AGRIBUD;

    struct FixedInputs {
        temperature: u16,
        light: u16,
        ph: u16,
    }

    impl AnalogSource for FixedInputs {
        fn read_raw(&mut self, channel: SensorChannel) -> u16 {
            match channel {
                SensorChannel::Temperature => self.temperature,
                SensorChannel::Light => self.light,
                SensorChannel::Ph => self.ph,
            }
        }
    }

    #[test]
    fn test_temperature_is_linear_in_raw() {
        for raw in 0..=1023u16 {
            let expected = raw as f32 * 0.48876;
            assert!((temperature_from_raw(raw, &CAL) - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_light_range_and_monotonic() {
        let mut previous = 0;
        for raw in 0..=1023u16 {
            let lux = light_from_raw(raw, &CAL);
            assert!(lux <= 15000);
            assert!(lux >= previous);
            previous = lux;
        }
        assert_eq!(light_from_raw(0, &CAL), 0);
        assert_eq!(light_from_raw(1023, &CAL), 15000);
    }

    #[test]
    fn test_ph_range_and_monotonic() {
        let mut previous = 4.5;
        for raw in 0..=1023u16 {
            let ph = ph_from_raw(raw, &CAL);
            assert!((4.5..=8.5).contains(&ph));
            assert!(ph >= previous);
            previous = ph;
        }
        assert_eq!(ph_from_raw(0, &CAL), 4.5);
        assert_eq!(ph_from_raw(1023, &CAL), 8.5);
    }

    #[test]
    fn test_map_range_truncates() {
        // 512 * 15000 / 1023 = 7507.33
        assert_eq!(map_range(512, 0, 1023, 0, 15000), 7507);
        // 45 + 512 * 40 / 1023 = 45 + 20.02
        assert_eq!(map_range(512, 0, 1023, 45, 85), 65);
    }

    #[test]
    fn test_light_saturates_instead_of_wrapping() {
        assert_eq!(light_from_raw(u16::MAX, &CAL), u16::MAX);
    }

    #[test]
    fn test_twelve_to_ten_bit() {
        assert_eq!(twelve_to_ten_bit(0), 0);
        assert_eq!(twelve_to_ten_bit(4095), 1023);
        assert_eq!(twelve_to_ten_bit(2048), 512);
    }

    #[test]
    fn test_sample_scenario() {
        let mut sampler = Sampler::new(
            FixedInputs {
                temperature: 480,
                light: 512,
                ph: 512,
            },
            CAL,
        );
        let reading = sampler.sample();
        assert!((reading.temperature_c - 234.6048).abs() < 1e-3);
        assert_eq!(reading.light_lux, 7507);
        assert_eq!(reading.ph, 6.5);
    }

    #[test]
    fn test_sample_is_idempotent() {
        let mut sampler = Sampler::new(
            FixedInputs {
                temperature: 51,
                light: 1000,
                ph: 3,
            },
            CAL,
        );
        let first = sampler.sample();
        let second = sampler.sample();
        assert_eq!(first, second);
    }

    #[test]
    fn test_disconnected_inputs_read_low_extreme() {
        let mut sampler = Sampler::new(
            FixedInputs {
                temperature: 0,
                light: 0,
                ph: 0,
            },
            CAL,
        );
        assert_eq!(sampler.sample(), Reading::new(0.0, 0, 4.5));
    }
}
