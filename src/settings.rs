use crate::timer::{CYCLE_DELAY, SPLASH_DELAY};

/// Fixed constants of the raw-to-engineering-unit transforms.
/// temperature_scale: degrees Celsius per raw count (LM35 on a 5V 10-bit reference)
/// raw_max: top of the raw input range (10-bit)
/// light_max_lux: lux reported for a full-scale LDR reading
/// ph_tenths: pH range in tenths that the raw range is mapped onto
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub temperature_scale: f32,
    pub raw_max: i32,
    pub light_max_lux: i32,
    pub ph_tenths: (i32, i32), // Low, High
}

impl Calibration {
    pub const AGRIBUD: Self = Self {
        temperature_scale: 0.48876, // 500 / 1023
        raw_max: 1023,
        light_max_lux: 15000,
        ph_tenths: (45, 85),
    };
}

impl Default for Calibration {
    fn default() -> Self {
        Self::AGRIBUD
    }
}

/// Settings groups everything the station is built with.
/// None of it can change at runtime.
/// calibration: sensor transforms
/// splash_ms: how long the boot banner stays up
/// cycle_interval_ms: time between two sample-report cycles
/// baud_rate: serial link speed
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    pub calibration: Calibration,
    pub splash_ms: u32,
    pub cycle_interval_ms: u32,
    pub baud_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            calibration: Calibration::AGRIBUD,
            splash_ms: SPLASH_DELAY,
            cycle_interval_ms: CYCLE_DELAY, // Matches the host poll interval
            baud_rate: 9600,
        }
    }
}
