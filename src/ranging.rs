use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Longest echo we wait for, roughly 4.3m there and back
pub const ECHO_TIMEOUT_US: u32 = 25_000;
/// Echo polling resolution
pub const ECHO_STEP_US: u32 = 10;
/// Round trip time of sound per centimeter
pub const US_PER_CM: u32 = 58;

/// Anything that can tell how far away the nearest object is
pub trait Rangefinder {
    /// Distance in centimeters, None when nothing answered
    fn distance_cm(&mut self) -> Option<u16>;
}

/// HC-SR04 ultrasonic ranger on a trigger output and an echo input
pub struct Hcsr04<TRIG, ECHO, D> {
    trigger: TRIG,
    echo: ECHO,
    delay: D,
}

impl<TRIG, ECHO, D> Hcsr04<TRIG, ECHO, D>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
{
    pub fn new(trigger: TRIG, echo: ECHO, delay: D) -> Self {
        Self {
            trigger,
            echo,
            delay,
        }
    }

    /// Fires a 10us trigger pulse and returns the echo width in microseconds
    /// Returns None on timeout or if a pin could not be driven or read
    pub fn echo_width_us(&mut self) -> Option<u32> {
        self.trigger.set_low().ok()?;
        self.delay.delay_us(2);
        self.trigger.set_high().ok()?;
        self.delay.delay_us(10);
        self.trigger.set_low().ok()?;

        // Wait for the echo to start
        let mut waited: u32 = 0;
        while !self.echo.is_high().ok()? {
            if waited >= ECHO_TIMEOUT_US {
                return None;
            }
            self.delay.delay_us(ECHO_STEP_US);
            waited += ECHO_STEP_US;
        }

        // Time the echo
        let mut width: u32 = 0;
        while self.echo.is_high().ok()? {
            if width >= ECHO_TIMEOUT_US {
                return None;
            }
            self.delay.delay_us(ECHO_STEP_US);
            width += ECHO_STEP_US;
        }
        Some(width)
    }

    pub fn release(self) -> (TRIG, ECHO, D) {
        (self.trigger, self.echo, self.delay)
    }
}

impl<TRIG, ECHO, D> Rangefinder for Hcsr04<TRIG, ECHO, D>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
{
    fn distance_cm(&mut self) -> Option<u16> {
        self.echo_width_us()
            .map(|width| (width / US_PER_CM) as u16)
    }
}
