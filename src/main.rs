#![no_std]
#![no_main]

use bsp::entry;
use defmt::*;
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use embedded_hal_0_2::adc::OneShot;
use panic_probe as _;
use rp_pico::hal::Timer;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use agribud_rs::rendering::{CharDisplay, DisplayError};
use agribud_rs::reporter::{Reporter, SerialError, SerialSink};
use agribud_rs::sensors::{twelve_to_ten_bit, AnalogSource, Sampler, SensorChannel};
use agribud_rs::settings::Settings;
use agribud_rs::timer::{CountDownTimer, TICK_TIME_DELAY};
use agribud_rs::{Hcsr04, Station};
use bsp::hal::{
    clocks::{init_clocks_and_plls, Clock},
    pac,
    watchdog::Watchdog,
};
use lcd1602_rs::LCD1602;
use rp_pico::hal;
use rp_pico::hal::adc::AdcPin;
use rp_pico::hal::fugit::RateExtU32;
use rp_pico::hal::gpio::bank0::{
    Gpio0, Gpio1, Gpio16, Gpio17, Gpio2, Gpio26, Gpio27, Gpio28, Gpio3, Gpio4, Gpio5,
};
use rp_pico::hal::gpio::{FunctionSio, FunctionUart, Pin, PullDown, PullNone, SioInput, SioOutput};
use rp_pico::hal::uart::{DataBits, Enabled, StopBits, UartConfig, UartPeripheral};
use rp_pico::hal::Adc;

type LcdDriver = LCD1602<
    Pin<Gpio1, FunctionSio<SioOutput>, PullDown>,
    Pin<Gpio0, FunctionSio<SioOutput>, PullDown>,
    Pin<Gpio2, FunctionSio<SioOutput>, PullDown>,
    Pin<Gpio3, FunctionSio<SioOutput>, PullDown>,
    Pin<Gpio4, FunctionSio<SioOutput>, PullDown>,
    Pin<Gpio5, FunctionSio<SioOutput>, PullDown>,
    Timer,
>;

type UartPins = (
    Pin<Gpio16, FunctionUart, PullDown>,
    Pin<Gpio17, FunctionUart, PullDown>,
);

type AnalogPin<G> = AdcPin<Pin<G, FunctionSio<SioInput>, PullNone>>;

/// The LCD1602 on the 4-bit bus
struct Lcd(LcdDriver);

impl CharDisplay for Lcd {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.0.clear().map_err(|_| DisplayError::Bus)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        self.0.set_position(col, row).map_err(|_| DisplayError::Bus)
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        self.0.print(text).map_err(|_| DisplayError::Bus)
    }
}

/// UART0 towards the host
struct HostLink(UartPeripheral<Enabled, pac::UART0, UartPins>);

impl SerialSink for HostLink {
    fn write_line(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        // Blocks until the FIFO took everything; nobody listens for an answer
        self.0.write_full_blocking(bytes);
        Ok(())
    }
}

/// ADC0..ADC2 with the sensors wired to them
struct SensorInputs {
    adc: Adc,
    lm35: AnalogPin<Gpio26>,
    ph: AnalogPin<Gpio27>,
    ldr: AnalogPin<Gpio28>,
}

impl AnalogSource for SensorInputs {
    fn read_raw(&mut self, channel: SensorChannel) -> u16 {
        // A failed conversion reads as 0
        let counts: u16 = match channel {
            SensorChannel::Temperature => self.adc.read(&mut self.lm35).unwrap_or(0),
            SensorChannel::Light => self.adc.read(&mut self.ldr).unwrap_or(0),
            SensorChannel::Ph => self.adc.read(&mut self.ph).unwrap_or(0),
        };
        debug!("{}: {} counts", channel, counts);
        twelve_to_ten_bit(counts)
    }
}

#[entry]
fn main() -> ! {
    info!("AgriBud Starting");
    let settings = Settings::default();

    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let mut delay = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up LCD1602
    let lcd = LCD1602::new(
        pins.gpio1.into_push_pull_output(),
        pins.gpio0.into_push_pull_output(),
        pins.gpio2.into_push_pull_output(),
        pins.gpio3.into_push_pull_output(),
        pins.gpio4.into_push_pull_output(),
        pins.gpio5.into_push_pull_output(),
        delay,
    )
    .unwrap();

    // Set up the host link
    let uart_pins = (
        pins.gpio16.into_function::<FunctionUart>(),
        pins.gpio17.into_function::<FunctionUart>(),
    );
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            UartConfig::new(
                settings.baud_rate.Hz(),
                DataBits::Eight,
                None,
                StopBits::One,
            ),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();

    // Set up analog sensors
    let adc = Adc::new(pac.ADC, &mut pac.RESETS);
    let inputs = SensorInputs {
        adc,
        lm35: AdcPin::new(pins.gpio26.into_floating_input()).unwrap(),
        ph: AdcPin::new(pins.gpio27.into_floating_input()).unwrap(),
        ldr: AdcPin::new(pins.gpio28.into_floating_input()).unwrap(),
    };

    // Set up motion sensor; wired, not part of the report
    let _motion = pins.gpio7.into_pull_down_input();

    // Set up ultrasonic ranger
    let ranger = Hcsr04::new(
        pins.gpio8.into_push_pull_output(),
        pins.gpio9.into_pull_down_input(),
        delay,
    );

    let mut station = Station::new(
        Sampler::new(inputs, settings.calibration),
        ranger,
        Reporter::new(Lcd(lcd), HostLink(uart)),
    );

    station.start(&mut delay, settings.splash_ms);

    let mut next_cycle = CountDownTimer::new(0);

    info!("AgriBud Ready");

    loop {
        if next_cycle.is_finished() {
            let reading = station.cycle();
            info!("reading: {}", reading);
            next_cycle.set_time(settings.cycle_interval_ms);
        }

        delay.delay_ms(TICK_TIME_DELAY);
        next_cycle.tick(TICK_TIME_DELAY);
    }
}
