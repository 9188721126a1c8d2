#![cfg_attr(not(test), no_std)]

//! # AgriBud-rs
//! ## A field sensor station in Rust
//!
//! Features:
//! - LM35 temperature, LDR light and simulated pH sampling
//! - HC-SR04 distance on the display
//! - 16x2 LCD readout
//! - `AGRIBUD_DATA:` telemetry lines over UART for the host

pub mod protocol;
pub mod ranging;
pub mod rendering;
pub mod reporter;
pub mod sensors;
pub mod settings;
pub mod station;
pub mod timer;

pub use protocol::{ProtocolError, PREFIX};
pub use ranging::{Hcsr04, Rangefinder};
pub use rendering::{CharDisplay, DisplayError};
pub use reporter::{Reporter, SerialError, SerialSink};
pub use sensors::{AnalogSource, Reading, Sampler, SensorChannel};
pub use settings::{Calibration, Settings};
pub use station::Station;
pub use timer::CountDownTimer;
