//! Board support for the Waveshare PicoGo robot and RP2350-Touch-LCD family.
//!
//! The algorithmic core is the NEC infrared remote decoder in [`nec`]; the
//! remaining modules are thin Embassy drivers for the on-board peripherals
//! (motors, battery monitor, line-tracking array, ultrasonic ranger,
//! Bluetooth serial link).
//!
//! The decode and sensor math lives in hardware-free modules ([`nec`],
//! [`line_position`], the filter half of [`battery`], the frame codec in
//! [`tracking_sensor`], the message assembly in [`bluetooth`]) so it can be
//! tested on the host with `--no-default-features --features host`.
#![no_std]

pub mod battery;
pub mod bluetooth;
mod error;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod ir_remote;
pub mod line_position;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod motor;
pub mod nec;
pub mod tracking_sensor;
#[cfg(any(feature = "pico1", feature = "pico2"))]
mod ultrasonic;

// Re-export commonly used items
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use battery::Battery;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use bluetooth::Bluetooth;
pub use bluetooth::BtMessage;
pub use error::{Error, Result};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ir_remote::{IrRemote, ObstacleSensors, keys};
pub use line_position::{LineCalibration, LinePosition, SENSOR_COUNT};
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use motor::Motors;
pub use nec::LastKey;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use tracking_sensor::TrackingSensor;
#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use ultrasonic::Ultrasonic;
