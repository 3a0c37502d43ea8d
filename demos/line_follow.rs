//! Follow a dark line on a light floor with the tracking array.
//!
//! Sweeps the calibration while rocking in place, then steers with a
//! proportional term on the weighted line position (3000 = centered).

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;
use panic_probe as _;
use picogo_kit::{Motors, TrackingSensor};

/// Base wheel speed in percent.
const BASE_SPEED: i32 = 30;
/// Proportional gain, speed percent per 1000 position counts.
const GAIN: i32 = 15;

#[embassy_executor::main]
async fn main(_spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    info!("line follower starting...");

    let mut motors = Motors::new(
        Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default()),
        Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, PwmConfig::default()),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
    );

    let mut tracker = TrackingSensor::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Input::new(p.PIN_27, Pull::None),
        Output::new(p.PIN_28, Level::High),
    );

    // Pivot slowly during the sweep so every channel sees both the line
    // and the bare floor.
    info!("calibrating...");
    motors.left(15);
    tracker.calibrate().await;
    motors.stop();
    info!("calibration done");

    loop {
        let (position, _values) = tracker.read_line(false).await;

        // 3000 is centered; steer against the offset.
        let error = i32::from(position) - 3000;
        let correction = error * GAIN / 1000;
        let left = (BASE_SPEED + correction).clamp(-100, 100);
        let right = (BASE_SPEED - correction).clamp(-100, 100);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "Both speeds are clamped to the i8 range above."
        )]
        motors.set(left as i8, right as i8);

        Timer::after_millis(20).await;
    }
}
