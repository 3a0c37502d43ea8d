//! Dual H-bridge motor driver (TB6612 on the PicoGo base board).
//!
//! Each wheel has one PWM speed input and two direction lines. Speeds are
//! percentages; `set` takes signed per-wheel speeds so the robot can pivot.

use defmt::info;
use embassy_rp::gpio::Output;
use embassy_rp::pwm::{Config, Pwm};

/// Both drive motors of the PicoGo.
///
/// The caller supplies the two PWM channels (GP16 is PWM0 A, GP21 is PWM2 B
/// on the PicoGo) and the four direction outputs AIN1/AIN2 (GP18/GP17) and
/// BIN1/BIN2 (GP19/GP20).
pub struct Motors<'d> {
    pwm_left: Pwm<'d>,
    cfg_left: Config,
    pwm_right: Pwm<'d>,
    cfg_right: Config,
    ain1: Output<'d>,
    ain2: Output<'d>,
    bin1: Output<'d>,
    bin2: Output<'d>,
}

impl<'d> Motors<'d> {
    /// Create the driver and park both motors.
    #[must_use]
    #[expect(clippy::similar_names, reason = "The H-bridge pin names are fixed.")]
    pub fn new(
        pwm_left: Pwm<'d>,
        pwm_right: Pwm<'d>,
        ain1: Output<'d>,
        ain2: Output<'d>,
        bin1: Output<'d>,
        bin2: Output<'d>,
    ) -> Self {
        // Full-scale wrap at clk_sys/4, the bridge only needs the duty ratio.
        let mut cfg = Config::default();
        cfg.top = u16::MAX;
        cfg.divider = 4_u8.into();
        cfg.compare_a = 0;
        cfg.compare_b = 0;
        cfg.enable = true;

        let mut motors = Self {
            pwm_left,
            cfg_left: cfg.clone(),
            pwm_right,
            cfg_right: cfg,
            ain1,
            ain2,
            bin1,
            bin2,
        };
        motors.pwm_left.set_config(&motors.cfg_left);
        motors.pwm_right.set_config(&motors.cfg_right);
        motors.stop();
        motors
    }

    /// Drive straight ahead at `speed` percent (clamped to 100).
    pub fn forward(&mut self, speed: u8) {
        self.duty(speed, speed);
        self.ain1.set_low();
        self.ain2.set_high();
        self.bin1.set_low();
        self.bin2.set_high();
    }

    /// Drive straight back at `speed` percent (clamped to 100).
    pub fn backward(&mut self, speed: u8) {
        self.duty(speed, speed);
        self.ain1.set_high();
        self.ain2.set_low();
        self.bin1.set_high();
        self.bin2.set_low();
    }

    /// Pivot left: left wheel back, right wheel forward.
    pub fn left(&mut self, speed: u8) {
        self.duty(speed, speed);
        self.ain1.set_high();
        self.ain2.set_low();
        self.bin1.set_low();
        self.bin2.set_high();
    }

    /// Pivot right: left wheel forward, right wheel back.
    pub fn right(&mut self, speed: u8) {
        self.duty(speed, speed);
        self.ain1.set_low();
        self.ain2.set_high();
        self.bin1.set_high();
        self.bin2.set_low();
    }

    /// Zero both duties and release the direction lines.
    pub fn stop(&mut self) {
        self.duty(0, 0);
        self.ain1.set_low();
        self.ain2.set_low();
        self.bin1.set_low();
        self.bin2.set_low();
    }

    /// Per-wheel signed speeds in -100..=100 (clamped).
    ///
    /// Positive is forward. The sign convention on the direction lines
    /// follows the vendor firmware, which drives `set` with the opposite
    /// polarity from `forward`/`backward`.
    pub fn set(&mut self, left: i8, right: i8) {
        let left = i32::from(left).clamp(-100, 100);
        let right = i32::from(right).clamp(-100, 100);
        info!("motors set left={} right={}", left, right);

        if left >= 0 {
            self.ain1.set_high();
            self.ain2.set_low();
        } else {
            self.ain1.set_low();
            self.ain2.set_high();
        }
        if right >= 0 {
            self.bin1.set_low();
            self.bin2.set_high();
        } else {
            self.bin1.set_high();
            self.bin2.set_low();
        }

        #[expect(
            clippy::cast_possible_truncation,
            reason = "Both magnitudes are clamped to 100."
        )]
        self.duty(left.unsigned_abs() as u8, right.unsigned_abs() as u8);
    }

    fn duty(&mut self, left: u8, right: u8) {
        let left_level = level(left);
        let right_level = level(right);
        // Only one compare register per slice is wired, but setting both
        // keeps the driver independent of which channel the pin landed on.
        self.cfg_left.compare_a = left_level;
        self.cfg_left.compare_b = left_level;
        self.pwm_left.set_config(&self.cfg_left);
        self.cfg_right.compare_a = right_level;
        self.cfg_right.compare_b = right_level;
        self.pwm_right.set_config(&self.cfg_right);
    }
}

fn level(speed: u8) -> u16 {
    let speed = u32::from(speed.min(100));
    #[expect(clippy::cast_possible_truncation, reason = "speed <= 100 keeps this in range.")]
    {
        (speed * u32::from(u16::MAX) / 100) as u16
    }
}
