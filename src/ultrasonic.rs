//! HC-SR04 style ultrasonic ranger (TRIG GP14, ECHO GP15 on the PicoGo).

use embassy_rp::gpio::{Input, Output};
use embassy_time::{Duration, Instant, Timer, with_timeout};

use crate::{Error, Result};

/// Longest plausible echo round-trip; the sensor itself gives up near 4 m.
const ECHO_TIMEOUT: Duration = Duration::from_millis(30);
/// Speed of sound, cm per microsecond, halved for the round trip below.
const CM_PER_MICRO: f32 = 0.034;

/// The ultrasonic distance sensor.
pub struct Ultrasonic<'d> {
    trig: Output<'d>,
    echo: Input<'d>,
}

impl<'d> Ultrasonic<'d> {
    /// Create the sensor from its trigger output and echo input.
    #[must_use]
    pub fn new(trig: Output<'d>, echo: Input<'d>) -> Self {
        Self { trig, echo }
    }

    /// One ranging cycle: 10 µs trigger pulse, then time the echo pulse.
    ///
    /// # Errors
    /// Returns [`Error::EchoTimeout`] if the echo pulse does not start or
    /// end within the ranging window (sensor missing or out of range).
    pub async fn distance_cm(&mut self) -> Result<f32> {
        self.trig.set_high();
        Timer::after_micros(10).await;
        self.trig.set_low();

        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_high())
            .await
            .map_err(|_| Error::EchoTimeout)?;
        let start = Instant::now();
        with_timeout(ECHO_TIMEOUT, self.echo.wait_for_low())
            .await
            .map_err(|_| Error::EchoTimeout)?;

        #[expect(
            clippy::cast_precision_loss,
            reason = "The echo window keeps this under 2^15 microseconds."
        )]
        let micros = start.elapsed().as_micros() as f32;
        Ok(micros * CM_PER_MICRO / 2.0)
    }
}
