//! Five-channel reflectance array on the PicoGo underside, read from the
//! on-board ADC over a soft SPI bus (CLK GP6, MOSI GP7, MISO GP27, CS GP28 —
//! pins that do not land on a hardware SPI block, so the bus is bit-banged
//! the way the vendor firmware drives it from a PIO program).
//!
//! The converter answers one channel behind the request, so a sweep reads
//! six frames and discards the first. The frame codec here is hardware-free
//! and host-tested; calibration and position math live in
//! [`crate::line_position`].

/// Bits clocked per soft SPI frame, MSB first.
pub const FRAME_BITS: u32 = 12;

/// Control word selecting `channel` for the next conversion.
///
/// The channel address occupies the top nibble of the 12-bit frame, so it is
/// on the wire during the first four clocks.
#[must_use]
pub fn channel_request(channel: usize) -> u16 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Channel numbers are single-digit."
    )]
    {
        (channel as u16) << (FRAME_BITS - 4)
    }
}

/// Scale a 12-bit conversion down to the 10-bit calibration range.
#[must_use]
pub fn scale_response(response: u16) -> u16 {
    (response & 0x0FFF) >> 2
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod driver {
    use embassy_rp::gpio::{Input, Output};
    use embassy_time::{Duration, Timer, block_for};

    use super::{FRAME_BITS, channel_request, scale_response};
    use crate::line_position::{LineCalibration, LinePosition, SENSOR_COUNT, Samples};

    /// Half-period of the soft SPI clock (~250 kHz).
    const HALF_PERIOD: Duration = Duration::from_micros(2);
    /// Settle time between channel frames.
    const CHANNEL_SETTLE_MICROS: u64 = 50;
    /// Calibration sweeps per [`TrackingSensor::calibrate`] call.
    const CALIBRATION_ROUNDS: usize = 10;

    /// The line-tracking sensor array.
    pub struct TrackingSensor<'d> {
        clk: Output<'d>,
        mosi: Output<'d>,
        miso: Input<'d>,
        cs: Output<'d>,
        calibration: LineCalibration,
        position: LinePosition,
    }

    impl<'d> TrackingSensor<'d> {
        /// Create the sensor from its bus lines; CLK and MOSI idle low, CS high.
        ///
        /// Starts uncalibrated; run [`TrackingSensor::calibrate`] over the line
        /// or fall back to [`TrackingSensor::set_fixed_calibration`].
        #[must_use]
        pub fn new(clk: Output<'d>, mosi: Output<'d>, miso: Input<'d>, cs: Output<'d>) -> Self {
            Self {
                clk,
                mosi,
                miso,
                cs,
                calibration: LineCalibration::new(),
                position: LinePosition::new(),
            }
        }

        /// Raw 10-bit readings of all channels.
        pub async fn read_raw(&mut self) -> Samples {
            let mut sweep = [0_u16; SENSOR_COUNT + 1];
            for (slot, value) in sweep.iter_mut().enumerate() {
                let response = self.transfer(channel_request(slot));
                *value = scale_response(response);
                Timer::after_micros(CHANNEL_SETTLE_MICROS).await;
            }

            // The first frame answers the previous sweep's last request.
            let mut samples = [0_u16; SENSOR_COUNT];
            samples.copy_from_slice(&sweep[1..]);
            samples
        }

        /// Sweep the array over the line and widen the calibration bounds.
        pub async fn calibrate(&mut self) {
            self.calibration = LineCalibration::new();
            for _ in 0..CALIBRATION_ROUNDS {
                let raw = self.read_raw().await;
                self.calibration.update(&raw);
            }
        }

        /// Load the factory calibration instead of sweeping.
        pub fn set_fixed_calibration(&mut self) {
            self.calibration = LineCalibration::fixed();
        }

        /// The calibration bounds currently in use.
        #[must_use]
        pub fn calibration(&self) -> &LineCalibration {
            &self.calibration
        }

        /// Readings rescaled to 0..=1000 against the calibration bounds.
        pub async fn read_calibrated(&mut self) -> Samples {
            let raw = self.read_raw().await;
            self.calibration.rescale(&raw)
        }

        /// Line position estimate (1000..=5000, 3000 centered) plus the
        /// calibrated readings it was computed from.
        pub async fn read_line(&mut self, white_line: bool) -> (u16, Samples) {
            let calibrated = self.read_calibrated().await;
            let position = self.position.update(&calibrated, white_line);
            (position, calibrated)
        }

        // One 12-bit CPOL=0/CPHA=0 frame, MSB first: drive MOSI while the
        // clock is low, sample MISO on the rising edge.
        fn transfer(&mut self, request: u16) -> u16 {
            let mut response = 0_u16;
            self.cs.set_low();
            for bit in (0..FRAME_BITS).rev() {
                if request >> bit & 1 == 1 {
                    self.mosi.set_high();
                } else {
                    self.mosi.set_low();
                }
                block_for(HALF_PERIOD);
                self.clk.set_high();
                response <<= 1;
                if self.miso.is_high() {
                    response |= 1;
                }
                block_for(HALF_PERIOD);
                self.clk.set_low();
            }
            self.mosi.set_low();
            self.cs.set_high();
            response
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use driver::TrackingSensor;
