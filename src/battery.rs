//! Battery monitor: burst-sampled ADC reads through a trimmed-mean filter
//! and an exponential smoother, converted to volts and a charge percentage.
//!
//! The filter and conversion functions are hardware-free and host-tested;
//! [`Battery`] wires them to the on-board divider (VSYS/3 on GP26).

/// Samples taken per measurement burst.
pub const SAMPLE_COUNT: usize = 10;

/// Divider ratio of the battery sense network.
const DIVIDER_RATIO: f32 = 3.0;
/// ADC reference in volts, 12-bit conversion.
const ADC_VOLTS_PER_COUNT: f32 = 3.3 / 4096.0;

const FULL_VOLTS: f32 = 4.2;
const EMPTY_VOLTS: f32 = 3.3;

/// Average of a sample burst with the lowest and highest sample dropped.
#[must_use]
pub fn trimmed_mean(mut samples: [u16; SAMPLE_COUNT]) -> u16 {
    samples.sort_unstable();
    let kept = (SAMPLE_COUNT - 2) as u16;
    // Per-sample division, matching the vendor filter's rounding.
    samples[1..SAMPLE_COUNT - 1]
        .iter()
        .map(|sample| sample / kept)
        .sum()
}

/// Convert a filtered raw reading to the battery voltage.
#[must_use]
pub fn raw_to_volts(raw: u16) -> f32 {
    f32::from(raw) * ADC_VOLTS_PER_COUNT * DIVIDER_RATIO
}

/// Charge percentage, linear between 3.3 V (empty) and 4.2 V (full).
#[must_use]
pub fn percentage(volts: f32) -> u8 {
    if volts < EMPTY_VOLTS {
        0
    } else if volts > FULL_VOLTS {
        100
    } else {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "The ratio is clamped to 0..=1 by the branches above."
        )]
        {
            ((volts - EMPTY_VOLTS) / (FULL_VOLTS - EMPTY_VOLTS) * 100.0) as u8
        }
    }
}

/// 0.7/0.3 exponential smoother over successive filtered readings.
#[derive(Debug, Default)]
pub struct Smoother {
    state: Option<u16>,
}

impl Smoother {
    /// An empty smoother; the first reading passes through unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self { state: None }
    }

    /// Feed one filtered reading, returning the smoothed value.
    pub fn feed(&mut self, raw: u16) -> u16 {
        let next = match self.state {
            #[expect(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "A convex blend of two u16 readings stays in u16 range."
            )]
            Some(prev) => (f32::from(prev) * 0.7 + f32::from(raw) * 0.3) as u16,
            None => raw,
        };
        self.state = Some(next);
        next
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod driver {
    use embassy_rp::adc::{Adc, Async, Channel};

    use super::{SAMPLE_COUNT, Smoother, percentage, raw_to_volts, trimmed_mean};
    use crate::Result;

    /// The battery voltage monitor.
    ///
    /// The caller owns the ADC setup (interrupt binding included) and hands
    /// over the converter plus the sense channel, GP26 on the PicoGo.
    pub struct Battery<'d> {
        adc: Adc<'d, Async>,
        channel: Channel<'d>,
        smoother: Smoother,
    }

    impl<'d> Battery<'d> {
        /// Create the monitor from a configured ADC and its sense channel.
        #[must_use]
        pub fn new(adc: Adc<'d, Async>, channel: Channel<'d>) -> Self {
            Self {
                adc,
                channel,
                smoother: Smoother::new(),
            }
        }

        /// One filtered raw reading (trimmed mean of a sample burst).
        ///
        /// # Errors
        /// Returns an error if an ADC conversion fails.
        pub async fn read_raw(&mut self) -> Result<u16> {
            let mut samples = [0_u16; SAMPLE_COUNT];
            for sample in &mut samples {
                *sample = self.adc.read(&mut self.channel).await?;
            }
            Ok(trimmed_mean(samples))
        }

        /// Smoothed battery voltage in volts.
        ///
        /// # Errors
        /// Returns an error if an ADC conversion fails.
        pub async fn volts(&mut self) -> Result<f32> {
            let raw = self.read_raw().await?;
            Ok(raw_to_volts(self.smoother.feed(raw)))
        }

        /// Charge percentage between 3.3 V and 4.2 V.
        ///
        /// # Errors
        /// Returns an error if an ADC conversion fails.
        pub async fn percent(&mut self) -> Result<u8> {
            Ok(percentage(self.volts().await?))
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use driver::Battery;
