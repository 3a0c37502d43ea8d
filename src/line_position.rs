//! Calibration and line-position math for the five-channel tracking array.
//!
//! Hardware-free so the weighted-average and fallback behavior can be tested
//! on the host; [`crate::TrackingSensor`] feeds it raw SPI readings.

/// Number of reflectance channels in the array.
pub const SENSOR_COUNT: usize = 5;

/// One reading of all channels.
pub type Samples = [u16; SENSOR_COUNT];

/// Calibrated readings above this (after white-line inversion) count as
/// "no line under this channel".
pub const ON_LINE_THRESHOLD: u16 = 800;
/// Calibrated readings at or below this are excluded from the weighted
/// average as noise.
pub const NOISE_FLOOR: u16 = 50;

/// Consecutive line-less updates before the position snaps to an edge.
const MAX_FAILS: u32 = 20;

/// Per-channel min/max bounds used to rescale raw readings to 0..=1000.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCalibration {
    min: Samples,
    max: Samples,
}

impl LineCalibration {
    /// Empty calibration, ready to be widened by [`LineCalibration::update`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min: [1023; SENSOR_COUNT],
            max: [0; SENSOR_COUNT],
        }
    }

    /// Factory calibration values for the PicoGo array.
    #[must_use]
    pub const fn fixed() -> Self {
        Self {
            min: [117, 129, 124, 127, 101],
            max: [841, 899, 925, 945, 823],
        }
    }

    /// Widen the bounds with one raw reading; zero samples are ignored
    /// (an all-zero channel usually means the frame was dropped).
    pub fn update(&mut self, raw: &Samples) {
        for (channel, &value) in raw.iter().enumerate() {
            if value != 0 {
                if value > self.max[channel] {
                    self.max[channel] = value;
                }
                if value < self.min[channel] {
                    self.min[channel] = value;
                }
            }
        }
    }

    /// Rescale a raw reading to 0..=1000 against the calibrated bounds.
    ///
    /// A channel whose bounds never widened (max <= min) rescales to 0.
    #[must_use]
    pub fn rescale(&self, raw: &Samples) -> Samples {
        let mut scaled = [0_u16; SENSOR_COUNT];
        for (channel, &value) in raw.iter().enumerate() {
            let span = u32::from(self.max[channel].saturating_sub(self.min[channel]));
            if span != 0 {
                let above = u32::from(value.saturating_sub(self.min[channel]));
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "Clamped to 1000 before narrowing."
                )]
                {
                    scaled[channel] = ((above * 1000 / span).min(1000)) as u16;
                }
            }
        }
        scaled
    }
}

impl Default for LineCalibration {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted-average line position over calibrated readings.
///
/// Positions run from 1000 (line under the leftmost channel) to 5000
/// (rightmost), 3000 being centered. When the line has been lost for
/// [`MAX_FAILS`] consecutive updates the position snaps to 2500 or 3500,
/// whichever edge the line was last seen on, so a follower keeps turning
/// toward where the line went.
#[derive(Debug, Default)]
pub struct LinePosition {
    successive_misses: u32,
    last: u16,
}

impl LinePosition {
    /// Start with no line history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            successive_misses: 0,
            last: 0,
        }
    }

    /// Fold in one calibrated reading and return the position estimate.
    ///
    /// `white_line` inverts the readings for a white line on a dark floor.
    pub fn update(&mut self, calibrated: &Samples, white_line: bool) -> u16 {
        let mut weighted: u32 = 0;
        let mut total: u32 = 0;
        let mut on_line = false;

        for (channel, &sample) in calibrated.iter().enumerate() {
            let value = if white_line {
                1000_u16.saturating_sub(sample)
            } else {
                sample
            };

            // Track whether any channel sees the line at all.
            if value < ON_LINE_THRESHOLD {
                on_line = true;
            }

            // Only average in values above the noise floor.
            if value > NOISE_FLOOR {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "channel < SENSOR_COUNT, the weight fits easily."
                )]
                let weight = (channel as u32 + 1) * 1000;
                weighted += u32::from(value) * weight;
            }
            total += u32::from(value);
        }

        if on_line {
            self.successive_misses = 0;
        } else {
            self.successive_misses = (self.successive_misses + 1).min(MAX_FAILS);
        }

        if self.successive_misses >= MAX_FAILS {
            // Snap toward the side the line was last seen on.
            self.last = if self.last < 3050 { 2500 } else { 3500 };
        }

        if on_line && total != 0 {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "The average is bounded by the largest weight, 5000."
            )]
            {
                self.last = (weighted / total) as u16;
            }
        }
        self.last
    }
}
