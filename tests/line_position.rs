//! Host-level tests for tracking-array calibration and line position math.

use picogo_kit::line_position::{LineCalibration, LinePosition, Samples};

#[test]
fn update_widens_bounds_and_ignores_zeros() {
    let mut cal = LineCalibration::new();
    cal.update(&[120, 0, 500, 900, 101]);
    cal.update(&[80, 130, 0, 950, 820]);

    let scaled = cal.rescale(&[80, 130, 500, 900, 400]);
    // Channel 0 spans 80..=120, so 80 rescales to the bottom.
    assert_eq!(scaled[0], 0);
    // Channel 1 never saw two distinct nonzero samples: span 0, reads 0.
    assert_eq!(scaled[1], 0);
    // Channel 3 spans 900..=950.
    assert_eq!(scaled[3], 0);
}

#[test]
fn rescale_is_linear_and_clamped() {
    let mut cal = LineCalibration::new();
    cal.update(&[100, 100, 100, 100, 100]);
    cal.update(&[900, 900, 900, 900, 900]);

    assert_eq!(cal.rescale(&[100, 500, 900, 50, 1000]), [0, 500, 1000, 0, 1000]);
}

#[test]
fn fixed_calibration_matches_factory_bounds() {
    let cal = LineCalibration::fixed();
    // Bottom and top of channel 0's factory range: 117..=841.
    assert_eq!(cal.rescale(&[117, 0, 0, 0, 0])[0], 0);
    assert_eq!(cal.rescale(&[841, 0, 0, 0, 0])[0], 1000);
}

#[test]
fn centered_line_reads_3000() {
    let mut pos = LinePosition::new();
    let centered: Samples = [0, 0, 1000, 0, 0];
    assert_eq!(pos.update(&centered, false), 3000);
}

#[test]
fn edge_channels_read_1000_and_5000() {
    let mut pos = LinePosition::new();
    assert_eq!(pos.update(&[1000, 0, 0, 0, 0], false), 1000);
    assert_eq!(pos.update(&[0, 0, 0, 0, 1000], false), 5000);
}

#[test]
fn white_line_inverts_readings() {
    let mut pos = LinePosition::new();
    let inverted: Samples = [1000, 1000, 0, 1000, 1000];
    assert_eq!(pos.update(&inverted, true), 3000);
}

#[test]
fn noise_floor_excludes_faint_channels() {
    let mut pos = LinePosition::new();
    // Channel 4 is below the noise floor; only channel 2 contributes weight.
    let faint: Samples = [0, 0, 1000, 0, 50];
    let position = pos.update(&faint, false);
    // The faint sample still lands in the denominator: 3_000_000 / 1050.
    assert_eq!(u32::from(position), 3_000_000 / 1050);
}

#[test]
fn lost_line_snaps_to_the_side_last_seen() {
    let mut pos = LinePosition::new();
    // Last seen well left of center.
    assert_eq!(pos.update(&[1000, 0, 0, 0, 0], false), 1000);

    // "No line": every channel reads at or above the on-line threshold.
    let off_line: Samples = [1000, 1000, 1000, 1000, 1000];
    for _ in 0..19 {
        // Position holds while the miss counter runs up.
        assert_eq!(pos.update(&off_line, false), 1000);
    }
    // Twentieth miss: snap left of center.
    assert_eq!(pos.update(&off_line, false), 2500);
}

#[test]
fn lost_line_snaps_right_when_last_seen_right() {
    let mut pos = LinePosition::new();
    assert_eq!(pos.update(&[0, 0, 0, 0, 1000], false), 5000);

    let off_line: Samples = [1000, 1000, 1000, 1000, 1000];
    for _ in 0..19 {
        assert_eq!(pos.update(&off_line, false), 5000);
    }
    assert_eq!(pos.update(&off_line, false), 3500);
}
