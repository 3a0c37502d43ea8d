//! Host-level tests for the tracking array's soft SPI frame codec.

use picogo_kit::tracking_sensor::{FRAME_BITS, channel_request, scale_response};

#[test]
fn request_places_channel_in_the_leading_nibble() {
    assert_eq!(channel_request(0), 0x000);
    assert_eq!(channel_request(3), 0x300);
    assert_eq!(channel_request(5), 0x500);
    // The address is on the wire during the first four clocks of the frame.
    assert_eq!(channel_request(5) >> (FRAME_BITS - 4), 5);
}

#[test]
fn request_fits_the_frame() {
    // Nothing of the control word may fall outside the clocked bits.
    for channel in 0..6 {
        assert!(u32::from(channel_request(channel)) < (1 << FRAME_BITS));
    }
}

#[test]
fn response_scales_twelve_bits_down_to_ten() {
    assert_eq!(scale_response(0x0000), 0);
    assert_eq!(scale_response(0x0FFF), 0x3FF);
    // Half scale stays half scale.
    assert_eq!(scale_response(0x0800), 0x200);
    // The two conversion LSBs are dropped, nothing above bit 11 survives.
    assert_eq!(scale_response(0x0803), 0x200);
    assert_eq!(scale_response(0xF800), 0x200);
}
