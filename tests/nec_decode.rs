//! Host-level tests for the NEC decode routine, driven by synthetic pulse
//! schedules expressed in 100 µs ticks.

use picogo_kit::nec::{self, Frame, IrLine, LastKey};

/// Remote key code for the UP (2) key.
const KEY_UP: u8 = 0x18;

/// A scripted receiver line: a list of (low, ticks) phases, idling high once
/// the schedule runs out.
struct SyntheticLine {
    phases: Vec<(bool, u32)>,
    index: usize,
    remaining: u32,
}

impl SyntheticLine {
    fn new(phases: Vec<(bool, u32)>) -> Self {
        let remaining = phases.first().map_or(0, |&(_, ticks)| ticks);
        Self {
            phases,
            index: 0,
            remaining,
        }
    }

    /// A nominal frame: 9 ms leader, 4.5 ms gap, then 32 bits with the given
    /// data-gap widths (in ticks) per bit, and a trailing burst.
    fn with_bit_widths(bytes: [u8; 4], zero_width: u32, one_width: u32) -> Self {
        let mut phases = vec![(true, 90), (false, 45)];
        for byte in bytes {
            for bit in 0..8 {
                let width = if byte >> bit & 1 == 1 {
                    one_width
                } else {
                    zero_width
                };
                phases.push((true, 5));
                phases.push((false, width));
            }
        }
        phases.push((true, 5));
        Self::new(phases)
    }

    /// A nominal frame with the standard 0.56 ms / 1.69 ms gap widths.
    fn frame(bytes: [u8; 4]) -> Self {
        Self::with_bit_widths(bytes, 3, 16)
    }
}

impl IrLine for SyntheticLine {
    fn is_low(&mut self) -> bool {
        self.phases.get(self.index).is_some_and(|&(low, _)| low)
    }

    fn wait_tick(&mut self) {
        if self.index >= self.phases.len() {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.index += 1;
            self.remaining = self.phases.get(self.index).map_or(0, |&(_, ticks)| ticks);
        }
    }
}

/// Decode one schedule into a fresh mailbox and return the key it holds.
fn decode_once(line: SyntheticLine) -> u8 {
    let mut line = line;
    let last_key = LastKey::new();
    nec::decode(&mut line, &last_key);
    last_key.take()
}

/// Put a known valid key into a mailbox by decoding a real frame.
fn seeded_mailbox() -> LastKey {
    let last_key = LastKey::new();
    nec::decode(&mut SyntheticLine::frame([0x00, 0xFF, KEY_UP, 0xE7]), &last_key);
    last_key
}

#[test]
fn complementary_frames_decode_to_command() {
    for (addr, cmd) in [(0x00_u8, 0x18_u8), (0x5A, 0x42), (0xFF, 0x00), (0x3C, 0xC3)] {
        let frame = [addr, !addr, cmd, !cmd];
        assert_eq!(decode_once(SyntheticLine::frame(frame)), cmd);
    }
}

#[test]
fn address_checksum_violation_clears_key() {
    let last_key = seeded_mailbox();
    nec::decode(
        &mut SyntheticLine::frame([0x00, 0x01, KEY_UP, 0xE7]),
        &last_key,
    );
    assert_eq!(last_key.take(), 0);
}

#[test]
fn command_checksum_violation_clears_key() {
    let last_key = seeded_mailbox();
    nec::decode(
        &mut SyntheticLine::frame([0x00, 0xFF, KEY_UP, 0x18]),
        &last_key,
    );
    assert_eq!(last_key.take(), 0);
}

#[test]
fn read_and_clear_is_idempotent() {
    let last_key = seeded_mailbox();
    assert_eq!(last_key.take(), KEY_UP);
    assert_eq!(last_key.take(), 0);
    assert_eq!(last_key.take(), 0);
}

#[test]
fn spurious_trigger_leaves_key_unchanged() {
    let last_key = seeded_mailbox();
    // Line already high at entry: not a frame start.
    nec::decode(&mut SyntheticLine::new(vec![(false, 10)]), &last_key);
    assert_eq!(last_key.take(), KEY_UP);
}

#[test]
fn short_leader_is_noise_and_leaves_key_unchanged() {
    let last_key = seeded_mailbox();
    // 0.5 ms low burst, well under the 1 ms leader minimum.
    nec::decode(&mut SyntheticLine::new(vec![(true, 5)]), &last_key);
    assert_eq!(last_key.take(), KEY_UP);
}

#[test]
fn bit_threshold_boundary() {
    let frame = [0x00, 0xFF, KEY_UP, 0xE7];
    // 8-tick gaps decode as ones: the frame survives intact.
    assert_eq!(
        decode_once(SyntheticLine::with_bit_widths(frame, 3, 8)),
        KEY_UP
    );
    // 7-tick gaps decode as zeros: every bit reads 0, the checksum fails.
    assert_eq!(decode_once(SyntheticLine::with_bit_widths(frame, 3, 7)), 0);
}

#[test]
fn stuck_low_line_exhausts_budgets_and_clears_key() {
    let last_key = seeded_mailbox();
    // Line never rises again; every phase budget runs out and the all-zero
    // frame fails the checksum.
    nec::decode(&mut SyntheticLine::new(vec![(true, 10_000)]), &last_key);
    assert_eq!(last_key.take(), 0);
}

#[test]
fn frame_checksum_validates_both_complement_pairs() {
    assert_eq!(Frame([0x00, 0xFF, KEY_UP, 0xE7]).command(), Some(KEY_UP));
    // The complement sum wraps; it must not carry into a ninth bit.
    assert_eq!(Frame([0x80, 0x7F, 0x01, 0xFE]).command(), Some(0x01));
    assert_eq!(Frame([0x00, 0x00, KEY_UP, 0xE7]).command(), None);
    assert_eq!(Frame([0x00, 0xFF, KEY_UP, KEY_UP]).command(), None);
}

#[test]
fn end_to_end_up_key() {
    let last_key = LastKey::new();
    nec::decode(&mut SyntheticLine::frame([0x00, 0xFF, KEY_UP, 0xE7]), &last_key);
    assert_eq!(last_key.take(), KEY_UP);
    assert_eq!(last_key.take(), 0);
}
