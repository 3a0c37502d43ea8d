//! NEC infrared remote decoder.
//!
//! Pulse-distance decoding of the 32-bit NEC frame (address, inverted
//! address, command, inverted command) as transmitted by the PicoGo remote.
//! The decoder is written against the [`IrLine`] trait so the same routine
//! runs against a GPIO pin on the robot and against a synthetic pulse
//! schedule in the host tests.
//!
//! All timing is counted in fixed 100 µs polling ticks. A phase that runs out
//! of its tick budget is not an error by itself; the byte-wise complement
//! checksum at the end of the frame is the sole gate against corruption.

use portable_atomic::{AtomicU8, Ordering};

/// Length of one polling tick in microseconds.
pub const TICK_MICROS: u64 = 100;

/// Tick budget for the 9 ms leader burst (line low).
pub const LEADER_LOW_TICKS: u32 = 100;
/// Minimum leader length; anything shorter is treated as noise.
pub const LEADER_LOW_MIN_TICKS: u32 = 10;
/// Tick budget for the 4.5 ms AGC gap (line high, length not validated).
pub const AGC_GAP_TICKS: u32 = 50;
/// Tick budget for the 0.56 ms inter-bit burst (line low).
pub const BIT_GAP_TICKS: u32 = 10;
/// Tick budget for the data gap (line high) whose length encodes the bit.
pub const BIT_PULSE_TICKS: u32 = 20;
/// Data gaps longer than this many ticks decode as a one bit
/// (~0.56 ms gap for a zero, ~1.69 ms for a one).
pub const BIT_ONE_THRESHOLD: u32 = 7;

/// The demodulated receiver line as seen by the decoder.
///
/// Implementations sample the current level and advance time by one tick.
/// The hardware implementation busy-waits 100 µs per tick; the test
/// implementation steps through a scripted pulse train.
pub trait IrLine {
    /// Current line level; the receiver is active-low.
    fn is_low(&mut self) -> bool;
    /// Let one polling tick elapse.
    fn wait_tick(&mut self);
}

/// Single-byte mailbox holding the most recent validated command.
///
/// Written by the decode routine, drained by [`LastKey::take`], which reads
/// and clears in one atomic swap so each remote press is delivered at most
/// once. The value is either 0 (no pending key) or a command byte that
/// passed the frame checksum; an invalid frame resets it to 0.
///
/// ```
/// use picogo_kit::nec::LastKey;
///
/// let key = LastKey::new();
/// assert_eq!(key.take(), 0);
/// ```
pub struct LastKey(AtomicU8);

impl LastKey {
    /// Create an empty mailbox.
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Read and clear: returns the pending key, or 0 if none.
    pub fn take(&self) -> u8 {
        self.0.swap(0, Ordering::AcqRel)
    }

    fn post(&self, cmd: u8) {
        self.0.store(cmd, Ordering::Release);
    }

    fn reject(&self) {
        self.0.store(0, Ordering::Release);
    }
}

impl Default for LastKey {
    fn default() -> Self {
        Self::new()
    }
}

/// The four captured frame bytes: address, inverted address, command,
/// inverted command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Frame(pub [u8; 4]);

impl Frame {
    /// The command byte, if both complement checksums hold.
    #[must_use]
    pub fn command(&self) -> Option<u8> {
        let [addr, addr_inv, cmd, cmd_inv] = self.0;
        (addr.wrapping_add(addr_inv) == 0xFF && cmd.wrapping_add(cmd_inv) == 0xFF).then_some(cmd)
    }
}

/// Service one falling edge on the receiver line.
///
/// Runs the full blocking decode (worst case ~20 ms of busy-polling) and
/// updates `last_key`: a validated frame posts its command byte, a frame
/// failing the checksum resets the mailbox to 0, and a spurious trigger or
/// leader shorter than 1 ms returns without touching the mailbox.
///
/// The caller must guarantee run-to-completion: on hardware the routine is
/// invoked from a single task, so a decode can never preempt itself.
pub fn decode(line: &mut impl IrLine, last_key: &LastKey) {
    // Spurious trigger: the line is expected to still be in the leader burst.
    if !line.is_low() {
        return;
    }

    let leader = ticks_while_low(line, LEADER_LOW_TICKS);
    if leader < LEADER_LOW_MIN_TICKS {
        // Sub-millisecond burst, not a leader.
        return;
    }

    // AGC gap; only the loop bound applies to its length.
    let _ = ticks_while_high(line, AGC_GAP_TICKS);

    // 32 bits, LSB first within each byte.
    let mut data = [0_u8; 4];
    for bit in 0..32_usize {
        let _ = ticks_while_low(line, BIT_GAP_TICKS);
        let pulse = ticks_while_high(line, BIT_PULSE_TICKS);
        if pulse > BIT_ONE_THRESHOLD {
            data[bit / 8] |= 1 << (bit % 8);
        }
    }

    match Frame(data).command() {
        Some(cmd) => last_key.post(cmd),
        None => last_key.reject(),
    }
}

fn ticks_while_low(line: &mut impl IrLine, budget: u32) -> u32 {
    let mut count = 0;
    while line.is_low() && count < budget {
        count += 1;
        line.wait_tick();
    }
    count
}

fn ticks_while_high(line: &mut impl IrLine, budget: u32) -> u32 {
    let mut count = 0;
    while !line.is_low() && count < budget {
        count += 1;
        line.wait_tick();
    }
    count
}
