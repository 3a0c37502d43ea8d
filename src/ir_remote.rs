//! Infrared devices of the PicoGo front board: the NEC remote receiver and
//! the two active-low obstacle-avoidance sensors that share the module.
//!
//! See [`IrRemote`] for usage examples.

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::Peri;
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};
use embassy_time::{Duration, block_for};

use crate::nec::{self, IrLine, LastKey, TICK_MICROS};
use crate::{Error, Result};

/// Key codes sent by the PicoGo infrared remote.
pub mod keys {
    /// 2 key
    pub const UP: u8 = 0x18;
    /// 4 key
    pub const LEFT: u8 = 0x08;
    /// 5 key
    pub const OK: u8 = 0x1C;
    /// 6 key
    pub const RIGHT: u8 = 0x5A;
    /// 8 key
    pub const DOWN: u8 = 0x52;
    /// + key
    pub const VOLUME_UP: u8 = 0x15;
    /// - key
    pub const VOLUME_DOWN: u8 = 0x07;
    /// EQ key
    pub const EQ: u8 = 0x09;
    /// >>| key
    pub const NEXT: u8 = 0x40;
    /// |<< key
    pub const PREV: u8 = 0x44;
    /// play/pause key
    pub const PLAY_PAUSE: u8 = 0x43;
    /// CH- key
    pub const CHANNEL_DOWN: u8 = 0x45;
    /// CH key
    pub const CHANNEL: u8 = 0x46;
    /// CH+ key
    pub const CHANNEL_UP: u8 = 0x47;
    /// 100+ key
    pub const HUNDRED_PLUS: u8 = 0x19;
    /// 200+ key
    pub const TWO_HUNDRED_PLUS: u8 = 0x0D;
    /// 0 key
    pub const DIGIT_0: u8 = 0x16;
    /// 1 key
    pub const DIGIT_1: u8 = 0x0C;
    /// 3 key
    pub const DIGIT_3: u8 = 0x5E;
    /// 7 key
    pub const DIGIT_7: u8 = 0x42;
    /// 9 key
    pub const DIGIT_9: u8 = 0x4A;
}

/// A device abstraction for the infrared remote receiver (NEC protocol).
///
/// A background task waits for the falling edge that opens a frame and runs
/// the blocking decode to completion; validated commands land in a
/// [`LastKey`] mailbox that [`IrRemote::key`] reads and clears, so each press
/// is observed at most once and "no key" reads as 0.
///
/// # Examples
/// ```no_run
/// # #![no_std]
/// # #![no_main]
/// # use panic_probe as _;
/// # use defmt::info;
/// # use embassy_executor::Spawner;
/// # use picogo_kit::{IrRemote, keys};
/// # async fn example(p: embassy_rp::Peripherals, spawner: Spawner) -> picogo_kit::Result<()> {
/// static LAST_KEY: picogo_kit::LastKey = IrRemote::new_static();
/// let ir = IrRemote::new(p.PIN_5, &LAST_KEY, spawner)?;
///
/// loop {
///     match ir.key() {
///         0 => {}
///         keys::UP => info!("forward"),
///         key => info!("key 0x{:02X}", key),
///     }
///     embassy_time::Timer::after_millis(50).await;
/// }
/// # }
/// ```
pub struct IrRemote<'a> {
    last_key: &'a LastKey,
}

impl IrRemote<'_> {
    /// Create the static mailbox the decoder posts into.
    ///
    /// See [`IrRemote`] for usage examples.
    #[must_use]
    pub const fn new_static() -> LastKey {
        LastKey::new()
    }

    /// Create a new receiver on the specified pin (GP5 on the PicoGo).
    ///
    /// The pin is configured with a pull-up; active-low IR modules idle HIGH.
    ///
    /// # Errors
    /// Returns an error if the background task cannot be spawned.
    pub fn new<P: Pin>(
        pin: Peri<'static, P>,
        last_key: &'static LastKey,
        spawner: Spawner,
    ) -> Result<Self> {
        // Type erase to Peri<'static, AnyPin> (keep the Peri wrapper!)
        let any: Peri<'static, AnyPin> = pin.into();
        spawner
            .spawn(ir_remote_task(Input::new(any, Pull::Up), last_key))
            .map_err(Error::TaskSpawn)?;
        Ok(Self { last_key })
    }

    /// Read and clear the last decoded key; 0 means no new key.
    #[must_use]
    pub fn key(&self) -> u8 {
        self.last_key.take()
    }
}

#[embassy_executor::task]
async fn ir_remote_task(mut pin: Input<'static>, last_key: &'static LastKey) -> ! {
    info!("IR remote task started");
    loop {
        pin.wait_for_falling_edge().await;
        // Blocking decode; the task is the only invocation path, so the
        // routine can never re-enter itself.
        nec::decode(&mut PinLine(&mut pin), last_key);
    }
}

// The real receiver line: sample the GPIO level, spin one 100 µs tick.
struct PinLine<'a>(&'a mut Input<'static>);

impl IrLine for PinLine<'_> {
    fn is_low(&mut self) -> bool {
        self.0.is_low()
    }

    fn wait_tick(&mut self) {
        block_for(Duration::from_micros(TICK_MICROS));
    }
}

/// The left/right infrared obstacle sensors (DSL on GP3, DSR on GP2).
///
/// The sensors pull their line low when an obstacle reflects the beam.
pub struct ObstacleSensors<'d> {
    left: Input<'d>,
    right: Input<'d>,
}

impl ObstacleSensors<'_> {
    /// Create the sensor pair from the two input pins.
    #[must_use]
    pub fn new<L: Pin, R: Pin>(left: Peri<'static, L>, right: Peri<'static, R>) -> Self {
        let left: Peri<'static, AnyPin> = left.into();
        let right: Peri<'static, AnyPin> = right.into();
        Self {
            left: Input::new(left, Pull::Up),
            right: Input::new(right, Pull::Up),
        }
    }

    /// True when the left sensor sees an obstacle.
    #[must_use]
    pub fn left_blocked(&self) -> bool {
        self.left.is_low()
    }

    /// True when the right sensor sees an obstacle.
    #[must_use]
    pub fn right_blocked(&self) -> bool {
        self.right.is_low()
    }
}
