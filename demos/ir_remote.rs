//! Print every key pressed on the PicoGo infrared remote.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Timer;
use panic_probe as _;
use picogo_kit::{IrRemote, LastKey, keys};

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    info!("IR remote demo starting...");

    static LAST_KEY: LastKey = IrRemote::new_static();

    // The receiver sits on GP5 on the PicoGo front board.
    let ir = IrRemote::new(p.PIN_5, &LAST_KEY, spawner).expect("Failed to start IR receiver");

    loop {
        match ir.key() {
            0 => {}
            keys::UP => info!("UP (2)"),
            keys::DOWN => info!("DOWN (8)"),
            keys::LEFT => info!("LEFT (4)"),
            keys::RIGHT => info!("RIGHT (6)"),
            keys::OK => info!("OK (5)"),
            keys::VOLUME_UP => info!("VOLUME +"),
            keys::VOLUME_DOWN => info!("VOLUME -"),
            keys::PLAY_PAUSE => info!("PLAY/PAUSE"),
            key => info!("key 0x{:02X}", key),
        }
        Timer::after_millis(50).await;
    }
}
