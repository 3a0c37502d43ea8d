//! Full PicoGo bring-up demo: drive the robot from the infrared remote,
//! stream sensor status over defmt, and log commands arriving over the
//! Bluetooth serial link.
//!
//! Remote layout: 2/8 forward/backward, 4/6 pivot, 5 stop, +/- speed,
//! EQ resets the speed to 50 %.

#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig};
use embassy_time::Timer;
use panic_probe as _;
use picogo_kit::{
    Battery, Bluetooth, Error, IrRemote, LastKey, Motors, ObstacleSensors, TrackingSensor,
    Ultrasonic, keys,
};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => embassy_rp::adc::InterruptHandler;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Ticks of the 50 ms main loop without a key before the motors park.
const AUTO_STOP_TICKS: u32 = 800;

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let p = embassy_rp::init(Default::default());

    info!("PicoGo demo starting...");

    // Drive motors: PWMA on GP16 (slice 0 A), PWMB on GP21 (slice 2 B),
    // direction lines AIN1/AIN2 on GP18/GP17 and BIN1/BIN2 on GP19/GP20.
    let mut motors = Motors::new(
        Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default()),
        Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, PwmConfig::default()),
        Output::new(p.PIN_18, Level::Low),
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_19, Level::Low),
        Output::new(p.PIN_20, Level::Low),
    );

    // Ultrasonic ranger: TRIG GP14, ECHO GP15.
    let mut ranger = Ultrasonic::new(
        Output::new(p.PIN_14, Level::Low),
        Input::new(p.PIN_15, Pull::None),
    );

    // Obstacle sensors: DSL GP3 (left), DSR GP2 (right).
    let obstacles = ObstacleSensors::new(p.PIN_3, p.PIN_2);

    // Battery sense divider on GP26.
    let adc = Adc::new(p.ADC, Irqs, AdcConfig::default());
    let mut battery = Battery::new(adc, AdcChannel::new_pin(p.PIN_26, Pull::None));

    // Line-tracking array on the soft SPI bus.
    let mut tracker = TrackingSensor::new(
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Input::new(p.PIN_27, Pull::None),
        Output::new(p.PIN_28, Level::High),
    );
    tracker.set_fixed_calibration();

    // Infrared remote receiver on GP5.
    static LAST_KEY: LastKey = IrRemote::new_static();
    let ir = IrRemote::new(p.PIN_5, &LAST_KEY, spawner).expect("Failed to start IR receiver");

    // Bluetooth module on UART0 (GP0/GP1, 115200 baud).
    static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
    static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;
    let uart = BufferedUart::new(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        Irqs,
        TX_BUF.init([0; 64]),
        RX_BUF.init([0; 256]),
        uart_config,
    );
    let mut bluetooth = Bluetooth::new(uart);

    let mut speed: u8 = 50;
    let mut no_key_ticks: u32 = 0;
    let mut frame: u32 = 0;

    loop {
        // Service Bluetooth between frames; the 50 ms tick paces the loop.
        if let Either::Second(message) =
            select(Timer::after_millis(50), bluetooth.read_message()).await
        {
            match message {
                Ok(message) => info!("bluetooth: {=[u8]:a}", message.as_slice()),
                Err(err) => warn!("bluetooth read failed: {}", defmt::Debug2Format(&err)),
            }
            continue;
        }

        match ir.key() {
            0 => {
                no_key_ticks += 1;
                if no_key_ticks > AUTO_STOP_TICKS {
                    // Nothing from the remote for a long while: park.
                    motors.stop();
                    no_key_ticks = 0;
                    info!("IR: timeout, motors stopped");
                }
            }
            key => {
                no_key_ticks = 0;
                drive(&mut motors, &mut speed, key);
            }
        }

        // Sensor status once a second.
        frame += 1;
        if frame % 20 == 0 {
            let (position, values) = tracker.read_line(false).await;
            info!(
                "line pos={} s={} obstacles L={} R={} speed={}%",
                position,
                values,
                obstacles.left_blocked(),
                obstacles.right_blocked(),
                speed,
            );

            match ranger.distance_cm().await {
                Ok(distance) => info!("distance: {} cm", distance),
                Err(Error::EchoTimeout) => warn!("ultrasonic: no echo"),
                Err(err) => warn!("ultrasonic: {}", defmt::Debug2Format(&err)),
            }

            match battery.volts().await {
                Ok(volts) => info!("battery: {} V", volts),
                Err(err) => warn!("battery read failed: {}", defmt::Debug2Format(&err)),
            }
        }
    }
}

fn drive(motors: &mut Motors<'_>, speed: &mut u8, key: u8) {
    match key {
        keys::UP => {
            info!("IR: forward at {}%", *speed);
            motors.forward(*speed);
        }
        keys::DOWN => {
            info!("IR: backward at {}%", *speed);
            motors.backward(*speed);
        }
        keys::LEFT => {
            info!("IR: pivot left");
            motors.left(20);
        }
        keys::RIGHT => {
            info!("IR: pivot right");
            motors.right(20);
        }
        keys::OK => {
            info!("IR: stop");
            motors.stop();
        }
        keys::EQ => {
            *speed = 50;
            info!("IR: speed reset to 50%");
        }
        keys::VOLUME_UP => {
            *speed = (*speed + 10).min(100);
            info!("IR: speed up to {}%", *speed);
        }
        keys::VOLUME_DOWN => {
            *speed = speed.saturating_sub(10);
            info!("IR: speed down to {}%", *speed);
        }
        other => info!("IR: key 0x{:02X}", other),
    }
}
