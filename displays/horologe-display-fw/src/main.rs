//! Horologe Display Firmware
//!
//! Firmware for the clock display board (STM32F042K6 + SH1106 OLED).
//! Receives timestamp lines from the host sender over UART and shows them.
//!
//! The whole firmware is one loop: poll the UART, parse a line when its
//! terminator arrives, redraw the OLED when the face is dirty.

#![no_std]
#![no_main]

mod sh1106;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::i2c::I2c;
use embassy_stm32::usart::UartRx;
use embassy_time::{Duration, Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use crate::sh1106::Sh1106;
use horologe_core::{ClockApp, ClockConfig, Event, StepError};
use horologe_display::DisplayBackend;
use horologe_hal_stm32f0::{i2c_config, usart_config, BlockingUartRx, I2cBusError};

// Generated by build.rs from clock.toml
include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Delay between attempts to bring up a display that failed to initialize
const DISPLAY_RETRY: Duration = Duration::from_secs(1);

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Horologe display firmware starting...");
    info!("Config: {}", CONFIG);

    let p = embassy_stm32::init(Default::default());

    // Setup I2C for OLED (PB6=SCL, PB7=SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, i2c_config(CONFIG.i2c_frequency));
    let mut display = Sh1106::new(i2c, CONFIG.i2c_address);
    init_display(&mut display);

    // Setup UART from the host (PA3=RX on F042K6)
    let rx = unwrap!(UartRx::new_blocking(
        p.USART2,
        p.PA3,
        usart_config(&CONFIG.uart())
    ));
    let mut rx = BlockingUartRx::new(rx);

    let mut app = ClockApp::new(CONFIG);
    let poll_interval = Duration::from_micros(u64::from(CONFIG.poll_interval_us));
    let mut last_init = Instant::now();

    info!("Entering control loop");

    loop {
        if !display.is_ready() && last_init.elapsed() >= DISPLAY_RETRY {
            last_init = Instant::now();
            init_display(&mut display);
        }

        let result = app.step(&mut rx, &mut display, |event| match event {
            Event::Updated(message) => debug!("Time updated: {}", message),
            Event::Rejected(reason) => warn!("Discarded line: {:?}", reason),
        });

        match result {
            Ok(true) => trace!(
                "Display updated ({} accepted, {} rejected)",
                app.lines_accepted(),
                app.lines_rejected()
            ),
            Ok(false) => {}
            Err(StepError::Uart(e)) => warn!("UART read error: {:?}", e),
            Err(StepError::Display(e)) => warn!("Display refresh failed: {:?}", e),
        }

        Timer::after(poll_interval).await;
    }
}

/// Run the SH1106 init sequence, logging the outcome
fn init_display<I2C>(display: &mut Sh1106<I2C>)
where
    I2C: embedded_hal::i2c::I2c<Error = embassy_stm32::i2c::Error>,
{
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        Err(e) => error!("Failed to initialize display: {:?}", I2cBusError::from(e)),
    }
}
