//! Segclock - Seven-Segment Clock Firmware
//!
//! Main firmware binary for RP2040 boards driving a six-digit
//! common-anode display through cascaded shift registers. A companion
//! on UART0 supplies the authoritative time; the board counts seconds
//! in between.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use segclock_core::config::{ClockConfig, PinConfig};
use segclock_core::display::Dataframe;
use segclock_core::time::TimeSyncAdapter;
use segclock_core::traits::DisplayDriver;
use segclock_core::ClockEngine;
use segclock_drivers::chime::Buzzer;
use segclock_drivers::display::ShiftRegisterChain;
use segclock_drivers::sync::SerialSyncLink;
use segclock_hal_rp2040::{EmbassyClock, GpioOutput, PinBank, PinError};

use crate::tasks::clock::{ClockBuzzer, Display};

mod config;
mod tasks;

/// Embedded board configuration (compiled into firmware)
/// Edit clock.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../clock.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Segclock firmware v{} starting...", env!("CARGO_PKG_VERSION"));

    let p = embassy_rp::init(Default::default());

    let config = config::load(EMBEDDED_CONFIG);

    let (mut bank, uart_p) = PinBank::new(p);

    // Pins were checked against each other while loading the config
    let (mut display, mut chime) = unwrap!(claim_outputs(&mut bank, &config));

    // Blank the digits before anything else happens
    display.present(&Dataframe::blank());
    info!("Display chain initialized");

    // Setup UART for the time-sync companion
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.sync.baudrate;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(uart_p.uart, uart_p.tx_pin, uart_p.rx_pin, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    let link = SerialSyncLink::new(
        uart,
        EmbassyClock,
        config.sync.timeout_ms,
        config.sync.utc_offset_s,
    );
    let sync = TimeSyncAdapter::new(link, config.sync.schedule());

    info!("UART initialized for time sync ({} baud)", config.sync.baudrate);

    if config.chime.on_boot {
        chime.beep();
    }

    let parts = tasks::ClockParts {
        engine: ClockEngine::new(config.face.separator_dots),
        sync,
        chime,
        display,
        refresh_ms: config.face.refresh_ms,
    };

    spawner.spawn(tasks::clock_task(parts)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Take an output pin from the bank, parked in its inactive state
fn output(bank: &mut PinBank, pin: PinConfig) -> Result<GpioOutput<'static>, PinError> {
    Ok(GpioOutput::new(bank.take(pin.pin)?, pin.inverted))
}

/// Claim the display chain and buzzer pins
fn claim_outputs(
    bank: &mut PinBank,
    config: &ClockConfig,
) -> Result<(Display, ClockBuzzer), PinError> {
    let d = &config.display;
    let display = ShiftRegisterChain::new(
        output(bank, d.data_pin)?,
        output(bank, d.clock_pin)?,
        output(bank, d.latch_pin)?,
        Delay,
        d.bit_delay_us,
    );
    let chime = Buzzer::from_config(output(bank, config.chime.pin)?, Delay, &config.chime);
    Ok((display, chime))
}
