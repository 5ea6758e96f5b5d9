//! BeeFocus - Telescope Focuser Firmware
//!
//! Firmware binary for RP2040 boards driving a stepper focuser. Commands
//! arrive as text lines on UART0; the focuser state machine runs in its own
//! task and sleeps for whatever each iteration asks for.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Timer;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use beefocus_core::Focuser;
use beefocus_hal::GpioHardware;

use crate::debug::DefmtDebug;
use crate::link::ChannelLink;

mod board;
mod channels;
mod debug;
mod link;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("BeeFocus firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Command link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = board::BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", board::BAUD_RATE);

    // Stepper and home switch
    // Pin assignments are board-specific (SKR Pico: STEP=GPIO11, DIR=GPIO10, ENABLE=GPIO12, X-STOP=GPIO4)
    // The driver stays released until the focuser powers it up
    let hardware = GpioHardware::new(
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_12, board::enable_released_level()),
        Input::new(p.PIN_4, board::home_pull()),
        board::polarity(),
    );

    info!("Stepper pins initialized");

    let params = board::BUILD.params();
    let focuser = match Focuser::new(ChannelLink::new(), hardware, DefmtDebug::new(), params) {
        Ok(focuser) => focuser,
        Err(e) => {
            error!("Invalid build parameters: {:?}", e);
            loop {
                Timer::after_secs(60).await;
            }
        }
    };

    info!(
        "Focuser up: {}, max position {}",
        board::BUILD.name(),
        params.max_absolute_position
    );

    // Spawn tasks
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::focuser_task(focuser)).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
