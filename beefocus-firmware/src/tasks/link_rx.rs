//! Command link receive task
//!
//! Assembles UART bytes into lines and queues them for the focuser.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use beefocus_hal::{LineAssembler, MAX_LINE_LEN};

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut assembler: LineAssembler<MAX_LINE_LEN> = LineAssembler::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match assembler.push(byte) {
                        Some(Ok(line)) => {
                            debug!("Line received: {=str}", line.as_str());
                            // Waits while the focuser is busy; the UART buffer holds the rest
                            LINE_CHANNEL.send(line).await;
                        }
                        Some(Err(e)) => {
                            warn!("Discarded line: {:?}", e);
                        }
                        None => {}
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
                assembler.reset();
            }
        }
    }
}
