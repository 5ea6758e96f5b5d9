//! Command link transmit task
//!
//! Writes queued responses to the UART, one line each.

use defmt::*;
use embassy_rp::uart::{BufferedUartTx, Error};
use embedded_io_async::Write;

use crate::channels::RESPONSE_CHANNEL;

#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    loop {
        let response = RESPONSE_CHANNEL.receive().await;

        match send_line(&mut tx, response.as_bytes()).await {
            Ok(()) => trace!("TX: {=str}", response.as_str()),
            Err(e) => warn!("Failed to send response: {:?}", e),
        }
    }
}

async fn send_line(tx: &mut BufferedUartTx, line: &[u8]) -> Result<(), Error> {
    tx.write_all(line).await?;
    tx.write_all(b"\n").await
}
