//! Channel-backed command link
//!
//! The focuser polls for lines without blocking, so it talks to the UART
//! tasks through channels rather than owning the UART.

use defmt::*;

use beefocus_hal::{Line, NetLink};
use beefocus_protocol::ResponseLine;

use crate::channels::{LINE_CHANNEL, RESPONSE_CHANNEL};

/// [`NetLink`] over the line and response channels
pub struct ChannelLink {
    dropped: u32,
}

impl ChannelLink {
    pub const fn new() -> Self {
        Self { dropped: 0 }
    }
}

impl NetLink for ChannelLink {
    fn try_read_line(&mut self) -> Option<Line> {
        LINE_CHANNEL.try_receive().ok()
    }

    fn write_line(&mut self, line: &str) {
        let mut response = ResponseLine::new();
        if response.push_str(line).is_err() || RESPONSE_CHANNEL.try_send(response).is_err() {
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Response dropped ({} so far)", self.dropped);
        }
    }
}
