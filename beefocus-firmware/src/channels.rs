//! Inter-task communication channels
//!
//! Received command lines flow from the link RX task to the focuser task;
//! responses flow from the focuser task to the link TX task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use beefocus_hal::Line;
use beefocus_protocol::ResponseLine;

/// Channel capacity for received command lines
const LINE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outgoing responses (STATUS and CAPS send three)
const RESPONSE_CHANNEL_SIZE: usize = 8;

/// Complete command lines from the UART
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Response lines waiting for the UART
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, ResponseLine, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
