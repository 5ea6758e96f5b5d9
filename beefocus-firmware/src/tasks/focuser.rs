//! Focuser driver task
//!
//! Runs the cooperative state machine: one `loop_once` per iteration, then
//! sleep for the wait it returned.

use defmt::*;
use embassy_futures::yield_now;
use embassy_time::Timer;

use beefocus_core::Focuser;

use crate::board::BoardHardware;
use crate::debug::DefmtDebug;
use crate::link::ChannelLink;

/// Focuser wired to this board
pub type BoardFocuser = Focuser<ChannelLink, BoardHardware, DefmtDebug>;

#[embassy_executor::task]
pub async fn focuser_task(mut focuser: BoardFocuser) {
    info!("Focuser task started");

    let mut faults = 0;

    loop {
        let wait_us = focuser.loop_once();

        let seen = focuser.hardware().faults();
        if seen != faults {
            warn!("Stepper GPIO faults: {}", seen);
            faults = seen;
        }

        if wait_us == 0 {
            // Let the link tasks run between back-to-back iterations
            yield_now().await;
        } else {
            Timer::after_micros(u64::from(wait_us)).await;
        }
    }
}
