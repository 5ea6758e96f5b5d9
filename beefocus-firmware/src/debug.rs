//! defmt-backed debug sink
//!
//! Buffers trace bytes into lines and logs each completed line through
//! defmt, so the focuser trace shows up on RTT.

use defmt::*;
use heapless::Vec;

use beefocus_hal::DebugSink;

/// Longest trace line forwarded in one piece
const LINE_LEN: usize = 96;

pub struct DefmtDebug {
    line: Vec<u8, LINE_LEN>,
    enabled: bool,
}

impl DefmtDebug {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            enabled: true,
        }
    }

    fn flush(&mut self) {
        if !self.line.is_empty() {
            debug!("{=[u8]:a}", &self.line[..]);
            self.line.clear();
        }
    }
}

impl DebugSink for DefmtDebug {
    fn write(&mut self, bytes: &[u8]) {
        if !self.enabled {
            return;
        }

        for &byte in bytes {
            if byte == b'\n' {
                self.flush();
            } else if self.line.push(byte).is_err() {
                // Full: emit what we have and start a continuation line
                self.flush();
                let _ = self.line.push(byte);
            }
        }
    }

    fn disable(&mut self) {
        self.flush();
        self.enabled = false;
        info!("Debug trace disabled");
    }
}
