//! Logical clock
//!
//! Time inside the focuser is the sum of the waits it has asked for, not a
//! hardware timer. Whole milliseconds and a sub-millisecond remainder are
//! kept separately so that variable-length steps never skew epoch
//! alignment.

/// Accumulated time since construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicalClock {
    ms: u32,
    us: u32,
}

impl LogicalClock {
    pub const fn new() -> Self {
        Self { ms: 0, us: 0 }
    }

    /// Whole milliseconds elapsed (wraps after ~49 days)
    pub fn now_ms(&self) -> u32 {
        self.ms
    }

    /// Add a wait
    pub fn advance(&mut self, wait_us: u32) {
        let total = self.us + wait_us % 1_000;
        self.ms = self
            .ms
            .wrapping_add(wait_us / 1_000)
            .wrapping_add(total / 1_000);
        self.us = total % 1_000;
    }

    /// Milliseconds since `earlier`, tolerating wrap
    pub fn elapsed_since(&self, earlier_ms: u32) -> u32 {
        self.ms.wrapping_sub(earlier_ms)
    }

    /// Wait until the next multiple of `epoch_ms` (µs)
    ///
    /// Always strictly positive. Exactly on a boundary this is a full
    /// epoch. `epoch_ms` must be non-zero and small enough that
    /// `epoch_ms * 1000` fits a `u32`.
    pub fn until_epoch(&self, epoch_ms: u32) -> u32 {
        (epoch_ms - self.ms % epoch_ms) * 1_000 - self.us
    }
}
