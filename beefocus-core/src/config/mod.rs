//! Build and timing configuration
//!
//! A [`BuildParams`] bundle is chosen once at construction and never
//! changes afterwards.

pub mod build;

pub use build::Build;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settle time after a direction change before the next step (µs)
pub const DIR_SETTLE_US: u32 = 1_000;

/// Wait between iterations of the error state (µs)
pub const ERROR_STALL_US: u32 = 10_000_000;

/// Longest millisecond interval that still fits a µs wait in `u32`
pub const MAX_WAIT_MS: u32 = u32::MAX / 1_000;

/// Timing budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingParams {
    /// Command poll interval while awake (ms)
    pub command_epoch_ms: u32,
    /// Steps taken before polling for a new command
    pub max_steps_per_batch: u32,
    /// Time without an interrupting command before dropping to low power (ms)
    pub idle_before_sleep_ms: u32,
    /// Command poll interval while in low power (ms)
    pub sleep_epoch_ms: u32,
    /// Settle time after energizing the motor (ms)
    pub motor_power_up_ms: u32,
    /// Duration of each half of a step pulse (µs)
    pub half_step_us: u32,
}

impl TimingParams {
    /// Motor warm-up in µs
    pub fn power_up_us(&self) -> u32 {
        self.motor_power_up_ms * 1_000
    }
}

/// Capabilities and timings of one build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildParams {
    pub timing: TimingParams,
    /// Home switch fitted; without it `HOME` and `LHOME` do nothing
    pub has_home_switch: bool,
    /// Highest position a move may target
    pub max_absolute_position: i32,
    /// Distance to rewind past a target when approaching from above
    pub backlash_overshoot: i32,
}

/// Reasons a parameter bundle cannot drive a focuser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Command poll epoch is zero
    ZeroCommandEpoch,
    /// Low power poll epoch is zero
    ZeroSleepEpoch,
    /// Step batch is zero or does not fit a position
    InvalidStepBatch,
    /// An interval would overflow a µs wait
    IntervalTooLong,
    /// Maximum position is negative
    NegativeMaxPosition,
    /// Backlash overshoot is negative
    NegativeBacklash,
}

impl BuildParams {
    /// Check that the bundle can drive a focuser
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        if t.command_epoch_ms == 0 {
            return Err(ConfigError::ZeroCommandEpoch);
        }
        if t.sleep_epoch_ms == 0 {
            return Err(ConfigError::ZeroSleepEpoch);
        }
        if t.max_steps_per_batch == 0 || i32::try_from(t.max_steps_per_batch).is_err() {
            return Err(ConfigError::InvalidStepBatch);
        }
        if t.command_epoch_ms > MAX_WAIT_MS
            || t.sleep_epoch_ms > MAX_WAIT_MS
            || t.motor_power_up_ms > MAX_WAIT_MS
        {
            return Err(ConfigError::IntervalTooLong);
        }
        if self.max_absolute_position < 0 {
            return Err(ConfigError::NegativeMaxPosition);
        }
        if self.backlash_overshoot < 0 {
            return Err(ConfigError::NegativeBacklash);
        }

        Ok(())
    }
}
