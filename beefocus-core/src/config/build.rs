//! Selectable builds
//!
//! Each build is a named, fixed [`BuildParams`] bundle. The unit test
//! builds shrink every interval so timed scenarios stay short.

use super::{BuildParams, TimingParams};

/// Production timings
const PRODUCTION_TIMING: TimingParams = TimingParams {
    command_epoch_ms: 10,
    max_steps_per_batch: 50,
    idle_before_sleep_ms: 15 * 60 * 1_000,
    sleep_epoch_ms: 500,
    motor_power_up_ms: 100,
    half_step_us: 500,
};

/// Timings for simulated runs
const UNIT_TEST_TIMING: TimingParams = TimingParams {
    command_epoch_ms: 10,
    max_steps_per_batch: 2,
    idle_before_sleep_ms: 1_000,
    sleep_epoch_ms: 500,
    motor_power_up_ms: 200,
    half_step_us: 1_000,
};

/// Backlash rewind shared by every gear train built so far
const BACKLASH_OVERSHOOT: i32 = 500;

/// Build identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Build {
    /// Home-switch focuser
    Beefocus,
    /// Focuser without a home switch
    TraditionalFocuser,
    /// `Beefocus` with shortened timings
    UnitTestBeefocus,
    /// `TraditionalFocuser` with shortened timings
    UnitTestTraditional,
}

impl Build {
    pub const ALL: [Build; 4] = [
        Build::Beefocus,
        Build::TraditionalFocuser,
        Build::UnitTestBeefocus,
        Build::UnitTestTraditional,
    ];

    /// Resolve to the build's parameter bundle
    pub const fn params(self) -> BuildParams {
        match self {
            Build::Beefocus => BuildParams {
                timing: PRODUCTION_TIMING,
                has_home_switch: true,
                max_absolute_position: 35_000,
                backlash_overshoot: BACKLASH_OVERSHOOT,
            },
            Build::TraditionalFocuser => BuildParams {
                timing: PRODUCTION_TIMING,
                has_home_switch: false,
                max_absolute_position: 10_000,
                backlash_overshoot: BACKLASH_OVERSHOOT,
            },
            Build::UnitTestBeefocus => BuildParams {
                timing: UNIT_TEST_TIMING,
                has_home_switch: true,
                max_absolute_position: 10_000,
                backlash_overshoot: BACKLASH_OVERSHOOT,
            },
            Build::UnitTestTraditional => BuildParams {
                timing: UNIT_TEST_TIMING,
                has_home_switch: false,
                max_absolute_position: 10_000,
                backlash_overshoot: BACKLASH_OVERSHOOT,
            },
        }
    }

    /// Build name, for tracing
    pub fn name(self) -> &'static str {
        match self {
            Build::Beefocus => "BeeFocus",
            Build::TraditionalFocuser => "Traditional Focuser",
            Build::UnitTestBeefocus => "Unit Test BeeFocus",
            Build::UnitTestTraditional => "Unit Test Traditional",
        }
    }
}
