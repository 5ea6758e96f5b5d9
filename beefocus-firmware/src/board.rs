//! Board configuration
//!
//! Constants come from `board.toml`, validated and generated by `build.rs`.

use beefocus_core::Build;
use beefocus_hal::{GpioHardware, GpioPolarity, Polarity};
use embassy_rp::gpio::{Input, Level, Output, Pull};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Pin set driven by the focuser
pub type BoardHardware =
    GpioHardware<Output<'static>, Output<'static>, Output<'static>, Input<'static>>;

fn polarity_of(active_low: bool) -> Polarity {
    if active_low {
        Polarity::ActiveLow
    } else {
        Polarity::ActiveHigh
    }
}

/// Per-pin polarity for this board
pub fn polarity() -> GpioPolarity {
    GpioPolarity {
        motor_enable: polarity_of(ENABLE_ACTIVE_LOW),
        home: polarity_of(HOME_ACTIVE_LOW),
        ..GpioPolarity::stepstick()
    }
}

/// Enable line level with the driver released
pub fn enable_released_level() -> Level {
    if ENABLE_ACTIVE_LOW {
        Level::High
    } else {
        Level::Low
    }
}

/// Pull that keeps an open home switch inactive
pub fn home_pull() -> Pull {
    if HOME_ACTIVE_LOW {
        Pull::Up
    } else {
        Pull::Down
    }
}
