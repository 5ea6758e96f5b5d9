//! Logical pins and named pin states
//!
//! The core never sees electrical levels. Every write and read is expressed
//! as a named state (`StepActive`, `MotorOff`, ...) so that board-specific
//! polarity lives entirely in the [`Hardware`] implementation.

/// Logical pins used by the focuser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// Step pulse output to the stepper driver
    Step,
    /// Direction output to the stepper driver
    Direction,
    /// Motor driver enable output
    MotorEnable,
    /// Home switch input
    Home,
}

impl Pin {
    /// Every logical pin, in setup order
    pub const ALL: [Pin; 4] = [Pin::Step, Pin::Direction, Pin::MotorEnable, Pin::Home];

    /// Check if the core drives this pin
    pub fn is_output(self) -> bool {
        !matches!(self, Pin::Home)
    }
}

/// GPIO direction for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    Input,
    Output,
}

/// Named pin states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// Step line asserted (pulse in progress)
    StepActive,
    /// Step line released
    StepInactive,
    /// Direction line set to count up
    DirForward,
    /// Direction line set to count down
    DirBackward,
    /// Motor driver energized
    MotorOn,
    /// Motor driver released
    MotorOff,
    /// Home switch closed
    HomeActive,
    /// Home switch open
    HomeInactive,
}

impl PinState {
    /// The pin this state belongs to
    pub fn pin(self) -> Pin {
        match self {
            PinState::StepActive | PinState::StepInactive => Pin::Step,
            PinState::DirForward | PinState::DirBackward => Pin::Direction,
            PinState::MotorOn | PinState::MotorOff => Pin::MotorEnable,
            PinState::HomeActive | PinState::HomeInactive => Pin::Home,
        }
    }

    /// Check if this is the asserted state of its pin
    ///
    /// `DirForward` counts as asserted.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            PinState::StepActive | PinState::DirForward | PinState::MotorOn | PinState::HomeActive
        )
    }

    /// Build the named state of `pin` from its asserted flag
    pub fn for_pin(pin: Pin, active: bool) -> Self {
        match (pin, active) {
            (Pin::Step, true) => PinState::StepActive,
            (Pin::Step, false) => PinState::StepInactive,
            (Pin::Direction, true) => PinState::DirForward,
            (Pin::Direction, false) => PinState::DirBackward,
            (Pin::MotorEnable, true) => PinState::MotorOn,
            (Pin::MotorEnable, false) => PinState::MotorOff,
            (Pin::Home, true) => PinState::HomeActive,
            (Pin::Home, false) => PinState::HomeInactive,
        }
    }
}

/// Hardware driver consumed by the focuser core
///
/// Writes happen in exactly the order the core issues them. Failures are
/// the implementation's business; the core never retries.
pub trait Hardware {
    /// Configure a pin as input or output
    fn set_pin_mode(&mut self, pin: Pin, mode: PinMode);

    /// Drive an output pin to a named state
    fn write_pin(&mut self, pin: Pin, state: PinState);

    /// Sample a pin
    ///
    /// Takes `&mut self` because sampling real GPIO may touch peripheral
    /// registers.
    fn read_pin(&mut self, pin: Pin) -> PinState;
}
