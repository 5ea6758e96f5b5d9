//! GPIO-backed [`Hardware`] implementation
//!
//! Maps named pin states onto electrical levels of embedded-hal 1.0 digital
//! pins. Polarity is per pin so that boards with active-low enable or home
//! inputs need no changes in the core.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::pins::{Hardware, Pin, PinMode, PinState};

/// Electrical polarity of a logical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Asserted state is a high level
    #[default]
    ActiveHigh,
    /// Asserted state is a low level
    ActiveLow,
}

impl Polarity {
    /// Electrical level for an asserted flag
    pub fn level(self, active: bool) -> bool {
        match self {
            Polarity::ActiveHigh => active,
            Polarity::ActiveLow => !active,
        }
    }
}

/// Polarity of each logical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioPolarity {
    pub step: Polarity,
    /// `ActiveHigh` means a high level selects forward
    pub direction: Polarity,
    pub motor_enable: Polarity,
    pub home: Polarity,
}

impl GpioPolarity {
    /// Common stepper driver board: active-low enable, switch to ground on home
    pub const fn stepstick() -> Self {
        Self {
            step: Polarity::ActiveHigh,
            direction: Polarity::ActiveHigh,
            motor_enable: Polarity::ActiveLow,
            home: Polarity::ActiveLow,
        }
    }

    fn for_pin(&self, pin: Pin) -> Polarity {
        match pin {
            Pin::Step => self.step,
            Pin::Direction => self.direction,
            Pin::MotorEnable => self.motor_enable,
            Pin::Home => self.home,
        }
    }
}

/// [`Hardware`] over three output pins and one input pin
///
/// Pin directions are fixed by the pin types, so `set_pin_mode` has nothing
/// to do. Reading an output pin returns the state last written to it.
pub struct GpioHardware<S, D, E, H> {
    step: S,
    dir: D,
    enable: E,
    home: H,
    polarity: GpioPolarity,
    driven: [PinState; 3],
    faults: u32,
}

impl<S, D, E, H> GpioHardware<S, D, E, H>
where
    S: OutputPin,
    D: OutputPin,
    E: OutputPin,
    H: InputPin,
{
    pub fn new(step: S, dir: D, enable: E, home: H, polarity: GpioPolarity) -> Self {
        Self {
            step,
            dir,
            enable,
            home,
            polarity,
            driven: [PinState::StepInactive, PinState::DirForward, PinState::MotorOff],
            faults: 0,
        }
    }

    /// Number of writes or reads the underlying pins rejected
    pub fn faults(&self) -> u32 {
        self.faults
    }

    fn index(pin: Pin) -> usize {
        match pin {
            Pin::Step => 0,
            Pin::Direction => 1,
            Pin::MotorEnable => 2,
            Pin::Home => 3,
        }
    }

    fn drive<P: OutputPin>(pin: &mut P, high: bool) -> bool {
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.is_ok()
    }
}

impl<S, D, E, H> Hardware for GpioHardware<S, D, E, H>
where
    S: OutputPin,
    D: OutputPin,
    E: OutputPin,
    H: InputPin,
{
    fn set_pin_mode(&mut self, _pin: Pin, _mode: PinMode) {}

    fn write_pin(&mut self, pin: Pin, state: PinState) {
        // A state that belongs to another pin, or a write to the input, is ignored
        if state.pin() != pin || !pin.is_output() {
            return;
        }

        let high = self.polarity.for_pin(pin).level(state.is_active());
        let ok = match pin {
            Pin::Step => Self::drive(&mut self.step, high),
            Pin::Direction => Self::drive(&mut self.dir, high),
            Pin::MotorEnable => Self::drive(&mut self.enable, high),
            Pin::Home => false,
        };

        if ok {
            self.driven[Self::index(pin)] = state;
        } else {
            self.faults = self.faults.wrapping_add(1);
        }
    }

    fn read_pin(&mut self, pin: Pin) -> PinState {
        match pin {
            Pin::Home => match self.home.is_high() {
                Ok(high) => {
                    let active = high == self.polarity.home.level(true);
                    PinState::for_pin(Pin::Home, active)
                }
                Err(_) => {
                    self.faults = self.faults.wrapping_add(1);
                    PinState::HomeInactive
                }
            },
            output => self.driven[Self::index(output)],
        }
    }
}
