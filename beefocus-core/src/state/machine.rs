//! State definitions
//!
//! Each variant carries its own frame argument, so a stack frame is just a
//! `State`.

/// Focuser states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Idle, polling for commands every command epoch
    AcceptCommands,
    /// Travelling to an absolute position in step batches
    Moving { target: i32 },
    /// Executing a batch of steps
    DoSteps { remaining: u32 },
    /// Set the direction line before a batch
    SetDirection { forward: bool },
    /// First half of a step pulse
    StepperActive,
    /// Second half of a step pulse
    StepperInactive,
    /// Retreating one step at a time until the home switch closes
    StopAtHome,
    /// Motor released, polling at the sleep epoch
    LowPower,
    /// Internal fault; logs and stalls
    Error,
}

impl State {
    /// Protocol name, as reported by motion status
    pub fn name(&self) -> &'static str {
        match self {
            State::AcceptCommands => "ACCEPTING_COMMANDS",
            State::Moving { .. } => "MOVING",
            State::DoSteps { .. } => "DO_STEPS",
            State::SetDirection { .. } => "SET_DIR",
            State::StepperActive => "STEPPER_ACTIVE",
            State::StepperInactive => "STEPPER_INACTIVE",
            State::StopAtHome => "STOP_AT_HOME",
            State::LowPower => "LOW_POWER",
            State::Error => "ERROR",
        }
    }

    /// Frame argument, if the state carries one
    pub fn arg(&self) -> Option<i32> {
        match *self {
            State::Moving { target } => Some(target),
            State::DoSteps { remaining } => Some(i32::try_from(remaining).unwrap_or(i32::MAX)),
            State::SetDirection { forward } => Some(i32::from(forward)),
            _ => None,
        }
    }
}
