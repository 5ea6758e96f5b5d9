//! State handlers
//!
//! One handler per [`State`]. Each runs once per `loop_once` call, may
//! reshape the stack, and returns the wait it needs in µs.

use beefocus_hal::{DebugSink, Hardware, NetLink, Pin, PinState};
use beefocus_protocol::Command;

use super::{Direction, Focuser};
use crate::config::{DIR_SETTLE_US, ERROR_STALL_US};
use crate::state::State;

impl<N, H, D> Focuser<N, H, D>
where
    N: NetLink,
    H: Hardware,
    D: DebugSink,
{
    pub(super) fn accept_commands(&mut self) -> u32 {
        let command = self.poll_command();
        if command != Command::None {
            let outcome = self.dispatch(command);
            return if outcome.powered_up {
                self.params.timing.power_up_us()
            } else {
                0
            };
        }

        let idle_ms = self.params.timing.idle_before_sleep_ms;
        if self.clock.elapsed_since(self.last_interrupt_ms) > idle_ms {
            trace!(self, "Idle for {} ms, entering low power", idle_ms);
            self.push(State::LowPower);
            return 0;
        }

        self.clock.until_epoch(self.params.timing.command_epoch_ms)
    }

    pub(super) fn moving(&mut self, target: i32) -> u32 {
        if !self.motor_on {
            self.power_on();
            return self.params.timing.power_up_us();
        }

        if self.position == target {
            trace!(self, "Arrived at {}", target);
            self.stack.pop();
            return 0;
        }

        let command = self.poll_command();
        if command != Command::None && self.dispatch(command).interrupted {
            return 0;
        }

        // Widened so positions set by SYNC can never overflow the distance
        let steps = i64::from(target) - i64::from(self.position);
        let batch = self.params.timing.max_steps_per_batch;
        let clipped = u32::try_from(steps.unsigned_abs().min(u64::from(batch))).unwrap_or(batch);

        self.push(State::DoSteps { remaining: clipped });
        self.push(State::SetDirection { forward: steps > 0 });
        0
    }

    pub(super) fn do_steps(&mut self, remaining: u32) -> u32 {
        if remaining == 0 {
            self.stack.pop();
            return 0;
        }

        if let Some(top) = self.stack.top_mut() {
            *top = State::DoSteps {
                remaining: remaining - 1,
            };
        }

        // LIFO: the active half runs first
        self.push(State::StepperInactive);
        self.push(State::StepperActive);

        self.position = match self.direction {
            Direction::Forward => self.position.wrapping_add(1),
            Direction::Reverse => self.position.wrapping_sub(1),
        };
        0
    }

    pub(super) fn set_direction(&mut self, forward: bool) -> u32 {
        self.stack.pop();

        let wanted = Direction::from_forward(forward);
        if wanted == self.direction {
            return 0;
        }

        self.direction = wanted;
        self.hardware.write_pin(Pin::Direction, wanted.pin_state());
        trace!(self, "Direction set {:?}", wanted);
        DIR_SETTLE_US
    }

    pub(super) fn stepper(&mut self, level: PinState) -> u32 {
        self.hardware.write_pin(Pin::Step, level);
        self.stack.pop();
        self.params.timing.half_step_us
    }

    pub(super) fn stop_at_home(&mut self) -> u32 {
        if !self.motor_on {
            self.power_on();
            return self.params.timing.power_up_us();
        }

        if self.hardware.read_pin(Pin::Home) == PinState::HomeActive {
            let found_at = self.position;
            trace!(self, "Home found at {}", found_at);
            self.position = 0;
            self.synced = true;
            self.stack.pop();
            return 0;
        }

        // Validated to fit an i32
        let batch = i32::try_from(self.params.timing.max_steps_per_batch).unwrap_or(i32::MAX);
        if self.position.rem_euclid(batch) == 0 {
            let position = self.position;
            trace!(self, "Homing, at {}", position);

            let command = self.poll_command();
            if command != Command::None && self.dispatch(command).interrupted {
                return 0;
            }
        }

        self.push(State::DoSteps { remaining: 1 });
        self.push(State::SetDirection { forward: false });
        0
    }

    pub(super) fn low_power(&mut self) -> u32 {
        let command = self.poll_command();
        if command != Command::None {
            let outcome = self.dispatch(command);
            let mut powered_up = outcome.powered_up;
            if outcome.interrupted && command.needs_motor() && !self.motor_on {
                self.power_on();
                powered_up = true;
            }
            return if powered_up {
                self.params.timing.power_up_us()
            } else {
                0
            };
        }

        if self.motor_on {
            self.power_off();
        }

        self.clock.until_epoch(self.params.timing.sleep_epoch_ms)
    }

    pub(super) fn error(&mut self) -> u32 {
        trace!(self, "Focuser halted in error state");
        ERROR_STALL_US
    }
}
