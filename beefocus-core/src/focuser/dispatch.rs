//! Command dispatch
//!
//! Interrupting commands first collapse the stack to a single
//! `AcceptCommands` frame, then apply their effect on the clean stack.
//! Everything else answers from current state and leaves the stack alone.

use beefocus_hal::{DebugSink, Hardware, NetLink};
use beefocus_protocol::{Command, Response};

use super::{Focuser, FIRMWARE_VERSION};
use crate::state::State;

/// What a dispatched command did to the focuser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Dispatched {
    /// The stack was collapsed
    pub interrupted: bool,
    /// The motor was energized and needs its warm-up
    pub powered_up: bool,
}

impl<N, H, D> Focuser<N, H, D>
where
    N: NetLink,
    H: Hardware,
    D: DebugSink,
{
    pub(super) fn dispatch(&mut self, command: Command) -> Dispatched {
        let name = command.name();
        trace!(self, "Command: {}", name);

        let interrupted = command.interrupts();
        if interrupted {
            self.stack.reset(State::AcceptCommands);
            self.last_interrupt_ms = self.clock.now_ms();
        }

        let mut powered_up = false;
        match command {
            Command::Abort | Command::None => {}
            Command::Home => self.seek_home(),
            Command::LazyHome => {
                if !self.synced {
                    self.seek_home();
                }
            }
            Command::AbsolutePosition(target) => self.move_to(target),
            Command::RelativePosition(offset) => self.move_to(self.position.saturating_add(offset)),
            Command::Sync(position) => {
                trace!(self, "Synced at {}", position);
                self.position = position;
                self.synced = true;
                self.push(State::Moving { target: position });
            }
            Command::Sleep => self.push(State::LowPower),
            Command::Wake => {
                if !self.motor_on {
                    self.power_on();
                    powered_up = true;
                }
            }
            Command::Ping => self.respond(Response::Pong),
            Command::Status => {
                self.respond(Response::Position(self.position));
                self.respond(Response::Synched(self.synced));
                self.respond(self.state_response());
            }
            Command::PositionStatus => self.respond(Response::Position(self.position)),
            Command::MotionStatus => self.respond(self.state_response()),
            Command::SyncStatus => self.respond(Response::Synched(self.synced)),
            Command::HomeStatus => self.respond(Response::Homed(self.synced)),
            Command::Firmware => self.respond(Response::Firmware(FIRMWARE_VERSION)),
            Command::Capabilities => {
                self.respond(Response::MaxPosition(self.params.max_absolute_position));
                self.respond(Response::HomeSwitch(self.params.has_home_switch));
                self.respond(Response::Backlash(self.params.backlash_overshoot));
            }
            Command::DebugOff => {
                trace!(self, "Debug output off");
                self.debug.disable();
            }
        }

        Dispatched {
            interrupted,
            powered_up,
        }
    }

    /// Queue a move, rewinding past the target when it lies behind us
    ///
    /// Every move ends travelling forward, which takes up gear backlash.
    fn move_to(&mut self, requested: i32) {
        let target = requested.clamp(0, self.params.max_absolute_position);
        self.push(State::Moving { target });

        if target < self.position {
            let rewind = target
                .saturating_sub(self.params.backlash_overshoot)
                .max(0);
            trace!(self, "Backlash rewind to {}", rewind);
            self.push(State::Moving { target: rewind });
        }
    }

    fn seek_home(&mut self) {
        if self.params.has_home_switch {
            self.push(State::StopAtHome);
        } else {
            trace!(self, "No home switch fitted");
        }
    }

    fn state_response(&self) -> Response {
        let top = self.state();
        Response::State {
            name: top.name(),
            arg: top.arg(),
        }
    }
}
