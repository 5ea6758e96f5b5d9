//! Focuser orchestrator
//!
//! Owns the state stack, the logical clock, position and motor
//! bookkeeping, and the three injected handles. The driver loop calls
//! [`Focuser::loop_once`] and sleeps for the returned number of
//! microseconds before calling it again.

use core::fmt::{self, Write as _};

use beefocus_hal::{DebugSink, Hardware, NetLink, Pin, PinMode, PinState};
use beefocus_protocol::{classify_line, Command, Response};
use heapless::String;

use crate::clock::LogicalClock;
use crate::config::{BuildParams, ConfigError};
use crate::state::{State, StateStack};

/// Longest trace line; longer output is truncated
const TRACE_CAPACITY: usize = 96;

/// Firmware version reported by `FIRMWARE`
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format a trace line into the focuser's debug sink
macro_rules! trace {
    ($focuser:expr, $($arg:tt)*) => {
        $focuser.trace(format_args!($($arg)*))
    };
}

mod dispatch;
mod handlers;

/// Travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Position counts up
    Forward,
    /// Position counts down
    Reverse,
}

impl Direction {
    pub fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    fn pin_state(self) -> PinState {
        match self {
            Direction::Forward => PinState::DirForward,
            Direction::Reverse => PinState::DirBackward,
        }
    }
}

/// The focuser state machine
pub struct Focuser<N, H, D> {
    net: N,
    hardware: H,
    debug: D,
    params: BuildParams,
    stack: StateStack,
    clock: LogicalClock,
    position: i32,
    direction: Direction,
    motor_on: bool,
    synced: bool,
    last_interrupt_ms: u32,
    stack_fault: bool,
}

impl<N, H, D> Focuser<N, H, D>
where
    N: NetLink,
    H: Hardware,
    D: DebugSink,
{
    /// Take ownership of the handles, configure pins and energize the motor
    ///
    /// Starts at position 0, unsynced, facing forward, accepting commands.
    pub fn new(net: N, hardware: H, debug: D, params: BuildParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let mut focuser = Self {
            net,
            hardware,
            debug,
            params,
            stack: StateStack::new(),
            clock: LogicalClock::new(),
            position: 0,
            direction: Direction::Forward,
            motor_on: false,
            synced: false,
            last_interrupt_ms: 0,
            stack_fault: false,
        };
        focuser.start_up();
        Ok(focuser)
    }

    fn start_up(&mut self) {
        for pin in Pin::ALL {
            let mode = if pin.is_output() {
                PinMode::Output
            } else {
                PinMode::Input
            };
            self.hardware.set_pin_mode(pin, mode);
        }

        self.power_on();
        self.hardware.write_pin(Pin::Direction, self.direction.pin_state());
        self.hardware.write_pin(Pin::Step, PinState::StepInactive);

        trace!(self, "Focuser is up");
    }

    /// Run one unit of work; returns the minimum wait in µs
    pub fn loop_once(&mut self) -> u32 {
        let state = match self.stack.top() {
            Some(state) => *state,
            None => {
                self.stack.reset(State::Error);
                State::Error
            }
        };

        let wait = match state {
            State::AcceptCommands => self.accept_commands(),
            State::Moving { target } => self.moving(target),
            State::DoSteps { remaining } => self.do_steps(remaining),
            State::SetDirection { forward } => self.set_direction(forward),
            State::StepperActive => self.stepper(PinState::StepActive),
            State::StepperInactive => self.stepper(PinState::StepInactive),
            State::StopAtHome => self.stop_at_home(),
            State::LowPower => self.low_power(),
            State::Error => self.error(),
        };

        if self.stack_fault {
            self.stack_fault = false;
            trace!(self, "State stack overflow");
            self.stack.reset(State::Error);
        }

        self.clock.advance(wait);
        wait
    }

    /// Current position in steps from origin
    pub fn position(&self) -> i32 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_motor_on(&self) -> bool {
        self.motor_on
    }

    /// Position has been declared by `SYNC` or found by homing
    pub fn is_synced(&self) -> bool {
        self.synced
    }

    /// Active state
    pub fn state(&self) -> State {
        self.stack.top().copied().unwrap_or(State::Error)
    }

    pub fn stack(&self) -> &StateStack {
        &self.stack
    }

    pub fn clock(&self) -> &LogicalClock {
        &self.clock
    }

    pub fn params(&self) -> &BuildParams {
        &self.params
    }

    pub fn net(&self) -> &N {
        &self.net
    }

    pub fn hardware(&self) -> &H {
        &self.hardware
    }

    pub fn debug(&self) -> &D {
        &self.debug
    }

    fn push(&mut self, state: State) {
        if self.stack.push(state).is_err() {
            self.stack_fault = true;
        }
    }

    fn power_on(&mut self) {
        self.hardware.write_pin(Pin::MotorEnable, PinState::MotorOn);
        self.motor_on = true;
        trace!(self, "Motor set on");
    }

    fn power_off(&mut self) {
        self.hardware.write_pin(Pin::MotorEnable, PinState::MotorOff);
        self.motor_on = false;
        trace!(self, "Motor set off");
    }

    /// Read and classify at most one line
    fn poll_command(&mut self) -> Command {
        let Some(line) = self.net.try_read_line() else {
            return Command::None;
        };
        trace!(self, "Got: {}", line.as_str());
        classify_line(&line)
    }

    fn respond(&mut self, response: Response) {
        let line = response.to_line();
        self.net.write_line(&line);
    }

    fn trace(&mut self, args: fmt::Arguments<'_>) {
        let mut line: String<TRACE_CAPACITY> = String::new();
        let _ = line.write_fmt(args);
        self.debug.write(line.as_bytes());
        self.debug.write(b"\n");
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::{String as StdString, ToString};
    use std::vec::Vec as StdVec;

    use beefocus_hal::{Line, NullDebug};

    use super::*;
    use crate::config::{Build, ERROR_STALL_US};
    use crate::state::STACK_DEPTH;

    #[derive(Default)]
    struct MockNet {
        incoming: StdVec<&'static str>,
        sent: StdVec<StdString>,
    }

    impl NetLink for MockNet {
        fn try_read_line(&mut self) -> Option<Line> {
            if self.incoming.is_empty() {
                return None;
            }
            Line::try_from(self.incoming.remove(0)).ok()
        }

        fn write_line(&mut self, line: &str) {
            self.sent.push(line.to_string());
        }
    }

    #[derive(Default)]
    struct MockHardware {
        writes: StdVec<PinState>,
        modes: StdVec<(Pin, PinMode)>,
    }

    impl Hardware for MockHardware {
        fn set_pin_mode(&mut self, pin: Pin, mode: PinMode) {
            self.modes.push((pin, mode));
        }

        fn write_pin(&mut self, _pin: Pin, state: PinState) {
            self.writes.push(state);
        }

        fn read_pin(&mut self, _pin: Pin) -> PinState {
            PinState::HomeInactive
        }
    }

    #[derive(Default)]
    struct MockDebug {
        text: StdString,
        disabled: bool,
    }

    impl DebugSink for MockDebug {
        fn write(&mut self, bytes: &[u8]) {
            if !self.disabled {
                self.text.push_str(&StdString::from_utf8_lossy(bytes));
            }
        }

        fn disable(&mut self) {
            self.disabled = true;
        }
    }

    type TestFocuser = Focuser<MockNet, MockHardware, MockDebug>;

    fn focuser(build: Build, incoming: &[&'static str]) -> TestFocuser {
        let net = MockNet {
            incoming: incoming.to_vec(),
            sent: StdVec::new(),
        };
        Focuser::new(net, MockHardware::default(), MockDebug::default(), build.params()).unwrap()
    }

    #[test]
    fn test_start_up_sequence() {
        let f = focuser(Build::UnitTestBeefocus, &[]);

        assert_eq!(
            f.hardware().modes,
            [
                (Pin::Step, PinMode::Output),
                (Pin::Direction, PinMode::Output),
                (Pin::MotorEnable, PinMode::Output),
                (Pin::Home, PinMode::Input),
            ]
        );
        assert_eq!(
            f.hardware().writes,
            [PinState::MotorOn, PinState::DirForward, PinState::StepInactive]
        );
        assert_eq!(f.position(), 0);
        assert!(f.is_motor_on());
        assert!(!f.is_synced());
        assert_eq!(f.direction(), Direction::Forward);
        assert_eq!(f.state(), State::AcceptCommands);
        assert!(f.debug().text.contains("Motor set on\nFocuser is up\n"));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let mut params = Build::UnitTestBeefocus.params();
        params.timing.command_epoch_ms = 0;
        let result = Focuser::new(
            MockNet::default(),
            MockHardware::default(),
            MockDebug::default(),
            params,
        );
        assert!(matches!(result, Err(ConfigError::ZeroCommandEpoch)));
    }

    #[test]
    fn test_idle_waits_for_epoch() {
        let mut f = focuser(Build::UnitTestBeefocus, &[]);
        assert_eq!(f.loop_once(), 10_000);
        assert_eq!(f.clock().now_ms(), 10);
    }

    #[test]
    fn test_ping_and_status() {
        let mut f = focuser(Build::UnitTestBeefocus, &["PING", "STATUS"]);
        assert_eq!(f.loop_once(), 0);
        assert_eq!(f.loop_once(), 0);
        assert_eq!(
            f.net().sent,
            [
                "PONG",
                "Position: 0",
                "Synched: NO",
                "State: ACCEPTING_COMMANDS NoArg",
            ]
        );
        assert!(f.debug().text.contains("Got: PING\n"));
    }

    #[test]
    fn test_caps_and_firmware() {
        let mut f = focuser(Build::UnitTestTraditional, &["CAPS", "FIRMWARE"]);
        f.loop_once();
        f.loop_once();
        assert_eq!(
            f.net().sent,
            [
                "MaxPos: 10000".to_string(),
                "HomeSwitch: NO".to_string(),
                "Backlash: 500".to_string(),
                std::format!("Firmware: {}", FIRMWARE_VERSION),
            ]
        );
    }

    #[test]
    fn test_moves_without_trace_sink() {
        let net = MockNet {
            incoming: std::vec!["ABS_POS=2"],
            sent: StdVec::new(),
        };
        let params = Build::UnitTestBeefocus.params();
        let mut f = Focuser::new(net, MockHardware::default(), NullDebug, params).unwrap();

        f.loop_once();
        for _ in 0..64 {
            if f.state() == State::AcceptCommands {
                break;
            }
            f.loop_once();
        }

        assert_eq!(f.state(), State::AcceptCommands);
        assert_eq!(f.position(), 2);
        let pulses = f
            .hardware()
            .writes
            .iter()
            .filter(|&&w| w == PinState::StepActive)
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn test_debug_off_mutes_sink() {
        let mut f = focuser(Build::UnitTestBeefocus, &["DEBUG_OFF", "PING"]);
        f.loop_once();
        let before = f.debug().text.len();
        f.loop_once();
        assert!(f.debug().disabled);
        assert_eq!(f.debug().text.len(), before);
        assert_eq!(f.net().sent, ["PONG"]);
    }

    #[test]
    fn test_absolute_move_pushes_frames() {
        let mut f = focuser(Build::UnitTestBeefocus, &["ABS_POS=3"]);
        f.loop_once();
        let frames: StdVec<State> = f.stack().iter().copied().collect();
        assert_eq!(frames, [State::AcceptCommands, State::Moving { target: 3 }]);
    }

    #[test]
    fn test_backlash_rewind_frame() {
        let mut f = focuser(Build::UnitTestBeefocus, &["SYNC=700", "ABS_POS=600"]);
        // SYNC, then Moving(700) arrives immediately
        f.loop_once();
        f.loop_once();
        assert_eq!(f.state(), State::AcceptCommands);

        f.loop_once();
        let frames: StdVec<State> = f.stack().iter().copied().collect();
        assert_eq!(
            frames,
            [
                State::AcceptCommands,
                State::Moving { target: 600 },
                State::Moving { target: 100 },
            ]
        );
    }

    #[test]
    fn test_rewind_floors_at_zero() {
        let mut f = focuser(Build::UnitTestBeefocus, &["SYNC=300", "ABS_POS=200"]);
        f.loop_once();
        f.loop_once();
        f.loop_once();
        assert_eq!(f.state(), State::Moving { target: 0 });
    }

    #[test]
    fn test_home_ignored_without_switch() {
        let mut f = focuser(Build::UnitTestTraditional, &["HOME"]);
        f.loop_once();
        assert_eq!(f.state(), State::AcceptCommands);
        assert_eq!(f.stack().depth(), 1);
    }

    #[test]
    fn test_lazy_home_skipped_when_synced() {
        let mut f = focuser(Build::UnitTestBeefocus, &["SYNC=5", "LHOME"]);
        f.loop_once();
        f.loop_once();
        f.loop_once();
        assert_eq!(f.state(), State::AcceptCommands);

        let mut f = focuser(Build::UnitTestBeefocus, &["LHOME"]);
        f.loop_once();
        assert_eq!(f.state(), State::StopAtHome);
    }

    #[test]
    fn test_overflow_resets_to_error() {
        let mut f = focuser(Build::UnitTestBeefocus, &[]);
        while f.stack.depth() < STACK_DEPTH - 1 {
            f.stack.push(State::StepperInactive).unwrap();
        }
        f.stack.push(State::DoSteps { remaining: 1 }).unwrap();

        f.loop_once();
        assert_eq!(f.stack().depth(), 1);
        assert_eq!(f.state(), State::Error);
        assert_eq!(f.loop_once(), ERROR_STALL_US);
        assert!(f.debug().text.contains("State stack overflow\n"));
    }
}
