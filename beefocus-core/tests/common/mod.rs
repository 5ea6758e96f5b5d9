//! Timed simulation harness
//!
//! The mocks share one millisecond clock. The simulator advances it by the
//! waits `loop_once` asks for, so everything the focuser does is stamped
//! with the logical time it happened at.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use beefocus_core::{Build, BuildParams, Focuser};
use beefocus_hal::{DebugSink, Hardware, Line, NetLink, Pin, PinMode, PinState};

pub type SimClock = Rc<Cell<u32>>;

/// Network link releasing scripted lines at scripted times
pub struct SimNet {
    clock: SimClock,
    pending: VecDeque<(u32, &'static str)>,
    pub sent: Vec<(u32, String)>,
}

impl SimNet {
    pub fn new(clock: SimClock, script: &[(u32, &'static str)]) -> Self {
        Self {
            clock,
            pending: script.iter().copied().collect(),
            sent: Vec::new(),
        }
    }
}

impl NetLink for SimNet {
    fn try_read_line(&mut self) -> Option<Line> {
        let (release_ms, _) = *self.pending.front()?;
        if release_ms > self.clock.get() {
            return None;
        }
        let (_, text) = self.pending.pop_front()?;
        Line::try_from(text).ok()
    }

    fn write_line(&mut self, line: &str) {
        self.sent.push((self.clock.get(), line.to_string()));
    }
}

/// Stepper model recording every pin write
///
/// Tracks the physical carriage position from step pulses so the home
/// switch closes where a real one would.
pub struct SimHardware {
    clock: SimClock,
    pub writes: Vec<(u32, Pin, PinState)>,
    pub modes: Vec<(Pin, PinMode)>,
    pub physical: i32,
    forward: bool,
    home_at: Option<i32>,
}

impl SimHardware {
    pub fn new(clock: SimClock) -> Self {
        Self {
            clock,
            writes: Vec::new(),
            modes: Vec::new(),
            physical: 0,
            forward: true,
            home_at: None,
        }
    }

    /// Close the home switch at or below physical position `home_at`
    pub fn with_home(mut self, physical: i32, home_at: i32) -> Self {
        self.physical = physical;
        self.home_at = Some(home_at);
        self
    }
}

impl Hardware for SimHardware {
    fn set_pin_mode(&mut self, pin: Pin, mode: PinMode) {
        self.modes.push((pin, mode));
    }

    fn write_pin(&mut self, pin: Pin, state: PinState) {
        match state {
            PinState::DirForward => self.forward = true,
            PinState::DirBackward => self.forward = false,
            PinState::StepActive => self.physical += if self.forward { 1 } else { -1 },
            _ => {}
        }
        self.writes.push((self.clock.get(), pin, state));
    }

    fn read_pin(&mut self, pin: Pin) -> PinState {
        match pin {
            Pin::Home => match self.home_at {
                Some(home) if self.physical <= home => PinState::HomeActive,
                _ => PinState::HomeInactive,
            },
            _ => PinState::HomeInactive,
        }
    }
}

/// Debug sink collecting text
pub struct SimDebug {
    pub text: Rc<RefCell<String>>,
    enabled: bool,
}

impl SimDebug {
    pub fn new() -> Self {
        Self {
            text: Rc::default(),
            enabled: true,
        }
    }
}

impl DebugSink for SimDebug {
    fn write(&mut self, bytes: &[u8]) {
        if self.enabled {
            self.text.borrow_mut().push_str(&String::from_utf8_lossy(bytes));
        }
    }

    fn disable(&mut self) {
        self.enabled = false;
    }
}

pub type SimFocuser = Focuser<SimNet, SimHardware, SimDebug>;

/// A focuser driven by its own waits
pub struct Sim {
    pub focuser: SimFocuser,
    clock: SimClock,
    total_us: u64,
}

impl Sim {
    pub fn new(build: Build, script: &[(u32, &'static str)]) -> Self {
        Self::with_params(build.params(), script)
    }

    pub fn with_params(params: BuildParams, script: &[(u32, &'static str)]) -> Self {
        let clock = SimClock::default();
        let hardware = SimHardware::new(clock.clone());
        Self::with_hardware(params, script, clock, hardware)
    }

    /// Home switch build whose carriage starts `physical` steps above the switch
    pub fn homing(physical: i32, script: &[(u32, &'static str)]) -> Self {
        let clock = SimClock::default();
        let hardware = SimHardware::new(clock.clone()).with_home(physical, 0);
        Self::with_hardware(Build::UnitTestBeefocus.params(), script, clock, hardware)
    }

    fn with_hardware(
        params: BuildParams,
        script: &[(u32, &'static str)],
        clock: SimClock,
        hardware: SimHardware,
    ) -> Self {
        let net = SimNet::new(clock.clone(), script);
        let focuser = Focuser::new(net, hardware, SimDebug::new(), params)
            .expect("simulation params are valid");
        Self {
            focuser,
            clock,
            total_us: 0,
        }
    }

    pub fn now_ms(&self) -> u32 {
        self.clock.get()
    }

    /// Run one iteration and advance the clock by its wait
    pub fn step(&mut self) -> u32 {
        let wait = self.focuser.loop_once();
        self.total_us += u64::from(wait);
        self.clock.set((self.total_us / 1_000) as u32);
        wait
    }

    /// Iterate until the clock reaches `ms`
    pub fn run_until(&mut self, ms: u32) {
        while self.now_ms() < ms {
            self.step();
        }
    }

    /// Times of rising step edges
    pub fn step_times(&self) -> Vec<u32> {
        self.writes_of(Pin::Step)
            .into_iter()
            .filter(|&(_, state)| state == PinState::StepActive)
            .map(|(t, _)| t)
            .collect()
    }

    /// Every write to `pin`, with its time
    pub fn writes_of(&self, pin: Pin) -> Vec<(u32, PinState)> {
        self.focuser
            .hardware()
            .writes
            .iter()
            .filter(|&&(_, p, _)| p == pin)
            .map(|&(t, _, state)| (t, state))
            .collect()
    }

    pub fn sent(&self) -> Vec<(u32, &str)> {
        self.focuser
            .net()
            .sent
            .iter()
            .map(|(t, line)| (*t, line.as_str()))
            .collect()
    }

    pub fn debug_text(&self) -> String {
        self.focuser.debug().text.borrow().clone()
    }
}
