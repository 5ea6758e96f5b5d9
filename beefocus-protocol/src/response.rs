//! Response line formatting
//!
//! Every response is a single `Key: value` line (or a bare `PONG`). The
//! line terminator is added by the link.

use core::fmt::{self, Write};

use heapless::String;

/// Maximum response line length in bytes
pub const RESPONSE_CAPACITY: usize = 64;

/// A formatted response line
pub type ResponseLine = String<RESPONSE_CAPACITY>;

/// Responses the focuser can send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    Pong,
    Position(i32),
    /// Active state name and its frame argument
    State {
        name: &'static str,
        arg: Option<i32>,
    },
    Synched(bool),
    Homed(bool),
    Firmware(&'static str),
    MaxPosition(i32),
    HomeSwitch(bool),
    Backlash(i32),
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Response::Pong => f.write_str("PONG"),
            Response::Position(pos) => write!(f, "Position: {}", pos),
            Response::State { name, arg: Some(arg) } => write!(f, "State: {} {}", name, arg),
            Response::State { name, arg: None } => write!(f, "State: {} NoArg", name),
            Response::Synched(synced) => write!(f, "Synched: {}", yes_no(synced)),
            Response::Homed(homed) => write!(f, "Homed: {}", yes_no(homed)),
            Response::Firmware(version) => write!(f, "Firmware: {}", version),
            Response::MaxPosition(max) => write!(f, "MaxPos: {}", max),
            Response::HomeSwitch(present) => write!(f, "HomeSwitch: {}", yes_no(present)),
            Response::Backlash(steps) => write!(f, "Backlash: {}", steps),
        }
    }
}

impl Response {
    /// Render into a fixed-capacity line
    ///
    /// Output past [`RESPONSE_CAPACITY`] is truncated; no response comes
    /// close to it.
    pub fn to_line(&self) -> ResponseLine {
        let mut line = ResponseLine::new();
        let _ = write!(line, "{}", self);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_lines() {
        assert_eq!(Response::Pong.to_line().as_str(), "PONG");
        assert_eq!(Response::Position(42).to_line().as_str(), "Position: 42");
        assert_eq!(Response::Position(-3).to_line().as_str(), "Position: -3");
        assert_eq!(Response::Synched(true).to_line().as_str(), "Synched: YES");
        assert_eq!(Response::Homed(false).to_line().as_str(), "Homed: NO");
    }

    #[test]
    fn test_state_line() {
        let moving = Response::State {
            name: "MOVING",
            arg: Some(7),
        };
        assert_eq!(moving.to_line().as_str(), "State: MOVING 7");

        let idle = Response::State {
            name: "ACCEPTING_COMMANDS",
            arg: None,
        };
        assert_eq!(idle.to_line().as_str(), "State: ACCEPTING_COMMANDS NoArg");
    }

    #[test]
    fn test_capability_lines() {
        assert_eq!(Response::Firmware("0.1.0").to_line().as_str(), "Firmware: 0.1.0");
        assert_eq!(Response::MaxPosition(10000).to_line().as_str(), "MaxPos: 10000");
        assert_eq!(Response::HomeSwitch(true).to_line().as_str(), "HomeSwitch: YES");
        assert_eq!(Response::Backlash(500).to_line().as_str(), "Backlash: 500");
    }
}
