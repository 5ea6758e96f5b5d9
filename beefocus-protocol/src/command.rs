//! Command model and keyword table

/// A classified command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Liveness check, answered with `PONG`
    Ping,
    /// Cancel whatever is in progress
    Abort,
    /// Seek the home switch
    Home,
    /// Seek the home switch unless already synced
    LazyHome,
    /// Position, sync flag and motion state
    Status,
    PositionStatus,
    MotionStatus,
    SyncStatus,
    HomeStatus,
    /// Move to an absolute step position
    AbsolutePosition(i32),
    /// Move by a signed offset from the current position
    RelativePosition(i32),
    /// Declare the current position without moving
    Sync(i32),
    /// Release the motor until the next interrupting command
    Sleep,
    /// Leave low power and energize the motor
    Wake,
    Firmware,
    Capabilities,
    /// Mute the debug trace
    DebugOff,
    /// Nothing received, or nothing recognized
    None,
}

impl Command {
    /// Check if this command cancels any in-progress operation
    pub fn interrupts(&self) -> bool {
        matches!(
            self,
            Command::Abort
                | Command::Home
                | Command::LazyHome
                | Command::AbsolutePosition(_)
                | Command::RelativePosition(_)
                | Command::Sync(_)
                | Command::Sleep
                | Command::Wake
        )
    }

    /// Check if accepting this command requires an energized motor
    pub fn needs_motor(&self) -> bool {
        self.interrupts() && !matches!(self, Command::Sleep)
    }

    /// Numeric argument, for commands that carry one
    pub fn arg(&self) -> Option<i32> {
        match *self {
            Command::AbsolutePosition(n) | Command::RelativePosition(n) | Command::Sync(n) => Some(n),
            _ => None,
        }
    }

    /// Human readable name, for tracing
    pub fn name(&self) -> &'static str {
        match self {
            Command::Ping => "Ping",
            Command::Abort => "Abort",
            Command::Home => "Home",
            Command::LazyHome => "Lazy Home",
            Command::Status => "Status",
            Command::PositionStatus => "Position Status",
            Command::MotionStatus => "Motion Status",
            Command::SyncStatus => "Sync Status",
            Command::HomeStatus => "Home Status",
            Command::AbsolutePosition(_) => "Absolute Position",
            Command::RelativePosition(_) => "Relative Position",
            Command::Sync(_) => "Sync",
            Command::Sleep => "Sleep",
            Command::Wake => "Wake",
            Command::Firmware => "Firmware",
            Command::Capabilities => "Capabilities",
            Command::DebugOff => "Debug Off",
            Command::None => "None",
        }
    }
}

/// What a keyword produces once matched
#[derive(Debug, Clone, Copy)]
pub enum Keyword {
    /// Keyword stands alone; trailing text is ignored
    Plain(Command),
    /// Keyword takes a decimal argument after `=` or a space
    Numeric(fn(i32) -> Command),
}

/// Keyword table, searched in order
///
/// No keyword is a prefix of another, so order never changes the result.
pub const KEYWORDS: &[(&str, Keyword)] = &[
    ("ABORT", Keyword::Plain(Command::Abort)),
    ("ABS_POS", Keyword::Numeric(Command::AbsolutePosition)),
    ("CAPS", Keyword::Plain(Command::Capabilities)),
    ("DEBUG_OFF", Keyword::Plain(Command::DebugOff)),
    ("FIRMWARE", Keyword::Plain(Command::Firmware)),
    ("HOME", Keyword::Plain(Command::Home)),
    ("HSTATUS", Keyword::Plain(Command::HomeStatus)),
    ("LHOME", Keyword::Plain(Command::LazyHome)),
    ("MSTATUS", Keyword::Plain(Command::MotionStatus)),
    ("PING", Keyword::Plain(Command::Ping)),
    ("PSTATUS", Keyword::Plain(Command::PositionStatus)),
    ("REL_POS", Keyword::Numeric(Command::RelativePosition)),
    ("SLEEP", Keyword::Plain(Command::Sleep)),
    ("SSTATUS", Keyword::Plain(Command::SyncStatus)),
    ("STATUS", Keyword::Plain(Command::Status)),
    ("SYNC", Keyword::Numeric(Command::Sync)),
    ("WAKE", Keyword::Plain(Command::Wake)),
];
