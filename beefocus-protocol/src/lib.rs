//! BeeFocus text command protocol
//!
//! One ASCII command per line, answered with `Key: value` lines.
//!
//! # Request format
//!
//! ```text
//! ┌──────────┬───────────┬─────────┐
//! │ KEYWORD  │ '=' | ' ' │ DIGITS  │
//! └──────────┴───────────┴─────────┘
//! ```
//!
//! - Keywords match case-insensitively by prefix
//! - Only `ABS_POS`, `REL_POS` and `SYNC` take an argument
//! - Arguments are unsigned decimal; anything unparsable reads as `0`
//!
//! # Responses
//!
//! ```text
//! PONG
//! Position: 42
//! State: MOVING 7
//! Synched: YES
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod parser;
pub mod response;

pub use command::{Command, Keyword, KEYWORDS};
pub use parser::{classify, classify_line, parse_int};
pub use response::{Response, ResponseLine, RESPONSE_CAPACITY};
