//! Board-agnostic core logic for the BeeFocus focuser firmware
//!
//! This crate contains everything that does not depend on a specific
//! board:
//!
//! - Build and timing configuration
//! - The resumable state stack
//! - The logical clock
//! - The focuser orchestrator driven by [`Focuser::loop_once`]
//!
//! The orchestrator is cooperative. Each call performs one bounded unit of
//! work and returns how long the caller should wait, in microseconds,
//! before calling again. Nothing in here blocks.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod focuser;
pub mod state;

pub use clock::LogicalClock;
pub use config::{Build, BuildParams, ConfigError, TimingParams};
pub use focuser::{Direction, Focuser};
pub use state::{StackError, State, StateStack};
