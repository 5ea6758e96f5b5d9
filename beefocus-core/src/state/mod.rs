//! Focuser states and the resumable state stack
//!
//! The top frame is the operation in progress. Frames below it are
//! operations waiting to resume once the top one pops.

pub mod machine;
pub mod stack;

pub use machine::State;
pub use stack::{StackError, StateStack, STACK_DEPTH};
