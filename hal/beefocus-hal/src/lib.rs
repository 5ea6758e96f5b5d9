//! BeeFocus Hardware Abstraction Layer
//!
//! This crate defines the seams between the focuser core and the outside
//! world. The core only ever talks to three exclusively-owned handles:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  beefocus-core (Focuser state machine)  │
//! └─────────────────────────────────────────┘
//!        │              │              │
//!        ▼              ▼              ▼
//! ┌────────────┐ ┌────────────┐ ┌────────────┐
//! │  Hardware  │ │  NetLink   │ │ DebugSink  │
//! │ step/dir/  │ │ text lines │ │  tracing   │
//! │ enable/home│ │  in & out  │ │   only     │
//! └────────────┘ └────────────┘ └────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pins::Hardware`] - Named pin states over the four logical pins
//! - [`link::NetLink`] - Non-blocking line-oriented command channel
//! - [`debug::DebugSink`] - Human-readable trace output
//!
//! # Adapters
//!
//! - [`gpio::GpioHardware`] - `Hardware` over embedded-hal digital pins
//! - [`link::UartLink`] - `NetLink` over an embedded-io byte stream

#![no_std]
#![deny(unsafe_code)]

pub mod debug;
pub mod gpio;
pub mod link;
pub mod pins;

// Re-export key traits at crate root for convenience
pub use debug::{DebugSink, NullDebug};
pub use gpio::{GpioHardware, GpioPolarity, Polarity};
pub use link::{Line, LineAssembler, LinkError, NetLink, UartLink, MAX_LINE_LEN};
pub use pins::{Hardware, Pin, PinMode, PinState};
