//! Line-oriented command link
//!
//! The focuser consumes whole text lines. [`NetLink`] is the seam the core
//! sees; [`UartLink`] implements it over any embedded-io byte stream by
//! assembling bytes into lines with [`LineAssembler`].

use embedded_io::{Read, ReadReady, Write};
use heapless::{String, Vec};

/// Maximum command line length in bytes (excluding the terminator)
pub const MAX_LINE_LEN: usize = 64;

/// A single received command line
pub type Line = String<MAX_LINE_LEN>;

/// Non-blocking text line channel
pub trait NetLink {
    /// Return the next complete line, or `None` if nothing is waiting
    ///
    /// Must never block.
    fn try_read_line(&mut self) -> Option<Line>;

    /// Send one response line
    ///
    /// The implementation appends the line terminator.
    fn write_line(&mut self, line: &str);
}

/// Link-level failures
///
/// These never reach the focuser core; the link records the most recent one
/// for diagnostics and drops the line in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Underlying transport reported an error
    Io,
    /// Line exceeded [`MAX_LINE_LEN`] and was discarded
    Overflow,
    /// Line was not valid UTF-8
    Encoding,
}

/// Assembles a byte stream into newline-terminated lines
///
/// A trailing `\r` is stripped and empty lines are skipped. A line longer
/// than `N` bytes is discarded up to and including its newline.
pub struct LineAssembler<const N: usize> {
    buf: Vec<u8, N>,
    overflowed: bool,
}

impl<const N: usize> LineAssembler<N> {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflowed: false,
        }
    }

    /// Drop any partially received line
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }

    /// Feed one byte
    ///
    /// Returns `Some(Ok(line))` when the byte completes a line,
    /// `Some(Err(_))` when it completes a line that had to be dropped, and
    /// `None` otherwise.
    pub fn push(&mut self, byte: u8) -> Option<Result<String<N>, LinkError>> {
        if byte != b'\n' {
            if !self.overflowed && self.buf.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let result = if self.overflowed {
            Some(Err(LinkError::Overflow))
        } else {
            self.take_line()
        };
        self.reset();
        result
    }

    fn take_line(&self) -> Option<Result<String<N>, LinkError>> {
        let mut bytes: &[u8] = &self.buf;
        if let [rest @ .., b'\r'] = bytes {
            bytes = rest;
        }
        if bytes.is_empty() {
            return None;
        }

        let Ok(text) = core::str::from_utf8(bytes) else {
            return Some(Err(LinkError::Encoding));
        };
        let mut line = String::new();
        // Cannot fail: text came from a buffer of the same capacity
        if line.push_str(text).is_err() {
            return Some(Err(LinkError::Overflow));
        }
        Some(Ok(line))
    }
}

impl<const N: usize> Default for LineAssembler<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// [`NetLink`] over an embedded-io receiver/transmitter pair
///
/// Reads one byte at a time while data is ready and stops at the first
/// complete line, so at most one line is consumed per poll.
pub struct UartLink<R, W> {
    rx: R,
    tx: W,
    assembler: LineAssembler<MAX_LINE_LEN>,
    last_error: Option<LinkError>,
}

impl<R, W> UartLink<R, W>
where
    R: Read + ReadReady,
    W: Write,
{
    pub fn new(rx: R, tx: W) -> Self {
        Self {
            rx,
            tx,
            assembler: LineAssembler::new(),
            last_error: None,
        }
    }

    /// Most recent link failure, if any
    pub fn last_error(&self) -> Option<LinkError> {
        self.last_error
    }
}

impl<R, W> NetLink for UartLink<R, W>
where
    R: Read + ReadReady,
    W: Write,
{
    fn try_read_line(&mut self) -> Option<Line> {
        loop {
            match self.rx.read_ready() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(_) => {
                    self.last_error = Some(LinkError::Io);
                    self.assembler.reset();
                    return None;
                }
            }

            let mut byte = [0u8; 1];
            match self.rx.read(&mut byte) {
                Ok(1) => match self.assembler.push(byte[0]) {
                    Some(Ok(line)) => return Some(line),
                    Some(Err(e)) => self.last_error = Some(e),
                    None => {}
                },
                Ok(_) => return None,
                Err(_) => {
                    self.last_error = Some(LinkError::Io);
                    self.assembler.reset();
                    return None;
                }
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        let sent = self
            .tx
            .write_all(line.as_bytes())
            .and_then(|()| self.tx.write_all(b"\n"));
        if sent.is_err() {
            self.last_error = Some(LinkError::Io);
        }
    }
}
