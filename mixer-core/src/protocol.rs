//! Line Protocol Engine: assembles inbound bytes into request lines.
//!
//! Bytes accumulate until a terminator (`\r` or `\n`). A terminator on a
//! non-empty buffer dispatches the line; on an empty buffer it does nothing,
//! which makes `\r\n` pairs count once. The buffer never holds a terminator
//! or leading whitespace.

use heapless::Vec;
use mixer_proto::{parse_request, ParseError, Request, MAX_LINE_LENGTH};

/// Error type for dropped inbound lines.
///
/// Neither variant is ever answered on the wire; they exist so the caller
/// can log what was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Line exceeded [`MAX_LINE_LENGTH`]; input is skipped to the next terminator.
    Overflow,
    /// Complete line that matches no known request.
    Unrecognized,
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Overflow => write!(f, "inbound line too long"),
            Self::Unrecognized => write!(f, "unrecognized request"),
        }
    }
}

#[inline]
const fn is_terminator(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}

/// Byte-at-a-time request line assembler.
#[derive(Debug, Clone, Default)]
pub struct LineProtocol {
    buffer: Vec<u8, MAX_LINE_LENGTH>,
    /// Set after an overflow until the next terminator.
    discarding: bool,
}

impl LineProtocol {
    /// Create an empty engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            discarding: false,
        }
    }

    /// Feed one received byte.
    ///
    /// Returns `Ok(Some(request))` when the byte completes a recognized line,
    /// `Ok(None)` while a line is still being assembled (or for blank lines).
    ///
    /// # Errors
    ///
    /// - [`LineError::Overflow`] once, on the byte that overflowed the buffer.
    ///   Everything up to the next terminator is then discarded.
    /// - [`LineError::Unrecognized`] when a complete line is not a request.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<Request>, LineError> {
        if is_terminator(byte) {
            if self.discarding {
                self.discarding = false;
                return Ok(None);
            }
            if self.buffer.is_empty() {
                return Ok(None);
            }

            let result = parse_request(&self.buffer);
            self.buffer.clear();

            return match result {
                Ok(request) => Ok(Some(request)),
                Err(ParseError::Empty) => Ok(None),
                Err(_) => Err(LineError::Unrecognized),
            };
        }

        if self.discarding {
            return Ok(None);
        }

        // Padding around a request never counts against the line bound
        if byte.is_ascii_whitespace() && self.buffer.is_empty() {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            if byte.is_ascii_whitespace() {
                // Trailing padding; any further content still overflows
                return Ok(None);
            }
            // Drop the partial line and resync on the next terminator
            self.buffer.clear();
            self.discarding = true;
            return Err(LineError::Overflow);
        }

        Ok(None)
    }

    /// Drop any partial line and leave discard mode.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarding = false;
    }

    /// Bytes of the line assembled so far.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Whether input is being skipped after an overflow.
    #[inline]
    #[must_use]
    pub fn is_discarding(&self) -> bool {
        self.discarding
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    fn feed(engine: &mut LineProtocol, bytes: &[u8]) -> Vec<Result<Request, LineError>> {
        bytes
            .iter()
            .filter_map(|&b| engine.push_byte(b).transpose())
            .collect()
    }

    #[test]
    fn test_handshake_with_lf() {
        let mut engine = LineProtocol::new();
        let out = feed(&mut engine, b"DeskMixer controller request\n");
        assert_eq!(out, [Ok(Request::Handshake)]);
        assert!(engine.pending().is_empty());
    }

    #[test]
    fn test_crlf_then_lf_dispatches_once() {
        let mut engine = LineProtocol::new();
        let out = feed(&mut engine, b"DeskMixer controller request\r\n\n");
        assert_eq!(out, [Ok(Request::Handshake)]);
    }

    #[test]
    fn test_cr_only_terminator() {
        let mut engine = LineProtocol::new();
        let out = feed(&mut engine, b"GET_CONFIG\rGET_CONFIG\r");
        assert_eq!(out, [Ok(Request::GetConfig), Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let mut engine = LineProtocol::new();
        let out = feed(&mut engine, b"  \tGET_CONFIG  \n");
        assert_eq!(out, [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_blank_terminators_are_noops() {
        let mut engine = LineProtocol::new();
        assert!(feed(&mut engine, b"\r\n\r\n\n\r").is_empty());
        assert!(feed(&mut engine, b"   \n").is_empty());
    }

    #[test]
    fn test_unknown_line_is_reported_and_cleared() {
        let mut engine = LineProtocol::new();
        let out = feed(&mut engine, b"PING\nGET_CONFIG\n");
        assert_eq!(out, [Err(LineError::Unrecognized), Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_partial_line_waits_for_terminator() {
        let mut engine = LineProtocol::new();
        assert!(feed(&mut engine, b"GET_CON").is_empty());
        assert_eq!(engine.pending(), b"GET_CON");
        assert_eq!(feed(&mut engine, b"FIG\n"), [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        let mut engine = LineProtocol::new();
        let mut long = [b'x'; MAX_LINE_LENGTH + 10];
        long[0] = b'G';

        let out = feed(&mut engine, &long);
        assert_eq!(out, [Err(LineError::Overflow)]);
        assert!(engine.is_discarding());

        // Request text glued to the overlong line is part of it
        assert!(feed(&mut engine, b"GET_CONFIG").is_empty());

        assert!(feed(&mut engine, b"\r\n").is_empty());
        assert!(!engine.is_discarding());
        assert_eq!(feed(&mut engine, b"GET_CONFIG\n"), [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_line_at_capacity_is_accepted() {
        let mut engine = LineProtocol::new();
        let mut line = [b' '; MAX_LINE_LENGTH];
        line[..10].copy_from_slice(b"GET_CONFIG");

        assert!(feed(&mut engine, &line).is_empty());
        assert_eq!(feed(&mut engine, b"\n"), [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_leading_padding_beyond_capacity() {
        let mut engine = LineProtocol::new();
        let padding = [b' '; MAX_LINE_LENGTH + 40];

        assert!(feed(&mut engine, &padding).is_empty());
        assert!(engine.pending().is_empty());
        let out = feed(&mut engine, b"\tDeskMixer controller request\n");
        assert_eq!(out, [Ok(Request::Handshake)]);
    }

    #[test]
    fn test_trailing_padding_beyond_capacity() {
        let mut engine = LineProtocol::new();
        assert!(feed(&mut engine, b"GET_CONFIG").is_empty());
        assert!(feed(&mut engine, &[b' '; MAX_LINE_LENGTH * 2]).is_empty());
        assert!(!engine.is_discarding());
        assert_eq!(feed(&mut engine, b"\r\n"), [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_content_after_padding_still_overflows() {
        let mut engine = LineProtocol::new();
        let mut line = [b' '; MAX_LINE_LENGTH + 5];
        line[..10].copy_from_slice(b"GET_CONFIG");
        line[MAX_LINE_LENGTH + 2] = b'x';

        assert_eq!(feed(&mut engine, &line), [Err(LineError::Overflow)]);
        assert!(feed(&mut engine, b"\n").is_empty());
        assert_eq!(feed(&mut engine, b"GET_CONFIG\n"), [Ok(Request::GetConfig)]);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut engine = LineProtocol::new();
        feed(&mut engine, &[b'x'; MAX_LINE_LENGTH + 1]);
        engine.reset();
        assert!(!engine.is_discarding());
        assert_eq!(feed(&mut engine, b"GET_CONFIG\n"), [Ok(Request::GetConfig)]);
    }
}
