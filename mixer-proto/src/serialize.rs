//! Protocol serialization for device → host lines.
//!
//! This module provides the [`Serialize`] trait and the [`Response`] type,
//! covering every line the device ever sends.
//!
//! # Line Formats
//!
//! ```text
//! DeskMixer Controller Ready\r\n
//! CONFIG:SLIDERS:<n>:BUTTONS:<m>:SCREEN:<0|1>\r\n
//! Slider 1 <v>|Slider 2 <v>|...\r\n        (LabelStyle::Verbose)
//! s1 <v>|s2 <v>|...\r\n                    (LabelStyle::Terse)
//! Button <n> 1\r\n / b<n> 1\r\n
//! ```
//!
//! # Example
//!
//! ```
//! use mixer_proto::{LabelStyle, Response, Serialize};
//!
//! let values = [200, 800, 0, 1023];
//! let mut buf = [0u8; 128];
//! let len = Response::Telemetry { labels: LabelStyle::Verbose, values: &values }
//!     .serialize(&mut buf)
//!     .unwrap();
//!
//! assert_eq!(
//!     &buf[..len],
//!     b"Slider 1 200|Slider 2 800|Slider 3 0|Slider 4 1023\r\n"
//! );
//! ```

use crate::fmt::write_u16;
use crate::types::{DeviceDescriptor, LabelStyle, MAX_BUTTONS, MAX_SLIDERS};
use crate::HANDSHAKE_RESPONSE;

/// Terminator appended to every outbound line.
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Maximum size of a serialized line, terminator included.
///
/// The widest line is a full verbose telemetry report: per slider
/// `Slider ` (7) + index (1) + space (1) + value (4) + `|` (1) = 14 bytes,
/// so 8 sliders need 112 bytes plus the terminator.
pub const MAX_REPORT_SIZE: usize = 128;

/// Error type for serialization operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerializeError {
    /// The output buffer is too small to hold the serialized line.
    BufferTooSmall,
    /// A field is outside what the protocol can express.
    InvalidField,
    /// A write operation failed (for I/O adapters).
    WriteError,
}

impl core::fmt::Display for SerializeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::InvalidField => write!(f, "field out of range"),
            Self::WriteError => write!(f, "write error"),
        }
    }
}

/// A line sent from the device to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response<'a> {
    /// Handshake response, also sent once at boot.
    Ready,
    /// Answer to `GET_CONFIG`.
    Config(&'a DeviceDescriptor),
    /// Periodic analog report, one value per slider in channel order.
    Telemetry {
        labels: LabelStyle,
        values: &'a [u16],
    },
    /// Debounced press of a button, by 1-based index.
    Press { labels: LabelStyle, button: u8 },
}

/// Bounds-checked cursor over an output buffer.
struct LineBuf<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> LineBuf<'a> {
    #[inline]
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) -> Result<(), SerializeError> {
        let end = self.pos + bytes.len();
        let dst = self
            .buf
            .get_mut(self.pos..end)
            .ok_or(SerializeError::BufferTooSmall)?;
        dst.copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }

    #[inline]
    fn write(&mut self, byte: u8) -> Result<(), SerializeError> {
        self.write_slice(&[byte])
    }

    #[inline]
    fn write_u16(&mut self, value: u16) -> Result<(), SerializeError> {
        let mut tmp = [0u8; 5];
        let len = write_u16(&mut tmp, value);
        self.write_slice(&tmp[..len])
    }

    /// Append the line terminator and return the total length.
    #[inline]
    fn finalize(mut self) -> Result<usize, SerializeError> {
        self.write_slice(LINE_ENDING)?;
        Ok(self.pos)
    }
}

/// Extension trait for serializing protocol lines.
pub trait Serialize {
    /// Serialize to the provided buffer, terminator included.
    ///
    /// Returns the number of bytes written on success.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if the buffer is not large
    /// enough, or [`SerializeError::InvalidField`] if the line cannot be
    /// expressed on the wire.
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError>;

    /// Serialize to a `heapless::Vec`.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::BufferTooSmall`] if `N` is not large enough.
    fn serialize_to_vec<const N: usize>(&self) -> Result<heapless::Vec<u8, N>, SerializeError> {
        let mut vec = heapless::Vec::new();
        vec.resize(N, 0)
            .map_err(|_| SerializeError::BufferTooSmall)?;
        let len = self.serialize(&mut vec)?;
        vec.truncate(len);
        Ok(vec)
    }

    /// Serialize to a `core::fmt::Write` implementation.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError::WriteError`] if the write fails.
    fn serialize_fmt<W: core::fmt::Write>(&self, writer: &mut W) -> Result<(), SerializeError> {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = self.serialize(&mut buf)?;

        let s = core::str::from_utf8(&buf[..len]).map_err(|_| SerializeError::WriteError)?;
        writer.write_str(s).map_err(|_| SerializeError::WriteError)
    }
}

impl Serialize for Response<'_> {
    fn serialize(&self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        let mut lb = LineBuf::new(buf);

        match *self {
            Self::Ready => {
                lb.write_slice(HANDSHAKE_RESPONSE.as_bytes())?;
            }
            Self::Config(desc) => {
                lb.write_slice(b"CONFIG:SLIDERS:")?;
                lb.write_u16(desc.sliders as u16)?;
                lb.write_slice(b":BUTTONS:")?;
                lb.write_u16(desc.buttons as u16)?;
                lb.write_slice(b":SCREEN:")?;
                lb.write(if desc.screen { b'1' } else { b'0' })?;
            }
            Self::Telemetry { labels, values } => {
                if values.is_empty() || values.len() > MAX_SLIDERS {
                    return Err(SerializeError::InvalidField);
                }
                for (i, &value) in values.iter().enumerate() {
                    if i > 0 {
                        lb.write(b'|')?;
                    }
                    lb.write_slice(labels.slider_prefix())?;
                    lb.write_u16(i as u16 + 1)?;
                    lb.write(b' ')?;
                    lb.write_u16(value)?;
                }
            }
            Self::Press { labels, button } => {
                if button == 0 || button as usize > MAX_BUTTONS {
                    return Err(SerializeError::InvalidField);
                }
                lb.write_slice(labels.button_prefix())?;
                lb.write_u16(button as u16)?;
                lb.write_slice(b" 1")?;
            }
        }

        lb.finalize()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::parser::{parse_outbound, Outbound};

    fn render(response: Response<'_>) -> std::string::String {
        let mut s = std::string::String::new();
        response.serialize_fmt(&mut s).unwrap();
        s
    }

    #[test]
    fn test_serialize_ready() {
        assert_eq!(render(Response::Ready), "DeskMixer Controller Ready\r\n");
    }

    #[test]
    fn test_serialize_config() {
        let desc = DeviceDescriptor::new(4, 6).with_screen(true);
        assert_eq!(
            render(Response::Config(&desc)),
            "CONFIG:SLIDERS:4:BUTTONS:6:SCREEN:1\r\n"
        );

        let desc = DeviceDescriptor::new(2, 0);
        assert_eq!(
            render(Response::Config(&desc)),
            "CONFIG:SLIDERS:2:BUTTONS:0:SCREEN:0\r\n"
        );
    }

    #[test]
    fn test_serialize_verbose_telemetry() {
        let values = [200, 800, 0, 1023];
        assert_eq!(
            render(Response::Telemetry {
                labels: LabelStyle::Verbose,
                values: &values
            }),
            "Slider 1 200|Slider 2 800|Slider 3 0|Slider 4 1023\r\n"
        );
    }

    #[test]
    fn test_serialize_terse_telemetry() {
        let values = [512, 1023];
        assert_eq!(
            render(Response::Telemetry {
                labels: LabelStyle::Terse,
                values: &values
            }),
            "s1 512|s2 1023\r\n"
        );
    }

    #[test]
    fn test_serialize_press() {
        assert_eq!(
            render(Response::Press {
                labels: LabelStyle::Verbose,
                button: 3
            }),
            "Button 3 1\r\n"
        );
        assert_eq!(
            render(Response::Press {
                labels: LabelStyle::Terse,
                button: 16
            }),
            "b16 1\r\n"
        );
    }

    #[test]
    fn test_serialize_widest_line_fits() {
        let values = [1023u16; MAX_SLIDERS];
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let len = Response::Telemetry {
            labels: LabelStyle::Verbose,
            values: &values,
        }
        .serialize(&mut buf)
        .unwrap();
        assert_eq!(len, MAX_SLIDERS * 14 - 1 + LINE_ENDING.len());
    }

    #[test]
    fn test_serialize_buffer_too_small() {
        let mut buf = [0u8; 10];
        assert_eq!(
            Response::Ready.serialize(&mut buf),
            Err(SerializeError::BufferTooSmall)
        );
    }

    #[test]
    fn test_serialize_rejects_unexpressible_fields() {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let empty: [u16; 0] = [];
        assert_eq!(
            Response::Telemetry {
                labels: LabelStyle::Verbose,
                values: &empty
            }
            .serialize(&mut buf),
            Err(SerializeError::InvalidField)
        );
        assert_eq!(
            Response::Press {
                labels: LabelStyle::Verbose,
                button: 0
            }
            .serialize(&mut buf),
            Err(SerializeError::InvalidField)
        );
    }

    #[test]
    fn test_serialize_to_vec() {
        let vec = Response::Press {
            labels: LabelStyle::Terse,
            button: 1,
        }
        .serialize_to_vec::<16>()
        .unwrap();
        assert_eq!(vec.as_slice(), b"b1 1\r\n");
    }

    #[test]
    fn test_serialized_lines_decode_as_host_sees_them() {
        let values = [5, 6, 7];
        let vec = Response::Telemetry {
            labels: LabelStyle::Terse,
            values: &values,
        }
        .serialize_to_vec::<MAX_REPORT_SIZE>()
        .unwrap();

        match parse_outbound(&vec) {
            Ok(Outbound::Telemetry { labels, values: decoded }) => {
                assert_eq!(labels, LabelStyle::Terse);
                assert_eq!(decoded.as_slice(), &values);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
