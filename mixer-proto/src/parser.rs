//! Line parsers for both directions of the serial link.
//!
//! - Inbound (host → device): [`parse_request`] recognizes the handshake and
//!   configuration requests.
//! - Outbound (device → host): [`parse_outbound`] decodes report lines the
//!   way the host application does, in either [`LabelStyle`].

use crate::fmt::{parse_u16, trim};
use crate::types::{LabelStyle, MAX_SLIDERS};
use crate::{CONFIG_REQUEST, HANDSHAKE_REQUEST, HANDSHAKE_RESPONSE};
use heapless::Vec;

/// Maximum inbound line length (terminator excluded).
pub const MAX_LINE_LENGTH: usize = 64;

/// Error type for parse operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Line is empty after trimming.
    Empty,
    /// Line is well-formed text but not a known message.
    Unknown,
    /// Line looks like a known message but a field is invalid.
    Malformed,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty line"),
            Self::Unknown => write!(f, "unknown message"),
            Self::Malformed => write!(f, "malformed message"),
        }
    }
}

/// A request the device understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub enum Request {
    /// `DeskMixer controller request`
    Handshake,
    /// `GET_CONFIG`
    GetConfig,
}

/// Parse one inbound line into a [`Request`].
///
/// Surrounding whitespace (including any CR/LF left on the line) is ignored;
/// the remaining text must match a request exactly, case-sensitively.
///
/// # Example
///
/// ```
/// use mixer_proto::{parse_request, ParseError, Request};
///
/// assert_eq!(parse_request(b"  GET_CONFIG\r\n"), Ok(Request::GetConfig));
/// assert_eq!(parse_request(b"get_config"), Err(ParseError::Unknown));
/// ```
pub fn parse_request(line: &[u8]) -> Result<Request, ParseError> {
    let line = trim(line);

    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    if line == HANDSHAKE_REQUEST.as_bytes() {
        Ok(Request::Handshake)
    } else if line == CONFIG_REQUEST.as_bytes() {
        Ok(Request::GetConfig)
    } else {
        Err(ParseError::Unknown)
    }
}

/// A decoded device → host line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Handshake response.
    Ready,
    /// Capability report.
    Config {
        sliders: u8,
        buttons: u8,
        screen: bool,
    },
    /// Analog report, values in channel order.
    Telemetry {
        labels: LabelStyle,
        values: Vec<u16, MAX_SLIDERS>,
    },
    /// Press event for a 1-based button index.
    Press { labels: LabelStyle, button: u8 },
}

/// Decode one outbound line.
///
/// Telemetry entries must carry consecutive 1-based indices starting at 1,
/// and a press event must carry the literal value `1`.
///
/// # Example
///
/// ```
/// use mixer_proto::{parse_outbound, LabelStyle, Outbound};
///
/// match parse_outbound(b"s1 200|s2 800\r\n") {
///     Ok(Outbound::Telemetry { labels, values }) => {
///         assert_eq!(labels, LabelStyle::Terse);
///         assert_eq!(values.as_slice(), &[200, 800]);
///     }
///     other => panic!("unexpected: {:?}", other),
/// }
/// ```
pub fn parse_outbound(line: &[u8]) -> Result<Outbound, ParseError> {
    let line = trim(line);

    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    if line == HANDSHAKE_RESPONSE.as_bytes() {
        return Ok(Outbound::Ready);
    }

    if let Some(rest) = line.strip_prefix(b"CONFIG:") {
        return parse_config(rest);
    }

    if let Some((labels, _)) = split_label(line, LabelKind::Slider) {
        return parse_telemetry(line, labels);
    }

    if let Some((labels, rest)) = split_label(line, LabelKind::Button) {
        return parse_press(rest, labels);
    }

    Err(ParseError::Unknown)
}

#[derive(Clone, Copy)]
enum LabelKind {
    Slider,
    Button,
}

/// Strip a channel label, reporting which style matched.
///
/// The verbose form is tried first since its first letter collides with the
/// terse slider prefix.
fn split_label(entry: &[u8], kind: LabelKind) -> Option<(LabelStyle, &[u8])> {
    for labels in [LabelStyle::Verbose, LabelStyle::Terse] {
        let prefix = match kind {
            LabelKind::Slider => labels.slider_prefix(),
            LabelKind::Button => labels.button_prefix(),
        };
        if let Some(rest) = entry.strip_prefix(prefix) {
            if rest.first().is_some_and(u8::is_ascii_digit) {
                return Some((labels, rest));
            }
        }
    }
    None
}

/// Split `<index> <value>` into its two numbers.
fn parse_index_value(rest: &[u8]) -> Result<(u16, u16), ParseError> {
    let space = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::Malformed)?;

    let index = parse_u16(&rest[..space]).ok_or(ParseError::Malformed)?;
    let value = parse_u16(&rest[space + 1..]).ok_or(ParseError::Malformed)?;

    Ok((index, value))
}

/// Parse `SLIDERS:<n>:BUTTONS:<m>:SCREEN:<0|1>`.
fn parse_config(rest: &[u8]) -> Result<Outbound, ParseError> {
    let mut parts = rest.split(|&b| b == b':');

    let sliders = config_field(&mut parts, b"SLIDERS")?;
    let buttons = config_field(&mut parts, b"BUTTONS")?;
    let screen = config_field(&mut parts, b"SCREEN")?;

    if parts.next().is_some() || screen > 1 {
        return Err(ParseError::Malformed);
    }

    Ok(Outbound::Config {
        sliders: u8::try_from(sliders).map_err(|_| ParseError::Malformed)?,
        buttons: u8::try_from(buttons).map_err(|_| ParseError::Malformed)?,
        screen: screen == 1,
    })
}

/// Consume one `<NAME>:<number>` pair from a config line.
fn config_field<'a>(
    parts: &mut impl Iterator<Item = &'a [u8]>,
    name: &[u8],
) -> Result<u16, ParseError> {
    if parts.next() != Some(name) {
        return Err(ParseError::Malformed);
    }
    parts
        .next()
        .and_then(parse_u16)
        .ok_or(ParseError::Malformed)
}

fn parse_telemetry(line: &[u8], labels: LabelStyle) -> Result<Outbound, ParseError> {
    let mut values = Vec::new();

    for (expected, entry) in (1u16..).zip(line.split(|&b| b == b'|')) {
        let (style, rest) = split_label(entry, LabelKind::Slider).ok_or(ParseError::Malformed)?;
        if style != labels {
            return Err(ParseError::Malformed);
        }

        let (index, value) = parse_index_value(rest)?;
        if index != expected {
            return Err(ParseError::Malformed);
        }

        values.push(value).map_err(|_| ParseError::Malformed)?;
    }

    Ok(Outbound::Telemetry { labels, values })
}

fn parse_press(rest: &[u8], labels: LabelStyle) -> Result<Outbound, ParseError> {
    let (index, value) = parse_index_value(rest)?;

    // Releases are never reported, so anything but 1 is foreign
    if value != 1 || index == 0 {
        return Err(ParseError::Malformed);
    }

    let button = u8::try_from(index).map_err(|_| ParseError::Malformed)?;
    Ok(Outbound::Press { labels, button })
}
