//! Serial line protocol for the DeskMixer controller.
//!
//! This crate provides everything needed to speak the controller's wire
//! protocol, from either end of the link:
//!
//! - **Types**: static device description
//!   - [`DeviceDescriptor`] - channel counts and capability flags
//!   - [`LabelStyle`] - verbose or terse channel labels
//!
//! - **Parsing**
//!   - [`parse_request()`] - host → device requests
//!   - [`parse_outbound()`] - device → host lines, as the host decodes them
//!
//! - **Serialization**
//!   - [`Serialize`] trait and [`Response`] - every device → host line
//!
//! # Protocol Format
//!
//! Newline-delimited 8-bit ASCII. Inbound lines may end in `\r`, `\n` or
//! `\r\n`; outbound lines always end in `\r\n`. There are no checksums and
//! no binary payloads.
//!
//! ## Requests (host → device)
//!
//! | Request                        | Response                                     |
//! |--------------------------------|----------------------------------------------|
//! | `DeskMixer controller request` | `DeskMixer Controller Ready`                 |
//! | `GET_CONFIG`                   | `CONFIG:SLIDERS:<n>:BUTTONS:<m>:SCREEN:<0\|1>` |
//!
//! Unknown requests get no response.
//!
//! ## Reports (device → host)
//!
//! ```text
//! Slider 1 <0-1023>|Slider 2 <0-1023>|...   periodic analog report
//! Button <n> 1                              debounced press
//! ```
//!
//! See [`LabelStyle`] for the terse variant.
//!
//! # Example
//!
//! ```
//! use mixer_proto::{parse_request, DeviceDescriptor, Request, Response, Serialize};
//!
//! let desc = DeviceDescriptor::new(4, 6).with_screen(true);
//! let mut buf = [0u8; 64];
//!
//! if let Ok(Request::GetConfig) = parse_request(b"GET_CONFIG\r\n") {
//!     let len = Response::Config(&desc).serialize(&mut buf).unwrap();
//!     assert_eq!(&buf[..len], b"CONFIG:SLIDERS:4:BUTTONS:6:SCREEN:1\r\n");
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

mod fmt;
pub mod parser;
pub mod serialize;
pub mod types;

/// Request sent by the host to detect a compatible device.
pub const HANDSHAKE_REQUEST: &str = "DeskMixer controller request";

/// Reply to [`HANDSHAKE_REQUEST`], also sent once at boot.
pub const HANDSHAKE_RESPONSE: &str = "DeskMixer Controller Ready";

/// Request for the device capability string.
pub const CONFIG_REQUEST: &str = "GET_CONFIG";

// Re-export types at crate root for convenience
pub use fmt::trim;
pub use parser::{parse_outbound, parse_request, Outbound, ParseError, Request, MAX_LINE_LENGTH};
pub use serialize::{Response, Serialize, SerializeError, LINE_ENDING, MAX_REPORT_SIZE};
pub use types::{DeviceDescriptor, LabelStyle, ADC_MAX, MAX_BUTTONS, MAX_SLIDERS};
