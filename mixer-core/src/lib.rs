//! Platform-agnostic control loop for the DeskMixer controller.
//!
//! This crate holds everything the firmware does that does not touch a
//! peripheral: request line assembly, input sampling, debouncing, and the
//! telemetry cadence. It runs unchanged in `no_std` firmware and on host
//! for testing.
//!
//! # Overview
//!
//! - [`input`]: Board input trait ([`InputBank`])
//! - [`serial`]: Byte-stream trait ([`SerialPort`]) and the `embedded-io` adapter
//! - [`protocol`]: Inbound request line assembly ([`LineProtocol`])
//! - [`sampler`]: Per-tick channel snapshot ([`Sampler`])
//! - [`debounce`]: Press edge detection ([`EdgeDetector`])
//! - [`telemetry`]: Periodic analog report ([`TelemetryScheduler`])
//! - [`controller`]: Ties them together ([`MixerController`])
//!
//! # Timing
//!
//! There is no clock inside this crate. The caller passes the current
//! monotonic time in milliseconds to [`MixerController::tick`], which keeps
//! every time-dependent rule testable with plain integers.
//!
//! # Example
//!
//! ```rust
//! use mixer_core::{InputBank, MixerController, SerialError, SerialPort};
//! use mixer_proto::DeviceDescriptor;
//!
//! struct Knob(u16);
//!
//! impl InputBank for Knob {
//!     fn slider_count(&self) -> usize { 1 }
//!     fn button_count(&self) -> usize { 0 }
//!     fn read_slider(&mut self, _: usize) -> u16 { self.0 }
//!     fn read_button_level(&mut self, _: usize) -> bool { true }
//! }
//!
//! #[derive(Default)]
//! struct Sink(usize);
//!
//! impl SerialPort for Sink {
//!     fn read_byte(&mut self) -> Result<Option<u8>, SerialError> { Ok(None) }
//!     fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
//!         self.0 += bytes.len();
//!         Ok(())
//!     }
//! }
//!
//! let mut ctl = MixerController::new(Knob(512), Sink::default(), DeviceDescriptor::new(1, 0))
//!     .unwrap();
//! ctl.announce().unwrap();
//! assert!(ctl.tick(0).telemetry);
//! assert!(!ctl.tick(5).telemetry);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and logging (for embedded targets)
//! - **`embedded-io`**: [`IoSerial`] adapter for `embedded-io` byte streams

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod controller;
pub mod debounce;
pub mod input;
pub mod protocol;
pub mod sampler;
pub mod serial;
pub mod telemetry;

// Re-export main types at crate root
pub use controller::{
    Activity, ConfigError, MixerController, Timing, DEBOUNCE_WINDOW_MS, TELEMETRY_INTERVAL_MS,
};
pub use debounce::{EdgeDetector, Presses};
pub use input::InputBank;
pub use protocol::{LineError, LineProtocol};
pub use sampler::Sampler;
#[cfg(any(test, feature = "embedded-io"))]
pub use serial::IoSerial;
pub use serial::{SerialError, SerialPort};
pub use telemetry::TelemetryScheduler;
