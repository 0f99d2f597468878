//! MixerController: runs the four components in a fixed order each tick.

use crate::debounce::EdgeDetector;
use crate::input::InputBank;
use crate::protocol::{LineError, LineProtocol};
use crate::sampler::Sampler;
use crate::serial::{SerialError, SerialPort};
use crate::telemetry::TelemetryScheduler;
use mixer_proto::{DeviceDescriptor, Request, Response, Serialize, MAX_REPORT_SIZE};

/// Minimum time between two accepted presses of the same button.
pub const DEBOUNCE_WINDOW_MS: u64 = 10;

/// Period of the analog report.
pub const TELEMETRY_INTERVAL_MS: u64 = 10;

/// Timing parameters of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    pub debounce_ms: u64,
    pub telemetry_interval_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_WINDOW_MS,
            telemetry_interval_ms: TELEMETRY_INTERVAL_MS,
        }
    }
}

/// Error type for controller construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Descriptor declares more sliders than the protocol supports.
    TooManySliders,
    /// Descriptor declares more buttons than the protocol supports.
    TooManyButtons,
    /// Descriptor and input bank disagree on channel counts.
    ChannelMismatch,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooManySliders => write!(f, "too many sliders"),
            Self::TooManyButtons => write!(f, "too many buttons"),
            Self::ChannelMismatch => write!(f, "descriptor does not match input bank"),
        }
    }
}

/// What one tick did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Activity {
    /// Request responses sent.
    pub responses: u16,
    /// Inbound lines dropped (unknown or overlong).
    pub dropped_lines: u16,
    /// Press events sent.
    pub presses: u16,
    /// Whether the analog report went out.
    pub telemetry: bool,
    /// Outbound lines lost to serial errors.
    pub write_errors: u16,
}

impl Activity {
    /// Whether anything at all happened.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// The controller's single context object.
///
/// Owns the board inputs, the serial link, and all per-device state. Each
/// call to [`tick`](Self::tick) performs, in order:
///
/// 1. drain inbound bytes and answer complete requests
/// 2. sample every slider and button
/// 3. emit press events for debounced released → pressed edges
/// 4. emit the analog report if the interval has elapsed
///
/// Nothing in a tick blocks or waits. Serial write failures are logged and
/// counted but never stop the tick, so internal state always advances.
pub struct MixerController<B, S> {
    bank: B,
    serial: S,
    descriptor: DeviceDescriptor,
    protocol: LineProtocol,
    sampler: Sampler,
    detector: EdgeDetector,
    telemetry: TelemetryScheduler,
}

impl<B: InputBank, S: SerialPort> MixerController<B, S> {
    /// Create a controller with default timing.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the descriptor exceeds the protocol
    /// bounds or disagrees with the bank's channel counts.
    pub fn new(bank: B, serial: S, descriptor: DeviceDescriptor) -> Result<Self, ConfigError> {
        Self::with_timing(bank, serial, descriptor, Timing::default())
    }

    /// Create a controller with explicit timing.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_timing(
        bank: B,
        serial: S,
        descriptor: DeviceDescriptor,
        timing: Timing,
    ) -> Result<Self, ConfigError> {
        if descriptor.slider_count() > mixer_proto::MAX_SLIDERS {
            return Err(ConfigError::TooManySliders);
        }
        if descriptor.button_count() > mixer_proto::MAX_BUTTONS {
            return Err(ConfigError::TooManyButtons);
        }
        if bank.slider_count() != descriptor.slider_count()
            || bank.button_count() != descriptor.button_count()
        {
            return Err(ConfigError::ChannelMismatch);
        }

        Ok(Self {
            bank,
            serial,
            descriptor,
            protocol: LineProtocol::new(),
            sampler: Sampler::new(descriptor.slider_count(), descriptor.button_count()),
            detector: EdgeDetector::new(descriptor.button_count(), timing.debounce_ms),
            telemetry: TelemetryScheduler::new(timing.telemetry_interval_ms),
        })
    }

    /// Send the boot handshake line.
    ///
    /// Call exactly once, after the startup delay and before the first tick.
    pub fn announce(&mut self) -> Result<(), SerialError> {
        send(&mut self.serial, &Response::Ready)
    }

    /// Run one iteration of the control loop at monotonic time `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Activity {
        let mut activity = Activity::default();

        self.drain_requests(&mut activity);

        self.sampler.sample(&mut self.bank);

        let labels = self.descriptor.labels;
        for button in self.detector.detect(self.sampler.pressed(), now_ms) {
            #[cfg(feature = "defmt")]
            defmt::debug!("button {} pressed at {} ms", button, now_ms);

            let result = send(&mut self.serial, &Response::Press { labels, button });
            record(&mut activity, result, |a| a.presses = a.presses.saturating_add(1));
        }

        if let Some(values) = self.telemetry.poll(now_ms, self.sampler.samples()) {
            let result = send(&mut self.serial, &Response::Telemetry { labels, values });
            record(&mut activity, result, |a| a.telemetry = true);
        }

        activity
    }

    /// Consume every byte already waiting on the serial link.
    fn drain_requests(&mut self, activity: &mut Activity) {
        loop {
            let byte = match self.serial.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("serial read error: {}", _e);
                    break;
                }
            };

            match self.protocol.push_byte(byte) {
                Ok(Some(request)) => self.respond(request, activity),
                Ok(None) => {}
                Err(LineError::Overflow) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("inbound line too long, skipping to next terminator");
                    activity.dropped_lines = activity.dropped_lines.saturating_add(1);
                }
                Err(LineError::Unrecognized) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("unrecognized request dropped");
                    activity.dropped_lines = activity.dropped_lines.saturating_add(1);
                }
            }
        }
    }

    fn respond(&mut self, request: Request, activity: &mut Activity) {
        #[cfg(feature = "defmt")]
        defmt::debug!("request: {}", request);

        let result = match request {
            Request::Handshake => send(&mut self.serial, &Response::Ready),
            Request::GetConfig => send(&mut self.serial, &Response::Config(&self.descriptor)),
        };
        record(activity, result, |a| a.responses = a.responses.saturating_add(1));
    }

    /// Device descriptor this controller reports.
    #[inline]
    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    /// Latest slider readings.
    #[inline]
    pub fn samples(&self) -> &[u16] {
        self.sampler.samples()
    }

    /// Latest logical button states.
    #[inline]
    pub fn pressed(&self) -> &[bool] {
        self.sampler.pressed()
    }

    /// Get a mutable reference to the input bank.
    pub fn bank_mut(&mut self) -> &mut B {
        &mut self.bank
    }

    /// Get a mutable reference to the serial port.
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Decompose the controller into its input bank and serial port.
    pub fn into_parts(self) -> (B, S) {
        (self.bank, self.serial)
    }
}

/// Serialize one line and hand it to the port.
fn send<S: SerialPort>(serial: &mut S, response: &Response<'_>) -> Result<(), SerialError> {
    let mut buf = [0u8; MAX_REPORT_SIZE];
    let len = response
        .serialize(&mut buf)
        .map_err(|_| SerialError::Encode)?;
    serial.write_all(&buf[..len])
}

/// Count a send outcome in the tick's activity.
fn record(activity: &mut Activity, result: Result<(), SerialError>, on_sent: impl FnOnce(&mut Activity)) {
    match result {
        Ok(()) => on_sent(activity),
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::error!("serial write failed: {}", _e);
            activity.write_errors = activity.write_errors.saturating_add(1);
        }
    }
}
