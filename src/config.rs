//! Board configuration: link parameters, pin map, and device descriptor.
//!
//! | Function        | Pins            |
//! |-----------------|-----------------|
//! | UART0 TX / RX   | GPIO0 / GPIO1   |
//! | Sliders 1-4     | GPIO26-GPIO29 (ADC0-ADC3) |
//! | Buttons 1-6     | GPIO2-GPIO7, active-low, internal pull-up |
//!
//! The map targets a bare RP2040 board with all four ADC inputs broken out.
//! On a Raspberry Pi Pico GPIO29 (ADC3) is wired to VSYS/3 and cannot take
//! a slider; build that board with three sliders on GPIO26-GPIO28.

use mixer_proto::{DeviceDescriptor, LabelStyle};

/// Serial link speed, 8-N-1.
pub const BAUD_RATE: u32 = 115_200;

/// Delay between power-up and the boot handshake line.
pub const STARTUP_DELAY_MS: u64 = 1000;

/// Number of potentiometers wired to the ADC inputs.
pub const SLIDER_COUNT: usize = 4;

/// Number of push buttons wired to GPIO.
pub const BUTTON_COUNT: usize = 6;

/// UART ring buffer sizes.
pub const UART_TX_BUFFER: usize = 256;
pub const UART_RX_BUFFER: usize = 64;

/// Label style selected by the `terse-labels` feature.
pub const LABELS: LabelStyle = if cfg!(feature = "terse-labels") {
    LabelStyle::Terse
} else {
    LabelStyle::Verbose
};

/// Descriptor reported in `CONFIG` and used for every outbound line.
#[must_use]
pub fn descriptor() -> DeviceDescriptor {
    DeviceDescriptor::new(SLIDER_COUNT as u8, BUTTON_COUNT as u8)
        .with_screen(cfg!(feature = "screen"))
        .with_labels(LABELS)
}
