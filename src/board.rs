//! ADC and GPIO adapter implementing [`InputBank`] for the RP2040.

use crate::config::{BUTTON_COUNT, SLIDER_COUNT};
use defmt::warn;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embedded_hal::digital::InputPin;
use mixer_core::InputBank;

/// The RP2040 converter is 12-bit; the wire format carries 10 bits.
const ADC_SHIFT: u32 = 2;

/// Front panel inputs: four potentiometers and six buttons.
///
/// A failed conversion keeps the channel's previous reading so one glitch
/// does not show up as a jump to zero on the host.
pub struct PanelInputs<P> {
    adc: Adc<'static, Blocking>,
    sliders: [Channel<'static>; SLIDER_COUNT],
    buttons: [P; BUTTON_COUNT],
    last: [u16; SLIDER_COUNT],
}

impl<P: InputPin> PanelInputs<P> {
    /// Create the adapter from configured peripherals.
    pub fn new(
        adc: Adc<'static, Blocking>,
        sliders: [Channel<'static>; SLIDER_COUNT],
        buttons: [P; BUTTON_COUNT],
    ) -> Self {
        Self {
            adc,
            sliders,
            buttons,
            last: [0; SLIDER_COUNT],
        }
    }
}

impl<P: InputPin> InputBank for PanelInputs<P> {
    fn slider_count(&self) -> usize {
        SLIDER_COUNT
    }

    fn button_count(&self) -> usize {
        BUTTON_COUNT
    }

    fn read_slider(&mut self, index: usize) -> u16 {
        match self.adc.blocking_read(&mut self.sliders[index]) {
            Ok(raw) => {
                self.last[index] = raw >> ADC_SHIFT;
            }
            Err(e) => {
                warn!("ADC read failed on slider {}: {:?}", index + 1, e);
            }
        }
        self.last[index]
    }

    fn read_button_level(&mut self, index: usize) -> bool {
        // Treat an unreadable pin as released
        self.buttons[index].is_high().unwrap_or(true)
    }
}
