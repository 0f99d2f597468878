//! Input Sampler: refreshes every channel's current value once per tick.

use crate::input::InputBank;
use heapless::Vec;
use mixer_proto::{ADC_MAX, MAX_BUTTONS, MAX_SLIDERS};

/// Current-value buffer for all channels.
///
/// Slider values are raw 10-bit readings. Button values are logical
/// (`true` = pressed), already inverted from the active-low pin level.
#[derive(Debug, Clone)]
pub struct Sampler {
    samples: Vec<u16, MAX_SLIDERS>,
    pressed: Vec<bool, MAX_BUTTONS>,
}

impl Sampler {
    /// Create a sampler for the given channel counts, all released and at zero.
    ///
    /// Counts above the protocol bounds are clamped; the controller rejects
    /// such descriptors before getting here.
    #[must_use]
    pub fn new(sliders: usize, buttons: usize) -> Self {
        let mut samples = Vec::new();
        let mut pressed = Vec::new();
        let _ = samples.resize(sliders.min(MAX_SLIDERS), 0);
        let _ = pressed.resize(buttons.min(MAX_BUTTONS), false);
        Self { samples, pressed }
    }

    /// Read every channel from the bank, overwriting the previous values.
    pub fn sample<B: InputBank>(&mut self, bank: &mut B) {
        for (index, slot) in self.samples.iter_mut().enumerate() {
            // Mask keeps a misbehaving converter inside the wire range
            *slot = bank.read_slider(index) & ADC_MAX;
        }

        for (index, slot) in self.pressed.iter_mut().enumerate() {
            *slot = !bank.read_button_level(index);
        }
    }

    /// Latest slider readings, in channel order.
    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    /// Latest logical button states, in channel order.
    #[inline]
    #[must_use]
    pub fn pressed(&self) -> &[bool] {
        &self.pressed
    }
}
