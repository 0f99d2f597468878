//! Core protocol types: DeviceDescriptor, LabelStyle, and channel bounds.

/// Largest value a slider can report (10-bit converter resolution).
pub const ADC_MAX: u16 = 1023;

/// Maximum number of analog channels a descriptor may declare.
pub const MAX_SLIDERS: usize = 8;

/// Maximum number of digital channels a descriptor may declare.
pub const MAX_BUTTONS: usize = 16;

/// Channel labeling convention used in outbound report lines.
///
/// Two conventions exist in the field and they are mutually incompatible,
/// so a device speaks exactly one of them:
///
/// | Style     | Telemetry                    | Press event  |
/// |-----------|------------------------------|--------------|
/// | `Verbose` | `Slider 1 512\|Slider 2 1023` | `Button 3 1` |
/// | `Terse`   | `s1 512\|s2 1023`             | `b3 1`       |
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LabelStyle {
    /// `Slider <n>` / `Button <n>` labels (canonical).
    #[default]
    Verbose,
    /// `s<n>` / `b<n>` labels.
    Terse,
}

impl LabelStyle {
    /// Label prefix written before a slider index.
    #[inline]
    #[must_use]
    pub const fn slider_prefix(self) -> &'static [u8] {
        match self {
            Self::Verbose => b"Slider ",
            Self::Terse => b"s",
        }
    }

    /// Label prefix written before a button index.
    #[inline]
    #[must_use]
    pub const fn button_prefix(self) -> &'static [u8] {
        match self {
            Self::Verbose => b"Button ",
            Self::Terse => b"b",
        }
    }
}

/// Static description of the controller hardware.
///
/// Both the `GET_CONFIG` responder and the report formatter read from this
/// value, so the capability string and the lines actually emitted can never
/// disagree.
///
/// # Example
///
/// ```
/// use mixer_proto::{DeviceDescriptor, LabelStyle};
///
/// let desc = DeviceDescriptor::new(4, 6).with_screen(true);
/// assert_eq!(desc.slider_count(), 4);
/// assert_eq!(desc.labels, LabelStyle::Verbose);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDescriptor {
    /// Number of analog channels (potentiometers).
    pub sliders: u8,
    /// Number of digital channels (buttons).
    pub buttons: u8,
    /// Whether the device carries a screen.
    pub screen: bool,
    /// Labeling convention for outbound reports.
    pub labels: LabelStyle,
}

impl DeviceDescriptor {
    /// Create a descriptor with no screen and verbose labels.
    #[must_use]
    pub const fn new(sliders: u8, buttons: u8) -> Self {
        Self {
            sliders,
            buttons,
            screen: false,
            labels: LabelStyle::Verbose,
        }
    }

    /// Set the screen capability flag.
    #[must_use]
    pub const fn with_screen(mut self, screen: bool) -> Self {
        self.screen = screen;
        self
    }

    /// Set the outbound labeling convention.
    #[must_use]
    pub const fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    #[inline]
    #[must_use]
    pub const fn slider_count(&self) -> usize {
        self.sliders as usize
    }

    #[inline]
    #[must_use]
    pub const fn button_count(&self) -> usize {
        self.buttons as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefixes() {
        assert_eq!(LabelStyle::Verbose.slider_prefix(), b"Slider ");
        assert_eq!(LabelStyle::Verbose.button_prefix(), b"Button ");
        assert_eq!(LabelStyle::Terse.slider_prefix(), b"s");
        assert_eq!(LabelStyle::Terse.button_prefix(), b"b");
    }

    #[test]
    fn test_descriptor_builder() {
        let desc = DeviceDescriptor::new(4, 6)
            .with_screen(true)
            .with_labels(LabelStyle::Terse);
        assert_eq!(desc.slider_count(), 4);
        assert_eq!(desc.button_count(), 6);
        assert!(desc.screen);
        assert_eq!(desc.labels, LabelStyle::Terse);
    }
}
