//! Input bank trait.

/// Raw access to the controller's physical inputs.
///
/// This trait abstracts the board, so the sampling and debouncing logic can
/// run unchanged against real ADC/GPIO peripherals or a test double.
///
/// Indices are 0-based and stable for the lifetime of the bank. Reads never
/// block and never fail: an implementation that hits a peripheral error
/// must still return a value (typically the last good one).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait InputBank {
    /// Number of analog channels (potentiometers).
    fn slider_count(&self) -> usize;

    /// Number of digital channels (buttons).
    fn button_count(&self) -> usize;

    /// Read the raw 10-bit converter value of a slider.
    fn read_slider(&mut self, index: usize) -> u16;

    /// Read the raw electrical level of a button pin (`true` = high).
    ///
    /// Buttons are wired active-low against a pull-up, so a pressed button
    /// reads `false` here.
    fn read_button_level(&mut self, index: usize) -> bool;
}
