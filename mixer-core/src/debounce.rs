//! Debounced Edge Detector: turns button state changes into press events.
//!
//! Only released → pressed transitions are reported, and only when more
//! than the debounce window has passed since the channel's last accepted
//! press. The previous state is updated every tick whether or not an event
//! fired, so a held button can never re-trigger until it has been seen
//! released.

use heapless::Vec;
use mixer_proto::MAX_BUTTONS;

/// 1-based indices of the buttons pressed during one tick, in channel order.
pub type Presses = Vec<u8, MAX_BUTTONS>;

#[derive(Debug, Clone, Copy, Default)]
struct Channel {
    previous: bool,
    /// Time of the last emitted press, `None` until the first one.
    last_accepted: Option<u64>,
}

/// Per-channel edge detector with a fixed debounce window.
#[derive(Debug, Clone)]
pub struct EdgeDetector {
    channels: Vec<Channel, MAX_BUTTONS>,
    window_ms: u64,
}

impl EdgeDetector {
    /// Create a detector for `buttons` channels, all initially released.
    #[must_use]
    pub fn new(buttons: usize, window_ms: u64) -> Self {
        let mut channels = Vec::new();
        let _ = channels.resize(buttons.min(MAX_BUTTONS), Channel::default());
        Self {
            channels,
            window_ms,
        }
    }

    /// Compare `current` against the previous tick and collect press events.
    ///
    /// `current` holds logical states (`true` = pressed) in channel order;
    /// extra entries beyond the configured channel count are ignored.
    pub fn detect(&mut self, current: &[bool], now_ms: u64) -> Presses {
        let mut presses = Presses::new();
        let window = self.window_ms;

        for (index, (channel, &pressed)) in self.channels.iter_mut().zip(current).enumerate() {
            let settled = channel
                .last_accepted
                .map_or(true, |t| now_ms.saturating_sub(t) > window);

            if pressed && !channel.previous && settled {
                channel.last_accepted = Some(now_ms);
                // Capacity equals channel count, so this cannot fail
                let _ = presses.push(index as u8 + 1);
            }

            channel.previous = pressed;
        }

        presses
    }

    /// Debounce window in milliseconds.
    #[inline]
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}
