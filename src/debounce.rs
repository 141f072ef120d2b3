//! Counter-based button debouncing with one-shot press, release, and long-press events.

use crate::constants::{LONG_THRESHOLD, PRESS_THRESHOLD};
use crate::event_flag::EventFlag;

/// The two front-panel buttons.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left button: edit, and step through the fields being edited.
    B1,
    /// Right button: cycle display modes, and increment the field being edited.
    B2,
}

/// Edge events for one button, shared between the debouncer and the mode controller.
///
/// * `pressed` is set once when the press is accepted and cleared on release.
/// * `released` is set once on release, but only if `pressed` was still set. A consumer that
///   takes `pressed` therefore also swallows the matching release.
/// * `pressed_long` is set once when the hold reaches the long threshold and cleared on release.
///
/// The mode controller clears whatever it consumes; nothing is set again until the physical
/// transition recurs.
#[derive(Debug, Default)]
pub struct ButtonEvents {
    pub pressed: EventFlag,
    pub released: EventFlag,
    pub pressed_long: EventFlag,
}

impl ButtonEvents {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: EventFlag::new(),
            released: EventFlag::new(),
            pressed_long: EventFlag::new(),
        }
    }
}

/// Integrating debouncer for one button line. Owned by the tick handler.
#[derive(Debug, Default, Clone)]
pub struct Debouncer {
    counter: u8,
}

impl Debouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self { counter: 0 }
    }

    /// Consecutive active samples seen so far, pinned at [`LONG_THRESHOLD`].
    #[must_use]
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Feeds one sample of the (logical, already active-low-corrected) line.
    pub fn sample(&mut self, line_active: bool, events: &ButtonEvents) {
        if line_active {
            if self.counter < LONG_THRESHOLD {
                self.counter = self.counter.saturating_add(1);
                if self.counter == PRESS_THRESHOLD {
                    events.released.clear();
                    events.pressed.set();
                }
                if self.counter == LONG_THRESHOLD {
                    events.pressed_long.set();
                }
            }
        } else {
            self.counter = 0;
            if events.pressed.take() {
                events.released.set();
            }
            events.pressed_long.clear();
        }
    }
}
