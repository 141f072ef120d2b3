//! The fixed-period tick handler and the state it shares with the main loop.
//!
//! [`Timekeeper::tick`] runs every [`TICK_PERIOD`](crate::constants::TICK_PERIOD). It is the only
//! writer of the running clock, the colon and blink flags, and the auto-repeat flag, and the only
//! caller of the debouncers. Everything the main loop can see lives in [`ClockShared`], one atomic
//! cell per field, so the tick may land anywhere inside a main-loop iteration.

use portable_atomic::{AtomicBool, Ordering};

use crate::constants::{BLINK_TICKS, COLON_OFF_TICKS, REPEAT_TICKS, TICKS_PER_SECOND};
use crate::debounce::{Button, ButtonEvents, Debouncer};
use crate::event_flag::EventFlag;
use crate::lines::ButtonLines;
use crate::time::{ClockCell, TimeOfDay};

/// Snapshot of the derived tick flags.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickFlags {
    /// Lit for the first half of each second.
    pub colon_visible: bool,
    /// Toggles every [`BLINK_TICKS`], running or not; gates the field being edited.
    pub blink_visible: bool,
    /// One-shot: set every [`REPEAT_TICKS`], cleared by whoever consumes it.
    pub auto_repeat_ready: bool,
}

/// State shared between the tick handler and the main loop.
///
/// Lives in a `static`; every field is its own atomic cell.
#[derive(Debug)]
pub struct ClockShared {
    clock: ClockCell,
    running: AtomicBool,
    colon_visible: AtomicBool,
    blink_visible: AtomicBool,
    auto_repeat_ready: EventFlag,
    b1: ButtonEvents,
    b2: ButtonEvents,
}

impl ClockShared {
    /// A running clock showing `time`.
    #[must_use]
    pub const fn new(time: TimeOfDay) -> Self {
        Self {
            clock: ClockCell::new(time),
            running: AtomicBool::new(true),
            colon_visible: AtomicBool::new(false),
            blink_visible: AtomicBool::new(false),
            auto_repeat_ready: EventFlag::new(),
            b1: ButtonEvents::new(),
            b2: ButtonEvents::new(),
        }
    }

    #[must_use]
    pub const fn clock(&self) -> &ClockCell {
        &self.clock
    }

    #[must_use]
    pub fn time(&self) -> TimeOfDay {
        self.clock.load()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Pauses or resumes the clock. Only the mode controller calls this.
    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Release);
    }

    #[must_use]
    pub fn flags(&self) -> TickFlags {
        TickFlags {
            colon_visible: self.colon_visible.load(Ordering::Acquire),
            blink_visible: self.blink_visible.load(Ordering::Acquire),
            auto_repeat_ready: self.auto_repeat_ready.is_set(),
        }
    }

    #[must_use]
    pub const fn auto_repeat_ready(&self) -> &EventFlag {
        &self.auto_repeat_ready
    }

    #[must_use]
    pub const fn button(&self, button: Button) -> &ButtonEvents {
        match button {
            Button::B1 => &self.b1,
            Button::B2 => &self.b2,
        }
    }
}

/// The periodic tick handler.
#[derive(Debug)]
pub struct Timekeeper<'a> {
    shared: &'a ClockShared,
    next_second: u8,
    next_blink: u8,
    next_repeat: u8,
    b1: Debouncer,
    b2: Debouncer,
}

impl<'a> Timekeeper<'a> {
    #[must_use]
    pub const fn new(shared: &'a ClockShared) -> Self {
        Self {
            shared,
            next_second: TICKS_PER_SECOND,
            next_blink: BLINK_TICKS,
            next_repeat: REPEAT_TICKS,
            b1: Debouncer::new(),
            b2: Debouncer::new(),
        }
    }

    /// Ticks left until the next second, while running.
    #[must_use]
    pub const fn next_second(&self) -> u8 {
        self.next_second
    }

    /// One tick: advance time if running, update the blink and repeat flags, sample buttons.
    ///
    /// Never blocks; every shared write is a single-cell store.
    pub fn tick(&mut self, lines: ButtonLines) {
        let shared = self.shared;

        if shared.is_running() {
            self.next_second = countdown(self.next_second);
            if self.next_second == 0 {
                self.next_second = TICKS_PER_SECOND;
                shared.colon_visible.store(true, Ordering::Release);
                shared.clock.advance_second();
            } else if self.next_second == COLON_OFF_TICKS {
                shared.colon_visible.store(false, Ordering::Release);
            }
        }

        self.next_blink = countdown(self.next_blink);
        if self.next_blink == 0 {
            self.next_blink = BLINK_TICKS;
            let visible = shared.blink_visible.load(Ordering::Acquire);
            shared.blink_visible.store(!visible, Ordering::Release);
        }

        self.next_repeat = countdown(self.next_repeat);
        if self.next_repeat == 0 {
            self.next_repeat = REPEAT_TICKS;
            shared.auto_repeat_ready.set();
        }

        self.b1.sample(lines.b1, &shared.b1);
        self.b2.sample(lines.b2, &shared.b2);
    }
}

#[inline]
const fn countdown(value: u8) -> u8 {
    value.saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::{ClockShared, Timekeeper};
    use crate::constants::{BLINK_TICKS, LONG_THRESHOLD, REPEAT_TICKS, TICKS_PER_SECOND};
    use crate::debounce::Button;
    use crate::lines::ButtonLines;
    use crate::time::TimeOfDay;

    #[test]
    fn one_second_per_twenty_ticks() {
        let shared = ClockShared::new(TimeOfDay::new(12, 0, 0));
        let mut timekeeper = Timekeeper::new(&shared);
        for _ in 1..TICKS_PER_SECOND {
            timekeeper.tick(ButtonLines::RELEASED);
        }
        assert_eq!(shared.time(), TimeOfDay::new(12, 0, 0));
        timekeeper.tick(ButtonLines::RELEASED);
        assert_eq!(shared.time(), TimeOfDay::new(12, 0, 1));
    }

    #[test]
    fn paused_clock_keeps_blinking() {
        let shared = ClockShared::new(TimeOfDay::new(12, 0, 0));
        shared.set_running(false);
        let mut timekeeper = Timekeeper::new(&shared);
        let mut toggles = 0;
        let mut previous = shared.flags().blink_visible;
        for _ in 0..(u32::from(TICKS_PER_SECOND) * 3) {
            timekeeper.tick(ButtonLines::RELEASED);
            let now = shared.flags().blink_visible;
            toggles += u32::from(now != previous);
            previous = now;
        }
        assert_eq!(shared.time(), TimeOfDay::new(12, 0, 0));
        assert_eq!(toggles, u32::from(TICKS_PER_SECOND) * 3 / u32::from(BLINK_TICKS));
        assert_eq!(timekeeper.next_second(), TICKS_PER_SECOND);
    }

    #[test]
    fn auto_repeat_is_sticky_until_taken() {
        let shared = ClockShared::new(TimeOfDay::default());
        let mut timekeeper = Timekeeper::new(&shared);
        for _ in 1..REPEAT_TICKS {
            timekeeper.tick(ButtonLines::RELEASED);
        }
        assert!(!shared.flags().auto_repeat_ready);
        timekeeper.tick(ButtonLines::RELEASED);
        assert!(shared.flags().auto_repeat_ready);
        for _ in 0..(REPEAT_TICKS * 3) {
            timekeeper.tick(ButtonLines::RELEASED);
        }
        assert!(shared.auto_repeat_ready().take());
        assert!(!shared.flags().auto_repeat_ready);
    }

    #[test]
    fn tick_samples_both_buttons() {
        let shared = ClockShared::new(TimeOfDay::default());
        let mut timekeeper = Timekeeper::new(&shared);
        for _ in 0..LONG_THRESHOLD {
            timekeeper.tick(ButtonLines { b1: true, b2: false });
        }
        assert!(shared.button(Button::B1).pressed.is_set());
        assert!(shared.button(Button::B1).pressed_long.is_set());
        assert!(!shared.button(Button::B2).pressed.is_set());
        timekeeper.tick(ButtonLines::RELEASED);
        assert!(shared.button(Button::B1).released.is_set());
    }
}
