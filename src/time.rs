//! Wall-clock values: time of day, alarm setting, hour format, and the shared clock cell.

use portable_atomic::{AtomicU8, Ordering};

use crate::constants::{HOURS_PER_DAY, MINUTES_PER_HOUR, SECONDS_PER_MINUTE};

/// A valid wall-clock triple: hour 0–23, minute 0–59, second 0–59.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeOfDay {
    /// Out-of-range fields are wrapped into range.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
            second: second % SECONDS_PER_MINUTE,
        }
    }

    /// One second later, carrying into minutes and hours (23:59:59 becomes 00:00:00).
    #[must_use]
    pub const fn next_second(self) -> Self {
        let second = wrapping_increment(self.second, SECONDS_PER_MINUTE);
        if second != 0 {
            return Self { second, ..self };
        }
        let minute = wrapping_increment(self.minute, MINUTES_PER_HOUR);
        if minute != 0 {
            return Self { minute, second, ..self };
        }
        Self {
            hour: wrapping_increment(self.hour, HOURS_PER_DAY),
            minute,
            second,
        }
    }
}

/// The single alarm. Matches at minute granularity.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlarmSetting {
    pub hour: u8,
    pub minute: u8,
    pub enabled: bool,
}

impl AlarmSetting {
    #[must_use]
    pub const fn new(hour: u8, minute: u8, enabled: bool) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
            enabled,
        }
    }

    /// Whether the alarm's hour and minute equal the clock's (ignores `enabled` and seconds).
    #[must_use]
    pub const fn matches(&self, time: TimeOfDay) -> bool {
        self.hour == time.hour && self.minute == time.minute
    }

    pub const fn increment_hour(&mut self) {
        self.hour = wrapping_increment(self.hour, HOURS_PER_DAY);
    }

    /// Wraps 59 to 0 without touching the hour.
    pub const fn increment_minute(&mut self) {
        self.minute = wrapping_increment(self.minute, MINUTES_PER_HOUR);
    }
}

/// How hours are rendered.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HourFormat {
    #[default]
    TwentyFour,
    Twelve,
}

impl HourFormat {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::TwentyFour => Self::Twelve,
            Self::Twelve => Self::TwentyFour,
        }
    }

    /// The hour as shown: 0–23, or 12, 1–11 in twelve-hour format.
    #[must_use]
    pub const fn display_hour(self, hour: u8) -> u8 {
        match self {
            Self::TwentyFour => hour,
            Self::Twelve => match hour % 12 {
                0 => 12,
                other => other,
            },
        }
    }

    /// Whether the colon stands in for "PM": always in 24-hour format, afternoons in 12-hour.
    #[must_use]
    pub const fn colon_marks_hour(self, hour: u8) -> bool {
        match self {
            Self::TwentyFour => true,
            Self::Twelve => hour >= 12,
        }
    }
}

/// Time of day stored as three independent byte cells.
///
/// Each field is read and written atomically on its own. A reader that loads all three while the
/// tick handler is rolling over may see a momentarily stale combination; every field is still in
/// range, and the next read is consistent.
#[derive(Debug)]
pub struct ClockCell {
    hour: AtomicU8,
    minute: AtomicU8,
    second: AtomicU8,
}

impl ClockCell {
    #[must_use]
    pub const fn new(time: TimeOfDay) -> Self {
        Self {
            hour: AtomicU8::new(time.hour),
            minute: AtomicU8::new(time.minute),
            second: AtomicU8::new(time.second),
        }
    }

    #[must_use]
    pub fn load(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.hour.load(Ordering::Acquire),
            minute: self.minute.load(Ordering::Acquire),
            second: self.second.load(Ordering::Acquire),
        }
    }

    /// Stores only the fields that changed.
    pub fn store(&self, time: TimeOfDay) {
        let current = self.load();
        if current.second != time.second {
            self.second.store(time.second, Ordering::Release);
        }
        if current.minute != time.minute {
            self.minute.store(time.minute, Ordering::Release);
        }
        if current.hour != time.hour {
            self.hour.store(time.hour, Ordering::Release);
        }
    }

    pub fn advance_second(&self) {
        self.store(self.load().next_second());
    }

    /// Edit-mode hour increment (wraps 23 to 0) with seconds reset to zero.
    pub fn increment_hour(&self) {
        let time = self.load();
        self.store(TimeOfDay {
            hour: wrapping_increment(time.hour, HOURS_PER_DAY),
            second: 0,
            ..time
        });
    }

    /// Edit-mode minute increment (wraps 59 to 0, no carry) with seconds reset to zero.
    pub fn increment_minute(&self) {
        let time = self.load();
        self.store(TimeOfDay {
            minute: wrapping_increment(time.minute, MINUTES_PER_HOUR),
            second: 0,
            ..time
        });
    }
}

#[inline]
#[expect(
    clippy::arithmetic_side_effects,
    reason = "value < modulus <= 60, so the increment cannot overflow"
)]
const fn wrapping_increment(value: u8, modulus: u8) -> u8 {
    let next = value + 1;
    if next >= modulus { 0 } else { next }
}
