//! Power-on settings, fixed at build time.
//!
//! `build.rs` validates `ALARM_CLOCK_*` variables (from the environment or a `.env` file) and
//! re-exports them as plain decimal numbers, which are parsed here at compile time.

use crate::time::{AlarmSetting, HourFormat, TimeOfDay};

/// Time shown at power-on (the clock has no battery-backed state).
pub const START_TIME: TimeOfDay = TimeOfDay::new(
    parse_u8(env!("ALARM_CLOCK_START_HOUR")),
    parse_u8(env!("ALARM_CLOCK_START_MINUTE")),
    parse_u8(env!("ALARM_CLOCK_START_SECOND")),
);

/// Alarm at power-on.
pub const START_ALARM: AlarmSetting = AlarmSetting::new(
    parse_u8(env!("ALARM_CLOCK_ALARM_HOUR")),
    parse_u8(env!("ALARM_CLOCK_ALARM_MINUTE")),
    parse_u8(env!("ALARM_CLOCK_ALARM_ENABLED")) != 0,
);

/// Hour format at power-on.
pub const START_HOUR_FORMAT: HourFormat = if parse_u8(env!("ALARM_CLOCK_TWELVE_HOUR")) == 0 {
    HourFormat::TwentyFour
} else {
    HourFormat::Twelve
};

/// Whether the buzzer sounds when its line is driven low.
pub const BUZZER_ACTIVE_LOW: bool = parse_u8(env!("ALARM_CLOCK_BUZZER_ACTIVE_LOW")) != 0;

/// Parse a decimal `u8` at compile time. Panics (a build error in `const` context) on bad input.
#[must_use]
pub const fn parse_u8(text: &str) -> u8 {
    match u8::from_str_radix(text, 10) {
        Ok(value) => value,
        Err(_) => panic!("not a decimal u8"),
    }
}
