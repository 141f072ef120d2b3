//! Timing and layout constants shared by the clock core and the firmware.

use embassy_time::Duration;

/// Period of the timekeeping tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Ticks in one second at [`TICK_PERIOD`].
pub const TICKS_PER_SECOND: u8 = 20;

/// Seconds countdown value at which the colon goes dark.
pub const COLON_OFF_TICKS: u8 = TICKS_PER_SECOND / 2;

/// Ticks between inversions of the edit-mode blink flag.
pub const BLINK_TICKS: u8 = 5;

/// Ticks between auto-repeat increments while a button is held long.
pub const REPEAT_TICKS: u8 = 4;

/// Consecutive active samples before a press is accepted.
pub const PRESS_THRESHOLD: u8 = 2;

/// Consecutive active samples before a press counts as long (2 s).
pub const LONG_THRESHOLD: u8 = 40;

/// The number of cells (digits) in the display.
pub const CELL_COUNT: usize = 4;

/// The number of segments per digit in the display, decimal point included.
pub const SEGMENT_COUNT: usize = 8;

/// How long each digit stays enabled during the multiplex scan.
pub const MULTIPLEX_SLEEP: Duration = Duration::from_millis(3);

/// Pacing of the main loop (mode controller, composer, render).
pub const MAIN_LOOP_PERIOD: Duration = Duration::from_millis(5);

pub const SECONDS_PER_MINUTE: u8 = 60;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const HOURS_PER_DAY: u8 = 24;
