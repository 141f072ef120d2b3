//! A two-button alarm clock on a 4-digit, 7-segment LED display.
//!
//! The clock core (timekeeping, debouncing, the mode state machine and display composition) is
//! plain `no_std` logic that builds and tests on the host. The `pico1` feature adds the RP2040
//! hardware: the multiplexing [`Led4`] driver, pin assignments and the embassy tasks that tie
//! everything together.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod debounce;
pub mod display;
mod error;
pub mod event_flag;
pub mod lines;
pub mod mode;
pub mod segment;
pub mod time;
pub mod timekeeper;

#[cfg(feature = "pico1")]
pub mod alarm_clock;
#[cfg(feature = "pico1")]
mod hardware;
#[cfg(feature = "pico1")]
pub mod led4;
#[cfg(feature = "pico1")]
mod output_array;

pub use debounce::{Button, ButtonEvents, Debouncer};
pub use error::{Error, Never, Result};
pub use event_flag::EventFlag;
pub use lines::{ButtonLines, Buzzer};
pub use mode::{Mode, ModeController};
pub use segment::{Glyph, Leds, SegmentBuffer};
pub use time::{AlarmSetting, ClockCell, HourFormat, TimeOfDay};
pub use timekeeper::{ClockShared, TickFlags, Timekeeper};

#[cfg(feature = "pico1")]
pub use alarm_clock::{AlarmClock, AlarmClockStatic};
#[cfg(feature = "pico1")]
pub use hardware::Hardware;
#[cfg(feature = "pico1")]
pub use led4::{Led4, Led4Static};
#[cfg(feature = "pico1")]
pub use output_array::OutputArray;
