//! A two-button alarm clock on a 4-digit 7-segment display.
//!
//! Runs on a Raspberry Pi Pico RP2040. See `alarm_clock::AlarmClock` for the task layout and
//! `alarm_clock::mode` for the button state machine.
#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "Single-threaded")]

use alarm_clock::{AlarmClock, AlarmClockStatic, Hardware, Never, Result};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use panic_probe as _;

#[embassy_executor::main]
pub async fn main(spawner: Spawner) -> ! {
    // If it returns, something went wrong.
    let Err(err) = inner_main(spawner).await;
    panic!("{err}");
}

#[expect(clippy::items_after_statements, reason = "Keeps related code together")]
async fn inner_main(spawner: Spawner) -> Result<Never> {
    info!("Starting alarm clock");
    let hardware = Hardware::default();

    static ALARM_CLOCK_STATIC: AlarmClockStatic = AlarmClock::new_static();
    let alarm_clock = AlarmClock::new(&ALARM_CLOCK_STATIC, hardware, spawner)?;
    alarm_clock.run().await
}
