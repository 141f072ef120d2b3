//! The firmware's two clock tasks: the 50 ms tick and the main loop.
//!
//! See [`AlarmClock`] for how they are wired together.

use embassy_executor::Spawner;
use embassy_rp::gpio;
use embassy_time::Ticker;

#[cfg(feature = "defmt")]
use defmt::info;

use crate::config::{BUZZER_ACTIVE_LOW, START_ALARM, START_HOUR_FORMAT, START_TIME};
use crate::constants::{MAIN_LOOP_PERIOD, TICK_PERIOD};
use crate::hardware::Hardware;
use crate::led4::{Led4, Led4Static};
use crate::lines::{ButtonLines, Buzzer};
use crate::mode::ModeController;
use crate::segment::SegmentBuffer;
use crate::timekeeper::{ClockShared, Timekeeper};
use crate::{Never, Result};

/// Static resources for the [`AlarmClock`].
pub struct AlarmClockStatic {
    shared: ClockShared,
    led4: Led4Static,
}

impl AlarmClockStatic {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shared: ClockShared::new(START_TIME),
            led4: Led4::new_static(),
        }
    }
}

impl Default for AlarmClockStatic {
    fn default() -> Self {
        Self::new()
    }
}

/// The alarm clock: owns the mode controller, the display and the buzzer.
///
/// [`AlarmClock::new`] spawns the tick task (timekeeping and button sampling) and the display
/// task. [`AlarmClock::run`] is the main loop and never returns unless a pin fails.
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use alarm_clock::{AlarmClock, AlarmClockStatic, Hardware, Never, Result};
/// # use embassy_executor::Spawner;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// async fn example(spawner: Spawner) -> Result<Never> {
///     static ALARM_CLOCK_STATIC: AlarmClockStatic = AlarmClock::new_static();
///     let alarm_clock = AlarmClock::new(&ALARM_CLOCK_STATIC, Hardware::default(), spawner)?;
///     alarm_clock.run().await
/// }
/// ```
pub struct AlarmClock<'a> {
    shared: &'a ClockShared,
    controller: ModeController,
    display: Led4<'a>,
    buzzer: Buzzer<gpio::Output<'a>>,
}

impl AlarmClock<'_> {
    /// Creates static resources for the clock.
    #[must_use]
    pub const fn new_static() -> AlarmClockStatic {
        AlarmClockStatic::new()
    }

    /// Takes the hardware and spawns the tick and display tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if a task cannot be spawned or the buzzer cannot be silenced.
    pub fn new(
        alarm_clock_static: &'static AlarmClockStatic,
        hardware: Hardware,
        spawner: Spawner,
    ) -> Result<AlarmClock<'static>> {
        let Hardware {
            cells,
            segments,
            b1,
            b2,
            buzzer,
        } = hardware;

        let display = Led4::new(&alarm_clock_static.led4, cells, segments, spawner)?;
        let buzzer = Buzzer::new(buzzer, BUZZER_ACTIVE_LOW)?;
        let token = tick_loop(&alarm_clock_static.shared, b1, b2)?;
        spawner.spawn(token);

        #[cfg(feature = "defmt")]
        info!(
            "Alarm clock starting at {:?}, alarm {:?}",
            START_TIME, START_ALARM
        );

        Ok(AlarmClock {
            shared: &alarm_clock_static.shared,
            controller: ModeController::new(START_ALARM, START_HOUR_FORMAT),
            display,
            buzzer,
        })
    }

    /// The main loop: step the mode controller, drive the buzzer, render.
    ///
    /// # Errors
    ///
    /// Returns an error only if the buzzer pin cannot be driven.
    pub async fn run(mut self) -> Result<Never> {
        let mut ticker = Ticker::every(MAIN_LOOP_PERIOD);
        let mut shown: Option<SegmentBuffer> = None;
        loop {
            self.controller.step(self.shared);
            self.buzzer.set(self.controller.buzzer())?;

            let buffer = self.controller.render(self.shared);
            if shown != Some(buffer) {
                self.display.write_segments(buffer);
                shown = Some(buffer);
            }
            ticker.next().await;
        }
    }
}

#[embassy_executor::task]
async fn tick_loop(
    shared: &'static ClockShared,
    b1: gpio::Input<'static>,
    b2: gpio::Input<'static>,
) -> ! {
    let Err(err) = inner_tick_loop(shared, b1, b2).await;
    panic!("{err}");
}

async fn inner_tick_loop(
    shared: &'static ClockShared,
    mut b1: gpio::Input<'static>,
    mut b2: gpio::Input<'static>,
) -> Result<Never> {
    let mut timekeeper = Timekeeper::new(shared);
    // `Ticker` schedules against absolute deadlines, so a late wake-up never drops a tick.
    let mut ticker = Ticker::every(TICK_PERIOD);
    loop {
        ticker.next().await;
        let lines = ButtonLines::read(&mut b1, &mut b2)?;
        timekeeper.tick(lines);
    }
}
