//! A device abstraction for a multiplexed 4-digit, 7-segment LED display.
//!
//! See [`Led4`] for the main device abstraction.

use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_rp::gpio::Level;
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, signal::Signal};
use embassy_time::Timer;

#[cfg(feature = "display-trace")]
use defmt::info;

use crate::constants::{CELL_COUNT, MULTIPLEX_SLEEP, SEGMENT_COUNT};
use crate::output_array::OutputArray;
use crate::segment::SegmentBuffer;
use crate::{Never, Result};

/// Static for the [`Led4`] device.
pub struct Led4Static(Signal<CriticalSectionRawMutex, SegmentBuffer>);

impl Led4Static {
    #[must_use]
    pub const fn new() -> Self {
        Self(Signal::new())
    }

    fn signal(&self, buffer: SegmentBuffer) {
        self.0.signal(buffer);
    }

    async fn wait(&self) -> SegmentBuffer {
        self.0.wait().await
    }
}

impl Default for Led4Static {
    fn default() -> Self {
        Self::new()
    }
}

/// A device abstraction for a multiplexed 4-digit, 7-segment LED display.
///
/// # Hardware Requirements
///
/// Common-cathode wiring:
/// - Cell pins select the active digit (LOW = on, HIGH = off)
/// - Segment pins light segments (HIGH = on), bit 0 = A through bit 6 = G, bit 7 = decimal point
///
/// A background task scans the digits one at a time, [`MULTIPLEX_SLEEP`] each, blank digits
/// included. Every digit is switched off before the segment lines change, so at most one digit is
/// ever enabled.
///
/// # Example
///
/// ```no_run
/// #![no_std]
/// #![no_main]
///
/// use alarm_clock::{Error, Hardware, Led4, Led4Static, SegmentBuffer};
/// # use embassy_executor::Spawner;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_: &PanicInfo) -> ! { loop {} }
///
/// async fn example(spawner: Spawner) -> Result<(), Error> {
///     let hardware = Hardware::default();
///     static LED4_STATIC: Led4Static = Led4::new_static();
///     let display = Led4::new(&LED4_STATIC, hardware.cells, hardware.segments, spawner)?;
///
///     // "12:34"
///     display.write_segments(SegmentBuffer::new([0x06, 0xDB, 0x4F, 0x66]));
///     Ok(())
/// }
/// ```
pub struct Led4<'a>(&'a Led4Static);

impl Led4<'_> {
    /// Creates static channel resources for the display.
    #[must_use]
    pub const fn new_static() -> Led4Static {
        Led4Static::new()
    }

    /// Creates the display device and spawns its background task.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be spawned.
    #[must_use = "Must be used to manage the spawned task"]
    pub fn new(
        led4_static: &'static Led4Static,
        cell_pins: OutputArray<'static, CELL_COUNT>,
        segment_pins: OutputArray<'static, SEGMENT_COUNT>,
        spawner: Spawner,
    ) -> Result<Self> {
        let token = device_loop(cell_pins, segment_pins, led4_static)?;
        spawner.spawn(token);
        Ok(Self(led4_static))
    }

    /// Replaces what the display shows. The driver picks it up at the next slot boundary or
    /// sooner.
    pub fn write_segments(&self, buffer: SegmentBuffer) {
        #[cfg(feature = "display-trace")]
        info!("write_segments: {:?}", buffer);
        self.0.signal(buffer);
    }
}

#[embassy_executor::task]
async fn device_loop(
    cell_pins: OutputArray<'static, CELL_COUNT>,
    segment_pins: OutputArray<'static, SEGMENT_COUNT>,
    led4_static: &'static Led4Static,
) -> ! {
    let Err(err) = inner_device_loop(cell_pins, segment_pins, led4_static).await;
    panic!("{err}");
}

async fn inner_device_loop(
    mut cell_pins: OutputArray<'static, CELL_COUNT>,
    mut segment_pins: OutputArray<'static, SEGMENT_COUNT>,
    led4_static: &'static Led4Static,
) -> Result<Never> {
    cell_pins.set_all(Level::High);
    let mut buffer = led4_static.wait().await;
    'outer: loop {
        #[cfg(feature = "display-trace")]
        info!("buffer: {:?}", buffer);

        if buffer == SegmentBuffer::blank() {
            buffer = led4_static.wait().await;
            continue;
        }

        loop {
            for (index, bits) in buffer.scan_slots() {
                // A dark digit still takes its slot, with every cell off, so the lit digits keep
                // a steady quarter of the scan.
                if let Some(bits) = bits {
                    segment_pins.set_from_bits(bits.get());
                    cell_pins.set_level_at_index(index, Level::Low)?;
                }
                let timeout_or_signal =
                    select(Timer::after(MULTIPLEX_SLEEP), led4_static.wait()).await;
                if bits.is_some() {
                    cell_pins.set_level_at_index(index, Level::High)?;
                }
                if let Either::Second(notification) = timeout_or_signal {
                    buffer = notification;
                    continue 'outer;
                }
            }
        }
    }
}
