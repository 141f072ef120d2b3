use embassy_rp::gpio::{self, Level};

use crate::config::BUZZER_ACTIVE_LOW;
use crate::constants::{CELL_COUNT, SEGMENT_COUNT};
use crate::lines::buzzer_line_high;
use crate::output_array::OutputArray;

/// Pin assignments for the Pico alarm clock.
///
/// | Pins      | Use                                              |
/// |-----------|--------------------------------------------------|
/// | GP1–GP4   | digit cells, left to right, active-low            |
/// | GP5–GP12  | segments A–G then the decimal point, active-high |
/// | GP13      | B1, to ground, internal pull-up                  |
/// | GP14      | B2, to ground, internal pull-up                  |
/// | GP15      | buzzer                                           |
pub struct Hardware {
    pub cells: OutputArray<'static, CELL_COUNT>,
    pub segments: OutputArray<'static, SEGMENT_COUNT>,
    pub b1: gpio::Input<'static>,
    pub b2: gpio::Input<'static>,
    pub buzzer: gpio::Output<'static>,
}

impl Default for Hardware {
    fn default() -> Self {
        let peripherals: embassy_rp::Peripherals =
            embassy_rp::init(embassy_rp::config::Config::default());

        let cells = OutputArray::new([
            gpio::Output::new(peripherals.PIN_1, Level::High),
            gpio::Output::new(peripherals.PIN_2, Level::High),
            gpio::Output::new(peripherals.PIN_3, Level::High),
            gpio::Output::new(peripherals.PIN_4, Level::High),
        ]);

        let segments = OutputArray::new([
            gpio::Output::new(peripherals.PIN_5, Level::Low),
            gpio::Output::new(peripherals.PIN_6, Level::Low),
            gpio::Output::new(peripherals.PIN_7, Level::Low),
            gpio::Output::new(peripherals.PIN_8, Level::Low),
            gpio::Output::new(peripherals.PIN_9, Level::Low),
            gpio::Output::new(peripherals.PIN_10, Level::Low),
            gpio::Output::new(peripherals.PIN_11, Level::Low),
            gpio::Output::new(peripherals.PIN_12, Level::Low),
        ]);

        let b1 = gpio::Input::new(peripherals.PIN_13, gpio::Pull::Up);
        let b2 = gpio::Input::new(peripherals.PIN_14, gpio::Pull::Up);

        // Start silent, whichever polarity the buzzer has.
        let buzzer = gpio::Output::new(
            peripherals.PIN_15,
            Level::from(buzzer_line_high(false, BUZZER_ACTIVE_LOW)),
        );

        Self {
            cells,
            segments,
            b1,
            b2,
            buzzer,
        }
    }
}
