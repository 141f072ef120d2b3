//! Logical view of the physical lines: two active-low buttons in, one buzzer out.

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::{Error, Result};

/// One sample of both button lines, `true` meaning pressed.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonLines {
    pub b1: bool,
    pub b2: bool,
}

impl ButtonLines {
    pub const RELEASED: Self = Self { b1: false, b2: false };

    /// Samples both buttons. The lines are pulled up, so a pressed button reads low.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotReadInput`] if either pin cannot be read.
    pub fn read<P1: InputPin, P2: InputPin>(b1: &mut P1, b2: &mut P2) -> Result<Self> {
        Ok(Self {
            b1: b1.is_low().map_err(|_| Error::CannotReadInput)?,
            b2: b2.is_low().map_err(|_| Error::CannotReadInput)?,
        })
    }
}

/// Whether the buzzer line sits high for the given state and polarity.
#[must_use]
pub const fn buzzer_line_high(on: bool, active_low: bool) -> bool {
    on != active_low
}

/// Drives the buzzer line with a fixed polarity.
pub struct Buzzer<P> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P> Buzzer<P>
where
    P: OutputPin,
    Error: From<P::Error>,
{
    /// Takes the pin and silences it.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be driven.
    pub fn new(pin: P, active_low: bool) -> Result<Self> {
        let mut buzzer = Self {
            pin,
            active_low,
            on: true,
        };
        buzzer.set(false)?;
        Ok(buzzer)
    }

    /// Turns the buzzer on or off; writes the pin only on change.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be driven.
    pub fn set(&mut self, on: bool) -> Result<()> {
        if on != self.on {
            self.pin
                .set_state(PinState::from(buzzer_line_high(on, self.active_low)))?;
            self.on = on;
        }
        Ok(())
    }

    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }
}
