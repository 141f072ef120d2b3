//! Segment patterns for a 4-digit 7-segment display.
//!
//! Bit 0 is segment A, bit 6 is segment G, bit 7 is the decimal point. The clock wires the
//! decimal point of the second digit as the colon.

use core::num::NonZeroU8;
use core::ops::Index;

use crate::constants::CELL_COUNT;

/// Lit segments of one digit.
pub type SegmentPattern = u8;

// ============================================================================
// LED Constants
// ============================================================================

/// Constants for 7-segment LED displays.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Array representing the segments for digits 0-9 on a 7-segment display.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// Representation of a blank space on a 7-segment display.
    pub const SPACE: u8 = 0b_0000_0000;

    pub const LETTER_A: u8 =
        Self::SEG_A | Self::SEG_B | Self::SEG_C | Self::SEG_E | Self::SEG_F | Self::SEG_G;
    pub const LETTER_L: u8 = Self::SEG_D | Self::SEG_E | Self::SEG_F;
    pub const LETTER_H: u8 = Self::SEG_C | Self::SEG_E | Self::SEG_F | Self::SEG_G;
    pub const LETTER_Y: u8 = Self::SEG_B | Self::SEG_C | Self::SEG_D | Self::SEG_F | Self::SEG_G;
    pub const LETTER_N: u8 = Self::SEG_C | Self::SEG_E | Self::SEG_G;
}

/// Something one digit can show.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Glyph {
    /// 0–9; anything larger renders blank.
    Digit(u8),
    #[default]
    Blank,
    /// Upper-case `A`.
    A,
    /// Upper-case `L`.
    L,
    /// Lower-case `h`.
    H,
    /// Lower-case `y`.
    Y,
    /// Lower-case `n`.
    N,
}

impl Glyph {
    /// The segment pattern for this glyph.
    #[must_use]
    pub const fn encode(self) -> SegmentPattern {
        match self {
            Self::Digit(digit) if digit < 10 => Leds::DIGITS[digit as usize],
            Self::Digit(_) | Self::Blank => Leds::SPACE,
            Self::A => Leds::LETTER_A,
            Self::L => Leds::LETTER_L,
            Self::H => Leds::LETTER_H,
            Self::Y => Leds::LETTER_Y,
            Self::N => Leds::LETTER_N,
        }
    }

    /// Tens and ones of a two-digit value (values above 99 keep only the last two digits).
    #[must_use]
    #[expect(
        clippy::integer_division_remainder_used,
        reason = "Splitting a value into decimal digits"
    )]
    pub const fn pair(value: u8) -> [Self; 2] {
        [Self::Digit((value / 10) % 10), Self::Digit(value % 10)]
    }
}

// ============================================================================
// SegmentBuffer
// ============================================================================

/// Index of the digit whose decimal point is the colon.
pub const COLON_CELL: usize = 1;

/// Segment patterns for all four digits, left to right.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentBuffer([SegmentPattern; CELL_COUNT]);

impl SegmentBuffer {
    #[must_use]
    pub const fn new(bits: [SegmentPattern; CELL_COUNT]) -> Self {
        Self(bits)
    }

    /// All digits dark.
    #[must_use]
    pub const fn blank() -> Self {
        Self([Leds::SPACE; CELL_COUNT])
    }

    #[must_use]
    pub const fn from_glyphs(glyphs: [Glyph; CELL_COUNT]) -> Self {
        let [first, second, third, fourth] = glyphs;
        Self([first.encode(), second.encode(), third.encode(), fourth.encode()])
    }

    /// Builds `left` in the first two digits and `right` in the last two.
    #[must_use]
    pub const fn from_pairs(left: [Glyph; 2], right: [Glyph; 2]) -> Self {
        Self::from_glyphs([left[0], left[1], right[0], right[1]])
    }

    /// Lights the colon.
    #[must_use]
    pub const fn with_colon(mut self, colon: bool) -> Self {
        if colon {
            self.0[COLON_CELL] |= Leds::DECIMAL;
        }
        self
    }

    #[must_use]
    pub const fn colon(&self) -> bool {
        self.0[COLON_CELL] & Leds::DECIMAL != 0
    }

    #[must_use]
    pub const fn bits(&self) -> [SegmentPattern; CELL_COUNT] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &SegmentPattern> {
        self.0.iter()
    }

    /// One multiplex slot per digit, left to right. Dark digits keep their slot (`None`) so every
    /// lit digit gets the same share of the scan however many others are blank.
    pub fn scan_slots(self) -> impl Iterator<Item = (usize, Option<NonZeroU8>)> {
        self.0.into_iter().map(NonZeroU8::new).enumerate()
    }
}

impl Index<usize> for SegmentBuffer {
    type Output = SegmentPattern;

    #[expect(clippy::indexing_slicing, reason = "Caller's responsibility")]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for SegmentBuffer {
    type Item = SegmentPattern;
    type IntoIter = core::array::IntoIter<SegmentPattern, CELL_COUNT>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SegmentBuffer {
    type Item = &'a SegmentPattern;
    type IntoIter = core::slice::Iter<'a, SegmentPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
