use embassy_rp::gpio::{self, Level};

use crate::Result;
use crate::error::Error::IndexOutOfBounds;
use crate::segment::SegmentPattern;

/// Array of GPIO output pins for the LED display.
///
/// See the [`Led4`](crate::led4::Led4) documentation for the wiring.
pub struct OutputArray<'a, const N: usize>([gpio::Output<'a>; N]);

impl<'a, const N: usize> OutputArray<'a, N> {
    pub const fn new(outputs: [gpio::Output<'a>; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub(crate) fn set_level_at_index(&mut self, index: usize, level: Level) -> Result<()> {
        self.0
            .get_mut(index)
            .ok_or(IndexOutOfBounds)?
            .set_level(level);
        Ok(())
    }

    #[inline]
    pub(crate) fn set_all(&mut self, level: Level) {
        for output in &mut self.0 {
            output.set_level(level);
        }
    }
}

impl OutputArray<'_, { u8::BITS as usize }> {
    /// Drives output `i` high exactly when bit `i` of `bits` is set.
    #[expect(clippy::shadow_reuse, reason = "Shifting a copy of the pattern")]
    #[inline]
    pub(crate) fn set_from_bits(&mut self, bits: SegmentPattern) {
        let mut bits = bits;
        for output in &mut self.0 {
            let level: Level = ((bits & 1) == 1).into();
            output.set_level(level);
            bits >>= 1;
        }
    }
}
