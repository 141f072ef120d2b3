//! One-shot event cells shared between the tick handler and the main loop.

use portable_atomic::{AtomicBool, Ordering};

/// A boolean that the producer sets once per occurrence and the consumer clears.
///
/// Each flag is its own atomic cell, so a set and a clear can never tear. `take` is a single
/// read-modify-write; on ARMv6-M `portable-atomic` backs it with a critical section.
#[derive(Debug, Default)]
pub struct EventFlag(AtomicBool);

impl EventFlag {
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    #[inline]
    pub fn set(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clears the flag, returning whether it was set.
    #[inline]
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}
