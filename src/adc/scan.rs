//! End-of-scan hand-off between the SAR interrupts and the main loop.

use core::sync::atomic::{AtomicBool, Ordering};

/// End-of-scan completion flags, one per SAR.
///
/// Slot `n` is set only by the interrupt handler of SAR `n` and cleared only
/// by the thread-mode loop, so a plain atomic store on each side suffices.
pub struct ScanFlags {
    done: [AtomicBool; 2],
}

impl ScanFlags {
    pub const fn new() -> Self {
        Self {
            done: [AtomicBool::new(false), AtomicBool::new(false)],
        }
    }

    /// Marks SAR `index` as finished. Called from interrupt context with
    /// the SAR's instance index, which is always 0 or 1.
    pub(crate) fn set(&self, index: usize) {
        self.done[index].store(true, Ordering::Release);
    }

    /// Whether SAR `index` has finished. False for a SAR that does not exist.
    pub fn is_set(&self, index: usize) -> bool {
        self.done.get(index).is_some_and(|f| f.load(Ordering::Acquire))
    }

    pub fn both_ready(&self) -> bool {
        self.is_set(0) && self.is_set(1)
    }

    /// Clears both flags if both are set; leaves them untouched otherwise.
    pub fn take_both(&self) -> bool {
        if !self.both_ready() {
            return false;
        }
        self.done[0].store(false, Ordering::Relaxed);
        self.done[1].store(false, Ordering::Relaxed);
        true
    }

    /// Calls `idle` until both SARs have finished, then clears the flags.
    ///
    /// On hardware `idle` is [`cpu_sleep`](crate::power::cpu_sleep): either
    /// end-of-scan interrupt wakes the core and the condition is rechecked.
    pub fn wait_both(&self, mut idle: impl FnMut()) {
        while !self.take_both() {
            idle();
        }
    }

    pub fn clear(&self) {
        self.done[0].store(false, Ordering::Relaxed);
        self.done[1].store(false, Ordering::Relaxed);
    }
}

impl Default for ScanFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Flags written by [`InterruptHandler`](super::InterruptHandler).
pub static SCAN_FLAGS: ScanFlags = ScanFlags::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_both_needs_both() {
        let flags = ScanFlags::new();
        assert!(!flags.take_both());

        flags.set(0);
        assert!(!flags.is_set(2));
        assert!(!flags.take_both());
        assert!(flags.is_set(0));

        flags.set(1);
        assert!(flags.both_ready());
        assert!(flags.take_both());
        assert!(!flags.is_set(0));
        assert!(!flags.is_set(1));
    }

    #[test]
    fn wait_both_idles_until_ready() {
        let flags = ScanFlags::new();
        let mut idles = 0;
        flags.wait_both(|| {
            idles += 1;
            // Interrupts arrive one at a time while the core sleeps.
            flags.set(idles - 1);
        });
        assert_eq!(idles, 2);
        assert!(!flags.both_ready());
    }
}
