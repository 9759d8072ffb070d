//! Busy-wait delays derived from the CPU clock.

use embedded_hal_1::delay::DelayNs;

use crate::time::Hertz;

/// Cycle-counting delay. Accuracy is bounded by `cortex_m::asm::delay`,
/// which may run long but never short.
#[derive(Clone, Copy, Debug)]
pub struct Delay {
    cpu: Hertz,
}

impl Delay {
    /// Delay running off the frozen CPU clock.
    ///
    /// Must be called after [`init`](crate::init).
    pub fn new() -> Self {
        Self::with_clock(unsafe { crate::clock::get_freqs() }.cpu)
    }

    pub const fn with_clock(cpu: Hertz) -> Self {
        Self { cpu }
    }

    /// CPU cycles covering `ns` nanoseconds, rounded up.
    pub fn cycles_for_ns(&self, ns: u32) -> u32 {
        let cycles = (self.cpu.0 as u64 * ns as u64).div_ceil(1_000_000_000);
        cycles.min(u32::MAX as u64) as u32
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        cortex_m::asm::delay(self.cycles_for_ns(ns));
    }
}

/// Performs a busy-wait delay for a specified number of microseconds.
pub(crate) fn blocking_delay_us(us: u32) {
    Delay::new().delay_us(us);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_round_up() {
        let d = Delay::with_clock(Hertz::mhz(8));
        assert_eq!(d.cycles_for_ns(1_000), 8);
        assert_eq!(d.cycles_for_ns(1), 1);
        assert_eq!(d.cycles_for_ns(0), 0);
        assert_eq!(d.cycles_for_ns(u32::MAX), 34_360);
    }
}
