//! CPU power states.

/// Sleep until an interrupt is pending (wait-for-interrupt). SLEEPDEEP is
/// cleared first so the core only enters CPU sleep and peripherals keep
/// running.
#[inline]
pub fn cpu_sleep() {
    #[cfg(cortex_m)]
    {
        let mut scb = unsafe { cortex_m::Peripherals::steal() }.SCB;
        scb.clear_sleepdeep();
        cortex_m::asm::wfi();
    }
    #[cfg(not(cortex_m))]
    core::hint::spin_loop();
}
