#![cfg_attr(not(test), no_std)]
#![doc = "PSoC 6 (CY8C62x4) HAL subset and application logic for simultaneous SAR sampling."]

// This must go FIRST so that all the other modules see its macros.
mod fmt;

pub mod pac;
pub mod regs;
pub mod time;

pub mod clock;
pub mod gpio;
pub mod delay;
pub mod power;
pub mod trigger;

pub mod aref;
pub mod adc;
pub mod ctdac;
pub mod ctb;
pub mod tcpwm;
pub mod uart;

pub mod multiplier;
pub mod console;
pub mod app;

pub use embassy_hal_internal::{into_ref, Peripheral, PeripheralRef};

embassy_hal_internal::interrupt_mod!(SCB_2, TCPWM0_CNT0, PASS_CTB_CTDAC, PASS_SAR0, PASS_SAR1);

embassy_hal_internal::peripherals! {
    SAR0,
    SAR1,
    CTDAC0,
    CTBM0,
    TCPWM0_CNT0,
    SCB2,
    P3_0,
    P3_1,
    P9_2,
    P10_0,
    P10_2,
}

/// Global configuration.
#[non_exhaustive]
#[derive(Clone, Copy)]
pub struct Config {
    /// Clock tree config.
    pub clock: clock::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: Default::default(),
        }
    }
}

/// Brings up the clocks and returns the peripheral singletons that can be
/// used for creating drivers.
///
/// This should only be called once at startup, otherwise it panics.
pub fn init(config: Config) -> Peripherals {
    critical_section::with(|cs| {
        let p = Peripherals::take_with_cs(cs);
        unsafe {
            clock::init(config.clock);
        }
        p
    })
}

// developer note: this macro can't be in `embassy-hal-internal` due to the use of `$crate`.
#[macro_export]
macro_rules! bind_interrupts {
    ($vis:vis struct $name:ident {
        $(
            $(#[cfg($cond_irq:meta)])?
            $irq:ident => $(
                $(#[cfg($cond_handler:meta)])?
                $handler:ty
            ),*;
        )*
    }) => {
        #[derive(Copy, Clone)]
        $vis struct $name;

        $(
            #[allow(non_snake_case)]
            #[no_mangle]
            $(#[cfg($cond_irq)])?
            unsafe extern "C" fn $irq() {
                $(
                    $(#[cfg($cond_handler)])?
                    <$handler as $crate::interrupt::typelevel::Handler<$crate::interrupt::typelevel::$irq>>::on_interrupt();
                )*
            }

            $(
                $(#[cfg($cond_handler)])?
                unsafe impl $crate::interrupt::typelevel::Binding<$crate::interrupt::typelevel::$irq, $handler> for $name {}
            )*
        )*
    };
}
