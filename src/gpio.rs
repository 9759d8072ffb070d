//! Pin configuration: drive mode and HSIOM function select.
//!
//! Only the pins this board uses are exposed as peripherals. A pin is handed
//! to the driver that owns it (UART, SAR, CTB), which puts it in the right
//! mode during construction.

#![macro_use]

use crate::pac::gpio::vals::{DriveMode, HSIOM_GPIO};
use crate::pac::gpio::{cfg, hsiom_field, Gpio, Hsiom};
use crate::pac::{GPIO, HSIOM};
use crate::{peripherals, Peripheral};

pub(crate) trait SealedPin {
    fn port(&self) -> u8;
    fn pin(&self) -> u8;

    /// High impedance, digital input off, connected to nothing but the
    /// analog routing.
    fn set_as_analog(&self) {
        configure(GPIO, HSIOM, self.port(), self.pin(), HSIOM_GPIO, DriveMode::Analog, false);
    }

    fn set_as_af(&self, hsiom: u32, mode: DriveMode, input: bool) {
        configure(GPIO, HSIOM, self.port(), self.pin(), hsiom, mode, input);
    }
}

/// GPIO pin.
#[allow(private_bounds)]
pub trait Pin: Peripheral<P = Self> + SealedPin + Sized + 'static {}

pub(crate) fn configure(
    gpio: Gpio,
    hsiom: Hsiom,
    port: u8,
    pin: u8,
    sel: u32,
    mode: DriveMode,
    input: bool,
) {
    critical_section::with(|_| {
        let prt = gpio.prt(port);
        prt.cfg().modify(|v| {
            let v = cfg::drive_mode(pin).set(v, mode as u32);
            if input {
                v | cfg::in_en(pin)
            } else {
                v & !cfg::in_en(pin)
            }
        });
        hsiom.port_sel(port, pin).write_field(hsiom_field(pin), sel);
    });
}

macro_rules! impl_pin {
    ($name:ident, $port:expr, $pin:expr) => {
        impl SealedPin for peripherals::$name {
            #[inline]
            fn port(&self) -> u8 {
                $port
            }
            #[inline]
            fn pin(&self) -> u8 {
                $pin
            }
        }

        impl Pin for peripherals::$name {}
    };
}

impl_pin!(P3_0, 3, 0);
impl_pin!(P3_1, 3, 1);
impl_pin!(P9_2, 9, 2);
impl_pin!(P10_0, 10, 0);
impl_pin!(P10_2, 10, 2);

/// Declares a pin-role trait for an instance, e.g. `TxPin<SCB2>`.
macro_rules! pin_trait {
    ($signal:ident, $instance:path) => {
        #[doc = concat!(stringify!($signal), " pin trait")]
        pub trait $signal<T: $instance>: crate::gpio::Pin {
            #[doc = concat!("Get the HSIOM function number needed to use this pin as ", stringify!($signal))]
            fn hsiom(&self) -> u32;
        }
    };
}

macro_rules! pin_trait_impl {
    (crate::$mod:ident::$trait:ident, $instance:ident, $pin:ident, $hsiom:expr) => {
        impl crate::$mod::$trait<crate::peripherals::$instance> for crate::peripherals::$pin {
            fn hsiom(&self) -> u32 {
                $hsiom
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn analog_and_uart_pin_modes() {
        let mut gpio_mem = FakeBlock::new(0x800);
        let mut hsiom_mem = FakeBlock::new(0x100);
        let gpio = unsafe { Gpio::from_ptr(gpio_mem.ptr()) };
        let hsiom = unsafe { Hsiom::from_ptr(hsiom_mem.ptr()) };

        // P3.1 as UART TX, P3.0 as RX.
        configure(gpio, hsiom, 3, 1, 18, DriveMode::Strong, false);
        configure(gpio, hsiom, 3, 0, 18, DriveMode::Analog, true);
        assert_eq!(gpio_mem.word(3 * 0x80 + 0x44), (6 << 4) | (1 << 3));
        assert_eq!(hsiom_mem.word(3 * 0x10), 18 | (18 << 8));

        // P9.2 pre-set as a strong output, then switched to analog.
        gpio_mem.set_word(9 * 0x80 + 0x44, (6 | 8) << 8);
        hsiom_mem.set_word(9 * 0x10, 18 << 16);
        configure(gpio, hsiom, 9, 2, HSIOM_GPIO, DriveMode::Analog, false);
        assert_eq!(gpio_mem.word(9 * 0x80 + 0x44), 0);
        assert_eq!(hsiom_mem.word(9 * 0x10), 0);
    }
}
