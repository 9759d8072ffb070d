//! GPIO ports and the high-speed I/O matrix that selects pin functions.

use crate::regs::{Field, Reg};

super::block!(
    /// GPIO register block (all ports).
    Gpio
);

impl Gpio {
    pub fn prt(self, port: u8) -> Prt {
        Prt {
            base: self,
            offset: 0x80 * port as usize,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Prt {
    base: Gpio,
    offset: usize,
}

impl Prt {
    pub fn out(self) -> Reg {
        self.base.reg(self.offset)
    }
    pub fn out_clr(self) -> Reg {
        self.base.reg(self.offset + 0x04)
    }
    pub fn out_set(self) -> Reg {
        self.base.reg(self.offset + 0x08)
    }
    pub fn input(self) -> Reg {
        self.base.reg(self.offset + 0x10)
    }
    pub fn cfg(self) -> Reg {
        self.base.reg(self.offset + 0x44)
    }
}

/// `CFG` holds four bits per pin: drive mode plus input-buffer enable.
pub mod cfg {
    use crate::regs::Field;

    pub const fn drive_mode(pin: u8) -> Field {
        Field::new(pin * 4, 3)
    }

    pub const fn in_en(pin: u8) -> u32 {
        1 << (pin * 4 + 3)
    }
}

super::block!(
    /// HSIOM register block (all ports).
    Hsiom
);

impl Hsiom {
    /// `PORT_SEL0` for pins 0..=3, `PORT_SEL1` for pins 4..=7.
    pub fn port_sel(self, port: u8, pin: u8) -> Reg {
        let sel = if pin < 4 { 0x0 } else { 0x4 };
        self.reg(0x10 * port as usize + sel)
    }
}

/// Function-select field for `pin` inside its `PORT_SEL` register.
pub const fn hsiom_field(pin: u8) -> Field {
    Field::new((pin % 4) * 8, 5)
}

pub mod vals {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(u8)]
    pub enum DriveMode {
        /// High impedance, digital input buffer off.
        Analog = 0,
        PullUp = 2,
        PullDown = 3,
        Strong = 6,
    }

    /// HSIOM: plain GPIO.
    pub const HSIOM_GPIO: u32 = 0;
    /// HSIOM: SCB UART on the active-mode alternate function 6.
    pub const HSIOM_ACT_6: u32 = 18;
}
