//! Peripheral interconnect: clock dividers and trigger groups.

use crate::regs::Reg;

super::block!(
    /// PERI register block.
    Peri
);

impl Peri {
    pub fn div_cmd(self) -> Reg {
        self.reg(0x400)
    }
    pub fn div_8_ctl(self, n: usize) -> Reg {
        self.reg(0x800 + 4 * n)
    }
    pub fn div_16_ctl(self, n: usize) -> Reg {
        self.reg(0x900 + 4 * n)
    }
    pub fn div_16_5_ctl(self, n: usize) -> Reg {
        self.reg(0xA00 + 4 * n)
    }
    pub fn div_24_5_ctl(self, n: usize) -> Reg {
        self.reg(0xB00 + 4 * n)
    }
    pub fn clock_ctl(self, n: usize) -> Reg {
        self.reg(0xC00 + 4 * n)
    }
    pub fn tr_out_ctl(self, group: usize, n: usize) -> Reg {
        self.reg(0x8000 + 0x200 * group + 4 * n)
    }
}

pub mod div_cmd {
    use crate::regs::Field;

    pub const DIV_SEL: Field = Field::new(0, 8);
    pub const TYPE_SEL: Field = Field::new(8, 2);
    /// Phase-align reference; 0xFF / 3 selects "no alignment".
    pub const PA_DIV_SEL: Field = Field::new(16, 8);
    pub const PA_TYPE_SEL: Field = Field::new(24, 2);
    pub const DISABLE: u32 = 1 << 30;
    pub const ENABLE: u32 = 1 << 31;
}

pub mod clock_ctl {
    use crate::regs::Field;

    pub const DIV_SEL: Field = Field::new(0, 8);
    pub const TYPE_SEL: Field = Field::new(8, 2);
}

/// Layout shared by the integer and fractional divider control registers.
pub mod div_ctl {
    use crate::regs::Field;

    pub const EN: u32 = 1 << 0;
    pub const FRAC5_DIV: Field = Field::new(3, 5);
    pub const INT8_DIV: Field = Field::new(8, 8);
    pub const INT16_DIV: Field = Field::new(8, 16);
}

pub mod tr_out_ctl {
    use crate::regs::Field;

    pub const TR_SEL: Field = Field::new(0, 8);
    pub const TR_INV: u32 = 1 << 8;
    pub const TR_EDGE: u32 = 1 << 9;
}

/// Peripheral clock destinations (`PCLK_*`).
pub mod pclk {
    pub const SCB2_CLOCK: usize = 2;
    pub const TCPWM0_CLOCKS0: usize = 14;
    pub const PASS_CLOCK_SAR: usize = 34;
}

/// Trigger-multiplexer group and line numbers used by this firmware.
pub mod trig {
    /// Group routing TCPWM outputs to the PASS.
    pub const GROUP_PASS: usize = 13;
    /// `TCPWM0` counter 0 overflow, as an input of `GROUP_PASS`.
    pub const IN_TCPWM0_OVERFLOW0: u32 = 1;
    /// PASS SAR simultaneous trigger input, as an output of `GROUP_PASS`.
    pub const OUT_PASS_SAR_IN0: usize = 0;
}
