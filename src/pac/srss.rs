//! System resources: clock paths and root clocks.

use crate::regs::Reg;

super::block!(
    /// SRSS register block.
    Srss
);

impl Srss {
    pub fn clk_path_select(self, n: usize) -> Reg {
        self.reg(0x1200 + 4 * n)
    }
    pub fn clk_root_select(self, n: usize) -> Reg {
        self.reg(0x1240 + 4 * n)
    }
}

pub mod clk_path_select {
    use crate::regs::Field;

    pub const PATH_MUX: Field = Field::new(0, 3);

    pub const PATH_MUX_IMO: u32 = 0;
}

pub mod clk_root_select {
    use crate::regs::Field;

    pub const ROOT_MUX: Field = Field::new(0, 4);
    /// Divide by 2^ROOT_DIV.
    pub const ROOT_DIV: Field = Field::new(4, 2);
    pub const ENABLE: u32 = 1 << 31;
}

/// Internal main oscillator.
pub const IMO_HZ: u32 = 8_000_000;
