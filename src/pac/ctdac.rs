//! Continuous-time DAC.

use crate::regs::Reg;

super::block!(
    /// CTDAC register block.
    Ctdac
);

impl Ctdac {
    pub fn ctdac_ctrl(self) -> Reg {
        self.reg(0x000)
    }
    pub fn intr(self) -> Reg {
        self.reg(0x020)
    }
    pub fn intr_mask(self) -> Reg {
        self.reg(0x028)
    }
    pub fn ctdac_sw(self) -> Reg {
        self.reg(0x0B0)
    }
    pub fn ctdac_sw_clear(self) -> Reg {
        self.reg(0x0B4)
    }
    pub fn ctdac_val(self) -> Reg {
        self.reg(0x100)
    }
    pub fn ctdac_val_nxt(self) -> Reg {
        self.reg(0x104)
    }
}

pub mod ctdac_ctrl {
    use crate::regs::Field;

    pub const DEGLITCH_CNT: Field = Field::new(0, 6);
    pub const DEGLITCH_CO6: u32 = 1 << 8;
    pub const DEGLITCH_COS: u32 = 1 << 9;
    pub const OUT_EN: u32 = 1 << 22;
    pub const CTDAC_RANGE: u32 = 1 << 23;
    pub const CTDAC_MODE: Field = Field::new(24, 2);
    pub const DISABLED_MODE: u32 = 1 << 27;
    pub const DSI_STROBE_EN: u32 = 1 << 28;
    pub const DEEPSLEEP_ON: u32 = 1 << 30;
    pub const ENABLED: u32 = 1 << 31;
}

pub mod ctdac_sw {
    /// VDDA as the DAC reference.
    pub const CTDD_CVD: u32 = 1 << 0;
    /// DAC output straight to the P9.6 pin, bypassing the CTB.
    pub const CTDO_COS: u32 = 1 << 8;
}

pub mod ctdac_val {
    use crate::regs::Field;

    pub const VALUE: Field = Field::new(0, 12);
}
