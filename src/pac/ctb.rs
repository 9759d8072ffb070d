//! Continuous-time block (two opamps plus the CTDAC routing switches).

use crate::regs::Reg;

super::block!(
    /// CTB register block.
    Ctb
);

impl Ctb {
    pub fn ctb_ctrl(self) -> Reg {
        self.reg(0x000)
    }
    pub fn oa_res0_ctrl(self) -> Reg {
        self.reg(0x004)
    }
    pub fn oa_res1_ctrl(self) -> Reg {
        self.reg(0x008)
    }
    pub fn oa0_sw(self) -> Reg {
        self.reg(0x080)
    }
    pub fn oa0_sw_clear(self) -> Reg {
        self.reg(0x084)
    }
    pub fn oa1_sw(self) -> Reg {
        self.reg(0x088)
    }
    pub fn oa1_sw_clear(self) -> Reg {
        self.reg(0x08C)
    }
    pub fn ctd_sw(self) -> Reg {
        self.reg(0x0A0)
    }
    pub fn ctd_sw_clear(self) -> Reg {
        self.reg(0x0A4)
    }
}

pub mod ctb_ctrl {
    pub const DEEPSLEEP_ON: u32 = 1 << 30;
    pub const ENABLED: u32 = 1 << 31;
}

/// Layout shared by `OA_RES0_CTRL` and `OA_RES1_CTRL`.
pub mod oa_res_ctrl {
    use crate::regs::Field;

    pub const PWR_MODE: Field = Field::new(0, 3);
    /// Set: 10x internal drive. Clear: 1x drive onto the output pin.
    pub const DRIVE_STR_SEL: u32 = 1 << 3;
    pub const COMP_EN: u32 = 1 << 4;
    pub const HYST_EN: u32 = 1 << 5;
    pub const PUMP_EN: u32 = 1 << 11;
    pub const BOOST_EN: u32 = 1 << 12;
}

pub mod oa0_sw {
    pub const OA0P_A00: u32 = 1 << 0;
    pub const OA0P_A20: u32 = 1 << 2;
    pub const OA0P_A30: u32 = 1 << 3;
    pub const OA0M_A11: u32 = 1 << 8;
    /// Output fed back to the inverting input (unity-gain follower).
    pub const OA0M_A81: u32 = 1 << 14;
    pub const OA0O_D51: u32 = 1 << 18;
    pub const OA0O_D81: u32 = 1 << 21;
}

pub mod ctd_sw {
    pub const CTDD_CRD: u32 = 1 << 1;
    pub const CTDS_CRS: u32 = 1 << 4;
    pub const CTDS_COR: u32 = 1 << 5;
    /// CTDAC output to the opamp 0 non-inverting input.
    pub const CTDO_C6H: u32 = 1 << 8;
    pub const CTDO_COS: u32 = 1 << 9;
    pub const CTDH_COB: u32 = 1 << 10;
}

pub mod vals {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(u8)]
    pub enum PwrMode {
        Off = 0,
        Low = 1,
        Medium = 2,
        High = 3,
    }
}
