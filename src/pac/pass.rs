//! Programmable analog subsystem common registers: AREF and the SAR
//! simultaneous-trigger control.

use crate::regs::Reg;

super::block!(
    /// PASS common register block.
    Pass
);

impl Pass {
    pub fn intr_cause(self) -> Reg {
        self.reg(0x000)
    }
    pub fn aref_ctrl(self) -> Reg {
        self.reg(0xE00)
    }
    pub fn sar_simult_ctrl(self) -> Reg {
        self.reg(0xF40)
    }
    pub fn sar_simult_fw_start_ctrl(self) -> Reg {
        self.reg(0xF44)
    }
    pub fn sar_tr_scan_cnt(self) -> Reg {
        self.reg(0xF4C)
    }
    pub fn ana_pwr_cfg(self) -> Reg {
        self.reg(0xF60)
    }
}

pub mod aref_ctrl {
    use crate::regs::Field;

    pub const AREF_MODE: u32 = 1 << 0;
    pub const AREF_BIAS_SCALE: Field = Field::new(2, 2);
    pub const AREF_RMB: Field = Field::new(4, 3);
    pub const CTB_IPTAT_SCALE: u32 = 1 << 7;
    pub const IZTAT_SEL: u32 = 1 << 16;
    pub const VREF_SEL: Field = Field::new(20, 2);
    pub const DEEPSLEEP_MODE: Field = Field::new(28, 2);
    pub const DEEPSLEEP_ON: u32 = 1 << 30;
    pub const ENABLED: u32 = 1 << 31;
}

pub mod sar_simult_ctrl {
    use crate::regs::Field;

    /// One bit per SAR taking part in simultaneous scans.
    pub const SIMULT_EN: Field = Field::new(0, 4);
    pub const SIMULT_HW_TR_EN: u32 = 1 << 16;
    pub const SIMULT_HW_TR_LEVEL: u32 = 1 << 17;
    pub const SIMULT_HW_TR_SRC: Field = Field::new(20, 4);
    pub const SIMULT_HW_SYNC_TR: u32 = 1 << 24;
}

pub mod sar_simult_fw_start_ctrl {
    use crate::regs::Field;

    pub const FW_TRIGGER: Field = Field::new(0, 4);
}

pub mod sar_tr_scan_cnt {
    use crate::regs::Field;

    pub const SCAN_CNT: Field = Field::new(0, 8);
    pub const EN: u32 = 1 << 31;
}

pub mod ana_pwr_cfg {
    use crate::regs::Field;

    pub const PWR_UP_DELAY: Field = Field::new(0, 6);
    pub const ENABLED: u32 = 1 << 31;
}
