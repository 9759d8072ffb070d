//! Timer/counter/PWM group (TCPWM0: eight 32-bit counters).
//!
//! Version 1 layout, as on all CY8C6xxx parts: enable and start/stop/reload
//! commands are group registers with one bit per counter, and counter `n`
//! sits at `0x100 + 0x40 * n`.

use crate::regs::Reg;

pub const COUNTER_COUNT: usize = 8;

super::block!(
    /// TCPWM group register block.
    Tcpwm
);

impl Tcpwm {
    pub fn ctrl(self) -> Reg {
        self.reg(0x000)
    }
    pub fn ctrl_clr(self) -> Reg {
        self.reg(0x004)
    }
    pub fn ctrl_set(self) -> Reg {
        self.reg(0x008)
    }
    pub fn cmd_reload(self) -> Reg {
        self.reg(0x010)
    }
    pub fn cmd_stop(self) -> Reg {
        self.reg(0x014)
    }
    pub fn cmd_start(self) -> Reg {
        self.reg(0x018)
    }
    pub fn cnt(self, n: usize) -> Cnt {
        core::assert!(n < COUNTER_COUNT);
        Cnt {
            base: self,
            offset: 0x100 + 0x40 * n,
        }
    }
}

/// One counter inside a TCPWM group.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Cnt {
    base: Tcpwm,
    offset: usize,
}

impl Cnt {
    pub fn ctrl(self) -> Reg {
        self.base.reg(self.offset)
    }
    pub fn status(self) -> Reg {
        self.base.reg(self.offset + 0x04)
    }
    pub fn counter(self) -> Reg {
        self.base.reg(self.offset + 0x08)
    }
    pub fn cc(self) -> Reg {
        self.base.reg(self.offset + 0x0C)
    }
    pub fn cc_buff(self) -> Reg {
        self.base.reg(self.offset + 0x10)
    }
    pub fn period(self) -> Reg {
        self.base.reg(self.offset + 0x14)
    }
    pub fn period_buff(self) -> Reg {
        self.base.reg(self.offset + 0x18)
    }
    pub fn tr_ctrl0(self) -> Reg {
        self.base.reg(self.offset + 0x20)
    }
    pub fn tr_ctrl1(self) -> Reg {
        self.base.reg(self.offset + 0x24)
    }
    pub fn tr_ctrl2(self) -> Reg {
        self.base.reg(self.offset + 0x28)
    }
    pub fn intr(self) -> Reg {
        self.base.reg(self.offset + 0x30)
    }
    pub fn intr_mask(self) -> Reg {
        self.base.reg(self.offset + 0x38)
    }
}

pub mod cnt_ctrl {
    use crate::regs::Field;

    pub const AUTO_RELOAD_CC: u32 = 1 << 0;
    pub const AUTO_RELOAD_PERIOD: u32 = 1 << 1;
    /// Counter mode: prescaler in the low three bits.
    pub const GENERIC: Field = Field::new(8, 8);
    pub const UP_DOWN_MODE: Field = Field::new(16, 2);
    pub const ONE_SHOT: u32 = 1 << 18;
    pub const MODE: Field = Field::new(24, 3);
}

pub mod status {
    pub const RUNNING: u32 = 1 << 31;
}

pub mod tr_ctrl0 {
    use crate::regs::Field;

    pub const CAPTURE_SEL: Field = Field::new(0, 4);
    pub const COUNT_SEL: Field = Field::new(4, 4);
    pub const RELOAD_SEL: Field = Field::new(8, 4);
    pub const STOP_SEL: Field = Field::new(12, 4);
    pub const START_SEL: Field = Field::new(16, 4);
}

pub mod intr {
    pub const TC: u32 = 1 << 0;
    pub const CC_MATCH: u32 = 1 << 1;
}

pub mod vals {
    /// `TR_CTRL0` selection meaning "constant high".
    pub const TR_SEL_ALWAYS: u32 = 1;
    /// `TR_CTRL0` selection meaning "no trigger".
    pub const TR_SEL_NONE: u32 = 0;

    pub const MODE_TIMER: u32 = 0;
    pub const UP_DOWN_COUNT_UP: u32 = 0;
}
