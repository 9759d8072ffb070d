//! SAR ADC (one per converter, `SAR0`/`SAR1`).

use crate::regs::Reg;

/// Sequencer channels per SAR.
pub const CHANNEL_COUNT: usize = 16;

super::block!(
    /// SAR ADC register block.
    Sar
);

impl Sar {
    pub fn ctrl(self) -> Reg {
        self.reg(0x000)
    }
    pub fn sample_ctrl(self) -> Reg {
        self.reg(0x004)
    }
    pub fn sample_time01(self) -> Reg {
        self.reg(0x010)
    }
    pub fn sample_time23(self) -> Reg {
        self.reg(0x014)
    }
    pub fn chan_en(self) -> Reg {
        self.reg(0x020)
    }
    pub fn start_ctrl(self) -> Reg {
        self.reg(0x024)
    }
    pub fn chan_config(self, n: usize) -> Reg {
        core::assert!(n < CHANNEL_COUNT);
        self.reg(0x080 + 4 * n)
    }
    pub fn chan_result(self, n: usize) -> Reg {
        core::assert!(n < CHANNEL_COUNT);
        self.reg(0x180 + 4 * n)
    }
    pub fn intr(self) -> Reg {
        self.reg(0x210)
    }
    pub fn intr_set(self) -> Reg {
        self.reg(0x214)
    }
    pub fn intr_mask(self) -> Reg {
        self.reg(0x218)
    }
    pub fn intr_masked(self) -> Reg {
        self.reg(0x21C)
    }
    pub fn mux_switch0(self) -> Reg {
        self.reg(0x300)
    }
    pub fn mux_switch_clear0(self) -> Reg {
        self.reg(0x304)
    }
    pub fn mux_switch_sq_ctrl(self) -> Reg {
        self.reg(0x340)
    }
}

pub mod ctrl {
    use crate::regs::Field;

    pub const PWR_CTRL_VREF: Field = Field::new(0, 3);
    pub const VREF_SEL: Field = Field::new(4, 3);
    pub const VREF_BYP_CAP_EN: u32 = 1 << 7;
    pub const NEG_SEL: Field = Field::new(9, 3);
    pub const SAR_HW_CTRL_NEGVREF: u32 = 1 << 13;
    pub const COMP_DLY: Field = Field::new(14, 2);
    pub const REFBUF_EN: u32 = 1 << 21;
    pub const COMP_PWR: Field = Field::new(24, 3);
    pub const DEEPSLEEP_ON: u32 = 1 << 27;
    pub const SWITCH_DISABLE: u32 = 1 << 30;
    pub const ENABLED: u32 = 1 << 31;
}

pub mod sample_ctrl {
    use crate::regs::Field;

    pub const LEFT_ALIGN: u32 = 1 << 1;
    pub const SINGLE_ENDED_SIGNED: u32 = 1 << 2;
    pub const DIFFERENTIAL_SIGNED: u32 = 1 << 3;
    pub const AVG_CNT: Field = Field::new(4, 3);
    pub const AVG_SHIFT: u32 = 1 << 7;
    pub const CONTINUOUS: u32 = 1 << 16;
    pub const DSI_TRIGGER_EN: u32 = 1 << 17;
    pub const DSI_TRIGGER_LEVEL: u32 = 1 << 18;
    pub const DSI_SYNC_TRIGGER: u32 = 1 << 19;
    pub const VALID_IGNORE: u32 = 1 << 28;
}

pub mod sample_time {
    use crate::regs::Field;

    pub const LOW: Field = Field::new(0, 10);
    pub const HIGH: Field = Field::new(16, 10);
}

pub mod start_ctrl {
    pub const FW_TRIGGER: u32 = 1 << 0;
}

pub mod chan_config {
    use crate::regs::Field;

    pub const POS_PIN_ADDR: Field = Field::new(0, 3);
    pub const POS_PORT_ADDR: Field = Field::new(4, 3);
    pub const DIFFERENTIAL_EN: u32 = 1 << 8;
    pub const AVG_EN: u32 = 1 << 10;
    pub const SAMPLE_TIME_SEL: Field = Field::new(12, 2);
    pub const NEG_ADDR_EN: u32 = 1 << 24;
}

pub mod chan_result {
    use crate::regs::Field;

    pub const RESULT: Field = Field::new(0, 16);
    pub const VALID_MIR: u32 = 1 << 31;
}

pub mod intr {
    pub const EOS: u32 = 1 << 0;
    pub const OVERFLOW: u32 = 1 << 1;
    pub const FW_COLLISION: u32 = 1 << 2;
    pub const DSI_COLLISION: u32 = 1 << 3;
    pub const INJ_EOC: u32 = 1 << 4;
    pub const INJ_SATURATE: u32 = 1 << 5;
    pub const INJ_RANGE: u32 = 1 << 6;
    pub const INJ_COLLISION: u32 = 1 << 7;

    pub const ALL: u32 = EOS
        | OVERFLOW
        | FW_COLLISION
        | DSI_COLLISION
        | INJ_EOC
        | INJ_SATURATE
        | INJ_RANGE
        | INJ_COLLISION;
}

/// SARMUX switches. Pin `n` of the dedicated port connects to Vplus with
/// bit `n`; the sequencer takes over a switch when the same bit is set in
/// `MUX_SWITCH_SQ_CTRL`.
pub mod mux_switch {
    pub const fn vplus(pin: u8) -> u32 {
        1 << pin
    }
    pub const VSSA_VMINUS: u32 = 1 << 16;
    pub const SQ_VSSA: u32 = 1 << 16;
}

pub mod vals {
    /// SAR reference selection (`CTRL.VREF_SEL`).
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(u8)]
    pub enum VrefSel {
        /// Internal 1.2 V bandgap from AREF.
        Bgr = 4,
        /// External reference pin.
        Ext = 5,
        Vdda2 = 6,
        Vdda = 7,
    }

    /// Negative input in single-ended mode (`CTRL.NEG_SEL`).
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(u8)]
    pub enum NegSel {
        Vssa = 0,
        Vref = 7,
    }

    /// Port addressed by `CHAN_CONFIG.POS_PORT_ADDR`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    #[repr(u8)]
    pub enum PortAddr {
        /// Dedicated SARMUX port (P10 on this device).
        Sarmux = 0,
        Ctb0 = 1,
    }
}
