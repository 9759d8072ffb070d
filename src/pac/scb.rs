//! Serial communication block, UART mode only.

use crate::regs::Reg;

/// FIFO depth in byte mode.
pub const FIFO_DEPTH: u32 = 128;

super::block!(
    /// SCB register block.
    Scb
);

impl Scb {
    pub fn ctrl(self) -> Reg {
        self.reg(0x000)
    }
    pub fn uart_ctrl(self) -> Reg {
        self.reg(0x040)
    }
    pub fn uart_tx_ctrl(self) -> Reg {
        self.reg(0x044)
    }
    pub fn uart_rx_ctrl(self) -> Reg {
        self.reg(0x048)
    }
    pub fn tx_ctrl(self) -> Reg {
        self.reg(0x200)
    }
    pub fn tx_fifo_ctrl(self) -> Reg {
        self.reg(0x204)
    }
    pub fn tx_fifo_status(self) -> Reg {
        self.reg(0x208)
    }
    pub fn tx_fifo_wr(self) -> Reg {
        self.reg(0x240)
    }
    pub fn rx_ctrl(self) -> Reg {
        self.reg(0x300)
    }
    pub fn rx_fifo_ctrl(self) -> Reg {
        self.reg(0x304)
    }
    pub fn rx_fifo_status(self) -> Reg {
        self.reg(0x308)
    }
    pub fn rx_fifo_rd(self) -> Reg {
        self.reg(0x340)
    }
    pub fn intr_tx(self) -> Reg {
        self.reg(0xF80)
    }
}

pub mod ctrl {
    use crate::regs::Field;

    /// Oversampling minus one.
    pub const OVS: Field = Field::new(0, 4);
    pub const BYTE_MODE: u32 = 1 << 11;
    pub const MODE: Field = Field::new(24, 2);
    pub const ENABLED: u32 = 1 << 31;

    pub const MODE_UART: u32 = 2;
}

pub mod uart_ctrl {
    use crate::regs::Field;

    pub const LOOPBACK: u32 = 1 << 16;
    /// 0: standard UART.
    pub const MODE: Field = Field::new(24, 2);
}

/// Layout shared by `UART_TX_CTRL` and `UART_RX_CTRL`.
pub mod uart_frame_ctrl {
    use crate::regs::Field;

    /// Stop bits in half-bit units, minus one.
    pub const STOP_BITS: Field = Field::new(0, 3);
    pub const PARITY: u32 = 1 << 4;
    pub const PARITY_ENABLED: u32 = 1 << 5;
}

/// Layout shared by `TX_CTRL` and `RX_CTRL`.
pub mod data_ctrl {
    use crate::regs::Field;

    /// Data width minus one.
    pub const DATA_WIDTH: Field = Field::new(0, 4);
    pub const MSB_FIRST: u32 = 1 << 8;
    pub const MEDIAN: u32 = 1 << 9;
}

pub mod fifo_ctrl {
    use crate::regs::Field;

    pub const TRIGGER_LEVEL: Field = Field::new(0, 8);
    pub const CLEAR: u32 = 1 << 16;
}

pub mod fifo_status {
    use crate::regs::Field;

    pub const USED: Field = Field::new(0, 9);
    /// Shift register holds data not yet clocked out (TX) or in (RX).
    pub const SR_VALID: u32 = 1 << 15;
}

pub mod intr_tx {
    pub const UART_DONE: u32 = 1 << 9;
}
