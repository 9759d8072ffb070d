//! Memory map of the CY8C6244 (PSoC 62S4) blocks this firmware drives.
//!
//! Each block is a thin `Copy` handle around its base address; register
//! accessors return [`Reg`](crate::regs::Reg) handles and the field layout
//! lives next to the accessor in the block's module.

#![allow(missing_docs)]

pub mod ctb;
pub mod ctdac;
pub mod gpio;
pub mod pass;
pub mod peri;
pub mod sar;
pub mod scb;
pub mod srss;
pub mod tcpwm;

pub const SRSS: srss::Srss = unsafe { srss::Srss::from_ptr(0x4026_0000 as *mut ()) };
pub const PERI: peri::Peri = unsafe { peri::Peri::from_ptr(0x4000_0000 as *mut ()) };
pub const HSIOM: gpio::Hsiom = unsafe { gpio::Hsiom::from_ptr(0x4030_0000 as *mut ()) };
pub const GPIO: gpio::Gpio = unsafe { gpio::Gpio::from_ptr(0x4031_0000 as *mut ()) };
pub const TCPWM0: tcpwm::Tcpwm = unsafe { tcpwm::Tcpwm::from_ptr(0x4038_0000 as *mut ()) };
pub const SCB2: scb::Scb = unsafe { scb::Scb::from_ptr(0x4062_0000 as *mut ()) };
pub const CTBM0: ctb::Ctb = unsafe { ctb::Ctb::from_ptr(0x4090_0000 as *mut ()) };
pub const CTDAC0: ctdac::Ctdac = unsafe { ctdac::Ctdac::from_ptr(0x4094_0000 as *mut ()) };
pub const SAR0: sar::Sar = unsafe { sar::Sar::from_ptr(0x409D_0000 as *mut ()) };
pub const SAR1: sar::Sar = unsafe { sar::Sar::from_ptr(0x409E_0000 as *mut ()) };
pub const PASS: pass::Pass = unsafe { pass::Pass::from_ptr(0x409F_0000 as *mut ()) };

/// CM4 interrupt lines used by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum Interrupt {
    SCB_2 = 41,
    TCPWM0_CNT0 = 74,
    PASS_CTB_CTDAC = 91,
    PASS_SAR0 = 92,
    PASS_SAR1 = 93,
}

unsafe impl cortex_m::interrupt::InterruptNumber for Interrupt {
    #[inline(always)]
    fn number(self) -> u16 {
        self as u16
    }
}

#[cfg(feature = "rt")]
mod vector_table {
    extern "C" {
        fn SCB_2();
        fn TCPWM0_CNT0();
        fn PASS_CTB_CTDAC();
        fn PASS_SAR0();
        fn PASS_SAR1();
    }

    #[doc(hidden)]
    #[derive(Copy, Clone)]
    pub union Vector {
        _handler: unsafe extern "C" fn(),
        _reserved: u32,
    }

    const VECTOR_COUNT: usize = 94;

    #[doc(hidden)]
    #[link_section = ".vector_table.interrupts"]
    #[no_mangle]
    pub static __INTERRUPTS: [Vector; VECTOR_COUNT] = {
        let mut v = [Vector { _reserved: 0 }; VECTOR_COUNT];
        v[41] = Vector { _handler: SCB_2 };
        v[74] = Vector { _handler: TCPWM0_CNT0 };
        v[91] = Vector { _handler: PASS_CTB_CTDAC };
        v[92] = Vector { _handler: PASS_SAR0 };
        v[93] = Vector { _handler: PASS_SAR1 };
        v
    };
}

/// Declares a register block handle: base pointer plus `reg(offset)`.
macro_rules! block {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq)]
        pub struct $name {
            ptr: *mut u8,
        }

        unsafe impl Send for $name {}
        unsafe impl Sync for $name {}

        impl $name {
            /// # Safety
            ///
            /// `ptr` must be the base address of this block, or of RAM large
            /// enough to stand in for it.
            #[inline(always)]
            pub const unsafe fn from_ptr(ptr: *mut ()) -> Self {
                Self { ptr: ptr as *mut u8 }
            }

            #[inline(always)]
            pub const fn as_ptr(&self) -> *mut () {
                self.ptr as *mut ()
            }

            #[inline(always)]
            fn reg(self, offset: usize) -> crate::regs::Reg {
                unsafe { crate::regs::Reg::from_ptr(self.ptr.add(offset) as *mut u32) }
            }
        }
    };
}
pub(crate) use block;

/// RAM standing in for a register block in host tests.
#[cfg(test)]
pub(crate) struct FakeBlock {
    mem: Vec<u32>,
}

#[cfg(test)]
impl FakeBlock {
    pub fn new(size_bytes: usize) -> Self {
        Self {
            mem: vec![0; size_bytes / 4],
        }
    }

    pub fn ptr(&mut self) -> *mut () {
        self.mem.as_mut_ptr() as *mut ()
    }

    pub fn word(&self, offset: usize) -> u32 {
        self.mem[offset / 4]
    }

    pub fn set_word(&mut self, offset: usize, val: u32) {
        self.mem[offset / 4] = val;
    }
}

#[cfg(test)]
mod tests {
    use cortex_m::interrupt::InterruptNumber;

    use super::Interrupt;
    use crate::interrupt::typelevel::{self, Interrupt as _};
    use crate::interrupt::Priority;

    #[test]
    fn irq_numbers() {
        assert_eq!(Interrupt::SCB_2.number(), 41);
        assert_eq!(Interrupt::PASS_SAR0.number(), 92);
        assert_eq!(typelevel::PASS_SAR1::IRQ, Interrupt::PASS_SAR1);
        assert_eq!(typelevel::TCPWM0_CNT0::IRQ.number(), 74);
    }

    #[test]
    fn priority_sits_in_top_three_bits() {
        assert_eq!(u8::from(Priority::P7), 0xE0);
        assert_eq!(u8::from(Priority::P1), 0x20);
        assert_eq!(Priority::from(0xE0), Priority::P7);
    }
}
