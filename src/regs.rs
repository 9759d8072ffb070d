//! Volatile register access
//!
//! A [`Reg`] is a handle to one 32-bit memory-mapped register. Register
//! blocks in [`crate::pac`] hand these out by offset; a [`Field`] describes a
//! bitfield inside a register.

use core::ptr;

/// Handle to a 32-bit memory-mapped register.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Reg {
    ptr: *mut u32,
}

unsafe impl Send for Reg {}
unsafe impl Sync for Reg {}

impl Reg {
    /// # Safety
    ///
    /// `ptr` must point to a valid, aligned 32-bit register (or RAM standing
    /// in for one) for as long as the handle is used.
    #[inline(always)]
    pub const unsafe fn from_ptr(ptr: *mut u32) -> Self {
        Self { ptr }
    }

    #[inline(always)]
    pub const fn as_ptr(self) -> *mut u32 {
        self.ptr
    }

    #[inline(always)]
    pub fn read(self) -> u32 {
        unsafe { ptr::read_volatile(self.ptr) }
    }

    #[inline(always)]
    pub fn write(self, val: u32) {
        unsafe { ptr::write_volatile(self.ptr, val) }
    }

    /// Read-modify-write.
    #[inline(always)]
    pub fn modify(self, f: impl FnOnce(u32) -> u32) {
        self.write(f(self.read()));
    }

    #[inline(always)]
    pub fn set_bits(self, mask: u32) {
        self.modify(|v| v | mask);
    }

    #[inline(always)]
    pub fn clear_bits(self, mask: u32) {
        self.modify(|v| v & !mask);
    }

    #[inline(always)]
    pub fn is_set(self, mask: u32) -> bool {
        self.read() & mask != 0
    }

    #[inline(always)]
    pub fn read_field(self, field: Field) -> u32 {
        field.get(self.read())
    }

    #[inline(always)]
    pub fn write_field(self, field: Field, val: u32) {
        self.modify(|v| field.set(v, val));
    }
}

/// Bitfield within a register: `width` bits starting at bit `shift`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    shift: u8,
    width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        core::assert!(width >= 1 && shift as u32 + width as u32 <= 32);
        Self { shift, width }
    }

    pub const fn mask(self) -> u32 {
        (u32::MAX >> (32 - self.width as u32)) << self.shift
    }

    pub const fn max(self) -> u32 {
        u32::MAX >> (32 - self.width as u32)
    }

    /// `val` shifted into place. Bits that do not fit are dropped.
    pub const fn val(self, val: u32) -> u32 {
        (val << self.shift) & self.mask()
    }

    pub const fn get(self, reg: u32) -> u32 {
        (reg & self.mask()) >> self.shift
    }

    pub const fn set(self, reg: u32, val: u32) -> u32 {
        (reg & !self.mask()) | self.val(val)
    }
}
