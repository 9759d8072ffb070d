//! Clock bring-up and peripheral clock dividers
//!
//! HF0 runs from the 8 MHz IMO through path 0. `CLK_PERI` and the CM4 clock
//! stay at their reset divide-by-one, so both equal HF0. Peripherals are
//! clocked from PERI dividers assigned with [`assign`].

use core::mem::MaybeUninit;

use crate::pac::peri::{clock_ctl, div_cmd, div_ctl, Peri};
use crate::pac::srss::{clk_path_select, clk_root_select, Srss, IMO_HZ};
use crate::pac::{PERI, SRSS};
use crate::time::Hertz;

/// HF0 divider (`CLK_ROOT_SELECT.ROOT_DIV`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RootDiv {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
}

#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub root_div: RootDiv,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_div: RootDiv::Div1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Clocks {
    pub hf0: Hertz,
    pub peri: Hertz,
    pub cpu: Hertz,
}

/// Frozen clock frequencies
///
/// The existence of this value indicates that the clock configuration can no longer be changed
static mut CLOCK_FREQS: MaybeUninit<Clocks> = MaybeUninit::uninit();

/// Sets the clock frequencies
///
/// Safety: Sets a mutable global.
pub(crate) unsafe fn set_freqs(freqs: Clocks) {
    debug!("clocks: hf0 {} Hz, peri {} Hz", freqs.hf0.0, freqs.peri.0);
    CLOCK_FREQS = MaybeUninit::new(freqs);
}

/// Safety: Reads a mutable global; [`init`](crate::init) must have run.
pub(crate) unsafe fn get_freqs() -> &'static Clocks {
    (*core::ptr::addr_of_mut!(CLOCK_FREQS)).assume_init_ref()
}

pub(crate) unsafe fn init(config: Config) {
    let hf0 = configure_root(SRSS, config.root_div);
    set_freqs(Clocks {
        hf0,
        peri: hf0,
        cpu: hf0,
    });
}

fn configure_root(srss: Srss, div: RootDiv) -> Hertz {
    srss.clk_path_select(0)
        .write_field(clk_path_select::PATH_MUX, clk_path_select::PATH_MUX_IMO);
    srss.clk_root_select(0).write(
        clk_root_select::ROOT_MUX.val(0) | clk_root_select::ROOT_DIV.val(div as u32) | clk_root_select::ENABLE,
    );
    Hertz(IMO_HZ >> div as u32)
}

/// PERI divider kinds (`TYPE_SEL`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DividerType {
    Div8 = 0,
    Div16 = 1,
    Div16_5 = 2,
    Div24_5 = 3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Divider {
    pub kind: DividerType,
    pub index: u8,
}

impl Divider {
    pub const fn new(kind: DividerType, index: u8) -> Self {
        Self { kind, index }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Integer part out of range for the divider width, or zero.
    BadDivider,
    /// Fractional value given to an integer divider.
    NotFractional,
}

/// Integer and 1/32 fractional part such that `clk / (int + frac/32) ≈ target`.
///
/// The integer part is the real divide value, not the register encoding.
pub fn fractional_divider(clk: Hertz, target: Hertz) -> Option<(u32, u32)> {
    if target.0 == 0 {
        return None;
    }
    // clk * 32 / target, rounded to the nearest 1/32.
    let scaled = ((clk.0 as u64 * 64) / target.0 as u64 + 1) / 2;
    let int = (scaled / 32) as u32;
    let frac = (scaled % 32) as u32;
    if int == 0 {
        return None;
    }
    Some((int, frac))
}

/// Output frequency of a divider set to `int + frac/32`.
pub fn divided(clk: Hertz, int: u32, frac: u32) -> Hertz {
    Hertz(((clk.0 as u64 * 32) / (int as u64 * 32 + frac as u64)) as u32)
}

/// Routes `divider` to the peripheral clock destination `pclk`.
pub fn assign(pclk: usize, divider: Divider) {
    assign_in(PERI, pclk, divider)
}

/// Programs `divider` to divide by `int + frac/32` and enables it.
pub fn set_divider(divider: Divider, int: u32, frac: u32) -> Result<(), Error> {
    program_divider(PERI, divider, int, frac)?;
    enable_divider(PERI, divider);
    Ok(())
}

pub fn disable_divider(divider: Divider) {
    PERI.div_cmd().write(
        div_cmd::DIV_SEL.val(divider.index as u32)
            | div_cmd::TYPE_SEL.val(divider.kind as u32)
            | div_cmd::DISABLE,
    );
}

pub(crate) fn assign_in(peri: Peri, pclk: usize, divider: Divider) {
    peri.clock_ctl(pclk).write(
        clock_ctl::DIV_SEL.val(divider.index as u32) | clock_ctl::TYPE_SEL.val(divider.kind as u32),
    );
}

pub(crate) fn program_divider(peri: Peri, divider: Divider, int: u32, frac: u32) -> Result<(), Error> {
    if int == 0 {
        return Err(Error::BadDivider);
    }
    let n = divider.index as usize;
    let (reg, int_field, frac_ok) = match divider.kind {
        DividerType::Div8 => (peri.div_8_ctl(n), div_ctl::INT8_DIV, false),
        DividerType::Div16 => (peri.div_16_ctl(n), div_ctl::INT16_DIV, false),
        DividerType::Div16_5 => (peri.div_16_5_ctl(n), div_ctl::INT16_DIV, true),
        DividerType::Div24_5 => (peri.div_24_5_ctl(n), crate::regs::Field::new(8, 24), true),
    };
    if int - 1 > int_field.max() {
        return Err(Error::BadDivider);
    }
    if frac != 0 && !frac_ok {
        return Err(Error::NotFractional);
    }
    let mut val = int_field.val(int - 1);
    if frac_ok {
        val |= div_ctl::FRAC5_DIV.val(frac);
    }
    reg.write(val);
    trace!("divider {} #{}: int {} frac {}", divider.kind as u8, divider.index, int, frac);
    Ok(())
}

pub(crate) fn enable_divider(peri: Peri, divider: Divider) {
    // No phase alignment: PA_DIV_SEL = 0xFF, PA_TYPE_SEL = 3.
    peri.div_cmd().write(
        div_cmd::DIV_SEL.val(divider.index as u32)
            | div_cmd::TYPE_SEL.val(divider.kind as u32)
            | div_cmd::PA_DIV_SEL.val(0xFF)
            | div_cmd::PA_TYPE_SEL.val(3)
            | div_cmd::ENABLE,
    );
}
