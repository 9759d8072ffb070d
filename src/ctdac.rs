//! Continuous-time 12-bit DAC (CTDAC)

use embassy_hal_internal::into_ref;

use crate::pac::ctdac::{ctdac_ctrl, ctdac_sw, ctdac_val, Ctdac as Regs};
use crate::pac::CTDAC0;
use crate::{peripherals, Peripheral, PeripheralRef};

/// Largest code the DAC accepts.
pub const MAX_VALUE: u16 = (1 << 12) - 1;

/// A single DAC output.
pub trait DacOut<V> {
    fn set_value(&mut self, val: V);
    fn get_value(&mut self) -> V;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    BadParam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reference {
    Vdda,
    /// Buffered reference from CTB opamp 1, routed by the CTB switches.
    External,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Output {
    /// Through CTB opamp 0 (see [`crate::ctb`]).
    Buffered,
    /// Straight onto the CTDAC pin.
    Unbuffered,
}

/// When a written code reaches the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UpdateMode {
    Direct = 0,
    BufferedWrite = 1,
    StrobeEdgeSync = 2,
    StrobeLevel = 3,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub reference: Reference,
    pub output: Output,
    pub update: UpdateMode,
    /// Deglitch time in `clk_peri` cycles minus one (0..=63).
    pub deglitch_cnt: u8,
    pub deep_sleep: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference: Reference::Vdda,
            output: Output::Buffered,
            update: UpdateMode::Direct,
            deglitch_cnt: 35,
            deep_sleep: false,
        }
    }
}

pub struct Ctdac<'d> {
    _p: PeripheralRef<'d, peripherals::CTDAC0>,
    regs: Regs,
}

impl<'d> Ctdac<'d> {
    /// Programs the CTDAC. The DAC is left disabled with a zero code.
    pub fn new(p: impl Peripheral<P = peripherals::CTDAC0> + 'd, config: Config) -> Result<Self, Error> {
        into_ref!(p);
        configure(CTDAC0, &config)?;
        Ok(Self { _p: p, regs: CTDAC0 })
    }

    pub fn enable(&mut self) {
        self.regs.ctdac_ctrl().set_bits(ctdac_ctrl::ENABLED);
    }

    pub fn disable(&mut self) {
        self.regs.ctdac_ctrl().clear_bits(ctdac_ctrl::ENABLED);
    }

    /// Writes `code`; bits above the 12-bit range are dropped.
    pub fn set_value(&mut self, code: u16) {
        self.regs.ctdac_val().write(ctdac_val::VALUE.val(code as u32));
    }

    pub fn value(&self) -> u16 {
        self.regs.ctdac_val().read_field(ctdac_val::VALUE) as u16
    }
}

impl<'d> DacOut<u16> for Ctdac<'d> {
    fn set_value(&mut self, val: u16) {
        Ctdac::set_value(self, val)
    }

    fn get_value(&mut self) -> u16 {
        self.value()
    }
}

pub(crate) fn configure(regs: Regs, config: &Config) -> Result<(), Error> {
    if config.deglitch_cnt as u32 > ctdac_ctrl::DEGLITCH_CNT.max() {
        return Err(Error::BadParam);
    }

    let mut ctrl = ctdac_ctrl::DEGLITCH_CNT.val(config.deglitch_cnt as u32)
        | ctdac_ctrl::CTDAC_MODE.val(config.update as u32);
    let mut sw = 0;
    match config.output {
        Output::Buffered => ctrl |= ctdac_ctrl::DEGLITCH_CO6,
        Output::Unbuffered => {
            ctrl |= ctdac_ctrl::DEGLITCH_COS | ctdac_ctrl::OUT_EN;
            sw |= ctdac_sw::CTDO_COS;
        }
    }
    if config.reference == Reference::Vdda {
        sw |= ctdac_sw::CTDD_CVD;
    }
    if config.deep_sleep {
        ctrl |= ctdac_ctrl::DEEPSLEEP_ON;
    }

    regs.ctdac_ctrl().write(ctrl);
    regs.ctdac_sw_clear().write(ctdac_sw::CTDD_CVD | ctdac_sw::CTDO_COS);
    regs.ctdac_sw().write(sw);
    regs.ctdac_val().write(0);
    regs.ctdac_val_nxt().write(0);
    regs.intr_mask().write(0);

    debug!("ctdac: ctrl {:x} sw {:x}", ctrl, sw);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn buffered_vdda_default() {
        let mut mem = FakeBlock::new(0x200);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };

        configure(regs, &Config::default()).unwrap();

        assert_eq!(mem.word(0x000), 35 | (1 << 8));
        assert_eq!(mem.word(0x0B0), 1);
        assert_eq!(mem.word(0x100), 0);
    }

    #[test]
    fn unbuffered_external_reference() {
        let mut mem = FakeBlock::new(0x200);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };
        let config = Config {
            reference: Reference::External,
            output: Output::Unbuffered,
            update: UpdateMode::BufferedWrite,
            deglitch_cnt: 0,
            deep_sleep: true,
        };

        configure(regs, &config).unwrap();

        assert_eq!(mem.word(0x000), (1 << 9) | (1 << 22) | (1 << 24) | (1 << 30));
        assert_eq!(mem.word(0x0B0), 1 << 8);
    }

    #[test]
    fn deglitch_out_of_range() {
        let mut mem = FakeBlock::new(0x200);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };
        let config = Config {
            deglitch_cnt: 64,
            ..Config::default()
        };
        assert_eq!(configure(regs, &config), Err(Error::BadParam));
    }

    #[test]
    fn value_is_twelve_bits() {
        let mut mem = FakeBlock::new(0x200);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };

        regs.ctdac_val().write(ctdac_val::VALUE.val(0x1FFF));
        assert_eq!(mem.word(0x100), MAX_VALUE as u32);
        regs.ctdac_val().write(ctdac_val::VALUE.val(4051));
        assert_eq!(regs.ctdac_val().read_field(ctdac_val::VALUE), 4051);
    }
}
