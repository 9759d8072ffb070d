//! Continuous-time block (CTB) opamps
//!
//! Opamp 0 buffers the CTDAC: its non-inverting input takes the DAC output,
//! its output is fed back to the inverting input and drives P9.2 through the
//! 1x output stage.

use embassy_hal_internal::into_ref;

use crate::gpio::SealedPin;
pub use crate::pac::ctb::vals::PwrMode;
use crate::pac::ctb::{ctb_ctrl, ctd_sw, oa0_sw, oa_res_ctrl, Ctb as Regs};
use crate::pac::CTBM0;
use crate::{peripherals, Peripheral, PeripheralRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    BadParam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OpampIndex {
    Oa0,
    Oa1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// 1x stage, connected to the opamp's dedicated output pin.
    OutputPin,
    /// 10x stage, for internal loads only.
    Internal,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpampConfig {
    pub power: PwrMode,
    pub drive: Drive,
    /// Charge pump for rail-to-rail input.
    pub pump: bool,
}

impl Default for OpampConfig {
    fn default() -> Self {
        Self {
            power: PwrMode::Medium,
            drive: Drive::OutputPin,
            pump: true,
        }
    }
}

pub struct Ctb<'d> {
    _p: PeripheralRef<'d, peripherals::CTBM0>,
    regs: Regs,
}

impl<'d> Ctb<'d> {
    pub fn new(p: impl Peripheral<P = peripherals::CTBM0> + 'd, deep_sleep: bool) -> Self {
        into_ref!(p);
        let regs = CTBM0;
        regs.ctb_ctrl().write(if deep_sleep { ctb_ctrl::DEEPSLEEP_ON } else { 0 });
        Self { _p: p, regs }
    }

    /// Turns opamp 0 into a unity-gain buffer of the CTDAC driving `out`.
    pub fn dac_follower(
        &mut self,
        out: impl Peripheral<P = peripherals::P9_2> + 'd,
        config: OpampConfig,
    ) -> Result<(), Error> {
        into_ref!(out);
        configure_dac_follower(self.regs, OpampIndex::Oa0, &config)?;
        out.set_as_analog();
        Ok(())
    }

    pub fn enable(&mut self) {
        self.regs.ctb_ctrl().set_bits(ctb_ctrl::ENABLED);
    }

    pub fn disable(&mut self) {
        self.regs.ctb_ctrl().clear_bits(ctb_ctrl::ENABLED);
    }
}

pub(crate) fn configure_dac_follower(regs: Regs, index: OpampIndex, config: &OpampConfig) -> Result<(), Error> {
    // The CTDAC output only reaches opamp 0.
    if index != OpampIndex::Oa0 || config.power == PwrMode::Off {
        return Err(Error::BadParam);
    }

    let mut res = oa_res_ctrl::PWR_MODE.val(config.power as u32);
    if config.drive == Drive::Internal {
        res |= oa_res_ctrl::DRIVE_STR_SEL;
    }
    if config.pump {
        res |= oa_res_ctrl::PUMP_EN;
    }

    regs.oa_res0_ctrl().write(res);
    regs.oa0_sw_clear().write(u32::MAX);
    regs.oa0_sw().write(oa0_sw::OA0M_A81);
    regs.ctd_sw().set_bits(ctd_sw::CTDO_C6H);

    debug!("ctb: oa0 res {:x}", res);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn follower_switches() {
        let mut mem = FakeBlock::new(0x100);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };

        configure_dac_follower(regs, OpampIndex::Oa0, &OpampConfig::default()).unwrap();

        assert_eq!(mem.word(0x004), 2 | (1 << 11));
        assert_eq!(mem.word(0x080), 1 << 14);
        assert_eq!(mem.word(0x0A0), 1 << 8);
        assert_eq!(mem.word(0x084), u32::MAX);
    }

    #[test]
    fn internal_drive_high_power() {
        let mut mem = FakeBlock::new(0x100);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };
        let config = OpampConfig {
            power: PwrMode::High,
            drive: Drive::Internal,
            pump: false,
        };

        configure_dac_follower(regs, OpampIndex::Oa0, &config).unwrap();
        assert_eq!(mem.word(0x004), 3 | (1 << 3));
    }

    #[test]
    fn rejects_unpowered_or_wrong_opamp() {
        let mut mem = FakeBlock::new(0x100);
        let regs = unsafe { Regs::from_ptr(mem.ptr()) };
        let off = OpampConfig {
            power: PwrMode::Off,
            ..OpampConfig::default()
        };

        assert_eq!(configure_dac_follower(regs, OpampIndex::Oa0, &off), Err(Error::BadParam));
        assert_eq!(
            configure_dac_follower(regs, OpampIndex::Oa1, &OpampConfig::default()),
            Err(Error::BadParam)
        );
        assert_eq!(mem.word(0x004), 0);
    }
}
