//! Resources shared by all SARs in the PASS: simultaneous triggering,
//! scan count and analog power-up delay.

use super::Error;
use crate::clock::{self, Divider, DividerType};
use crate::pac::peri::pclk;
use crate::pac::pass::{ana_pwr_cfg, sar_simult_ctrl, sar_simult_fw_start_ctrl, sar_tr_scan_cnt, Pass};
use crate::pac::PASS;

/// PERI divider feeding `clk_sar` of both SARs.
pub const SAR_CLOCK_DIVIDER: Divider = Divider::new(DividerType::Div8, 0);

/// What starts a simultaneous scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SimultTrigger {
    /// Firmware writes [`simultaneous_fw_start`].
    Firmware,
    /// A PASS trigger input, routed from the trigger multiplexer.
    Hardware {
        /// `tr_sar_in` line.
        input: u8,
        /// Level-sensitive instead of edge-sensitive.
        level: bool,
    },
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommonConfig {
    /// Bit `n` set: SAR `n` scans on the shared trigger.
    pub simult_mask: u8,
    pub trigger: SimultTrigger,
    /// Scans per trigger, 1..=256.
    pub scan_count: u16,
    /// Analog power-up delay in `clk_peri` cycles (0..=63).
    pub power_up_delay: u8,
    /// Integer divide from `clk_peri` to the SAR clock (1..=256).
    pub clock_div: u16,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            simult_mask: 0b11,
            trigger: SimultTrigger::Hardware {
                input: 0,
                level: false,
            },
            scan_count: 1,
            power_up_delay: 0x3f,
            clock_div: 1,
        }
    }
}

/// Clocks the SARs and programs the PASS-level resources.
///
/// Must run before [`Sar::new`](super::Sar::new).
pub fn init_common(config: &CommonConfig) -> Result<(), Error> {
    configure_common(PASS, config)?;
    clock::set_divider(SAR_CLOCK_DIVIDER, config.clock_div as u32, 0).map_err(|_| Error::BadParam)?;
    clock::assign(pclk::PASS_CLOCK_SAR, SAR_CLOCK_DIVIDER);
    Ok(())
}

/// Starts one scan on every SAR in `mask` at the same instant.
pub fn simultaneous_fw_start(mask: u8) {
    PASS.sar_simult_fw_start_ctrl()
        .write(sar_simult_fw_start_ctrl::FW_TRIGGER.val(mask as u32));
}

pub(crate) fn configure_common(pass: Pass, config: &CommonConfig) -> Result<(), Error> {
    if config.simult_mask == 0 || config.simult_mask as u32 > sar_simult_ctrl::SIMULT_EN.max() {
        return Err(Error::BadParam);
    }
    if config.scan_count == 0 || config.scan_count > 256 {
        return Err(Error::BadParam);
    }
    if config.power_up_delay as u32 > ana_pwr_cfg::PWR_UP_DELAY.max() {
        return Err(Error::BadParam);
    }

    let mut simult = sar_simult_ctrl::SIMULT_EN.val(config.simult_mask as u32);
    if let SimultTrigger::Hardware { input, level } = config.trigger {
        if input as u32 > sar_simult_ctrl::SIMULT_HW_TR_SRC.max() {
            return Err(Error::BadParam);
        }
        simult |= sar_simult_ctrl::SIMULT_HW_TR_EN | sar_simult_ctrl::SIMULT_HW_TR_SRC.val(input as u32);
        if level {
            simult |= sar_simult_ctrl::SIMULT_HW_TR_LEVEL;
        }
    }

    pass.ana_pwr_cfg()
        .write(ana_pwr_cfg::PWR_UP_DELAY.val(config.power_up_delay as u32) | ana_pwr_cfg::ENABLED);
    pass.sar_tr_scan_cnt()
        .write(sar_tr_scan_cnt::SCAN_CNT.val(config.scan_count as u32 - 1) | sar_tr_scan_cnt::EN);
    pass.sar_simult_ctrl().write(simult);

    debug!("sar common: simult {:x}, scans {}", simult, config.scan_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn hardware_trigger_on_both_sars() {
        let mut mem = FakeBlock::new(0x1000);
        let pass = unsafe { Pass::from_ptr(mem.ptr()) };

        configure_common(pass, &CommonConfig::default()).unwrap();

        assert_eq!(mem.word(0xF40), 0b11 | (1 << 16));
        assert_eq!(mem.word(0xF4C), 1 << 31);
        assert_eq!(mem.word(0xF60), 0x3f | (1 << 31));
    }

    #[test]
    fn level_trigger_and_scan_count() {
        let mut mem = FakeBlock::new(0x1000);
        let pass = unsafe { Pass::from_ptr(mem.ptr()) };
        let config = CommonConfig {
            simult_mask: 0b01,
            trigger: SimultTrigger::Hardware { input: 3, level: true },
            scan_count: 256,
            power_up_delay: 0,
            clock_div: 2,
        };

        configure_common(pass, &config).unwrap();

        assert_eq!(mem.word(0xF40), 0b01 | (1 << 16) | (1 << 17) | (3 << 20));
        assert_eq!(mem.word(0xF4C), 255 | (1 << 31));
    }

    #[test]
    fn rejects_bad_params() {
        let mut mem = FakeBlock::new(0x1000);
        let pass = unsafe { Pass::from_ptr(mem.ptr()) };
        let base = CommonConfig::default();

        let no_sars = CommonConfig { simult_mask: 0, ..base };
        let no_scans = CommonConfig { scan_count: 0, ..base };
        let long_delay = CommonConfig { power_up_delay: 64, ..base };
        let firmware = CommonConfig { trigger: SimultTrigger::Firmware, ..base };

        assert_eq!(configure_common(pass, &no_sars), Err(Error::BadParam));
        assert_eq!(configure_common(pass, &no_scans), Err(Error::BadParam));
        assert_eq!(configure_common(pass, &long_delay), Err(Error::BadParam));
        assert_eq!(mem.word(0xF40), 0);

        configure_common(pass, &firmware).unwrap();
        assert_eq!(mem.word(0xF40), 0b11);
    }
}
