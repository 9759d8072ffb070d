//! PASS analog reference (AREF).
//!
//! Provides the bandgap and bias currents every other analog block in the
//! PASS depends on, so it is brought up first.

use crate::pac::pass::{aref_ctrl, Pass};
use crate::pac::PASS;

/// Start-up mode of the reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupMode {
    Normal,
    Fast,
}

/// Source of the voltage reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VrefSource {
    /// Local 1.2 V bandgap inside the PASS.
    Local = 0,
    /// Bandgap from the SRSS.
    Srss = 1,
    External = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurrentSource {
    /// 1 uA IZTAT generated locally.
    Local,
    /// IZTAT from the SRSS.
    Srss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeepSleepMode {
    Off = 0,
    IptatOnly = 1,
    IptatVref = 2,
    All = 3,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub startup: StartupMode,
    pub vref: VrefSource,
    pub iztat: CurrentSource,
    pub deep_sleep: DeepSleepMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            startup: StartupMode::Fast,
            vref: VrefSource::Srss,
            iztat: CurrentSource::Srss,
            deep_sleep: DeepSleepMode::Off,
        }
    }
}

/// Programs the AREF block. Leaves it disabled.
pub fn init(config: &Config) {
    configure(PASS, config);
}

/// Turns the AREF block on.
pub fn enable() {
    PASS.aref_ctrl().set_bits(aref_ctrl::ENABLED);
}

pub fn disable() {
    PASS.aref_ctrl().clear_bits(aref_ctrl::ENABLED);
}

pub(crate) fn configure(pass: Pass, config: &Config) {
    let mut v = aref_ctrl::VREF_SEL.val(config.vref as u32)
        | aref_ctrl::DEEPSLEEP_MODE.val(config.deep_sleep as u32);
    if config.startup == StartupMode::Fast {
        v |= aref_ctrl::AREF_MODE;
    }
    if config.iztat == CurrentSource::Srss {
        v |= aref_ctrl::IZTAT_SEL;
    }
    if config.deep_sleep != DeepSleepMode::Off {
        v |= aref_ctrl::DEEPSLEEP_ON;
    }
    pass.aref_ctrl().write(v);
    debug!("aref: ctrl {:x}", v);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn default_config_register() {
        let mut mem = FakeBlock::new(0x1000);
        let pass = unsafe { Pass::from_ptr(mem.ptr()) };
        configure(pass, &Config::default());
        assert_eq!(mem.word(0xE00), (1 << 20) | (1 << 16) | 1);

        pass.aref_ctrl().set_bits(aref_ctrl::ENABLED);
        assert!(mem.word(0xE00) & (1 << 31) != 0);
    }

    #[test]
    fn deep_sleep_keeps_block_on() {
        let mut mem = FakeBlock::new(0x1000);
        let pass = unsafe { Pass::from_ptr(mem.ptr()) };
        let config = Config {
            startup: StartupMode::Normal,
            vref: VrefSource::Local,
            iztat: CurrentSource::Local,
            deep_sleep: DeepSleepMode::All,
        };
        configure(pass, &config);
        assert_eq!(mem.word(0xE00), (3 << 28) | (1 << 30));
    }
}
