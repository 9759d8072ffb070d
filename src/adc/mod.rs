//! SAR ADC
//!
//! Each SAR runs a hardware sequencer over up to 16 channels. A scan is
//! started by the shared simultaneous trigger (see [`init_common`]) or by
//! firmware, and ends with the EOS (end of scan) interrupt.

#![macro_use]

mod calibration;
mod common;
mod scan;

use core::marker::PhantomData;

pub use calibration::*;
pub use common::*;
use embassy_hal_internal::into_ref;
pub use scan::*;

pub use crate::pac::sar::intr;
pub use crate::pac::sar::vals;
use crate::pac::sar::vals::{NegSel, PortAddr, VrefSel};
use crate::pac::sar::{chan_config, chan_result, ctrl, mux_switch, sample_ctrl, sample_time, start_ctrl, CHANNEL_COUNT};
use crate::delay::blocking_delay_us;
use crate::gpio::SealedPin;
use crate::interrupt::typelevel::Interrupt;
use crate::interrupt::Priority;
use crate::{interrupt, peripherals, Peripheral, PeripheralRef};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A configuration value is out of range.
    BadParam,
    /// The channel is not enabled in the sequencer.
    ChannelNotConfigured,
}

/// Hardware averaging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Averaging {
    /// Samples per result, a power of two in 2..=256 (2..=16 without `shift`).
    pub count: u16,
    /// Shift the sum back to 12 bits in hardware. Without it the result
    /// register holds the accumulated sum, which must fit its 16 bits.
    pub shift: bool,
}

/// Per-SAR configuration.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SarConfig {
    pub vref: VrefSel,
    /// Reference voltage the counts are scaled against.
    pub vref_mv: u32,
    pub neg: NegSel,
    /// Single-ended results are two's complement.
    pub signed: bool,
    pub averaging: Option<Averaging>,
    /// The four selectable sample times, in SAR clock cycles (1..=1023).
    pub sample_times: [u16; 4],
    /// Scans start on the trigger input instead of firmware.
    pub hw_trigger: bool,
    pub continuous: bool,
    pub bypass_cap: bool,
    pub priority: Priority,
}

impl Default for SarConfig {
    fn default() -> Self {
        Self {
            vref: VrefSel::Vdda,
            vref_mv: 3300,
            neg: NegSel::Vssa,
            signed: false,
            averaging: None,
            sample_times: [4, 4, 4, 4],
            hw_trigger: true,
            continuous: false,
            bypass_cap: false,
            priority: Priority::P7,
        }
    }
}

/// Most 12-bit samples whose sum still fits the 16-bit result field.
const MAX_ACCUMULATED: u16 = 16;

impl SarConfig {
    fn avg_cnt(&self) -> Result<u32, Error> {
        match self.averaging {
            None => Ok(0),
            Some(avg) if !avg.shift && avg.count > MAX_ACCUMULATED => Err(Error::BadParam),
            Some(avg) if avg.count.is_power_of_two() && (2..=256).contains(&avg.count) => {
                Ok(avg.count.trailing_zeros() - 1)
            }
            Some(_) => Err(Error::BadParam),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Which of the four sample times to use (0..=3).
    pub sample_time_sel: u8,
    /// Apply the SAR's averaging to this channel.
    pub average: bool,
}

trait SealedInstance {
    fn regs() -> crate::pac::sar::Sar;
    const INDEX: usize;
}

pub(crate) trait SealedSarPin<T> {
    /// Pin number on the dedicated SARMUX port.
    fn sarmux_pin(&self) -> u8;
}

/// SAR instance.
#[allow(private_bounds)]
pub trait Instance: SealedInstance + Peripheral<P = Self> + 'static {
    type Interrupt: interrupt::typelevel::Interrupt;
}

/// Pin that can be routed to the Vplus input of SAR `T`.
#[allow(private_bounds)]
pub trait SarPin<T: Instance>: crate::gpio::Pin + SealedSarPin<T> {}

macro_rules! impl_sar {
    ($inst:ident, $index:expr, $irq:ident) => {
        impl SealedInstance for peripherals::$inst {
            fn regs() -> crate::pac::sar::Sar {
                crate::pac::$inst
            }
            const INDEX: usize = $index;
        }

        impl Instance for peripherals::$inst {
            type Interrupt = crate::interrupt::typelevel::$irq;
        }
    };
}

impl_sar!(SAR0, 0, PASS_SAR0);
impl_sar!(SAR1, 1, PASS_SAR1);

macro_rules! impl_sar_pin {
    ($inst:ident, $pin:ident, $n:expr) => {
        impl SealedSarPin<peripherals::$inst> for peripherals::$pin {
            fn sarmux_pin(&self) -> u8 {
                $n
            }
        }

        impl SarPin<peripherals::$inst> for peripherals::$pin {}

        impl embedded_hal_02::adc::Channel<peripherals::$inst> for peripherals::$pin {
            type ID = u8;

            fn channel() -> u8 {
                $n
            }
        }
    };
}

impl_sar_pin!(SAR0, P10_0, 0);
impl_sar_pin!(SAR1, P10_2, 2);

/// Interrupt handler: records end of scan in [`SCAN_FLAGS`].
pub struct InterruptHandler<T: Instance> {
    _phantom: PhantomData<T>,
}

impl<T: Instance> interrupt::typelevel::Handler<T::Interrupt> for InterruptHandler<T> {
    unsafe fn on_interrupt() {
        handle_eos(T::regs(), &SCAN_FLAGS, T::INDEX);
    }
}

/// Sets `flags[index]` if the scan finished and acknowledges every source.
pub(crate) fn handle_eos(regs: crate::pac::sar::Sar, flags: &ScanFlags, index: usize) {
    if regs.intr_masked().read() & intr::EOS != 0 {
        flags.set(index);
    }
    regs.intr().write(intr::ALL);
}

/// SAR driver.
pub struct Sar<'d, T: Instance> {
    _sar: PeripheralRef<'d, T>,
    scaling: Scaling,
    oneshot_pending: bool,
}

impl<'d, T: Instance> Sar<'d, T> {
    /// Programs the SAR and unmasks its interrupt line in the NVIC.
    ///
    /// The SAR stays disabled until channels are added and [`enable`](Self::enable) is called.
    pub fn new(
        sar: impl Peripheral<P = T> + 'd,
        _irq: impl interrupt::typelevel::Binding<T::Interrupt, InterruptHandler<T>> + 'd,
        config: SarConfig,
    ) -> Result<Self, Error> {
        into_ref!(sar);
        configure_sar(T::regs(), &config)?;

        T::Interrupt::set_priority(config.priority);
        T::Interrupt::unpend();
        unsafe {
            T::Interrupt::enable();
        }

        Ok(Self {
            _sar: sar,
            scaling: Scaling::new(&config),
            oneshot_pending: false,
        })
    }

    /// Puts `pin` in analog mode and makes it the input of sequencer channel `chan`.
    pub fn configure_channel(&mut self, chan: u8, pin: &mut impl SarPin<T>, config: ChannelConfig) -> Result<(), Error> {
        configure_channel(T::regs(), chan as usize, pin.sarmux_pin(), &config)?;
        pin.set_as_analog();
        Ok(())
    }

    /// Powers the SAR up. Fails if no channel is configured.
    pub fn enable(&mut self) -> Result<(), Error> {
        power_up(T::regs())?;
        // Reference settling.
        blocking_delay_us(10);
        debug!("sar{}: enabled, channels {:x}", T::INDEX, T::regs().chan_en().read());
        Ok(())
    }

    pub fn disable(&mut self) {
        T::regs().ctrl().clear_bits(ctrl::ENABLED);
    }

    pub fn set_interrupt_mask(&mut self, mask: u32) {
        T::regs().intr_mask().write(mask & intr::ALL);
    }

    /// Pending sources, whether masked or not.
    pub fn interrupt_status(&self) -> u32 {
        T::regs().intr().read()
    }

    pub fn clear_interrupt(&mut self, mask: u32) {
        T::regs().intr().write(mask & intr::ALL);
    }

    /// Starts one scan from firmware.
    pub fn start_scan(&mut self) {
        T::regs().start_ctrl().write(start_ctrl::FW_TRIGGER);
    }

    /// Latest result of `chan`.
    pub fn result16(&self, chan: u8) -> i16 {
        T::regs().chan_result(chan as usize).read_field(chan_result::RESULT) as u16 as i16
    }

    pub fn counts_to_volts(&self, chan: u8, counts: i16) -> f32 {
        self.scaling.volts(T::regs(), chan, counts)
    }

    pub fn counts_to_millivolts(&self, chan: u8, counts: i16) -> i16 {
        self.scaling.millivolts(T::regs(), chan, counts)
    }

    pub fn counts_to_microvolts(&self, chan: u8, counts: i16) -> i32 {
        self.scaling.microvolts(T::regs(), chan, counts)
    }

    /// Overrides the zero-volt count of `chan`.
    pub fn set_offset(&mut self, chan: u8, offset: i16) {
        self.scaling.calibration[chan as usize].offset = offset;
    }

    /// Overrides the counts per 10 V of `chan`.
    pub fn set_gain(&mut self, chan: u8, counts_per_10v: i32) {
        self.scaling.calibration[chan as usize].counts_per_10v = counts_per_10v;
    }

    /// Hands the SAR over as a single voltage source reading `chan`.
    pub fn into_input(self, chan: u8) -> Result<SarInput<'d, T>, Error> {
        if !channel_enabled(T::regs(), chan) {
            return Err(Error::ChannelNotConfigured);
        }
        Ok(SarInput { sar: self, chan })
    }
}

/// Turns result counts of one SAR into voltages.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scaling {
    calibration: [Calibration; CHANNEL_COUNT],
    /// Samples summed into each result of an averaging channel, when the
    /// hardware does not shift the sum back.
    accumulated: Option<u16>,
    signed: bool,
}

impl Scaling {
    pub(crate) fn new(config: &SarConfig) -> Self {
        Self {
            calibration: [Calibration::for_reference(config.vref_mv, config.neg, config.signed); CHANNEL_COUNT],
            accumulated: config.averaging.filter(|a| !a.shift).map(|a| a.count),
            signed: config.signed,
        }
    }

    /// Counts of a single conversion on `chan`.
    fn unaveraged(&self, regs: crate::pac::sar::Sar, chan: u8, counts: i16) -> i16 {
        match self.accumulated {
            Some(samples) if regs.chan_config(chan as usize).is_set(chan_config::AVG_EN) => {
                Calibration::adjust_for_averaging(counts, samples, self.signed)
            }
            _ => counts,
        }
    }

    pub(crate) fn volts(&self, regs: crate::pac::sar::Sar, chan: u8, counts: i16) -> f32 {
        self.calibration[chan as usize].to_volts(self.unaveraged(regs, chan, counts))
    }

    pub(crate) fn millivolts(&self, regs: crate::pac::sar::Sar, chan: u8, counts: i16) -> i16 {
        self.calibration[chan as usize].to_millivolts(self.unaveraged(regs, chan, counts))
    }

    pub(crate) fn microvolts(&self, regs: crate::pac::sar::Sar, chan: u8, counts: i16) -> i32 {
        self.calibration[chan as usize].to_microvolts(self.unaveraged(regs, chan, counts))
    }
}

/// One channel of a SAR, read in volts.
pub struct SarInput<'d, T: Instance> {
    sar: Sar<'d, T>,
    chan: u8,
}

impl<'d, T: Instance> SarInput<'d, T> {
    pub fn sar(&self) -> &Sar<'d, T> {
        &self.sar
    }

    pub fn sar_mut(&mut self) -> &mut Sar<'d, T> {
        &mut self.sar
    }

    pub fn channel(&self) -> u8 {
        self.chan
    }
}

impl<'d, T: Instance> crate::app::VoltageInput for SarInput<'d, T> {
    fn read_volts(&mut self) -> f32 {
        let counts = self.sar.result16(self.chan);
        self.sar.counts_to_volts(self.chan, counts)
    }
}

impl<'d, T, P> embedded_hal_02::adc::OneShot<T, i16, P> for Sar<'d, T>
where
    T: Instance,
    P: embedded_hal_02::adc::Channel<T, ID = u8>,
{
    type Error = Error;

    /// Software-triggered read of the sequencer channel wired to `P`.
    ///
    /// Polls INTR.EOS, so leave EOS masked while using it.
    fn read(&mut self, _pin: &mut P) -> nb::Result<i16, Error> {
        poll_oneshot(T::regs(), P::channel(), &mut self.oneshot_pending)
    }
}

/// Programs everything but the channels and the enable bit.
pub(crate) fn configure_sar(regs: crate::pac::sar::Sar, config: &SarConfig) -> Result<(), Error> {
    let avg_cnt = config.avg_cnt()?;
    if config.vref_mv == 0 {
        return Err(Error::BadParam);
    }
    if config
        .sample_times
        .iter()
        .any(|&t| t == 0 || t as u32 > sample_time::LOW.max())
    {
        return Err(Error::BadParam);
    }

    let mut ctrl_val = ctrl::VREF_SEL.val(config.vref as u32) | ctrl::NEG_SEL.val(config.neg as u32);
    if config.neg == NegSel::Vref {
        ctrl_val |= ctrl::SAR_HW_CTRL_NEGVREF;
    }
    if config.vref == VrefSel::Bgr {
        ctrl_val |= ctrl::REFBUF_EN;
    }
    if config.bypass_cap {
        ctrl_val |= ctrl::VREF_BYP_CAP_EN;
    }

    let mut sample_val = sample_ctrl::AVG_CNT.val(avg_cnt);
    if config.signed {
        sample_val |= sample_ctrl::SINGLE_ENDED_SIGNED;
    }
    if config.averaging.is_some_and(|a| a.shift) {
        sample_val |= sample_ctrl::AVG_SHIFT;
    }
    if config.hw_trigger {
        sample_val |= sample_ctrl::DSI_TRIGGER_EN;
    }
    if config.continuous {
        sample_val |= sample_ctrl::CONTINUOUS;
    }

    let [t0, t1, t2, t3] = config.sample_times.map(u32::from);

    regs.ctrl().write(ctrl_val);
    regs.sample_ctrl().write(sample_val);
    regs.sample_time01().write(sample_time::LOW.val(t0) | sample_time::HIGH.val(t1));
    regs.sample_time23().write(sample_time::LOW.val(t2) | sample_time::HIGH.val(t3));
    regs.chan_en().write(0);
    regs.mux_switch_clear0().write(u32::MAX);
    regs.mux_switch_sq_ctrl().write(0);
    regs.intr_mask().write(0);
    regs.intr().write(intr::ALL);

    debug!("sar: ctrl {:x} sample_ctrl {:x}", ctrl_val, sample_val);
    Ok(())
}

/// Sets the enable bit, refusing a SAR with no channel in its sequencer.
pub(crate) fn power_up(regs: crate::pac::sar::Sar) -> Result<(), Error> {
    if regs.chan_en().read() == 0 {
        return Err(Error::BadParam);
    }
    regs.ctrl().set_bits(ctrl::ENABLED);
    Ok(())
}

pub(crate) fn channel_enabled(regs: crate::pac::sar::Sar, chan: u8) -> bool {
    (chan as usize) < CHANNEL_COUNT && regs.chan_en().read() & (1 << chan) != 0
}

/// Routes SARMUX pin `pin` to sequencer channel `chan` and enables the channel.
pub(crate) fn configure_channel(
    regs: crate::pac::sar::Sar,
    chan: usize,
    pin: u8,
    config: &ChannelConfig,
) -> Result<(), Error> {
    if chan >= CHANNEL_COUNT || pin as u32 > chan_config::POS_PIN_ADDR.max() || config.sample_time_sel > 3 {
        return Err(Error::BadParam);
    }

    let mut val = chan_config::POS_PIN_ADDR.val(pin as u32)
        | chan_config::POS_PORT_ADDR.val(PortAddr::Sarmux as u32)
        | chan_config::SAMPLE_TIME_SEL.val(config.sample_time_sel as u32);
    if config.average {
        val |= chan_config::AVG_EN;
    }
    regs.chan_config(chan).write(val);

    regs.mux_switch0()
        .set_bits(mux_switch::vplus(pin) | mux_switch::VSSA_VMINUS);
    regs.mux_switch_sq_ctrl()
        .set_bits(mux_switch::vplus(pin) | mux_switch::SQ_VSSA);
    regs.chan_en().set_bits(1 << chan);

    trace!("sar: chan {} <- pin {}", chan, pin);
    Ok(())
}

/// Sequencer channel reading SARMUX pin `pin`, if one is enabled.
pub(crate) fn find_channel(regs: crate::pac::sar::Sar, pin: u8) -> Option<usize> {
    let enabled = regs.chan_en().read();
    (0..CHANNEL_COUNT).find(|&chan| {
        enabled & (1 << chan) != 0 && {
            let cfg = regs.chan_config(chan).read();
            chan_config::POS_PIN_ADDR.get(cfg) == pin as u32
                && chan_config::POS_PORT_ADDR.get(cfg) == PortAddr::Sarmux as u32
        }
    })
}

/// First call starts a scan, later calls wait for its EOS.
pub(crate) fn poll_oneshot(regs: crate::pac::sar::Sar, pin: u8, pending: &mut bool) -> nb::Result<i16, Error> {
    let chan = find_channel(regs, pin).ok_or(nb::Error::Other(Error::ChannelNotConfigured))?;

    if !*pending {
        regs.intr().write(intr::EOS);
        regs.start_ctrl().write(start_ctrl::FW_TRIGGER);
        *pending = true;
        return Err(nb::Error::WouldBlock);
    }

    if regs.intr().read() & intr::EOS == 0 {
        return Err(nb::Error::WouldBlock);
    }
    regs.intr().write(intr::EOS);
    *pending = false;
    Ok(regs.chan_result(chan).read_field(chan_result::RESULT) as u16 as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    const CTRL: usize = 0x000;
    const SAMPLE_CTRL: usize = 0x004;
    const SAMPLE_TIME01: usize = 0x010;
    const CHAN_EN: usize = 0x020;
    const START_CTRL: usize = 0x024;
    const INTR: usize = 0x210;
    const INTR_MASKED: usize = 0x21C;
    const MUX_SWITCH0: usize = 0x300;
    const MUX_SWITCH_SQ_CTRL: usize = 0x340;

    fn chan_config_at(n: usize) -> usize {
        0x080 + 4 * n
    }

    fn chan_result_at(n: usize) -> usize {
        0x180 + 4 * n
    }

    fn sar(mem: &mut FakeBlock) -> crate::pac::sar::Sar {
        unsafe { crate::pac::sar::Sar::from_ptr(mem.ptr()) }
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 2e-3
    }

    #[test]
    fn default_config_registers() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);

        configure_sar(regs, &SarConfig::default()).unwrap();

        assert_eq!(mem.word(CTRL), 7 << 4);
        assert_eq!(mem.word(SAMPLE_CTRL), 1 << 17);
        assert_eq!(mem.word(SAMPLE_TIME01), 4 | (4 << 16));
        assert_eq!(mem.word(CHAN_EN), 0);
        assert_eq!(mem.word(INTR), intr::ALL);
    }

    #[test]
    fn averaging_and_reference() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let config = SarConfig {
            vref: VrefSel::Bgr,
            neg: NegSel::Vref,
            signed: true,
            averaging: Some(Averaging { count: 16, shift: true }),
            hw_trigger: false,
            ..SarConfig::default()
        };

        configure_sar(regs, &config).unwrap();

        assert_eq!(mem.word(CTRL), (4 << 4) | (7 << 9) | (1 << 13) | (1 << 21));
        assert_eq!(mem.word(SAMPLE_CTRL), (1 << 2) | (3 << 4) | (1 << 7));
    }

    #[test]
    fn rejects_bad_sar_config() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let base = SarConfig::default();

        let odd_average = SarConfig {
            averaging: Some(Averaging { count: 3, shift: false }),
            ..base
        };
        let too_many = SarConfig {
            averaging: Some(Averaging { count: 512, shift: false }),
            ..base
        };
        let zero_time = SarConfig {
            sample_times: [4, 0, 4, 4],
            ..base
        };
        let long_time = SarConfig {
            sample_times: [1024, 4, 4, 4],
            ..base
        };

        assert_eq!(configure_sar(regs, &odd_average), Err(Error::BadParam));
        assert_eq!(configure_sar(regs, &too_many), Err(Error::BadParam));
        assert_eq!(configure_sar(regs, &zero_time), Err(Error::BadParam));
        assert_eq!(configure_sar(regs, &long_time), Err(Error::BadParam));
        assert_eq!(mem.word(CTRL), 0);
    }

    #[test]
    fn accumulate_limited_to_sixteen_samples() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let summed = SarConfig {
            averaging: Some(Averaging { count: 32, shift: false }),
            ..SarConfig::default()
        };
        let shifted = SarConfig {
            averaging: Some(Averaging { count: 32, shift: true }),
            ..SarConfig::default()
        };

        assert_eq!(configure_sar(regs, &summed), Err(Error::BadParam));
        assert_eq!(configure_sar(regs, &shifted), Ok(()));
    }

    #[test]
    fn power_up_needs_a_channel() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        configure_sar(regs, &SarConfig::default()).unwrap();

        assert_eq!(power_up(regs), Err(Error::BadParam));
        assert_eq!(mem.word(CTRL) & ctrl::ENABLED, 0);

        configure_channel(regs, 0, 0, &ChannelConfig::default()).unwrap();
        assert_eq!(power_up(regs), Ok(()));
        assert_ne!(mem.word(CTRL) & ctrl::ENABLED, 0);
    }

    #[test]
    fn input_channel_must_be_enabled() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        configure_channel(regs, 2, 0, &ChannelConfig::default()).unwrap();

        assert!(channel_enabled(regs, 2));
        assert!(!channel_enabled(regs, 0));
        assert!(!channel_enabled(regs, 16));
    }

    #[test]
    fn summed_results_divided_on_averaging_channels() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let config = SarConfig {
            averaging: Some(Averaging { count: 16, shift: false }),
            ..SarConfig::default()
        };
        configure_sar(regs, &config).unwrap();
        let averaging = ChannelConfig {
            average: true,
            ..ChannelConfig::default()
        };
        configure_channel(regs, 0, 0, &averaging).unwrap();
        configure_channel(regs, 1, 2, &ChannelConfig::default()).unwrap();
        let scaling = Scaling::new(&config);

        // Sixteen full-scale samples: 65520, negative once read as i16.
        let full = (16 * 4095u32) as u16 as i16;
        assert!(close(scaling.volts(regs, 0, full), 3.299));
        let half = (16 * 2048u32) as u16 as i16;
        assert_eq!(scaling.millivolts(regs, 0, half), 1650);

        // Channel 1 does not average.
        assert!(close(scaling.volts(regs, 1, 4095), 3.299));
    }

    #[test]
    fn shifted_average_used_as_is() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let config = SarConfig {
            averaging: Some(Averaging { count: 16, shift: true }),
            ..SarConfig::default()
        };
        configure_sar(regs, &config).unwrap();
        let averaging = ChannelConfig {
            average: true,
            ..ChannelConfig::default()
        };
        configure_channel(regs, 0, 0, &averaging).unwrap();
        let scaling = Scaling::new(&config);

        assert!(close(scaling.volts(regs, 0, 4095), 3.299));
        assert_eq!(scaling.microvolts(regs, 0, 1241), 999_838);
    }

    #[test]
    fn signed_sum_divided() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let config = SarConfig {
            vref_mv: 1200,
            neg: NegSel::Vref,
            signed: true,
            averaging: Some(Averaging { count: 8, shift: false }),
            ..SarConfig::default()
        };
        configure_sar(regs, &config).unwrap();
        let averaging = ChannelConfig {
            average: true,
            ..ChannelConfig::default()
        };
        configure_channel(regs, 0, 0, &averaging).unwrap();
        let scaling = Scaling::new(&config);

        assert!(close(scaling.volts(regs, 0, -2048 * 8), 0.0));
        assert!(close(scaling.volts(regs, 0, 0), 1.2));
    }

    #[test]
    fn channel_routing() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);

        let config = ChannelConfig {
            sample_time_sel: 1,
            average: true,
        };
        configure_channel(regs, 0, 2, &config).unwrap();

        assert_eq!(mem.word(chan_config_at(0)), 2 | (1 << 10) | (1 << 12));
        assert_eq!(mem.word(CHAN_EN), 1);
        assert_eq!(mem.word(MUX_SWITCH0), (1 << 2) | (1 << 16));
        assert_eq!(mem.word(MUX_SWITCH_SQ_CTRL), (1 << 2) | (1 << 16));

        assert_eq!(find_channel(regs, 2), Some(0));
        assert_eq!(find_channel(regs, 0), None);

        assert_eq!(configure_channel(regs, 16, 0, &config), Err(Error::BadParam));
        assert_eq!(configure_channel(regs, 1, 8, &config), Err(Error::BadParam));
    }

    #[test]
    fn eos_sets_flag_and_clears_all() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let flags = ScanFlags::new();

        // Overflow only: acknowledged, no flag.
        mem.set_word(INTR_MASKED, intr::OVERFLOW);
        handle_eos(regs, &flags, 1);
        assert!(!flags.is_set(1));
        assert_eq!(mem.word(INTR), intr::ALL);

        mem.set_word(INTR_MASKED, intr::EOS);
        handle_eos(regs, &flags, 1);
        assert!(flags.is_set(1));
        assert!(!flags.is_set(0));
    }

    #[test]
    fn oneshot_starts_then_waits() {
        let mut mem = FakeBlock::new(0x400);
        let regs = sar(&mut mem);
        let mut pending = false;

        assert_eq!(
            poll_oneshot(regs, 0, &mut pending),
            Err(nb::Error::Other(Error::ChannelNotConfigured))
        );

        configure_channel(regs, 3, 0, &ChannelConfig::default()).unwrap();
        mem.set_word(chan_result_at(3), 0x0800);

        assert_eq!(poll_oneshot(regs, 0, &mut pending), Err(nb::Error::WouldBlock));
        assert!(pending);
        assert_eq!(mem.word(START_CTRL), 1);

        // INTR is write-one-to-clear on silicon; RAM keeps the written bit.
        mem.set_word(INTR, 0);
        assert_eq!(poll_oneshot(regs, 0, &mut pending), Err(nb::Error::WouldBlock));

        mem.set_word(INTR, intr::EOS);
        assert_eq!(poll_oneshot(regs, 0, &mut pending), Ok(0x0800));
        assert!(!pending);
    }
}
