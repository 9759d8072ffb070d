//! TCPWM counters
//!
//! Only timer mode is exposed: a free-running counter whose overflow (or
//! terminal count) trigger paces the SAR scans.

use embassy_hal_internal::into_ref;

use crate::clock::{self, Divider, DividerType};
use crate::pac::peri::pclk;
use crate::pac::tcpwm::{cnt_ctrl, intr, tr_ctrl0, vals, Tcpwm};
use crate::pac::TCPWM0;
use crate::time::Hertz;
use crate::{peripherals, Peripheral, PeripheralRef};

/// PERI divider clocking TCPWM0 counter 0.
pub const COUNTER_DIVIDER: Divider = Divider::new(DividerType::Div16, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    BadParam,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunMode {
    Continuous,
    OneShot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountDirection {
    Up = 0,
    Down = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptSource {
    None,
    TerminalCount,
    CompareMatch,
    Both,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    pub prescaler: Prescaler,
    /// Value the counter wraps at; one period lasts `period + 1` counts.
    pub period: u32,
    pub compare: u32,
    pub run_mode: RunMode,
    pub direction: CountDirection,
    pub interrupt: InterruptSource,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            prescaler: Prescaler::Div1,
            period: 0xFFFF_FFFF,
            compare: 0,
            run_mode: RunMode::Continuous,
            direction: CountDirection::Up,
            interrupt: InterruptSource::None,
        }
    }
}

impl CounterConfig {
    /// Continuous up-counter overflowing `rate` times per second.
    pub fn for_rate(counter_clock: Hertz, rate: Hertz) -> Result<Self, Error> {
        Self::for_rate_with(counter_clock, Prescaler::Div1, rate, u32::MAX)
    }

    /// As [`for_rate`](Self::for_rate), for a counter `max_period` wide.
    pub fn for_rate_with(
        counter_clock: Hertz,
        prescaler: Prescaler,
        rate: Hertz,
        max_period: u32,
    ) -> Result<Self, Error> {
        if rate.0 == 0 {
            return Err(Error::BadParam);
        }
        let ticks = counter_clock.0 / prescaler.divisor() / rate.0;
        if ticks < 2 || ticks - 1 > max_period {
            return Err(Error::BadParam);
        }
        Ok(Self {
            prescaler,
            period: ticks - 1,
            interrupt: InterruptSource::TerminalCount,
            ..Self::default()
        })
    }
}

/// TCPWM0 counter 0.
pub struct Counter<'d> {
    _p: PeripheralRef<'d, peripherals::TCPWM0_CNT0>,
    regs: Tcpwm,
    index: usize,
}

impl<'d> Counter<'d> {
    /// Clocks the counter at `counter_clock`, derived from `clk_peri` by an
    /// integer divider, and programs it. The counter is left disabled.
    pub fn new(
        p: impl Peripheral<P = peripherals::TCPWM0_CNT0> + 'd,
        counter_clock: Hertz,
        config: CounterConfig,
    ) -> Result<Self, Error> {
        into_ref!(p);

        let peri = unsafe { clock::get_freqs() }.peri;
        let div = counter_divider(peri, counter_clock)?;
        clock::set_divider(COUNTER_DIVIDER, div, 0).map_err(|_| Error::BadParam)?;
        clock::assign(pclk::TCPWM0_CLOCKS0, COUNTER_DIVIDER);

        configure_counter(TCPWM0, 0, &config)?;
        Ok(Self {
            _p: p,
            regs: TCPWM0,
            index: 0,
        })
    }

    pub fn enable(&mut self) {
        self.regs.ctrl_set().write(1 << self.index);
    }

    pub fn disable(&mut self) {
        self.regs.ctrl_clr().write(1 << self.index);
    }

    /// Software start.
    pub fn trigger_start(&mut self) {
        self.regs.cmd_start().write(1 << self.index);
    }

    pub fn stop(&mut self) {
        self.regs.cmd_stop().write(1 << self.index);
    }

    pub fn counter(&self) -> u32 {
        self.regs.cnt(self.index).counter().read()
    }

    pub fn is_running(&self) -> bool {
        self.regs
            .cnt(self.index)
            .status()
            .is_set(crate::pac::tcpwm::status::RUNNING)
    }

    pub fn clear_interrupt(&mut self) {
        self.regs.cnt(self.index).intr().write(intr::TC | intr::CC_MATCH);
    }
}

/// Integer PERI divide value giving exactly `counter_clock` from `peri`.
pub(crate) fn counter_divider(peri: Hertz, counter_clock: Hertz) -> Result<u32, Error> {
    if counter_clock.0 == 0 || peri.0 % counter_clock.0 != 0 {
        return Err(Error::BadParam);
    }
    let div = peri.0 / counter_clock.0;
    if div == 0 || div > 1 << 16 {
        return Err(Error::BadParam);
    }
    Ok(div)
}

pub(crate) fn configure_counter(regs: Tcpwm, n: usize, config: &CounterConfig) -> Result<(), Error> {
    if config.period == 0 || n >= crate::pac::tcpwm::COUNTER_COUNT {
        return Err(Error::BadParam);
    }
    let cnt = regs.cnt(n);

    let mut ctrl = cnt_ctrl::MODE.val(vals::MODE_TIMER)
        | cnt_ctrl::GENERIC.val(config.prescaler as u32)
        | cnt_ctrl::UP_DOWN_MODE.val(config.direction as u32);
    if config.run_mode == RunMode::OneShot {
        ctrl |= cnt_ctrl::ONE_SHOT;
    }
    let mask = match config.interrupt {
        InterruptSource::None => 0,
        InterruptSource::TerminalCount => intr::TC,
        InterruptSource::CompareMatch => intr::CC_MATCH,
        InterruptSource::Both => intr::TC | intr::CC_MATCH,
    };

    regs.ctrl_clr().write(1 << n);
    cnt.ctrl().write(ctrl);
    cnt.period().write(config.period);
    cnt.cc().write(config.compare);
    cnt.counter().write(match config.direction {
        CountDirection::Up => 0,
        CountDirection::Down => config.period,
    });
    cnt.tr_ctrl0().write(
        tr_ctrl0::COUNT_SEL.val(vals::TR_SEL_ALWAYS)
            | tr_ctrl0::START_SEL.val(vals::TR_SEL_NONE)
            | tr_ctrl0::STOP_SEL.val(vals::TR_SEL_NONE)
            | tr_ctrl0::RELOAD_SEL.val(vals::TR_SEL_NONE)
            | tr_ctrl0::CAPTURE_SEL.val(vals::TR_SEL_NONE),
    );
    cnt.intr_mask().write(mask);

    debug!("tcpwm0 cnt{}: ctrl {:x} period {}", n, ctrl, config.period);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn period_for_rate() {
        let config = CounterConfig::for_rate(Hertz::mhz(1), Hertz(10)).unwrap();
        assert_eq!(config.period, 99_999);
        assert_eq!(config.interrupt, InterruptSource::TerminalCount);

        let slow = CounterConfig::for_rate_with(Hertz::mhz(1), Prescaler::Div8, Hertz(10), u32::MAX).unwrap();
        assert_eq!(slow.period, 12_499);
    }

    #[test]
    fn period_out_of_range() {
        assert_eq!(CounterConfig::for_rate(Hertz::mhz(1), Hertz(0)), Err(Error::BadParam));
        assert_eq!(CounterConfig::for_rate(Hertz(100), Hertz(100)), Err(Error::BadParam));
        // 1 MHz / 10 Hz does not fit a 16-bit counter.
        assert_eq!(
            CounterConfig::for_rate_with(Hertz::mhz(1), Prescaler::Div1, Hertz(10), 0xFFFF),
            Err(Error::BadParam)
        );
    }

    #[test]
    fn divider_from_peri_clock() {
        assert_eq!(counter_divider(Hertz::mhz(8), Hertz::mhz(1)), Ok(8));
        assert_eq!(counter_divider(Hertz::mhz(1), Hertz::mhz(8)), Err(Error::BadParam));
        assert_eq!(counter_divider(Hertz::mhz(8), Hertz(0)), Err(Error::BadParam));
        // 8 MHz / 3 MHz would run the counter at 4 MHz.
        assert_eq!(counter_divider(Hertz::mhz(8), Hertz::mhz(3)), Err(Error::BadParam));
        assert_eq!(counter_divider(Hertz::mhz(50), Hertz::khz(3)), Err(Error::BadParam));
    }

    #[test]
    fn group_commands_select_counter_bit() {
        let mut mem = FakeBlock::new(0x400);
        let mut counter = Counter {
            _p: unsafe { peripherals::TCPWM0_CNT0::steal() }.into_ref(),
            regs: unsafe { Tcpwm::from_ptr(mem.ptr()) },
            index: 3,
        };

        counter.enable();
        counter.trigger_start();
        counter.stop();
        counter.disable();
        assert_eq!(mem.word(0x008), 1 << 3);
        assert_eq!(mem.word(0x018), 1 << 3);
        assert_eq!(mem.word(0x014), 1 << 3);
        assert_eq!(mem.word(0x004), 1 << 3);

        assert!(!counter.is_running());
        mem.set_word(0x100 + 0x40 * 3 + 0x04, 1 << 31);
        mem.set_word(0x100 + 0x40 * 3 + 0x08, 1234);
        assert!(counter.is_running());
        assert_eq!(counter.counter(), 1234);

        counter.clear_interrupt();
        assert_eq!(mem.word(0x100 + 0x40 * 3 + 0x30), 0b11);
    }

    #[test]
    fn counter_registers() {
        let mut mem = FakeBlock::new(0x400);
        let regs = unsafe { Tcpwm::from_ptr(mem.ptr()) };
        let config = CounterConfig::for_rate(Hertz::mhz(1), Hertz(10)).unwrap();

        configure_counter(regs, 0, &config).unwrap();

        assert_eq!(mem.word(0x100), 0);
        assert_eq!(mem.word(0x114), 99_999);
        assert_eq!(mem.word(0x108), 0);
        assert_eq!(mem.word(0x120), 1 << 4);
        assert_eq!(mem.word(0x138), 1);
        assert_eq!(mem.word(0x004), 1);
    }

    #[test]
    fn one_shot_down_counter() {
        let mut mem = FakeBlock::new(0x400);
        let regs = unsafe { Tcpwm::from_ptr(mem.ptr()) };
        let config = CounterConfig {
            prescaler: Prescaler::Div4,
            period: 1000,
            run_mode: RunMode::OneShot,
            direction: CountDirection::Down,
            ..CounterConfig::default()
        };

        configure_counter(regs, 1, &config).unwrap();

        assert_eq!(mem.word(0x140), (2 << 8) | (1 << 16) | (1 << 18));
        assert_eq!(mem.word(0x148), 1000);
        assert_eq!(mem.word(0x178), 0);

        let zero = CounterConfig { period: 0, ..config };
        assert_eq!(configure_counter(regs, 1, &zero), Err(Error::BadParam));
    }
}
