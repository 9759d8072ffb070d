//! UART on a serial communication block (SCB)
//!
//! Blocking only. The driver never returns I/O errors: writes wait for FIFO
//! space and reads wait for data.

use core::convert::Infallible;

use embassy_hal_internal::into_ref;

use crate::clock::{self, Divider, DividerType};
use crate::gpio::SealedPin;
use crate::pac::gpio::vals::{DriveMode, HSIOM_ACT_6};
use crate::pac::peri::pclk;
use crate::pac::scb::{ctrl, data_ctrl, fifo_ctrl, fifo_status, uart_ctrl, uart_frame_ctrl, Scb, FIFO_DEPTH};
use crate::time::Hertz;
use crate::{peripherals, Peripheral, PeripheralRef};

/// PERI divider clocking the UART's SCB.
pub const UART_DIVIDER: Divider = Divider::new(DividerType::Div16_5, 0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    #[doc = "1 stop bit"]
    STOP1,
    #[doc = "1.5 stop bits"]
    STOP1P5,
    #[doc = "2 stop bits"]
    STOP2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    ParityNone,
    ParityEven,
    ParityOdd,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub baudrate: u32,
    /// Clock cycles per bit (8..=16).
    pub oversample: u8,
    /// Data bits per frame (5..=9).
    pub data_bits: u8,
    pub stop_bits: StopBits,
    pub parity: Parity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            oversample: 12,
            data_bits: 8,
            stop_bits: StopBits::STOP1,
            parity: Parity::ParityNone,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The divider cannot go slow enough.
    BaudrateTooLow,
    /// The divider cannot go fast enough.
    BaudrateTooHigh,
    DataBitsNotSupported,
    OversampleNotSupported,
}

trait SealedInstance {
    fn regs() -> Scb;
    const PCLK: usize;
}

/// SCB instance usable as a UART.
#[allow(private_bounds)]
pub trait Instance: SealedInstance + Peripheral<P = Self> + 'static {}

impl SealedInstance for peripherals::SCB2 {
    fn regs() -> Scb {
        crate::pac::SCB2
    }
    const PCLK: usize = pclk::SCB2_CLOCK;
}

impl Instance for peripherals::SCB2 {}

pin_trait!(RxPin, Instance);
pin_trait!(TxPin, Instance);

pin_trait_impl!(crate::uart::RxPin, SCB2, P3_0, HSIOM_ACT_6);
pin_trait_impl!(crate::uart::TxPin, SCB2, P3_1, HSIOM_ACT_6);

/// Blocking UART.
pub struct Uart<'d, T: Instance> {
    _peri: PeripheralRef<'d, T>,
    regs: Scb,
}

impl<'d, T: Instance> Uart<'d, T> {
    pub fn new_blocking(
        peri: impl Peripheral<P = T> + 'd,
        rx: impl Peripheral<P = impl RxPin<T>> + 'd,
        tx: impl Peripheral<P = impl TxPin<T>> + 'd,
        config: Config,
    ) -> Result<Self, ConfigError> {
        into_ref!(peri, rx, tx);

        let peri_clk = unsafe { clock::get_freqs() }.peri;
        let (int, frac) = divider_for(peri_clk, &config)?;
        clock::set_divider(UART_DIVIDER, int, frac).map_err(|_| ConfigError::BaudrateTooLow)?;
        clock::assign(T::PCLK, UART_DIVIDER);

        tx.set_as_af(tx.hsiom(), DriveMode::Strong, false);
        rx.set_as_af(rx.hsiom(), DriveMode::Analog, true);

        let regs = T::regs();
        configure(regs, &config)?;
        regs.ctrl().set_bits(ctrl::ENABLED);

        debug!(
            "uart: {} baud, divider {}+{}/32 from {} Hz",
            config.baudrate, int, frac, peri_clk.0
        );
        Ok(Self {
            _peri: peri,
            regs,
        })
    }

    pub fn blocking_write(&mut self, buffer: &[u8]) -> Result<(), Infallible> {
        write_bytes(self.regs, buffer);
        Ok(())
    }

    /// Waits until the FIFO and the shift register are empty.
    pub fn blocking_flush(&mut self) -> Result<(), Infallible> {
        while self.is_tx_active() {}
        Ok(())
    }

    pub fn blocking_read(&mut self, buffer: &mut [u8]) -> Result<(), Infallible> {
        for b in buffer {
            while rx_available(self.regs) == 0 {}
            *b = self.regs.rx_fifo_rd().read() as u8;
        }
        Ok(())
    }

    pub fn is_tx_active(&self) -> bool {
        tx_active(self.regs)
    }
}

/// Divider setting for `config.baudrate` at `config.oversample` clocks per bit.
pub(crate) fn divider_for(peri: Hertz, config: &Config) -> Result<(u32, u32), ConfigError> {
    if !(8..=16).contains(&config.oversample) {
        return Err(ConfigError::OversampleNotSupported);
    }
    if config.baudrate == 0 {
        return Err(ConfigError::BaudrateTooLow);
    }
    let target = Hertz(config.baudrate.saturating_mul(config.oversample as u32));
    let (int, frac) = clock::fractional_divider(peri, target).ok_or(ConfigError::BaudrateTooHigh)?;
    if int > 1 << 16 {
        return Err(ConfigError::BaudrateTooLow);
    }
    Ok((int, frac))
}

pub(crate) fn configure(regs: Scb, config: &Config) -> Result<(), ConfigError> {
    if !(5..=9).contains(&config.data_bits) {
        return Err(ConfigError::DataBitsNotSupported);
    }
    if !(8..=16).contains(&config.oversample) {
        return Err(ConfigError::OversampleNotSupported);
    }

    // Stop bits are counted in half bits, minus one.
    let stop = match config.stop_bits {
        StopBits::STOP1 => 1,
        StopBits::STOP1P5 => 2,
        StopBits::STOP2 => 3,
    };
    let mut frame = uart_frame_ctrl::STOP_BITS.val(stop);
    match config.parity {
        Parity::ParityNone => {}
        Parity::ParityEven => frame |= uart_frame_ctrl::PARITY_ENABLED,
        Parity::ParityOdd => frame |= uart_frame_ctrl::PARITY_ENABLED | uart_frame_ctrl::PARITY,
    }
    let width = data_ctrl::DATA_WIDTH.val(config.data_bits as u32 - 1);

    let mut ctrl_val = ctrl::OVS.val(config.oversample as u32 - 1) | ctrl::MODE.val(ctrl::MODE_UART);
    if config.data_bits <= 8 {
        ctrl_val |= ctrl::BYTE_MODE;
    }

    regs.ctrl().write(ctrl_val);
    regs.uart_ctrl().write(uart_ctrl::MODE.val(0));
    regs.uart_tx_ctrl().write(frame);
    regs.uart_rx_ctrl().write(frame);
    regs.tx_ctrl().write(width);
    regs.rx_ctrl().write(width | data_ctrl::MEDIAN);

    regs.tx_fifo_ctrl().write(fifo_ctrl::CLEAR);
    regs.tx_fifo_ctrl().write(0);
    regs.rx_fifo_ctrl().write(fifo_ctrl::CLEAR);
    regs.rx_fifo_ctrl().write(0);
    Ok(())
}

fn tx_active(regs: Scb) -> bool {
    let status = regs.tx_fifo_status().read();
    fifo_status::USED.get(status) > 0 || status & fifo_status::SR_VALID != 0
}

fn tx_full(regs: Scb) -> bool {
    regs.tx_fifo_status().read_field(fifo_status::USED) >= FIFO_DEPTH
}

fn rx_available(regs: Scb) -> u32 {
    regs.rx_fifo_status().read_field(fifo_status::USED)
}

fn write_bytes(regs: Scb, buffer: &[u8]) {
    for &b in buffer {
        while tx_full(regs) {}
        regs.tx_fifo_wr().write(b as u32);
    }
}

impl<'d, T: Instance> core::fmt::Write for Uart<'d, T> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        write_bytes(self.regs, s.as_bytes());
        Ok(())
    }
}

impl<'d, T: Instance> embedded_io::ErrorType for Uart<'d, T> {
    type Error = Infallible;
}

impl<'d, T: Instance> embedded_io::Write for Uart<'d, T> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.blocking_write(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.blocking_flush()
    }
}

impl<'d, T: Instance> embedded_io::Read for Uart<'d, T> {
    /// Blocks for the first byte, then takes whatever else is already buffered.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.blocking_read(&mut buf[..1])?;
        let mut n = 1;
        while n < buf.len() && rx_available(self.regs) > 0 {
            buf[n] = self.regs.rx_fifo_rd().read() as u8;
            n += 1;
        }
        Ok(n)
    }
}

impl<'d, T: Instance> embedded_hal_nb::serial::ErrorType for Uart<'d, T> {
    type Error = Infallible;
}

impl<'d, T: Instance> embedded_hal_nb::serial::Write for Uart<'d, T> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        if tx_full(self.regs) {
            return Err(nb::Error::WouldBlock);
        }
        self.regs.tx_fifo_wr().write(word as u32);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.is_tx_active() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}

impl<'d, T: Instance> embedded_hal_nb::serial::Read for Uart<'d, T> {
    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        if rx_available(self.regs) == 0 {
            return Err(nb::Error::WouldBlock);
        }
        Ok(self.regs.rx_fifo_rd().read() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::FakeBlock;

    #[test]
    fn divider_for_115200() {
        assert_eq!(divider_for(Hertz::mhz(8), &Config::default()), Ok((5, 25)));
    }

    #[test]
    fn baudrate_limits() {
        let fast = Config {
            baudrate: 1_000_000,
            ..Config::default()
        };
        let slow = Config {
            baudrate: 1,
            ..Config::default()
        };
        let odd_ovs = Config {
            oversample: 4,
            ..Config::default()
        };
        assert_eq!(divider_for(Hertz::mhz(8), &fast), Err(ConfigError::BaudrateTooHigh));
        assert_eq!(divider_for(Hertz::mhz(8), &slow), Err(ConfigError::BaudrateTooLow));
        assert_eq!(divider_for(Hertz::mhz(8), &odd_ovs), Err(ConfigError::OversampleNotSupported));
    }

    #[test]
    fn frame_registers_8n1() {
        let mut mem = FakeBlock::new(0x1000);
        let regs = unsafe { Scb::from_ptr(mem.ptr()) };

        configure(regs, &Config::default()).unwrap();

        assert_eq!(mem.word(0x000), 11 | (1 << 11) | (2 << 24));
        assert_eq!(mem.word(0x044), 1);
        assert_eq!(mem.word(0x048), 1);
        assert_eq!(mem.word(0x200), 7);
        assert_eq!(mem.word(0x300), 7 | (1 << 9));
    }

    #[test]
    fn frame_registers_7o2() {
        let mut mem = FakeBlock::new(0x1000);
        let regs = unsafe { Scb::from_ptr(mem.ptr()) };
        let config = Config {
            data_bits: 7,
            stop_bits: StopBits::STOP2,
            parity: Parity::ParityOdd,
            ..Config::default()
        };

        configure(regs, &config).unwrap();

        assert_eq!(mem.word(0x044), 3 | (1 << 4) | (1 << 5));
        assert_eq!(mem.word(0x200), 6);

        let wide = Config {
            data_bits: 10,
            ..Config::default()
        };
        assert_eq!(configure(regs, &wide), Err(ConfigError::DataBitsNotSupported));
    }

    #[test]
    fn fifo_status_helpers() {
        let mut mem = FakeBlock::new(0x1000);
        let regs = unsafe { Scb::from_ptr(mem.ptr()) };

        assert!(!tx_active(regs));
        write_bytes(regs, b"ok");
        assert_eq!(mem.word(0x240), b'k' as u32);

        mem.set_word(0x208, 1 << 15);
        assert!(tx_active(regs));
        mem.set_word(0x208, 128);
        assert!(tx_full(regs));

        mem.set_word(0x308, 3);
        assert_eq!(rx_available(regs), 3);
    }
}
