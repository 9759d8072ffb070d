//! The acquire, multiply, output loop body.
//!
//! Generic over its I/O so the same cycle runs against the SAR, CTDAC and
//! UART drivers on hardware and against plain structs in tests.

use crate::adc::ScanFlags;
use crate::console;
use crate::ctdac::DacOut;
use crate::multiplier::Reading;

/// A source of one voltage per scan.
pub trait VoltageInput {
    /// Latest converted result, in volts.
    fn read_volts(&mut self) -> f32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// Waiting for the console to drain failed.
    Io(E),
    /// Writing the reading line failed.
    Fmt,
}

pub struct Pipeline<A, B, D, C> {
    pub sar0: A,
    pub sar1: B,
    pub dac: D,
    pub console: C,
}

impl<A, B, D, C> Pipeline<A, B, D, C>
where
    A: VoltageInput,
    B: VoltageInput,
    D: DacOut<u16>,
    C: core::fmt::Write + embedded_io::Write,
{
    pub fn new(sar0: A, sar1: B, dac: D, console: C) -> Self {
        Self {
            sar0,
            sar1,
            dac,
            console,
        }
    }

    /// Runs one cycle and returns what was measured and output.
    ///
    /// Drains the console first so the UART is idle before the core
    /// sleeps, then calls `idle` until both SARs have signalled end of scan.
    pub fn run_cycle(&mut self, flags: &ScanFlags, idle: impl FnMut()) -> Result<Reading, Error<C::Error>> {
        embedded_io::Write::flush(&mut self.console).map_err(Error::Io)?;

        flags.wait_both(idle);

        let v0 = self.sar0.read_volts();
        let v1 = self.sar1.read_volts();
        let reading = Reading::new(v0, v1);

        self.dac.set_value(reading.code);
        console::write_reading(&mut self.console, &reading).map_err(|_| Error::Fmt)?;

        trace!("cycle: product {} code {}", reading.product, reading.code);
        Ok(reading)
    }
}
