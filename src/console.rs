//! Text written to the debug terminal.

use core::fmt::{self, Write};

use crate::multiplier::Reading;

/// ANSI: clear screen, cursor home.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[;H";

const RULER: &str = "-----------------------------------------------------------\r\n";

pub fn write_banner<W: Write>(w: &mut W) -> fmt::Result {
    w.write_str(CLEAR_SCREEN)?;
    w.write_str(RULER)?;
    w.write_str("PSoC 6 MCU: Simultaneous Sampling SAR ADCs \r\n")?;
    w.write_str(RULER)?;
    w.write_str("\n")?;
    w.write_str("Provide input voltages at pin P10.0 and P10.2 and observe \r\n")?;
    w.write_str("the scaled product of inputs on pin P9.2.\r\n\n")
}

pub fn write_reading<W: Write>(w: &mut W, reading: &Reading) -> fmt::Result {
    write!(w, "SAR0 input: {:.2}V \t SAR1 input: {:.2}V\r\n", reading.v0, reading.v1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_text() {
        let mut s = String::new();
        write_banner(&mut s).unwrap();

        assert!(s.starts_with("\x1b[2J\x1b[;H---"));
        assert!(s.contains("\r\nPSoC 6 MCU: Simultaneous Sampling SAR ADCs \r\n---"));
        assert!(s.contains("-\r\n\nProvide input voltages at pin P10.0 and P10.2"));
        assert!(s.ends_with("the scaled product of inputs on pin P9.2.\r\n\n"));
        assert_eq!(s.matches(RULER).count(), 2);
    }

    #[test]
    fn reading_line() {
        let mut s = String::new();
        write_reading(&mut s, &Reading::new(1.234, 0.0)).unwrap();
        assert_eq!(s, "SAR0 input: 1.23V \t SAR1 input: 0.00V\r\n");

        s.clear();
        write_reading(&mut s, &Reading::new(3.299, 0.456)).unwrap();
        assert_eq!(s, "SAR0 input: 3.30V \t SAR1 input: 0.46V\r\n");
    }
}
