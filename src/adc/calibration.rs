//! Counts-to-voltage conversion.
//!
//! Each channel keeps an offset (counts) and a gain (counts per 10 V). The
//! defaults follow from the reference voltage and the negative input; they
//! can be overridden after a two-point calibration.

use crate::pac::sar::vals::NegSel;

/// Full scale of a 12-bit conversion.
pub const FULL_SCALE_COUNTS: i32 = 1 << 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Counts read for 0 V on the input.
    pub offset: i16,
    /// Counts for a 10 V swing.
    pub counts_per_10v: i32,
}

impl Calibration {
    /// Defaults for a single-ended 12-bit channel.
    ///
    /// With `Vneg = VSSA` the input spans 0..Vref over the full code range.
    /// With `Vneg = Vref` it spans 0..2·Vref, so a count is worth twice as
    /// much, and a signed result is centred on Vref.
    pub fn for_reference(vref_mv: u32, neg: NegSel, signed: bool) -> Self {
        let vref_mv = vref_mv.max(1) as i64;
        match neg {
            NegSel::Vssa => Self {
                offset: 0,
                counts_per_10v: (FULL_SCALE_COUNTS as i64 * 10_000 / vref_mv) as i32,
            },
            NegSel::Vref => Self {
                offset: if signed { -(FULL_SCALE_COUNTS / 2) as i16 } else { 0 },
                counts_per_10v: ((FULL_SCALE_COUNTS / 2) as i64 * 10_000 / vref_mv) as i32,
            },
        }
    }

    /// Undo accumulate-mode averaging: the result register holds the sum
    /// of `avg_samples` conversions when AVG_SHIFT is off.
    ///
    /// An unsigned sum can exceed `i16::MAX`, so `counts` is read back as the
    /// raw 16-bit register value unless results are signed.
    pub fn adjust_for_averaging(counts: i16, avg_samples: u16, signed: bool) -> i16 {
        if avg_samples <= 1 {
            return counts;
        }
        if signed {
            (counts as i32 / avg_samples as i32) as i16
        } else {
            (counts as u16 / avg_samples) as i16
        }
    }

    pub fn to_volts(&self, counts: i16) -> f32 {
        if self.counts_per_10v == 0 {
            return 0.0;
        }
        (counts as f32 - self.offset as f32) * 10.0 / self.counts_per_10v as f32
    }

    pub fn to_millivolts(&self, counts: i16) -> i16 {
        if self.counts_per_10v == 0 {
            return 0;
        }
        let mv = (counts as i64 - self.offset as i64) * 10_000 / self.counts_per_10v as i64;
        mv.clamp(i16::MIN as i64, i16::MAX as i64) as i16
    }

    pub fn to_microvolts(&self, counts: i16) -> i32 {
        if self.counts_per_10v == 0 {
            return 0;
        }
        ((counts as i64 - self.offset as i64) * 10_000_000 / self.counts_per_10v as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 2e-3
    }

    #[test]
    fn single_ended_vssa_vdda() {
        let cal = Calibration::for_reference(3300, NegSel::Vssa, false);
        assert_eq!(cal.offset, 0);
        assert_eq!(cal.counts_per_10v, 12_412);
        assert!(close(cal.to_volts(0), 0.0));
        assert!(close(cal.to_volts(2048), 1.65));
        assert!(close(cal.to_volts(4095), 3.299));
        assert_eq!(cal.to_millivolts(2048), 1650);
        assert_eq!(cal.to_microvolts(1241), 999_838);
    }

    #[test]
    fn signed_against_vref() {
        let cal = Calibration::for_reference(1200, NegSel::Vref, true);
        assert_eq!(cal.offset, -2048);
        assert!(close(cal.to_volts(-2048), 0.0));
        assert!(close(cal.to_volts(0), 1.2));
    }

    #[test]
    fn averaging_adjustment() {
        assert_eq!(Calibration::adjust_for_averaging(16_000, 4, false), 4_000);
        assert_eq!(Calibration::adjust_for_averaging(1_234, 1, false), 1_234);
        assert_eq!(Calibration::adjust_for_averaging(-800, 8, true), -100);
    }

    #[test]
    fn unsigned_sum_above_i16_max() {
        // 16 full-scale conversions: 65520 in the 16-bit result field.
        let raw = (16 * 4095u32) as u16 as i16;
        assert!(raw < 0);
        assert_eq!(Calibration::adjust_for_averaging(raw, 16, false), 4095);

        let cal = Calibration::for_reference(3300, NegSel::Vssa, false);
        assert!(close(cal.to_volts(Calibration::adjust_for_averaging(raw, 16, false)), 3.299));
    }

    #[test]
    fn zero_gain_is_zero_volts() {
        let cal = Calibration {
            offset: 0,
            counts_per_10v: 0,
        };
        assert_eq!(cal.to_volts(1000), 0.0);
        assert_eq!(cal.to_millivolts(1000), 0);
    }
}
