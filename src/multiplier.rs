//! Product of the two input voltages, scaled for the 12-bit DAC.

/// DAC counts per volt of product. 3.3 V × 3.3 V = 10.89 V lands just
/// under full scale, so the output on P9.2 reads 3.3 times smaller than
/// the product.
pub const SCALING_FACTOR: f32 = 372.0;

pub const DAC_MAX_CODE: u16 = 4095;

/// DAC code for `v0 * v1`: rounded to nearest and clamped to the code range.
/// Negative and NaN products give 0.
pub fn product_code(v0: f32, v1: f32) -> u16 {
    scale(v0 * v1)
}

fn scale(product: f32) -> u16 {
    let x = product * SCALING_FACTOR;
    // Also catches NaN.
    if !(x > 0.0) {
        return 0;
    }
    if x >= DAC_MAX_CODE as f32 {
        return DAC_MAX_CODE;
    }
    (x + 0.5) as u16
}

/// One cycle's worth of results.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub v0: f32,
    pub v1: f32,
    pub product: f32,
    pub code: u16,
}

impl Reading {
    pub fn new(v0: f32, v1: f32) -> Self {
        let product = v0 * v1;
        Self {
            v0,
            v1,
            product,
            code: scale(product),
        }
    }
}
