//! Trigger multiplexer
//!
//! Each output of a PERI trigger group selects one of the group's inputs.

use crate::pac::peri::{tr_out_ctl, Peri};
use crate::pac::PERI;

pub use crate::pac::peri::trig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerKind {
    /// Forward the level as is.
    Level,
    /// Turn each rising edge into a two-cycle pulse.
    Edge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    BadParam,
}

/// Routes `input` of trigger `group` to its `output`.
pub fn connect(group: usize, input: u32, output: usize, kind: TriggerKind) -> Result<(), Error> {
    connect_in(PERI, group, input, output, kind, false)
}

pub(crate) fn connect_in(
    peri: Peri,
    group: usize,
    input: u32,
    output: usize,
    kind: TriggerKind,
    invert: bool,
) -> Result<(), Error> {
    if group > 15 || output > 127 || input > tr_out_ctl::TR_SEL.max() {
        return Err(Error::BadParam);
    }
    let mut v = tr_out_ctl::TR_SEL.val(input);
    if kind == TriggerKind::Edge {
        v |= tr_out_ctl::TR_EDGE;
    }
    if invert {
        v |= tr_out_ctl::TR_INV;
    }
    critical_section::with(|_| peri.tr_out_ctl(group, output).write(v));
    trace!("trigger: group {} in {} -> out {}", group, input, output);
    Ok(())
}
