//! Per-item-type intensity functions.
//!
//! The intensity gives the unconditional (no-neighbors) log-rate of an item
//! type appearing in a cell. Each `ItemType` owns exactly one.

/// `f(θ) → log-rate`, evaluated once per item type per Gibbs candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntensityFn {
    /// A flat log-rate independent of any context. The only form required
    /// by the point process; richer forms were not needed by any scenario
    /// this engine has been asked to reproduce.
    Constant(f64),
}

impl IntensityFn {
    #[inline]
    pub fn evaluate(&self) -> f64 {
        match self {
            IntensityFn::Constant(v) => *v,
        }
    }
}
