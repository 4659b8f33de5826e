//! Vision rendering parameters (§4.5, §6).

use std::f64::consts::TAU;

/// Per-simulator vision configuration.
#[derive(Copy, Clone, Debug)]
pub struct VisionParams {
    /// Vision range `V`; the rendered square has side `2V + 1`.
    pub range: i64,
    /// Color vector dimension `C`.
    pub dimension: usize,
    /// Forward cone half-angle source, in radians. `TAU` (2π) disables
    /// clipping entirely — every cell in the square is visible.
    pub field_of_view: f64,
}

impl VisionParams {
    #[inline]
    pub fn clipping_enabled(&self) -> bool {
        self.field_of_view < TAU - 1e-9
    }
}
