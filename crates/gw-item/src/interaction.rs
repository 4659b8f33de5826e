//! Pairwise interaction functions between two item instances.
//!
//! An `InteractionFn` is owned by an (item type, other item type) pair: every
//! `ItemType` carries one entry per type in the catalogue, so evaluating an
//! interaction never needs the type indices themselves — only the spatial
//! offset between the two instances.

/// `g(Δ) → log-interaction-energy` for a pair of item instances, where
/// `Δ = location(j) − location(i)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionFn {
    /// No interaction at any distance.
    Zero,

    /// `v1` within Chebyshev radius `r1`, `v2` within `r2` (exclusive of the
    /// inner radius), `0` beyond `r2`. `r1 <= r2` is a construction
    /// invariant, checked by [`InteractionFn::piecewise_box`].
    PiecewiseBox {
        r1: i64,
        r2: i64,
        v1: f64,
        v2: f64,
    },

    /// A rotation-aware axis-aligned template: contributes `value` when `Δ`
    /// lies on one of the four cardinal rays out to `radius` cells (forming
    /// a "+" shape centered on the first item), `0` off-axis and at the
    /// origin itself.
    Cross { radius: i64, value: f64 },
}

impl InteractionFn {
    /// Construct a `PiecewiseBox`, panicking if `r1 > r2` — a configuration
    /// error that should be caught at `ItemType` construction time, not
    /// silently misbehave during sampling.
    pub fn piecewise_box(r1: i64, r2: i64, v1: f64, v2: f64) -> Self {
        assert!(r1 <= r2, "piecewise_box requires r1 <= r2, got {r1} > {r2}");
        InteractionFn::PiecewiseBox { r1, r2, v1, v2 }
    }

    /// The largest Chebyshev radius at which this function can be nonzero.
    /// Used by [`crate::InteractionCache`] to bound Gibbs candidate search.
    pub fn support_radius(&self) -> i64 {
        match self {
            InteractionFn::Zero => 0,
            InteractionFn::PiecewiseBox { r2, .. } => *r2,
            InteractionFn::Cross { radius, .. } => *radius,
        }
    }

    /// Evaluate `g(Δ)` for displacement `(dx, dy)`.
    pub fn evaluate(&self, delta: (i64, i64)) -> f64 {
        let (dx, dy) = delta;
        match self {
            InteractionFn::Zero => 0.0,

            InteractionFn::PiecewiseBox { r1, r2, v1, v2 } => {
                let d = dx.abs().max(dy.abs());
                if d == 0 {
                    0.0
                } else if d <= *r1 {
                    *v1
                } else if d <= *r2 {
                    *v2
                } else {
                    0.0
                }
            }

            InteractionFn::Cross { radius, value } => {
                let on_axis = dx == 0 || dy == 0;
                let at_origin = dx == 0 && dy == 0;
                let within = dx.abs() <= *radius && dy.abs() <= *radius;
                if on_axis && within && !at_origin {
                    *value
                } else {
                    0.0
                }
            }
        }
    }
}
