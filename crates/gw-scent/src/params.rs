//! Scent diffusion parameters (§4.4, §6).

/// Tuning constants for the diffusion equation
/// `S(t+1) = λ·S(t) + C(t+1) + α·Σ_neighbors S(t)`.
#[derive(Copy, Clone, Debug)]
pub struct ScentParams {
    /// Scent vector dimension `S`.
    pub dimension: usize,
    /// Per-step decay `λ ∈ [0, 1]`.
    pub decay: f64,
    /// Per-neighbor diffusion rate `α`.
    pub diffusion: f64,
    /// How long a deleted item's scent contribution is still computed
    /// (ticks). Beyond this the contribution is assumed to have decayed
    /// below representation tolerance and is no longer replayed.
    pub deleted_item_lifetime: u64,
}
