use thiserror::Error;

use crate::PatchCoord;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("patch size must be positive, got {0}")]
    InvalidPatchSize(i64),

    #[error("mcmc_iterations must be positive, got {0}")]
    InvalidMcmcIterations(u32),

    #[error("no item types configured")]
    NoItemTypes,

    #[error("item type {0}: {1}")]
    ItemType(String, #[source] gw_item::ItemError),

    #[error("patch {0} referenced but not present in the map")]
    MissingPatch(PatchCoord),
}

pub type MapResult<T> = Result<T, MapError>;
