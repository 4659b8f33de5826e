use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("item type {0:?} has visual_occlusion {1} outside [0, 1]")]
    InvalidOcclusion(String, f64),

    #[error("item type {name:?} has {got} interaction functions, expected {expected}")]
    InteractionTableSizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("item type {0:?} has mismatched required-count/cost table length")]
    RequirementTableSizeMismatch(String),
}

pub type ItemResult<T> = Result<T, ItemError>;
