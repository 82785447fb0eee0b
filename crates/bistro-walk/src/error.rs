use bistro_core::Point;
use bistro_grid::PathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot start walking from {0}: not on a tile corner")]
    NotAligned(Point),

    #[error("routing failed: {0}")]
    Routing(#[from] PathError),
}

pub type WalkResult<T> = Result<T, WalkError>;
