use thiserror::Error;

use bistro_actor::ActorError;
use bistro_grid::GridError;
use bistro_walk::WalkError;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("actor error: {0}")]
    Actor(#[from] ActorError),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("floor plan error: {0}")]
    FloorPlan(String),

    #[error("menu parse error: {0}")]
    Menu(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
