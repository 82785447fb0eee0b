use bistro_actor::ActorError;
use bistro_behavior::BehaviorError;
use bistro_core::CoreError;
use bistro_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("actor error: {0}")]
    Actor(#[from] ActorError),

    #[error("behaviour error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
