use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActorError {
    /// The animator has no animation registered under this key.  Always a
    /// setup mistake, never retried.
    #[error("unknown animation {0:?}")]
    UnknownAnimation(String),

    /// A one-shot animation was given length 0, which would make it loop.
    #[error("one-shot animation {0:?} needs a positive length")]
    ZeroLength(String),
}

pub type ActorResult<T> = Result<T, ActorError>;
