use thiserror::Error;

/// Errors raised for data or configuration bugs.
///
/// Player-driven failures (not enough gold, missing materials, already
/// gathering) are reported through [`crate::actions::Outcome`] instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error("unknown recipe '{0}'")]
    UnknownRecipe(String),
    #[error("tool '{0}' has no category")]
    UnknownToolCategory(String),
    #[error("unknown home id {0}")]
    UnknownHome(u32),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type GameResult<T> = Result<T, GameError>;
