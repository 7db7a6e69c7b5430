use std::path::PathBuf;

use crate::game::GameOutcome;

/// Errors raised when a move cannot be applied to a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),
}

/// Errors raised by the decision engines when asked for a move they cannot make.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("game is already over ({0:?})")]
    GameOver(GameOutcome),

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error("simulations per move must be at least 1")]
    ZeroSimulations,

    #[error("rollout move rejected: {0}")]
    Move(#[from] MoveError),
}

/// Errors that can occur while running a match between two engines.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{engine} selected illegal move {column} (legal: {legal:?})")]
    IllegalMove {
        engine: String,
        column: usize,
        legal: Vec<usize>,
    },

    #[error("{engine} failed to select a move: {source}")]
    Engine {
        engine: String,
        #[source]
        source: SearchError,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
