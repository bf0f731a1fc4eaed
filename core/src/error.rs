use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates ({row}, {col})")]
    InvalidCoordinate { row: Coord, col: Coord },
    #[error("Invalid difficulty: {rows}x{cols} board cannot hold {mines} mines and a safe opening")]
    InvalidDifficulty {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Saved game state is inconsistent: {0}")]
    InconsistentState(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
