use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Too many mines ({mines}) for board size {rows}x{columns}")]
    TooManyMines { rows: u32, columns: u32, mines: u32 },
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("There are no flags left, remove another flag first")]
    NoFlagsAvailable,
    #[error("Position {0:?} is out of bounds")]
    OutOfBounds(Position),
    #[error("No round has been laid yet")]
    RoundNotStarted,
    #[error("{missing} cells were never registered")]
    UnregisteredCells { missing: usize },
    #[error("Layout provides {actual} mines but the round needs {expected}")]
    LayoutMismatch { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, GameError>;
