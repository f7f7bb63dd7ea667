pub mod board;
pub mod config;
pub mod display;
pub mod error;
pub mod game;
pub mod layout;
pub mod observer;
pub mod position;

pub use board::{Board, CellState};
pub use config::{Difficulty, GameConfig};
pub use display::TileStatus;
pub use error::{GameError, Result};
pub use game::{ActionOutcome, Game, RoundOutcome};
pub use layout::{FixedLayer, MineLayer, RandomLayer};
pub use observer::{BoardObserver, NullObserver};
pub use position::Position;
