use crate::{GameError, Result};

/// Classic board presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u32,
    pub columns: u32,
    pub mines: u32,
}

impl GameConfig {
    pub fn new(rows: u32, columns: u32, mines: u32) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn total_cells(&self) -> u32 {
        self.rows.saturating_mul(self.columns)
    }

    /// Checks that the board is non-empty and can hold every mine.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines {
                rows: self.rows,
                columns: self.columns,
                mines: self.mines,
            });
        }
        Ok(())
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Beginner => GameConfig::new(9, 9, 10),
            Difficulty::Intermediate => GameConfig::new(16, 16, 40),
            Difficulty::Expert => GameConfig::new(16, 30, 99),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for difficulty in [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Expert,
        ] {
            assert!(GameConfig::from(difficulty).validate().is_ok());
        }
        assert_eq!(GameConfig::default(), GameConfig::new(9, 9, 10));
    }

    #[test]
    fn test_full_board_is_allowed() {
        assert!(GameConfig::new(3, 3, 9).validate().is_ok());
    }

    #[test]
    fn test_too_many_mines() {
        assert_eq!(
            GameConfig::new(2, 3, 7).validate().unwrap_err(),
            GameError::TooManyMines {
                rows: 2,
                columns: 3,
                mines: 7
            }
        );
    }

    #[test]
    fn test_empty_board() {
        assert_eq!(
            GameConfig::new(0, 3, 0).validate().unwrap_err(),
            GameError::EmptyBoard
        );
    }
}
