use crate::{Board, GameError, Position, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Populates a freshly reset board with mines.
pub trait MineLayer {
    fn lay(&mut self, board: &mut Board, total_mines: u32) -> Result<()>;
}

/// Uniform random placement driven by an injected random source.
///
/// Placement shuffles the cell indices and keeps the first `total_mines`, so
/// the cost stays linear in the board size however dense the minefield is.
#[derive(Debug, Clone)]
pub struct RandomLayer<R> {
    rng: R,
}

impl<R: Rng> RandomLayer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomLayer<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl Default for RandomLayer<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> MineLayer for RandomLayer<R> {
    fn lay(&mut self, board: &mut Board, total_mines: u32) -> Result<()> {
        let total_cells = board.total_cells();
        if total_mines > total_cells {
            return Err(GameError::TooManyMines {
                rows: board.rows(),
                columns: board.columns(),
                mines: total_mines,
            });
        }

        let mut indices: Vec<usize> = (0..total_cells as usize).collect();
        let (chosen, _) = indices.partial_shuffle(&mut self.rng, total_mines as usize);
        for &index in chosen.iter() {
            let pos = board.position_of(index);
            board.place_mine(pos)?;
        }

        log::debug!(
            "laid {} mines on a {}x{} board",
            total_mines,
            board.rows(),
            board.columns()
        );
        Ok(())
    }
}

/// Lays the same caller-chosen mine positions every round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLayer {
    mines: Vec<Position>,
}

impl FixedLayer {
    pub fn new<P: Into<Position>>(mines: impl IntoIterator<Item = P>) -> Self {
        Self {
            mines: mines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn mines(&self) -> &[Position] {
        &self.mines
    }
}

impl MineLayer for FixedLayer {
    fn lay(&mut self, board: &mut Board, total_mines: u32) -> Result<()> {
        let mut placed = 0;
        for &pos in &self.mines {
            if board.place_mine(pos)? {
                placed += 1;
            }
        }

        if placed != total_mines {
            return Err(GameError::LayoutMismatch {
                expected: total_mines,
                actual: placed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mine_positions(board: &Board) -> Vec<Position> {
        board
            .positions()
            .filter(|&p| board.get_cell(p).unwrap().is_mine)
            .collect()
    }

    #[test]
    fn test_random_layer_fills_full_board() {
        let mut board = Board::new(4, 4).unwrap();
        RandomLayer::seeded(7).lay(&mut board, 16).unwrap();

        assert_eq!(board.mine_count(), 16);
        // Corner has three mined neighbors, interior cells eight.
        assert_eq!(board.get_cell(Position::new(0, 0)).unwrap().adjacent_mines, 3);
        assert_eq!(board.get_cell(Position::new(1, 1)).unwrap().adjacent_mines, 8);
    }

    #[test]
    fn test_random_layer_rejects_overflow() {
        let mut board = Board::new(2, 2).unwrap();
        let err = RandomLayer::seeded(1).lay(&mut board, 5).unwrap_err();

        assert_eq!(
            err,
            GameError::TooManyMines {
                rows: 2,
                columns: 2,
                mines: 5
            }
        );
        assert_eq!(board.mine_count(), 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut first = Board::new(9, 9).unwrap();
        let mut second = Board::new(9, 9).unwrap();
        RandomLayer::seeded(42).lay(&mut first, 10).unwrap();
        RandomLayer::seeded(42).lay(&mut second, 10).unwrap();

        assert_eq!(mine_positions(&first), mine_positions(&second));
    }

    #[test]
    fn test_consecutive_layouts_differ() {
        let mut layer = RandomLayer::seeded(3);
        let mut first = Board::new(16, 16).unwrap();
        let mut second = Board::new(16, 16).unwrap();
        layer.lay(&mut first, 40).unwrap();
        layer.lay(&mut second, 40).unwrap();

        assert_ne!(mine_positions(&first), mine_positions(&second));
    }

    #[test]
    fn test_fixed_layer_places_exact_positions() {
        let mut board = Board::new(3, 3).unwrap();
        FixedLayer::new([(0, 0), (2, 1)]).lay(&mut board, 2).unwrap();

        assert_eq!(
            mine_positions(&board),
            vec![Position::new(0, 0), Position::new(2, 1)]
        );
        assert_eq!(board.get_cell(Position::new(1, 1)).unwrap().adjacent_mines, 2);
    }

    #[test]
    fn test_fixed_layer_count_mismatch() {
        let mut board = Board::new(3, 3).unwrap();
        let err = FixedLayer::new([(0, 0), (0, 0)]).lay(&mut board, 2).unwrap_err();

        assert_eq!(
            err,
            GameError::LayoutMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_fixed_layer_out_of_bounds() {
        let mut board = Board::new(2, 2).unwrap();
        let err = FixedLayer::new([(5, 5)]).lay(&mut board, 1).unwrap_err();

        assert_eq!(err, GameError::OutOfBounds(Position::new(5, 5)));
    }

    proptest! {
        #[test]
        fn prop_random_layout_is_consistent(
            rows in 1u32..12,
            columns in 1u32..12,
            density in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let mines = ((rows * columns) as f64 * density) as u32;
            let mut board = Board::new(rows, columns).unwrap();
            RandomLayer::seeded(seed).lay(&mut board, mines).unwrap();

            prop_assert_eq!(board.mine_count(), mines);
            for pos in board.positions() {
                prop_assert_eq!(
                    board.get_cell(pos).unwrap().adjacent_mines,
                    board.count_adjacent_mines(pos)
                );
            }
        }
    }
}
