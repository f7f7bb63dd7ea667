use crate::{GameError, Position, Result};
use itertools::iproduct;
use ndarray::Array2;

/// Everything the engine knows about a single cell during a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellState {
    pub is_mine: bool,
    pub is_flagged: bool,
    pub is_revealed: bool,
    pub adjacent_mines: u8,
}

impl CellState {
    /// A cell is settled once it is either revealed or flagged.
    pub fn is_resolved(&self) -> bool {
        self.is_revealed || self.is_flagged
    }

    fn opens_region(&self) -> bool {
        !self.is_mine && self.adjacent_mines == 0
    }
}

/// Fixed-size grid of cell state. The shape never changes after construction.
#[derive(Debug, Clone)]
pub struct Board {
    cells: Array2<CellState>,
    rows: u32,
    columns: u32,
}

impl Board {
    pub fn new(rows: u32, columns: u32) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::EmptyBoard);
        }

        Ok(Board {
            cells: Array2::default((rows as usize, columns as usize)),
            rows,
            columns,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn total_cells(&self) -> u32 {
        self.rows * self.columns
    }

    /// Clears every cell back to an unmined, hidden, unflagged state.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::default());
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.row < self.rows as i32 && pos.col >= 0 && pos.col < self.columns as i32
    }

    fn index(&self, pos: Position) -> Option<[usize; 2]> {
        self.is_within_bounds(pos)
            .then(|| [pos.row as usize, pos.col as usize])
    }

    pub fn get_cell(&self, pos: Position) -> Result<&CellState> {
        self.index(pos)
            .map(|idx| &self.cells[idx])
            .ok_or(GameError::OutOfBounds(pos))
    }

    pub fn get_cell_mut(&mut self, pos: Position) -> Result<&mut CellState> {
        let idx = self.index(pos).ok_or(GameError::OutOfBounds(pos))?;
        Ok(&mut self.cells[idx])
    }

    /// Row-major iteration over every coordinate on the board.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..self.rows as i32, 0..self.columns as i32)
            .map(|(row, col)| Position::new(row, col))
    }

    pub fn cells(&self) -> impl Iterator<Item = (Position, &CellState)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| (Position::new(row as i32, col as i32), cell))
    }

    /// Inverse of the row-major order used by [`Board::positions`].
    pub fn position_of(&self, index: usize) -> Position {
        let columns = self.columns as usize;
        Position::new((index / columns) as i32, (index % columns) as i32)
    }

    pub fn in_bounds_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors()
            .collect::<Vec<_>>()
            .into_iter()
            .filter(|p| self.is_within_bounds(*p))
    }

    /// Marks `pos` as a mine and bumps the warning count of each neighbor.
    /// Returns `false` without touching anything if the cell is already mined.
    pub fn place_mine(&mut self, pos: Position) -> Result<bool> {
        let idx = self.index(pos).ok_or(GameError::OutOfBounds(pos))?;
        if self.cells[idx].is_mine {
            return Ok(false);
        }
        self.cells[idx].is_mine = true;

        for neighbor in pos.neighbors() {
            if let Some(nidx) = self.index(neighbor) {
                self.cells[nidx].adjacent_mines += 1;
            }
        }
        Ok(true)
    }

    pub fn mine_count(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_mine).count() as u32
    }

    pub fn count_adjacent_mines(&self, pos: Position) -> u8 {
        self.in_bounds_neighbors(pos)
            .filter(|p| matches!(self.get_cell(*p), Ok(cell) if cell.is_mine))
            .count() as u8
    }

    /// Reveals `start` and, when it borders no mines, the whole connected
    /// zero region together with its border of warning cells.
    ///
    /// Out-of-bounds and already revealed cells are a no-op. Flagged cells
    /// are never uncovered by the cascade; the caller clears the flag on
    /// `start` before asking for an explicit reveal. Every cell enters the
    /// worklist at most once, so the traversal is bounded by the board size.
    ///
    /// Returns how many cells were newly revealed.
    pub fn propagate_reveal(&mut self, start: Position) -> u32 {
        let Some(idx) = self.index(start) else {
            return 0;
        };
        if self.cells[idx].is_revealed {
            return 0;
        }
        debug_assert!(!self.cells[idx].is_flagged, "reveal of a flagged cell");

        self.cells[idx].is_revealed = true;
        let mut revealed = 1;

        let mut worklist = Vec::new();
        if self.cells[idx].opens_region() {
            worklist.push(start);
        }

        while let Some(pos) = worklist.pop() {
            for neighbor in pos.neighbors() {
                let Some(nidx) = self.index(neighbor) else {
                    continue;
                };
                let cell = &mut self.cells[nidx];
                if cell.is_resolved() {
                    continue;
                }
                cell.is_revealed = true;
                revealed += 1;
                if cell.opens_region() {
                    worklist.push(neighbor);
                }
            }
        }

        debug_assert!(revealed <= self.total_cells());
        log::trace!("reveal at {:?} uncovered {} cells", start, revealed);
        revealed
    }
}
