use crate::display::{self, TileStatus};
use crate::{Board, BoardObserver, CellState, GameConfig, GameError, MineLayer, Position, Result};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Won,
    Lost,
}

/// What a player action did to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Unchanged,
    Changed,
    /// The action finished the round. The observer has already been told and
    /// a fresh round has been laid.
    RoundEnded(RoundOutcome),
}

/// Round controller. Owns the board for the whole session and relays every
/// recomputed cell status to its observer.
pub struct Game<L, O> {
    board: Board,
    layer: L,
    observer: O,
    registered: HashSet<Position>,
    total_mines: u32,
    flags_remaining: u32,
    unresolved: u32,
    mine_triggered: bool,
    started: bool,
    round: u32,
}

impl<L: MineLayer, O: BoardObserver> Game<L, O> {
    /// Builds an engine for `config`. Nothing is returned when the board
    /// cannot hold the requested mines.
    pub fn new(config: GameConfig, layer: L, observer: O) -> Result<Self> {
        if let Err(err) = config.validate() {
            log::warn!("rejected game configuration {:?}: {}", config, err);
            return Err(err);
        }

        let board = Board::new(config.rows, config.columns)?;
        let unresolved = board.total_cells();
        Ok(Self {
            board,
            layer,
            observer,
            registered: HashSet::new(),
            total_mines: config.mines,
            flags_remaining: config.mines,
            unresolved,
            mine_triggered: false,
            started: false,
            round: 0,
        })
    }

    /// Records that the presentation layer is tracking `pos`. Every cell must
    /// be registered before the first round is laid.
    pub fn register_cell(&mut self, pos: Position) -> Result<()> {
        if !self.board.is_within_bounds(pos) {
            return Err(GameError::OutOfBounds(pos));
        }
        self.registered.insert(pos);
        Ok(())
    }

    /// Starts a round: clears every cell and counter, lays a new minefield and
    /// pushes a full refresh.
    pub fn lay_mines(&mut self) -> Result<()> {
        if self.round == 0 {
            let missing = self.board.total_cells() as usize - self.registered.len();
            if missing > 0 {
                return Err(GameError::UnregisteredCells { missing });
            }
        }

        self.board.reset();
        self.flags_remaining = self.total_mines;
        self.unresolved = self.board.total_cells();
        self.mine_triggered = false;

        if let Err(err) = self.layer.lay(&mut self.board, self.total_mines) {
            self.board.reset();
            self.started = false;
            return Err(err);
        }

        self.started = true;
        self.round += 1;
        log::debug!(
            "round {} started: {}x{} with {} mines",
            self.round,
            self.board.rows(),
            self.board.columns(),
            self.total_mines
        );
        self.push_statuses();
        Ok(())
    }

    /// Places a flag on a hidden cell or lifts an existing one.
    ///
    /// Returns [`GameError::NoFlagsAvailable`] without touching the round
    /// when every flag is already on the board.
    pub fn toggle_flag(&mut self, pos: Position) -> Result<ActionOutcome> {
        self.check_started()?;
        let cell = self.board.get_cell_mut(pos)?;

        if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_remaining += 1;
            self.unresolved += 1;
        } else if cell.is_revealed {
            return Ok(ActionOutcome::Unchanged);
        } else if self.flags_remaining == 0 {
            return Err(GameError::NoFlagsAvailable);
        } else {
            cell.is_flagged = true;
            self.flags_remaining -= 1;
            self.unresolved -= 1;
        }

        self.refresh(true)
    }

    /// Uncovers `pos`, cascading through empty regions. An explicit reveal
    /// overrides a flag on the cell.
    pub fn reveal(&mut self, pos: Position) -> Result<ActionOutcome> {
        self.check_started()?;
        let cell = self.board.get_cell_mut(pos)?;

        let mut changed = false;
        if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_remaining += 1;
            self.unresolved += 1;
            changed = true;
        }
        if cell.is_mine && !cell.is_revealed {
            self.mine_triggered = true;
        }

        let revealed = self.board.propagate_reveal(pos);
        debug_assert!(revealed <= self.unresolved);
        self.unresolved = self.unresolved.saturating_sub(revealed);

        self.refresh(changed || revealed > 0)
    }

    fn refresh(&mut self, changed: bool) -> Result<ActionOutcome> {
        self.push_statuses();

        match self.terminal_outcome() {
            Some(outcome) => {
                self.end_round(outcome)?;
                Ok(ActionOutcome::RoundEnded(outcome))
            }
            None if changed => Ok(ActionOutcome::Changed),
            None => Ok(ActionOutcome::Unchanged),
        }
    }

    fn push_statuses(&mut self) {
        for (pos, cell) in self.board.cells() {
            self.observer
                .on_cell_status(pos, display::project(cell, self.mine_triggered));
        }
    }

    fn terminal_outcome(&self) -> Option<RoundOutcome> {
        if self.mine_triggered {
            Some(RoundOutcome::Lost)
        } else if self.unresolved == 0 {
            Some(RoundOutcome::Won)
        } else {
            None
        }
    }

    fn end_round(&mut self, outcome: RoundOutcome) -> Result<()> {
        log::info!("round {} ended: {:?}", self.round, outcome);
        self.observer.on_round_ended(outcome);
        self.lay_mines()
    }

    fn check_started(&self) -> Result<()> {
        if self.started {
            Ok(())
        } else {
            Err(GameError::RoundNotStarted)
        }
    }

    pub fn rows(&self) -> u32 {
        self.board.rows()
    }

    pub fn columns(&self) -> u32 {
        self.board.columns()
    }

    pub fn total_mines(&self) -> u32 {
        self.total_mines
    }

    pub fn flags_remaining(&self) -> u32 {
        self.flags_remaining
    }

    /// Cells that are neither revealed nor flagged.
    pub fn unresolved(&self) -> u32 {
        self.unresolved
    }

    pub fn mine_triggered(&self) -> bool {
        self.mine_triggered
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Number of rounds laid so far; zero until the first `lay_mines`.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, pos: Position) -> Result<&CellState> {
        self.board.get_cell(pos)
    }

    pub fn status_at(&self, pos: Position) -> Result<TileStatus> {
        self.board
            .get_cell(pos)
            .map(|cell| display::project(cell, self.mine_triggered))
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
