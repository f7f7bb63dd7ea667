use crate::CellState;

/// What a rendering layer should show for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStatus {
    Unflipped,
    Flipped,
    Flagged,
    Warning(u8),
    Mine,
}

impl TileStatus {
    pub fn warning_count(self) -> u8 {
        match self {
            TileStatus::Warning(count) => count,
            _ => 0,
        }
    }
}

/// Projects engine state onto a display status. Once a mine has been
/// triggered every unflagged mine on the board is shown.
pub fn project(cell: &CellState, mine_triggered: bool) -> TileStatus {
    if cell.is_flagged {
        TileStatus::Flagged
    } else if cell.is_mine && mine_triggered {
        TileStatus::Mine
    } else if !cell.is_revealed {
        TileStatus::Unflipped
    } else if cell.adjacent_mines != 0 {
        TileStatus::Warning(cell.adjacent_mines)
    } else {
        TileStatus::Flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(is_mine: bool, is_flagged: bool, is_revealed: bool, adjacent_mines: u8) -> CellState {
        CellState {
            is_mine,
            is_flagged,
            is_revealed,
            adjacent_mines,
        }
    }

    #[test]
    fn test_flag_has_priority() {
        assert_eq!(project(&cell(true, true, false, 2), true), TileStatus::Flagged);
        assert_eq!(project(&cell(false, true, false, 0), false), TileStatus::Flagged);
    }

    #[test]
    fn test_revealed_cells() {
        assert_eq!(project(&cell(false, false, true, 0), false), TileStatus::Flipped);
        assert_eq!(project(&cell(false, false, true, 3), true), TileStatus::Warning(3));
        assert_eq!(project(&cell(true, false, true, 1), true), TileStatus::Mine);
    }

    #[test]
    fn test_hidden_mines_shown_only_after_trigger() {
        assert_eq!(project(&cell(true, false, false, 0), false), TileStatus::Unflipped);
        assert_eq!(project(&cell(true, false, false, 0), true), TileStatus::Mine);
        assert_eq!(project(&cell(false, false, false, 4), true), TileStatus::Unflipped);
    }

    #[test]
    fn test_warning_count() {
        assert_eq!(TileStatus::Warning(5).warning_count(), 5);
        assert_eq!(TileStatus::Flipped.warning_count(), 0);
        assert_eq!(TileStatus::Mine.warning_count(), 0);
    }
}
