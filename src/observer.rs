use crate::{Position, RoundOutcome, TileStatus};

/// The presentation side of the engine. It is told the status of every cell
/// after each board refresh, and told when a round ends before the next one
/// is laid.
pub trait BoardObserver {
    fn on_cell_status(&mut self, pos: Position, status: TileStatus);

    fn on_round_ended(&mut self, outcome: RoundOutcome);
}

/// Observer that ignores everything, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BoardObserver for NullObserver {
    fn on_cell_status(&mut self, _pos: Position, _status: TileStatus) {}

    fn on_round_ended(&mut self, _outcome: RoundOutcome) {}
}
