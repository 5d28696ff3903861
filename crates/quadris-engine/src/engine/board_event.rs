use std::time::Duration;

use serde::Serialize;

use crate::PieceKind;

/// Notification queued by a board command.
///
/// Events accumulate in the board until drained with
/// [`GameBoard::take_events`](crate::GameBoard::take_events), in the order
/// the changes happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum BoardEvent {
    /// The score display value changed.
    ScoreChanged(u32),
    /// The cleared-lines display value changed.
    LinesChanged(u32),
    /// The level display value changed.
    LevelChanged(u32),
    /// A new piece was queued as the next piece.
    NextPieceChanged(PieceKind),
    /// The falling piece became part of the grid.
    PieceLocked(PieceKind),
    /// A lock removed this many rows.
    LinesCleared(u32),
    /// The tick timer restarts and fires after this interval.
    TimerRestarted(Duration),
    /// The tick timer stops.
    TimerStopped,
    Paused,
    Resumed,
    GameOver,
}
