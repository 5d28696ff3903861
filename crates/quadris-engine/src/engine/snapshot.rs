use serde::Serialize;

use crate::{ActivePiece, GameStats, GameStatus, Grid, PieceKind};

/// Copy of the observable board state at one moment.
///
/// Everything a renderer or a summary needs, detached from the board so it
/// can outlive further commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub status: GameStatus,
    pub grid: Grid,
    pub active_piece: Option<ActivePiece>,
    pub next_piece: PieceKind,
    pub stats: GameStats,
}
