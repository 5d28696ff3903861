use std::time::Duration;

use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::{
    CommandError, PieceCollisionError,
    core::{
        grid::{Grid, Position},
        piece::Piece,
    },
};

use super::{
    board_event::BoardEvent,
    game_stats::{GameStats, LINE_CLEAR_PAUSE, line_clear_score},
    piece_source::{PieceSeed, PieceSource, RandomPieces},
    snapshot::BoardSnapshot,
};

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const SPAWN_COLUMN: i32 = (Grid::WIDTH / 2 + 1) as i32;

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const TOP_ROW: i32 = (Grid::HEIGHT - 1) as i32;

/// Lifecycle state of a [`GameBoard`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum GameStatus {
    #[default]
    #[display("not started")]
    NotStarted,
    #[display("running")]
    Running,
    #[display("paused")]
    Paused,
    /// A lock just cleared rows; the next tick spawns a piece.
    #[display("waiting after line clear")]
    WaitingAfterLineClear,
    #[display("game over")]
    GameOver,
}

/// Result of a command that may move the falling piece down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum StepOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move down and was locked into the grid.
    ///
    /// When no rows were cleared the next piece has already been spawned;
    /// check [`GameBoard::status`] for a game over.
    Locked { cleared_lines: u32 },
    /// The line-clear pause ended and the next piece was spawned (or the
    /// spawn failed and the game is over).
    Spawned,
}

/// The falling piece together with its anchor on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    piece: Piece,
    anchor: Position,
}

impl ActivePiece {
    fn spawned(piece: Piece) -> Self {
        Self {
            piece,
            anchor: Position::new(SPAWN_COLUMN, TOP_ROW + piece.min_y()),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> crate::PieceKind {
        self.piece.kind()
    }

    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[must_use]
    pub const fn anchor(&self) -> Position {
        self.anchor
    }

    /// Returns the four grid cells covered by the piece.
    #[must_use]
    pub fn cells(&self) -> [Position; Piece::CELL_COUNT] {
        std::array::from_fn(|i| self.anchor.offset_by(self.piece.cell(i)))
    }

    fn with_anchor(self, anchor: Position) -> Self {
        Self { anchor, ..self }
    }

    fn with_piece(self, piece: Piece) -> Self {
        Self { piece, ..self }
    }
}

impl Serialize for ActivePiece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ActivePiece", 3)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("anchor", &self.anchor)?;
        state.serialize_field("cells", &self.cells())?;
        state.end()
    }
}

/// A single-player falling-block board.
///
/// The board is the only writer of its grid. It is driven entirely by
/// commands: the caller schedules [`tick`](Self::tick) after every
/// [`tick_interval`](Self::tick_interval) and forwards player input. A
/// rejected command returns an error and leaves the board unchanged.
///
/// # Example
///
/// ```
/// use quadris_engine::{GameBoard, GameStatus, PieceKind, PieceSequence, StepOutcome};
///
/// let source = PieceSequence::new([PieceKind::O]).unwrap();
/// let mut board = GameBoard::with_source(source);
/// assert_eq!(board.status(), GameStatus::NotStarted);
///
/// board.start().unwrap();
/// assert_eq!(board.tick().unwrap(), StepOutcome::Moved);
/// assert_eq!(
///     board.hard_drop().unwrap(),
///     StepOutcome::Locked { cleared_lines: 0 }
/// );
/// assert_eq!(board.grid().filled_cells(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct GameBoard<S = RandomPieces> {
    grid: Grid,
    active: Option<ActivePiece>,
    next: Piece,
    stats: GameStats,
    status: GameStatus,
    events: Vec<BoardEvent>,
    source: S,
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoard {
    /// Creates a board whose pieces come from a randomly seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(RandomPieces::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_source(RandomPieces::with_seed(seed))
    }

    /// Returns the seed that replays this board's piece sequence.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.source.seed()
    }
}

impl<S> GameBoard<S> {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn active_piece(&self) -> Option<ActivePiece> {
        self.active
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns when the next [`tick`](Self::tick) is due, or `None` while
    /// the timer is stopped.
    #[must_use]
    pub fn tick_interval(&self) -> Option<Duration> {
        match self.status {
            GameStatus::Running => Some(self.stats.fall_interval()),
            GameStatus::WaitingAfterLineClear => Some(LINE_CLEAR_PAUSE),
            GameStatus::NotStarted | GameStatus::Paused | GameStatus::GameOver => None,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            status: self.status,
            grid: self.grid,
            active_piece: self.active,
            next_piece: self.next.kind(),
            stats: self.stats.clone(),
        }
    }

    /// Drains the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }
}

impl<S> GameBoard<S>
where
    S: PieceSource,
{
    /// Creates a board drawing its pieces from `source`.
    ///
    /// The first next piece is drawn immediately.
    pub fn with_source(mut source: S) -> Self {
        let next = Piece::new(source.next_kind());
        Self {
            grid: Grid::EMPTY,
            active: None,
            next,
            stats: GameStats::new(),
            status: GameStatus::NotStarted,
            events: Vec::new(),
            source,
        }
    }

    /// Starts a new session, discarding any previous one.
    ///
    /// Rejected while paused.
    pub fn start(&mut self) -> Result<(), CommandError> {
        if self.status.is_paused() {
            return Err(CommandError::NotAccepted(self.status));
        }

        self.grid = Grid::EMPTY;
        self.active = None;
        self.stats = GameStats::new();
        self.status = GameStatus::Running;
        self.events.clear();
        self.events.extend([
            BoardEvent::LinesChanged(0),
            BoardEvent::ScoreChanged(0),
            BoardEvent::LevelChanged(0),
        ]);

        if self.spawn() {
            self.restart_timer(self.stats.fall_interval());
        }
        Ok(())
    }

    /// Pauses a running session or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Result<(), CommandError> {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                self.events
                    .extend([BoardEvent::Paused, BoardEvent::TimerStopped]);
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                self.events.push(BoardEvent::Resumed);
                self.restart_timer(self.stats.fall_interval());
            }
            status => return Err(CommandError::NotAccepted(status)),
        }
        Ok(())
    }

    /// Advances the board by one timer period.
    ///
    /// While running, the falling piece moves down one row or locks. After a
    /// line clear, the tick ends the pause by spawning the next piece.
    pub fn tick(&mut self) -> Result<StepOutcome, CommandError> {
        match self.status {
            GameStatus::WaitingAfterLineClear => {
                self.status = GameStatus::Running;
                if self.spawn() {
                    self.restart_timer(self.stats.fall_interval());
                }
                Ok(StepOutcome::Spawned)
            }
            GameStatus::Running => self.soft_drop(),
            status => Err(CommandError::NotAccepted(status)),
        }
    }

    pub fn move_left(&mut self) -> Result<(), CommandError> {
        let active = self.running_piece()?;
        self.try_place(active.with_anchor(active.anchor.left()))?;
        Ok(())
    }

    pub fn move_right(&mut self) -> Result<(), CommandError> {
        let active = self.running_piece()?;
        self.try_place(active.with_anchor(active.anchor.right()))?;
        Ok(())
    }

    /// Rotates the falling piece in place. There are no wall kicks.
    pub fn rotate_left(&mut self) -> Result<(), CommandError> {
        let active = self.running_piece()?;
        self.try_place(active.with_piece(active.piece.rotated_left()))?;
        Ok(())
    }

    /// Rotates the falling piece in place. There are no wall kicks.
    pub fn rotate_right(&mut self) -> Result<(), CommandError> {
        let active = self.running_piece()?;
        self.try_place(active.with_piece(active.piece.rotated_right()))?;
        Ok(())
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> Result<StepOutcome, CommandError> {
        let active = self.running_piece()?;
        if self
            .try_place(active.with_anchor(active.anchor.down()))
            .is_ok()
        {
            return Ok(StepOutcome::Moved);
        }
        Ok(self.lock(active))
    }

    /// Moves the falling piece down as far as it goes and locks it.
    pub fn hard_drop(&mut self) -> Result<StepOutcome, CommandError> {
        let mut active = self.running_piece()?;
        loop {
            let below = active.with_anchor(active.anchor.down());
            if self.try_place(below).is_err() {
                break;
            }
            active = below;
        }
        Ok(self.lock(active))
    }

    fn running_piece(&self) -> Result<ActivePiece, CommandError> {
        if !self.status.is_running() {
            return Err(CommandError::NotAccepted(self.status));
        }
        self.active.ok_or(CommandError::NoActivePiece)
    }

    fn try_place(&mut self, candidate: ActivePiece) -> Result<(), PieceCollisionError> {
        if !self.grid.can_place(&candidate.piece, candidate.anchor) {
            return Err(PieceCollisionError);
        }
        self.active = Some(candidate);
        Ok(())
    }

    fn lock(&mut self, active: ActivePiece) -> StepOutcome {
        self.grid.fill_piece(&active.piece, active.anchor);
        self.active = None;
        self.events.push(BoardEvent::PieceLocked(active.kind()));

        let cleared_lines = u32::try_from(self.grid.clear_lines()).unwrap_or(u32::MAX);
        self.stats.record_drop(cleared_lines);
        if cleared_lines == 0 {
            self.spawn();
            return StepOutcome::Locked { cleared_lines };
        }

        self.status = GameStatus::WaitingAfterLineClear;
        self.events.extend([
            BoardEvent::LinesCleared(cleared_lines),
            BoardEvent::LinesChanged(self.stats.cleared_lines()),
        ]);
        self.award(line_clear_score(cleared_lines));
        self.restart_timer(LINE_CLEAR_PAUSE);
        StepOutcome::Locked { cleared_lines }
    }

    fn award(&mut self, points: u32) {
        let level_up = self.stats.add_score(points);
        self.events.push(BoardEvent::ScoreChanged(self.stats.score()));
        if level_up {
            self.events.push(BoardEvent::LevelChanged(self.stats.level()));
            // The fall timer only restarts while running. A line clear has
            // already switched to the pause timer, which restarts the fall
            // timer at the new interval when it ends.
            if self.status.is_running() {
                self.restart_timer(self.stats.fall_interval());
            }
        }
    }

    /// Promotes the next piece to the falling piece and draws a new next
    /// piece. Returns `false` and ends the game if the spawn is blocked.
    fn spawn(&mut self) -> bool {
        let piece = self.next;
        self.next = Piece::new(self.source.next_kind());
        self.events.push(BoardEvent::NextPieceChanged(self.next.kind()));

        if self.try_place(ActivePiece::spawned(piece)).is_ok() {
            return true;
        }
        self.active = None;
        self.status = GameStatus::GameOver;
        self.events
            .extend([BoardEvent::TimerStopped, BoardEvent::GameOver]);
        false
    }

    fn restart_timer(&mut self, interval: Duration) {
        self.events.push(BoardEvent::TimerRestarted(interval));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Block, PieceKind, PieceSequence,
        core::grid::tests::fill_row_with_gap,
    };

    const FALL: Duration = Duration::from_millis(1000);

    fn board_with(kinds: &[PieceKind]) -> GameBoard<PieceSequence> {
        GameBoard::with_source(PieceSequence::new(kinds.iter().copied()).unwrap())
    }

    fn started(kinds: &[PieceKind]) -> GameBoard<PieceSequence> {
        let mut board = board_with(kinds);
        board.start().unwrap();
        board.take_events();
        board
    }

    fn anchor(board: &GameBoard<PieceSequence>) -> Position {
        board.active_piece().unwrap().anchor()
    }

    #[test]
    fn test_new_board_rejects_play() {
        let mut board = board_with(&[PieceKind::L, PieceKind::S]);
        assert_eq!(board.status(), GameStatus::NotStarted);
        assert_eq!(board.next_piece().kind(), PieceKind::L);
        assert_eq!(board.active_piece(), None);
        assert_eq!(board.tick_interval(), None);

        let rejected = CommandError::NotAccepted(GameStatus::NotStarted);
        assert_eq!(board.move_left(), Err(rejected));
        assert_eq!(board.rotate_right(), Err(rejected));
        assert_eq!(board.tick(), Err(rejected));
        assert_eq!(board.hard_drop(), Err(rejected));
        assert_eq!(board.toggle_pause(), Err(rejected));
        assert!(board.take_events().is_empty());
    }

    #[test]
    fn test_start_spawns_at_top_center() {
        let mut board = board_with(&[PieceKind::T, PieceKind::I]);
        board.start().unwrap();

        assert_eq!(board.status(), GameStatus::Running);
        let active = board.active_piece().unwrap();
        assert_eq!(active.kind(), PieceKind::T);
        assert_eq!(active.anchor(), Position::new(6, 21));
        assert_eq!(
            active.cells(),
            [
                Position::new(5, 21),
                Position::new(6, 21),
                Position::new(7, 21),
                Position::new(6, 20),
            ]
        );
        assert_eq!(board.next_piece().kind(), PieceKind::I);
        assert_eq!(board.tick_interval(), Some(FALL));
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::LinesChanged(0),
                BoardEvent::ScoreChanged(0),
                BoardEvent::LevelChanged(0),
                BoardEvent::NextPieceChanged(PieceKind::I),
                BoardEvent::TimerRestarted(FALL),
            ]
        );
    }

    #[test]
    fn test_spawn_anchor_accounts_for_min_y() {
        let board = started(&[PieceKind::I]);
        let active = board.active_piece().unwrap();
        assert_eq!(active.anchor(), Position::new(6, 20));
        assert!(active.cells().iter().any(|p| p.row == 21));
        assert!(active.cells().iter().all(|p| p.column == 6));
    }

    #[test]
    fn test_square_hard_drop_lands_on_floor() {
        let mut board = started(&[PieceKind::O]);

        assert_eq!(
            board.hard_drop(),
            Ok(StepOutcome::Locked { cleared_lines: 0 })
        );
        for (column, row) in [(6, 0), (7, 0), (6, 1), (7, 1)] {
            assert_eq!(board.grid().cell(column, row), Some(Block::Piece(PieceKind::O)));
        }
        assert_eq!(board.grid().filled_cells(), 4);
        assert_eq!(board.stats().dropped_pieces(), 1);
        assert_eq!(board.stats().cleared_lines(), 0);
        assert_eq!(board.stats().score(), 0);
        assert_eq!(board.status(), GameStatus::Running);
        assert_eq!(anchor(&board), Position::new(6, 21));
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::PieceLocked(PieceKind::O),
                BoardEvent::NextPieceChanged(PieceKind::O),
            ]
        );
    }

    #[test]
    fn test_soft_drop_descends_then_locks() {
        let mut board = started(&[PieceKind::O]);
        for row in (1..21).rev() {
            assert_eq!(board.soft_drop(), Ok(StepOutcome::Moved));
            assert_eq!(anchor(&board), Position::new(6, row));
        }
        assert_eq!(
            board.soft_drop(),
            Ok(StepOutcome::Locked { cleared_lines: 0 })
        );
        assert_eq!(board.grid().filled_cells(), 4);
    }

    #[test]
    fn test_tick_descends_one_row() {
        let mut board = started(&[PieceKind::S]);
        let before = anchor(&board);
        assert_eq!(board.tick(), Ok(StepOutcome::Moved));
        assert_eq!(anchor(&board), before.down());
        assert!(board.take_events().is_empty());
    }

    #[test]
    fn test_filling_gap_clears_line() {
        let mut board = started(&[PieceKind::I, PieceKind::O]);
        fill_row_with_gap(&mut board.grid, 0, 6, PieceKind::J);
        board.grid.set_cell(0, 1, Block::Piece(PieceKind::T));

        assert_eq!(
            board.hard_drop(),
            Ok(StepOutcome::Locked { cleared_lines: 1 })
        );
        assert_eq!(board.stats().cleared_lines(), 1);
        assert_eq!(board.stats().score(), 1);
        assert_eq!(board.status(), GameStatus::WaitingAfterLineClear);
        assert_eq!(board.active_piece(), None);

        // The marker and the rest of the line piece moved down one row.
        assert_eq!(board.grid().cell(0, 0), Some(Block::Piece(PieceKind::T)));
        for row in 0..3 {
            assert_eq!(board.grid().cell(6, row), Some(Block::Piece(PieceKind::I)));
        }
        assert_eq!(board.grid().filled_cells(), 4);

        assert_eq!(board.tick_interval(), Some(LINE_CLEAR_PAUSE));
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::PieceLocked(PieceKind::I),
                BoardEvent::LinesCleared(1),
                BoardEvent::LinesChanged(1),
                BoardEvent::ScoreChanged(1),
                BoardEvent::TimerRestarted(LINE_CLEAR_PAUSE),
            ]
        );
    }

    #[test]
    fn test_waiting_after_line_clear() {
        let mut board = started(&[PieceKind::I, PieceKind::O]);
        fill_row_with_gap(&mut board.grid, 0, 6, PieceKind::J);
        board.hard_drop().unwrap();
        board.take_events();

        let rejected = CommandError::NotAccepted(GameStatus::WaitingAfterLineClear);
        assert_eq!(board.move_left(), Err(rejected));
        assert_eq!(board.hard_drop(), Err(rejected));
        assert_eq!(board.toggle_pause(), Err(rejected));

        assert_eq!(board.tick(), Ok(StepOutcome::Spawned));
        assert_eq!(board.status(), GameStatus::Running);
        assert_eq!(board.active_piece().unwrap().kind(), PieceKind::O);
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::NextPieceChanged(PieceKind::I),
                BoardEvent::TimerRestarted(FALL),
            ]
        );
    }

    #[test]
    fn test_four_line_clear_levels_up() {
        let mut board = started(&[PieceKind::I]);
        for row in 0..4 {
            fill_row_with_gap(&mut board.grid, row, 6, PieceKind::Z);
        }

        assert_eq!(
            board.hard_drop(),
            Ok(StepOutcome::Locked { cleared_lines: 4 })
        );
        assert_eq!(board.stats().score(), 15);
        assert_eq!(board.stats().level(), 1);
        assert_eq!(board.grid(), &Grid::EMPTY);

        // The pause timer wins over the new fall interval.
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::PieceLocked(PieceKind::I),
                BoardEvent::LinesCleared(4),
                BoardEvent::LinesChanged(4),
                BoardEvent::ScoreChanged(15),
                BoardEvent::LevelChanged(1),
                BoardEvent::TimerRestarted(LINE_CLEAR_PAUSE),
            ]
        );

        board.tick().unwrap();
        let fall = Duration::from_millis(707);
        assert_eq!(board.tick_interval(), Some(fall));
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::NextPieceChanged(PieceKind::I),
                BoardEvent::TimerRestarted(fall),
            ]
        );
    }

    #[test]
    fn test_level_up_while_running_restarts_timer() {
        let mut board = started(&[PieceKind::O]);
        board.award(15);
        let fall = Duration::from_millis(707);
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::ScoreChanged(15),
                BoardEvent::LevelChanged(1),
                BoardEvent::TimerRestarted(fall),
            ]
        );
        assert_eq!(board.tick_interval(), Some(fall));
    }

    #[test]
    fn test_level_rises_by_one_per_update() {
        let mut board = started(&[PieceKind::O]);
        board.award(60);
        assert_eq!(board.stats().level(), 1);
        board.award(0);
        assert_eq!(board.stats().level(), 2);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut board = started(&[PieceKind::O]);
        board.grid.set_cell(7, 20, Block::Piece(PieceKind::L));
        board.grid.set_cell(3, 2, Block::Piece(PieceKind::J));
        let grid_before = board.grid;

        assert!(!board.spawn());
        assert_eq!(board.grid, grid_before);
        assert_eq!(board.status(), GameStatus::GameOver);
        assert_eq!(board.active_piece(), None);
        assert_eq!(board.tick_interval(), None);
        assert_eq!(
            board.take_events(),
            [
                BoardEvent::NextPieceChanged(PieceKind::O),
                BoardEvent::TimerStopped,
                BoardEvent::GameOver,
            ]
        );

        let rejected = CommandError::NotAccepted(GameStatus::GameOver);
        assert_eq!(board.tick(), Err(rejected));
        assert_eq!(board.move_right(), Err(rejected));
        assert_eq!(board.toggle_pause(), Err(rejected));
    }

    #[test]
    fn test_horizontal_moves_stop_at_walls() {
        let mut board = started(&[PieceKind::I]);
        for column in (0..6).rev() {
            board.move_left().unwrap();
            assert_eq!(anchor(&board).column, column);
        }
        assert_eq!(
            board.move_left(),
            Err(CommandError::Collision(PieceCollisionError))
        );
        assert_eq!(anchor(&board).column, 0);

        for _ in 0..9 {
            board.move_right().unwrap();
        }
        assert!(board.move_right().unwrap_err().is_collision());
        assert_eq!(anchor(&board), Position::new(9, 20));
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut board = started(&[PieceKind::I]);
        board.grid.set_cell(5, 18, Block::Piece(PieceKind::S));
        let before = board.active_piece();

        assert!(board.move_left().unwrap_err().is_collision());
        assert_eq!(board.active_piece(), before);
        board.move_right().unwrap();
    }

    #[test]
    fn test_rotation_keeps_anchor_without_kicks() {
        let mut board = started(&[PieceKind::T]);
        let spawned = board.active_piece().unwrap();

        // Both rotations would poke above the top row.
        assert!(board.rotate_right().unwrap_err().is_collision());
        assert!(board.rotate_left().unwrap_err().is_collision());
        assert_eq!(board.active_piece(), Some(spawned));

        board.soft_drop().unwrap();
        board.rotate_right().unwrap();
        let active = board.active_piece().unwrap();
        assert_eq!(active.anchor(), Position::new(6, 20));
        assert_eq!(active.piece(), Piece::new(PieceKind::T).rotated_right());
    }

    #[test]
    fn test_rotation_rejected_at_wall() {
        let mut board = started(&[PieceKind::I]);
        for _ in 0..3 {
            board.move_right().unwrap();
        }
        let before = board.active_piece();

        assert!(board.rotate_left().unwrap_err().is_collision());
        assert_eq!(board.active_piece(), before);
    }

    #[test]
    fn test_rotation_blocked_by_locked_cell() {
        let mut board = started(&[PieceKind::T]);
        board.soft_drop().unwrap();
        // Covered by both rotations at (6, 20) but not by the spawn shape.
        board.grid.set_cell(6, 21, Block::Piece(PieceKind::S));
        let before = board.active_piece();

        assert_eq!(
            board.rotate_right(),
            Err(CommandError::Collision(PieceCollisionError))
        );
        assert_eq!(board.active_piece(), before);
        assert!(board.rotate_left().unwrap_err().is_collision());
        assert_eq!(board.active_piece(), before);
        assert!(board.take_events().is_empty());

        board.grid.set_cell(6, 21, Block::Empty);
        board.rotate_right().unwrap();
        assert_eq!(anchor(&board), Position::new(6, 20));
    }

    #[test]
    fn test_pause_round_trip() {
        let mut board = started(&[PieceKind::O]);

        board.toggle_pause().unwrap();
        assert_eq!(board.status(), GameStatus::Paused);
        assert_eq!(board.tick_interval(), None);
        assert_eq!(
            board.take_events(),
            [BoardEvent::Paused, BoardEvent::TimerStopped]
        );

        let rejected = CommandError::NotAccepted(GameStatus::Paused);
        assert_eq!(board.move_left(), Err(rejected));
        assert_eq!(board.tick(), Err(rejected));
        assert_eq!(board.start(), Err(rejected));
        assert_eq!(anchor(&board), Position::new(6, 21));

        board.toggle_pause().unwrap();
        assert_eq!(board.status(), GameStatus::Running);
        assert_eq!(
            board.take_events(),
            [BoardEvent::Resumed, BoardEvent::TimerRestarted(FALL)]
        );
    }

    #[test]
    fn test_start_resets_session() {
        let mut board = started(&[PieceKind::I]);
        for row in 0..4 {
            fill_row_with_gap(&mut board.grid, row, 6, PieceKind::Z);
        }
        board.grid.set_cell(2, 11, Block::Piece(PieceKind::T));
        board.hard_drop().unwrap();
        assert_eq!(board.stats().level(), 1);
        assert_ne!(board.grid(), &Grid::EMPTY);

        board.start().unwrap();
        assert_eq!(board.status(), GameStatus::Running);
        assert_eq!(board.grid(), &Grid::EMPTY);
        assert_eq!(board.stats(), &GameStats::new());
        assert_eq!(board.tick_interval(), Some(FALL));
        assert!(board.active_piece().is_some());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut board = started(&[PieceKind::O]);
        board.grid.set_cell(6, 21, Block::Piece(PieceKind::O));
        board.spawn();
        assert!(board.status().is_game_over());

        board.start().unwrap();
        assert_eq!(board.status(), GameStatus::Running);
        assert_eq!(board.grid(), &Grid::EMPTY);
    }

    #[test]
    fn test_snapshot_serialization() {
        let mut board = started(&[PieceKind::O, PieceKind::T]);
        board.hard_drop().unwrap();

        let snapshot = board.snapshot();
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.next_piece, PieceKind::O);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "Running");
        assert_eq!(json["next_piece"], "O");
        assert_eq!(json["active_piece"]["kind"], "T");
        assert_eq!(json["active_piece"]["anchor"]["column"], 6);
        assert_eq!(json["active_piece"]["cells"].as_array().unwrap().len(), 4);
        assert_eq!(json["stats"]["dropped_pieces"], 1);
        assert_eq!(json["grid"][Grid::HEIGHT - 1], "......OO..");
    }
}
