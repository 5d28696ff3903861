//! Game rules and session state.
//!
//! This module drives the core data structures through a single-player
//! session:
//!
//! - [`GameBoard`] - The state machine: grid, falling piece, next piece, status
//! - [`GameStats`] - Score, cleared lines, level and fall interval
//! - [`BoardEvent`] - Notifications queued by board commands
//! - [`BoardSnapshot`] - Serializable copy of everything a renderer needs
//! - [`PieceSource`] - Where new pieces come from ([`RandomPieces`], [`PieceSequence`])
//!
//! # Game Flow
//!
//! 1. Create a [`GameBoard`] and call [`GameBoard::start`]
//! 2. Call [`GameBoard::tick`] whenever [`GameBoard::tick_interval`] elapses
//! 3. Forward player input as move, rotate and drop commands
//! 4. Drain [`GameBoard::take_events`] to refresh displays and restart the timer
//! 5. Repeat until the status becomes [`GameStatus::GameOver`]
//!
//! # Example
//!
//! ```
//! use quadris_engine::{GameBoard, GameStatus, PieceSeed};
//!
//! let mut board = GameBoard::with_seed(PieceSeed::from_u128(7));
//! board.start().unwrap();
//!
//! board.move_left().ok();
//! board.rotate_right().ok();
//! board.hard_drop().unwrap();
//!
//! assert_eq!(board.stats().dropped_pieces(), 1);
//! assert_eq!(board.status(), GameStatus::Running);
//! ```

pub use self::{board_event::*, game_board::*, game_stats::*, piece_source::*, snapshot::*};

mod board_event;
mod game_board;
mod game_stats;
mod piece_source;
mod snapshot;
