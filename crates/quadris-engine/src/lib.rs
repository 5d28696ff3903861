pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the requested placement")]
pub struct PieceCollisionError;

/// Reason a board command was rejected.
///
/// A rejected command never changes the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::From,
    derive_more::IsVariant,
)]
pub enum CommandError {
    #[display("{_0}")]
    #[from]
    Collision(PieceCollisionError),
    #[display("command not accepted while {_0}")]
    NotAccepted(#[error(not(source))] GameStatus),
    #[display("no active piece on the board")]
    NoActivePiece,
}
