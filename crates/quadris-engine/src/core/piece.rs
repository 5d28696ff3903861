use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::Serialize;

/// A tetromino shape described by four cell offsets from its origin.
///
/// Offsets are not normalised: they may be negative, and the origin is the
/// pivot that rotation turns around. Board placement maps an offset
/// `(x, y)` at anchor `(ax, ay)` to column `ax + x` and row `ay - y`.
///
/// Pieces are immutable values. Rotation returns a new `Piece` and the
/// caller decides whether to adopt it.
///
/// # Example
///
/// ```
/// use quadris_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let rotated = piece.rotated_left();
///
/// assert_eq!(rotated.kind(), PieceKind::T);
/// assert_eq!(rotated.rotated_right(), piece);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cells: [(i8, i8); 4],
}

impl Piece {
    /// Number of cells in every piece.
    pub const CELL_COUNT: usize = 4;

    /// Creates a piece in the canonical layout of `kind`.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            cells: kind.canonical_cells(),
        }
    }

    /// Creates a piece of a kind chosen uniformly among the seven shapes.
    #[must_use]
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(rng.random())
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the offset of the cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not less than [`Self::CELL_COUNT`].
    #[must_use]
    pub fn cell(&self, index: usize) -> (i32, i32) {
        let (x, y) = self.cells[index];
        (i32::from(x), i32::from(y))
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells
            .iter()
            .map(|&(x, y)| (i32::from(x), i32::from(y)))
    }

    #[must_use]
    pub fn min_x(&self) -> i32 {
        self.cells().map(|(x, _)| x).fold(i32::MAX, i32::min)
    }

    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.cells().map(|(x, _)| x).fold(i32::MIN, i32::max)
    }

    #[must_use]
    pub fn min_y(&self) -> i32 {
        self.cells().map(|(_, y)| y).fold(i32::MAX, i32::min)
    }

    #[must_use]
    pub fn max_y(&self) -> i32 {
        self.cells().map(|(_, y)| y).fold(i32::MIN, i32::max)
    }

    /// Returns the width and height of the bounding box, in cells.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let width = self.max_x() - self.min_x() + 1;
        let height = self.max_y() - self.min_y() + 1;
        (
            u16::try_from(width).unwrap_or(0),
            u16::try_from(height).unwrap_or(0),
        )
    }

    /// Rotates 90° about the origin: `(x, y) → (y, -x)`.
    #[must_use]
    pub fn rotated_left(&self) -> Self {
        self.map_cells(|(x, y)| (y, -x))
    }

    /// Rotates 90° about the origin: `(x, y) → (-y, x)`.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        self.map_cells(|(x, y)| (-y, x))
    }

    fn map_cells(&self, f: impl Fn((i8, i8)) -> (i8, i8)) -> Self {
        Self {
            kind: self.kind,
            cells: self.cells.map(f),
        }
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// S-piece.
    S = 0,
    /// Z-piece.
    Z = 1,
    /// I-piece (line).
    I = 2,
    /// O-piece (square).
    O = 3,
    /// T-piece.
    T = 4,
    /// L-piece.
    L = 5,
    /// J-piece (mirrored L).
    J = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    const fn canonical_cells(self) -> [(i8, i8); 4] {
        PIECE_CELLS[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::J.as_char(), 'J');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'L' => Some(PieceKind::L),
            'J' => Some(PieceKind::J),
            _ => None,
        }
    }
}

// Indexed by `PieceKind as usize`.
const PIECE_CELLS: [[(i8, i8); 4]; PieceKind::LEN] = [
    // S-piece
    [(0, -1), (0, 0), (1, 0), (1, 1)],
    // Z-piece
    [(0, -1), (0, 0), (-1, 0), (-1, 1)],
    // I-piece
    [(0, -1), (0, 0), (0, 1), (0, 2)],
    // O-piece
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    // T-piece
    [(-1, 0), (0, 0), (1, 0), (0, 1)],
    // L-piece
    [(-1, -1), (0, -1), (0, 0), (0, 1)],
    // J-piece
    [(1, -1), (0, -1), (0, 0), (0, 1)],
];
