use serde::{Serialize, Serializer, ser::SerializeSeq as _};

use super::piece::{Piece, PieceKind};

/// A single cell of the grid.
///
/// A locked cell remembers the kind of the piece that filled it; the kind
/// only matters for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    /// Returns `'.'` for an empty cell, otherwise the piece kind's letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Piece(kind) => kind.as_char(),
        }
    }
}

/// Column and row of a grid cell, with row 0 at the bottom.
///
/// Signed so that candidate placements outside the grid can be expressed
/// and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub column: i32,
    pub row: i32,
}

impl Position {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Board cell covered by the piece offset `(x, y)` when anchored here.
    #[must_use]
    pub const fn offset_by(self, (x, y): (i32, i32)) -> Self {
        Self::new(self.column + x, self.row - y)
    }

    #[must_use]
    pub const fn left(self) -> Self {
        Self::new(self.column - 1, self.row)
    }

    #[must_use]
    pub const fn right(self) -> Self {
        Self::new(self.column + 1, self.row)
    }

    #[must_use]
    pub const fn down(self) -> Self {
        Self::new(self.column, self.row - 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridRow {
    cells: [Block; Grid::WIDTH],
}

impl GridRow {
    const EMPTY: Self = Self {
        cells: [Block::Empty; Grid::WIDTH],
    };

    fn is_filled(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The fixed-size playfield.
///
/// Rows are stored bottom-up: row 0 is the floor, row `HEIGHT - 1` the top.
/// Only the engine writes to a grid; everyone else gets read access.
///
/// # Example
///
/// ```
/// use quadris_engine::{Block, Grid};
///
/// let grid = Grid::EMPTY;
/// assert_eq!(grid.cell(0, 0), Some(Block::Empty));
/// assert_eq!(grid.cell(Grid::WIDTH, 0), None);
/// assert!(!grid.is_free(-1, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; Grid::HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = 10;
    pub const HEIGHT: usize = 22;

    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; Grid::HEIGHT],
    };

    /// Returns the cell at `(column, row)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<Block> {
        self.rows.get(row)?.cells.get(column).copied()
    }

    /// Returns whether the cell exists and is empty.
    #[must_use]
    pub fn is_free(&self, column: i32, row: i32) -> bool {
        let (Ok(column), Ok(row)) = (usize::try_from(column), usize::try_from(row)) else {
            return false;
        };
        self.cell(column, row).is_some_and(Block::is_empty)
    }

    /// Returns whether every cell of `piece` anchored at `anchor` is free.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, anchor: Position) -> bool {
        piece.cells().all(|offset| {
            let pos = anchor.offset_by(offset);
            self.is_free(pos.column, pos.row)
        })
    }

    /// Iterates rows from the top of the grid down to the floor.
    pub fn rows_top_down(&self) -> impl Iterator<Item = &[Block; Grid::WIDTH]> {
        self.rows.iter().rev().map(|row| &row.cells)
    }

    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|b| !b.is_empty())
            .count()
    }

    /// Renders `row` as one character per cell, see [`Block::as_char`].
    #[must_use]
    pub fn row_text(&self, row: usize) -> Option<String> {
        let row = self.rows.get(row)?;
        Some(row.cells.iter().map(|b| b.as_char()).collect())
    }

    /// Writes `block` into a cell. Out-of-range coordinates are ignored.
    pub(crate) fn set_cell(&mut self, column: usize, row: usize, block: Block) {
        if let Some(cell) = self
            .rows
            .get_mut(row)
            .and_then(|row| row.cells.get_mut(column))
        {
            *cell = block;
        }
    }

    /// Locks the piece's cells into the grid with the piece's kind.
    pub(crate) fn fill_piece(&mut self, piece: &Piece, anchor: Position) {
        for offset in piece.cells() {
            let pos = anchor.offset_by(offset);
            if let (Ok(column), Ok(row)) = (usize::try_from(pos.column), usize::try_from(pos.row))
            {
                self.set_cell(column, row, Block::Piece(piece.kind()));
            }
        }
    }

    /// Removes every filled row and returns how many were removed.
    ///
    /// Rows above a removed row move down by one for each removed row
    /// below them; the vacated rows at the top become empty.
    pub(crate) fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for row in 0..Grid::HEIGHT {
            if self.rows[row].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[row - count] = self.rows[row];
            }
        }
        self.rows[Grid::HEIGHT - count..].fill(GridRow::EMPTY);
        count
    }
}

/// Serialized as a list of row strings, top row first.
impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(Grid::HEIGHT))?;
        for row in self.rows_top_down() {
            let text: String = row.iter().map(|b| b.as_char()).collect();
            seq.serialize_element(&text)?;
        }
        seq.end()
    }
}
