use quadris_engine::{Block, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// A single piece centered in a 4x4 box.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: Piece) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Whether the piece covers column `x`, row `y` of its bounding box.
///
/// Larger offset `y` values are drawn lower, as on the board.
fn is_occupied(piece: &Piece, x: u16, y: u16) -> bool {
    let (x, y) = (
        piece.min_x() + i32::from(x),
        piece.min_y() + i32::from(y),
    );
    piece.cells().any(|cell| cell == (x, y))
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        BlockDisplay::from_block(Block::Empty, false).render(area, buf);

        let Some(piece) = self.piece else {
            return;
        };
        let (width, height) = piece.size();
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let occupied_block = BlockDisplay::from_block(Block::Piece(piece.kind()), false);
        for (y, grid_row) in (0..).zip(grid_rows) {
            for (x, grid_cell) in (0..).zip(grid_row) {
                if is_occupied(&piece, x, y) {
                    Widget::render(&occupied_block, grid_cell, buf);
                }
            }
        }
    }
}
