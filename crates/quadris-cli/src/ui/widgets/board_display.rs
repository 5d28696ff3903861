use std::iter;

use quadris_engine::{ActivePiece, Block, Grid};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::widgets::BlockDisplay;

/// The playfield with the falling piece drawn on top of the locked cells.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    active_piece: Option<ActivePiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            active_piece: None,
            block: None,
        }
    }

    pub fn active_piece(self, active_piece: Option<ActivePiece>) -> Self {
        Self {
            active_piece,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        Grid::WIDTH as u16 * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        Grid::HEIGHT as u16 * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }

    /// Rows top-down with the falling piece merged in.
    fn merged_rows(&self) -> Vec<[Block; Grid::WIDTH]> {
        let mut rows: Vec<_> = self.grid.rows_top_down().copied().collect();
        let Some(active) = self.active_piece else {
            return rows;
        };
        for pos in active.cells() {
            let (Ok(column), Ok(row)) = (usize::try_from(pos.column), usize::try_from(pos.row))
            else {
                continue;
            };
            if let Some(cell) = Grid::HEIGHT
                .checked_sub(row + 1)
                .and_then(|top_down| rows.get_mut(top_down))
                .and_then(|cells| cells.get_mut(column))
            {
                *cell = Block::Piece(active.kind());
            }
        }
        rows
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints = (0..Grid::WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..Grid::HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<{ Grid::HEIGHT }>(&vertical)
            .into_iter()
            .map(|row| row.layout::<{ Grid::WIDTH }>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.merged_rows()) {
            for (grid_cell, block) in iter::zip(grid_row, row) {
                BlockDisplay::from_block(block, true).render(grid_cell, buf);
            }
        }
    }
}
