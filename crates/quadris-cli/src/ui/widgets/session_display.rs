use quadris_engine::{BoardSnapshot, GameStatus, Piece};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Stats, playfield and next piece side by side, with a status banner over
/// the playfield when the game is not running.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    snapshot: &'a BoardSnapshot,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(snapshot: &'a BoardSnapshot) -> Self {
        Self {
            snapshot,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }

    fn border_color(&self) -> Color {
        match self.snapshot.status {
            GameStatus::Running | GameStatus::WaitingAfterLineClear => color::WHITE,
            GameStatus::NotStarted => color::GRAY,
            GameStatus::Paused => color::YELLOW,
            GameStatus::GameOver => color::RED,
        }
    }

    fn banner(&self) -> Option<(&'static str, Style)> {
        match self.snapshot.status {
            GameStatus::Running | GameStatus::WaitingAfterLineClear => None,
            GameStatus::NotStarted => Some((
                "PRESS S TO START",
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            GameStatus::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            GameStatus::GameOver => {
                Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
            }
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_color = self.border_color();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(&self.snapshot.grid)
            .active_piece(self.snapshot.active_piece)
            .block(
                Block::bordered()
                    .border_style(border_color)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new()
            .piece(Piece::new(self.snapshot.next_piece))
            .block(panel("NEXT"));
        let stats_panel = StatsDisplay::new(&self.snapshot.stats).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats_panel.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats_panel.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats_panel.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
