use crossterm::event::{Event, KeyCode, KeyEventKind};
use quadris_engine::{BoardEvent, GameBoard, GameStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    tui::{App, Tui},
    ui::widgets::{SessionDisplay, style},
};

#[derive(Debug)]
pub struct PlayApp {
    board: GameBoard,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(board: GameBoard) -> Self {
        Self {
            board,
            is_exiting: false,
        }
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    /// Drains board events and keeps the tick timer in step with the board.
    fn sync_timer(&mut self, tui: &mut Tui) {
        for event in self.board.take_events() {
            match event {
                BoardEvent::TimerRestarted(interval) => tui.restart_tick(interval),
                BoardEvent::TimerStopped => tui.stop_tick(),
                _ => {}
            }
        }
    }

    fn help_text(&self) -> &'static str {
        match self.board.status() {
            GameStatus::NotStarted => "Controls: S (Start) | Q (Quit)",
            GameStatus::Running | GameStatus::WaitingAfterLineClear => {
                "Controls: ← → (Move) | ↑ ↓ (Rotate) | Space (Drop) | D (Down) | P (Pause) | S (Restart) | Q (Quit)"
            }
            GameStatus::Paused => "Controls: P (Resume) | Q (Quit)",
            GameStatus::GameOver => "Controls: S (Restart) | Q (Quit)",
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_timer(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind == KeyEventKind::Release {
            return;
        }

        // Rejected commands leave the board as it was; nothing to report.
        match key.code {
            KeyCode::Left => _ = self.board.move_left(),
            KeyCode::Right => _ = self.board.move_right(),
            KeyCode::Up => _ = self.board.rotate_left(),
            KeyCode::Down => _ = self.board.rotate_right(),
            KeyCode::Char(' ') => _ = self.board.hard_drop(),
            KeyCode::Char('d' | 'D') => _ = self.board.soft_drop(),
            KeyCode::Char('s' | 'S') => _ = self.board.start(),
            KeyCode::Char('p' | 'P') => _ = self.board.toggle_pause(),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
        self.sync_timer(tui);
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.board.snapshot();
        let session_display = SessionDisplay::new(&snapshot);
        let help_text = Text::from(self.help_text())
            .style(style::HELP)
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(24), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(session_display, main_area);
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        _ = self.board.tick();
        self.sync_timer(tui);
    }
}
