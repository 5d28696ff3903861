use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, piece_display::*, session_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod piece_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const ROSE: Color = Color::Rgb(0xcc, 0x66, 0x66);
    pub const LEAF: Color = Color::Rgb(0x66, 0xcc, 0x66);
    pub const SLATE: Color = Color::Rgb(0x66, 0x66, 0xcc);
    pub const SAND: Color = Color::Rgb(0xcc, 0xcc, 0x66);
    pub const ORCHID: Color = Color::Rgb(0xcc, 0x66, 0xcc);
    pub const TEAL: Color = Color::Rgb(0x66, 0xcc, 0xcc);
    pub const AMBER: Color = Color::Rgb(0xda, 0xaa, 0x00);

    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const HELP: Style = fg_bg(color::GRAY, color::BLACK);

    pub const S_BLOCK: Style = bg_only(color::ROSE);
    pub const Z_BLOCK: Style = bg_only(color::LEAF);
    pub const I_BLOCK: Style = bg_only(color::SLATE);
    pub const O_BLOCK: Style = bg_only(color::SAND);
    pub const T_BLOCK: Style = bg_only(color::ORCHID);
    pub const L_BLOCK: Style = bg_only(color::TEAL);
    pub const J_BLOCK: Style = bg_only(color::AMBER);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
