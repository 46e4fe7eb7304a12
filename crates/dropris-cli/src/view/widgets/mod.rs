use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, leaderboard_display::*,
    overlay_display::*, piece_display::*, piece_stack_display::*, session_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod leaderboard_display;
mod overlay_display;
mod piece_display;
mod piece_stack_display;
mod session_display;
mod session_stats_display;

pub(crate) mod color {
    use ratatui::style::Color;

    pub const PINK: Color = Color::Rgb(0xff, 0x0d, 0x72);
    pub const SKY: Color = Color::Rgb(0x0d, 0xc2, 0xff);
    pub const MINT: Color = Color::Rgb(0x0d, 0xff, 0x72);
    pub const VIOLET: Color = Color::Rgb(0xf5, 0x38, 0xff);
    pub const ORANGE: Color = Color::Rgb(0xff, 0x8e, 0x0d);
    pub const YELLOW: Color = Color::Rgb(0xff, 0xe1, 0x38);
    pub const BLUE: Color = Color::Rgb(0x38, 0x77, 0xff);

    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(60, 60, 60);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub(crate) mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::DARK_GRAY, color::BLACK);
    pub const GHOST: Style = fg_bg(color::GRAY, color::BLACK);
    pub const FLASH: Style = bg_only(color::WHITE);

    pub const I_BLOCK: Style = bg_only(color::PINK);
    pub const T_BLOCK: Style = bg_only(color::SKY);
    pub const L_BLOCK: Style = bg_only(color::MINT);
    pub const J_BLOCK: Style = bg_only(color::VIOLET);
    pub const Z_BLOCK: Style = bg_only(color::ORANGE);
    pub const S_BLOCK: Style = bg_only(color::YELLOW);
    pub const O_BLOCK: Style = bg_only(color::BLUE);

    pub const PAUSED_POPUP: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER_POPUP: Style = fg_bg(color::WHITE, color::RED);
    pub const ADVERTISEMENT_POPUP: Style = fg_bg(color::BLACK, color::SKY);
    pub const BANNER: Style = fg_bg(color::BLACK, color::MINT);
}

fn block_margin(block: Option<&BlockWidget>) -> (u16, u16) {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    (outer.width - inner.width, outer.height - inner.height)
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    block_margin(block).0
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    block_margin(block).1
}
