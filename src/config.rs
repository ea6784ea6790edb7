use ratatui::style::Color;
use ratatui::symbols::border;

use crate::grid::Position;
use crate::input::Direction;

/// Colors for the board, the HUD and the overlays.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Border drawn with half blocks so the solid half hugs the board.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph painted into every terminal column of a filled cell.
pub const GLYPH_FILL: &str = "█";

/// Glyph painted into every terminal column of the food cell.
pub const GLYPH_FOOD: &str = "●";

/// Tick interval at score zero, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: u64 = 400;

/// Period of the elapsed-time counter, in milliseconds.
pub const ELAPSED_TICK_MS: u64 = 1000;

/// Points granted per food eaten.
pub const SCORE_PER_FOOD: u32 = 10;

/// Cell occupied by the single-segment snake at the start of every game.
pub const START_POSITION: Position = Position::new(1, 3);

/// Heading of the snake at the start of every game.
pub const START_HEADING: Direction = Direction::Right;

/// Key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Minimum swipe travel, on either axis, to count as a heading request.
pub const SWIPE_THRESHOLD: f32 = 15.0;

/// Default terminal columns per grid cell. Two columns make cells roughly
/// square in most terminal fonts.
pub const DEFAULT_CELL_WIDTH: u16 = 2;

/// Default terminal rows per grid cell.
pub const DEFAULT_CELL_HEIGHT: u16 = 1;

/// Terminal rows reserved below the play area for the HUD.
pub const HUD_HEIGHT: u16 = 2;

/// Terminal rows and columns taken by the play-area border on each axis.
pub const BORDER_THICKNESS: u16 = 2;
