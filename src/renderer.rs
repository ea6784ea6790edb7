use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, BORDER_THICKNESS, GLYPH_FILL, GLYPH_FOOD, HUD_HEIGHT, Theme,
};
use crate::engine::Snapshot;
use crate::grid::{GridSize, Position};
use crate::ui::hud::render_hud;
use crate::ui::menu::{Overlay, render_overlay};

/// Terminal columns and rows drawn for one grid cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

/// Returns the terminal area left for grid cells once the HUD and the
/// play-area border are taken out of a `width` x `height` screen.
#[must_use]
pub fn board_capacity(width: u16, height: u16) -> (u16, u16) {
    (
        width.saturating_sub(BORDER_THICKNESS),
        height
            .saturating_sub(HUD_HEIGHT)
            .saturating_sub(BORDER_THICKNESS),
    )
}

/// Renders the full game frame from an engine snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot<'_>, cell: CellSize, theme: &Theme) {
    let area = frame.area();
    let [board_band, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);
    let board_area = board_rect(board_band, snapshot.grid, cell);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    let buffer = frame.buffer_mut();
    if let Some(food) = snapshot.food {
        paint_cell(buffer, inner, cell, food, GLYPH_FOOD, Style::new().fg(theme.food));
    }
    let head = snapshot.snake.head();
    for segment in snapshot.snake.segments().skip(1) {
        paint_cell(
            buffer,
            inner,
            cell,
            *segment,
            GLYPH_FILL,
            Style::new().fg(theme.snake_body),
        );
    }
    // Head last so an overlapping body segment cannot hide it.
    paint_cell(
        buffer,
        inner,
        cell,
        head,
        GLYPH_FILL,
        Style::new()
            .fg(theme.snake_head)
            .add_modifier(Modifier::BOLD),
    );

    render_hud(frame, hud_area, snapshot, theme);

    if let Some(overlay) = Overlay::for_snapshot(snapshot) {
        render_overlay(frame, board_area, overlay, theme);
    }
}

/// Bordered rectangle sized to the grid, centered horizontally in `band`.
fn board_rect(band: Rect, grid: GridSize, cell: CellSize) -> Rect {
    let width = grid
        .cols
        .saturating_mul(cell.width)
        .saturating_add(BORDER_THICKNESS)
        .min(band.width);
    let height = grid
        .rows
        .saturating_mul(cell.height)
        .saturating_add(BORDER_THICKNESS)
        .min(band.height);
    Rect {
        x: band.x + (band.width - width) / 2,
        y: band.y,
        width,
        height,
    }
}

fn cell_rect(inner: Rect, cell: CellSize, position: Position) -> Option<Rect> {
    let col = u16::try_from(position.col).ok()?;
    let row = u16::try_from(position.row).ok()?;
    let x = inner.x.checked_add(col.checked_mul(cell.width)?)?;
    let y = inner.y.checked_add(row.checked_mul(cell.height)?)?;
    let rect = Rect::new(x, y, cell.width, cell.height).intersection(inner);
    (!rect.is_empty()).then_some(rect)
}

fn paint_cell(
    buffer: &mut Buffer,
    inner: Rect,
    cell: CellSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some(rect) = cell_rect(inner, cell, position) else {
        return;
    };
    let fill = glyph.repeat(usize::from(rect.width));
    for y in rect.top()..rect.bottom() {
        buffer.set_string(rect.x, y, &fill, style);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{CellSize, board_capacity, cell_rect, render};
    use crate::config::THEME_CLASSIC;
    use crate::engine::GameEngine;
    use crate::grid::{GridSize, Position};
    use crate::score::MemoryStore;

    const CELL: CellSize = CellSize {
        width: 2,
        height: 1,
    };

    #[test]
    fn capacity_reserves_hud_and_border() {
        assert_eq!(board_capacity(80, 24), (78, 20));
        assert_eq!(board_capacity(1, 1), (0, 0));
    }

    #[test]
    fn cells_outside_the_board_are_skipped() {
        let inner = Rect::new(1, 1, 12, 4);
        assert_eq!(
            cell_rect(inner, CELL, Position::new(1, 3)),
            Some(Rect::new(7, 2, 2, 1))
        );
        assert_eq!(cell_rect(inner, CELL, Position::new(-1, 0)), None);
        assert_eq!(cell_rect(inner, CELL, Position::new(0, 6)), None);
    }

    #[test]
    fn running_game_draws_snake_and_food() {
        let grid = GridSize::new(4, 6).expect("grid should be valid");
        let mut engine =
            GameEngine::with_seed(grid, MemoryStore::new(), 5).expect("start cell should fit");
        engine.start(Instant::now());
        assert!(engine.force_food(Position::new(3, 0)));

        let mut terminal = Terminal::new(TestBackend::new(14, 8)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &engine.snapshot(), CELL, &THEME_CLASSIC))
            .expect("draw should succeed");

        let buffer = terminal.backend().buffer();
        let symbol = |x: u16, y: u16| buffer.cell((x, y)).map(|c| c.symbol().to_owned());
        assert_eq!(symbol(7, 2).as_deref(), Some("█"));
        assert_eq!(symbol(8, 2).as_deref(), Some("█"));
        assert_eq!(symbol(1, 4).as_deref(), Some("●"));
        assert_eq!(symbol(2, 4).as_deref(), Some("●"));
        assert_eq!(symbol(3, 4).as_deref(), Some(" "));
    }
}
