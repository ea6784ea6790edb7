use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::engine::{EngineState, Snapshot};

const HUD_INNER_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " │ ";

/// Renders the two HUD rows: live values on top, key hints below.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot<'_>, theme: &Theme) {
    let [values_area, hints_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(values_line(snapshot, theme)).alignment(Alignment::Left),
        inset_horizontal(values_area, HUD_INNER_MARGIN_X),
    );
    frame.render_widget(
        Paragraph::new(Line::from(hints_text(snapshot.state)))
            .alignment(Alignment::Left)
            .style(Style::default().fg(theme.menu_footer)),
        inset_horizontal(hints_area, HUD_INNER_MARGIN_X),
    );
}

fn values_line(snapshot: &Snapshot<'_>, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.hud_label);
    let value = Style::default().fg(theme.hud_value);
    let new_high = snapshot.score > 0 && snapshot.score == snapshot.high_score;
    let high_style = if new_high {
        value.add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(snapshot.score.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("High: ", label),
        Span::styled(snapshot.high_score.to_string(), high_style),
        Span::styled(SEPARATOR, label),
        Span::styled("Time: ", label),
        Span::styled(snapshot.elapsed.to_string(), value),
        Span::styled(SEPARATOR, label),
        Span::styled("Length: ", label),
        Span::styled(snapshot.snake.len().to_string(), value),
    ])
}

fn hints_text(state: EngineState) -> &'static str {
    match state {
        EngineState::Idle => "[Enter] start  [Q] quit",
        EngineState::Running => "arrows/WASD move  [P] pause  [R] restart  [Q] quit",
        EngineState::Paused => "[P] resume  [R] restart  [Q] quit",
        EngineState::GameOver | EngineState::Won => "[Enter]/[R] play again  [Q] quit",
    }
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{hints_text, inset_horizontal};
    use crate::engine::EngineState;

    #[test]
    fn inset_shrinks_both_sides() {
        assert_eq!(
            inset_horizontal(Rect::new(0, 5, 20, 1), 1),
            Rect::new(1, 5, 18, 1)
        );
        assert_eq!(inset_horizontal(Rect::new(0, 0, 1, 1), 1).width, 0);
    }

    #[test]
    fn hints_follow_state() {
        assert!(hints_text(EngineState::Paused).contains("resume"));
        assert!(hints_text(EngineState::GameOver).contains("play again"));
    }
}
