use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::FOOD_COLORS;
use crate::game::{SessionState, Snapshot};

const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, usize::from(hud_area.width)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot, available_width: usize) -> Line<'static> {
    let compact = info_width(snapshot, false) > available_width;
    let (length_label, score_label, high_label) = if compact {
        ("L", "S", "H")
    } else {
        ("Length", "Score", "Hi")
    };

    let beating_high = snapshot.score > 0 && snapshot.score >= snapshot.high_score;
    let score_style = if beating_high {
        Style::default()
            .fg(FOOD_COLORS[snapshot.food_color % FOOD_COLORS.len()])
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::raw(format!("{length_label}: ")),
        Span::styled(
            snapshot.snake_cells.len().to_string(),
            Style::default().fg(Color::White),
        ),
        Span::raw(SEPARATOR),
        Span::raw(format!("{score_label}: ")),
        Span::styled(snapshot.score.to_string(), score_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{high_label}: ")),
        Span::styled(
            snapshot.high_score.to_string(),
            Style::default().fg(Color::Gray),
        ),
    ];

    if !compact && snapshot.state == SessionState::Running {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::raw(format!("{:?}", snapshot.heading)));
    }

    Line::from(spans)
}

fn info_width(snapshot: &Snapshot, compact: bool) -> usize {
    let mut text = if compact {
        format!(
            "L: {}{SEPARATOR}S: {}{SEPARATOR}H: {}",
            snapshot.snake_cells.len(),
            snapshot.score,
            snapshot.high_score
        )
    } else {
        format!(
            "Length: {}{SEPARATOR}Score: {}{SEPARATOR}Hi: {}",
            snapshot.snake_cells.len(),
            snapshot.score,
            snapshot.high_score
        )
    };

    // The heading is only drawn with full labels while running.
    if !compact && snapshot.state == SessionState::Running {
        text.push_str(&format!("{SEPARATOR}{:?}", snapshot.heading));
    }

    text.width()
}
