use ratatui::prelude::*;
use ratatui::text::{Line, Span};

use crate::game::{HighScoreTable, TitleSpan};

fn title_style(highlighted: bool) -> Style {
    let fg = if highlighted { Color::Red } else { Color::White };
    Style::new().fg(fg).add_modifier(Modifier::BOLD)
}

/// Styled line for the animated title; one ratatui span per title span.
pub fn title_line<'a>(spans: &[TitleSpan<'a>]) -> Line<'a> {
    let spans: Vec<Span<'a>> = spans
        .iter()
        .map(|s| Span::styled(s.text, title_style(s.highlighted)))
        .collect();
    Line::from(spans)
}

pub fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let value_style = if focused {
        Style::new().add_modifier(Modifier::REVERSED)
    } else {
        Style::new()
    };
    Line::from(vec![
        Span::raw(format!("{marker}{label:<13}")),
        Span::styled(value, value_style),
    ])
}

/// Ranked rows, with the freshly inserted rank picked out.
pub fn high_score_lines(table: &HighScoreTable, highlight: Option<usize>) -> Vec<Line<'static>> {
    if table.is_empty() {
        return vec![Line::raw("No expert wins yet.")];
    }
    let mut lines = vec![Line::from(Span::styled(
        format!("{:>3}  {:<20} {:>7} {:>8} {:>6}", "#", "NAME", "SCORE", "TIME", "CLICKS"),
        Style::new().add_modifier(Modifier::UNDERLINED),
    ))];
    for (rank, e) in table.entries().iter().enumerate() {
        let row = format!(
            "{:>3}  {:<20} {:>7} {:>7.1}s {:>6}",
            rank + 1,
            e.player_name,
            e.score,
            e.elapsed_time,
            e.click_count
        );
        let style = if highlight == Some(rank) {
            Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        lines.push(Line::from(Span::styled(row, style)));
    }
    lines
}
