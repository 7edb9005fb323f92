mod render;

use std::path::Path;

use ratatui::prelude::*;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::game::{GameBoard, Preset};
use crate::io::RemoteBoard;
use crate::settings::Settings;
use crate::window::{MainPanel, SetupField, SetupTab, Window};
use crate::{MIN_PANE_HEIGHT, MIN_PANE_WIDTH, TITLE};

use render::{field_line, high_score_lines, title_line};

pub struct DrawContext<'a> {
    pub window: &'a Window,
    pub settings: &'a Settings,
    pub board: &'a RemoteBoard,
    pub settings_path: &'a Path,
    pub socket_path: &'a Path,
}

pub fn draw_window(frame: &mut Frame, ctx: &DrawContext) {
    let area = frame.size();

    if area.width < MIN_PANE_WIDTH || area.height < MIN_PANE_HEIGHT {
        let msg = Paragraph::new(format!(
            "RESIZE PANE (min {}x{})",
            MIN_PANE_WIDTH, MIN_PANE_HEIGHT
        ))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(TITLE));
        frame.render_widget(msg, area);
        return;
    }

    // Outer "cabinet" frame.
    let cabinet = Block::default()
        .border_type(BorderType::Thick)
        .borders(Borders::ALL);
    let cabinet_inner = cabinet.inner(area);
    frame.render_widget(cabinet, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(cabinet_inner);

    draw_title(frame, ctx.window, rows[0]);
    match ctx.window.main_panel {
        MainPanel::NewGame => draw_new_game_panel(frame, ctx, rows[1]),
        MainPanel::Game => draw_game_panel(frame, ctx, rows[1]),
    }
}

fn draw_title(frame: &mut Frame, window: &Window, area: Rect) {
    let mut line = title_line(&window.title.render(TITLE));
    line.spans.insert(0, Span::raw("✱  "));
    line.spans.push(Span::raw("  ✱"));
    let title = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_new_game_panel(frame: &mut Frame, ctx: &DrawContext, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let tab = |label: &'static str, selected: bool| {
        let style = if selected {
            Style::new().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            Style::new()
        };
        Span::styled(format!(" {label} "), style)
    };
    let tabs = Line::from(vec![
        tab("Play", ctx.window.setup_tab == SetupTab::Play),
        Span::raw("  "),
        tab("High Scores", ctx.window.setup_tab == SetupTab::HighScores),
    ]);
    frame.render_widget(Paragraph::new(tabs).alignment(Alignment::Center), rows[0]);

    match ctx.window.setup_tab {
        SetupTab::Play => draw_setup(frame, ctx, rows[1]),
        SetupTab::HighScores => {
            let table = &ctx.settings.high_scores;
            let list = Paragraph::new(high_score_lines(table, ctx.window.last_high_score_rank))
                .block(
                    Block::default()
                        .title(format!("EXPERT {}/{}", table.len(), table.capacity()))
                        .borders(Borders::ALL),
                );
            frame.render_widget(list, rows[1]);
        }
    }
}

fn draw_setup(frame: &mut Frame, ctx: &DrawContext, area: Rect) {
    let window = ctx.window;
    let d = &ctx.settings.last_difficulty;
    let focused = |field: SetupField| window.focus == field;

    let mut lines = vec![
        field_line("Player Name:", window.name_text.clone(), focused(SetupField::Name)),
        field_line("Width:", d.width.to_string(), focused(SetupField::Width)),
        field_line("Height:", d.height.to_string(), focused(SetupField::Height)),
        field_line(
            "Mines:",
            format!("{} (max {})", d.mine_count, window.max_mine_count),
            focused(SetupField::Mines),
        ),
        Line::raw(""),
    ];

    let mut presets = Vec::new();
    for (i, preset) in Preset::ALL.into_iter().enumerate() {
        let style = if window.is_difficulty_selected(ctx.settings, preset) {
            Style::new().add_modifier(Modifier::REVERSED)
        } else {
            Style::new()
        };
        presets.push(Span::styled(format!(" F{} {} ", i + 1, preset.label()), style));
        presets.push(Span::raw(" "));
    }
    lines.push(Line::from(presets));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Enter  start new game"));
    if ctx.board.is_game_active() {
        lines.push(Line::raw("F5     continue game"));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("settings: {}", ctx.settings_path.display()),
        Style::new().fg(Color::DarkGray),
    ));

    let setup = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(setup, area);
}

fn draw_game_panel(frame: &mut Frame, ctx: &DrawContext, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(4)])
        .split(area);

    let mut lines = Vec::new();
    if ctx.board.is_attached() {
        lines.push(Line::raw("Board connected"));
    } else {
        lines.push(Line::raw(format!(
            "Waiting for board on {}",
            ctx.socket_path.display()
        )));
    }
    if let Some(d) = ctx.board.difficulty() {
        lines.push(Line::raw(format!(
            "{}x{}, {} mines",
            d.width, d.height, d.mine_count
        )));
    }
    let status = if ctx.board.is_game_active() { "ACTIVE" } else { "IDLE" };
    lines.push(Line::raw(format!("{:<8} {}", "STATUS:", status)));
    lines.push(Line::raw(format!(
        "{:<8} {}",
        "PLAYER:", ctx.settings.last_player_name
    )));

    if let Some(outcome) = ctx.window.last_outcome {
        lines.push(Line::raw(""));
        let verdict = if outcome.won { "WON" } else { "LOST" };
        lines.push(Line::raw(format!(
            "{verdict} in {:.1}s with {} clicks",
            outcome.elapsed_secs, outcome.clicks
        )));
        if let Some(rank) = ctx.window.last_high_score_rank {
            lines.push(Line::styled(
                format!("NEW HIGH SCORE: rank {}", rank + 1),
                Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ));
        }
    }

    let info = Paragraph::new(lines)
        .block(Block::default().title("GAME").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, rows[0]);

    let controls = Paragraph::new(vec![
        Line::raw("esc setup   r restart"),
        Line::raw("ctrl-c quit"),
    ])
    .block(Block::default().title("CONTROLS").borders(Borders::ALL));
    frame.render_widget(controls, rows[1]);
}
