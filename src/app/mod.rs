use std::io::{stdout, Stdout};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::Config;
use crate::game::Preset;
use crate::io::{spawn_socket_listener, BoardEvent, RemoteBoard};
use crate::settings::Settings;
use crate::ui::{draw_window, DrawContext};
use crate::window::{MainPanel, SetupField, SetupTab, Window};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: &Config) -> Result<()> {
    let fallback = Settings::with_high_score_capacity(config.high_score_capacity);
    let mut settings = Settings::load_or(&config.settings_path, fallback);

    let (tx, rx) = mpsc::channel();
    let _socket = spawn_socket_listener(&config.socket_path, tx)?;

    let mut tui = TuiGuard::new()?;
    let result = run_loop(tui.terminal_mut(), config, &mut settings, &rx);
    drop(tui);

    save_settings(&settings, config);
    result
}

/// What the loop should do after an input event.
enum Flow {
    Continue,
    Quit,
}

fn run_loop(
    terminal: &mut Term,
    config: &Config,
    settings: &mut Settings,
    rx: &mpsc::Receiver<BoardEvent>,
) -> Result<()> {
    let mut window = Window::new(settings, config.max_score);
    let mut board: RemoteBoard = RemoteBoard::new();
    let mut last_tick = Instant::now();

    loop {
        for ev in rx.try_iter() {
            if let Some(outcome) = board.apply(ev) {
                if window.on_game_over(settings, &board, outcome).is_some() {
                    save_settings(settings, config);
                }
            }
        }

        terminal.draw(|frame| {
            let ctx = DrawContext {
                window: &window,
                settings,
                board: &board,
                settings_path: &config.settings_path,
                socket_path: &config.socket_path,
            };
            draw_window(frame, &ctx)
        })?;

        // Start requests wait one drawn frame.
        window.run_deferred(settings, &mut board);

        let timeout = config
            .tick_interval
            .saturating_sub(last_tick.elapsed())
            .min(Duration::from_millis(50));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Flow::Quit = handle_key(key, &mut window, settings, &mut board, config) {
                        break;
                    }
                }
            }
        }

        if last_tick.elapsed() >= config.tick_interval {
            window.tick();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(
    key: KeyEvent,
    window: &mut Window,
    settings: &mut Settings,
    board: &mut RemoteBoard,
    config: &Config,
) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }
    match window.main_panel {
        MainPanel::Game => match key.code {
            KeyCode::Esc => window.goto_new_game_panel(board),
            KeyCode::Char('r') => window.on_restart_game_click(board),
            _ => {}
        },
        MainPanel::NewGame => return handle_setup_key(key.code, window, settings, board, config),
    }
    Flow::Continue
}

fn handle_setup_key(
    code: KeyCode,
    window: &mut Window,
    settings: &mut Settings,
    board: &mut RemoteBoard,
    config: &Config,
) -> Flow {
    match code {
        KeyCode::Esc => return Flow::Quit,
        KeyCode::Left => window.select_tab(SetupTab::Play),
        KeyCode::Right => window.select_tab(SetupTab::HighScores),
        KeyCode::Tab => window.focus_next(settings, true),
        KeyCode::BackTab => window.focus_next(settings, false),
        KeyCode::F(n @ 1..=3) => {
            let preset = Preset::ALL[usize::from(n) - 1];
            window.on_difficulty_click(settings, preset);
        }
        KeyCode::F(5) => window.on_continue_game_click(board),
        KeyCode::Enter => {
            if window.focus == SetupField::Name {
                let text = window.name_text.clone();
                window.on_player_name_committed(settings, &text);
                save_settings(settings, config);
            }
            window.on_start_new_game_click(settings);
        }
        KeyCode::Up => window.adjust_focused(settings, 1),
        KeyCode::Down => window.adjust_focused(settings, -1),
        KeyCode::PageUp => window.adjust_focused(settings, 10),
        KeyCode::PageDown => window.adjust_focused(settings, -10),
        KeyCode::Backspace if window.focus == SetupField::Name => window.pop_name_char(settings),
        KeyCode::Char(ch) if window.focus == SetupField::Name => window.push_name_char(settings, ch),
        _ => {}
    }
    Flow::Continue
}

fn save_settings(settings: &Settings, config: &Config) {
    match settings.save(&config.settings_path) {
        Ok(()) => info!(path = %config.settings_path.display(), "settings saved"),
        Err(err) => warn!(error = %format!("{err:#}"), "settings not saved"),
    }
}

struct TuiGuard {
    terminal: Term,
}

impl TuiGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Term {
        &mut self.terminal
    }
}

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
