use tracing::{debug, info};

use crate::game::{
    record_game_over, sanitize_player_name, Difficulty, GameBoard, GameOutcome, Preset,
    TitleAnimator,
};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainPanel {
    NewGame,
    Game,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupTab {
    Play,
    HighScores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupField {
    Name,
    Width,
    Height,
    Mines,
}

impl SetupField {
    const ORDER: [SetupField; 4] = [
        SetupField::Name,
        SetupField::Width,
        SetupField::Height,
        SetupField::Mines,
    ];

    fn step(self, forward: bool) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let n = Self::ORDER.len();
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        Self::ORDER[next]
    }
}

/// Shell state of the Minesweeper window. Settings and the board are owned
/// by the caller and handed in per event.
pub struct Window {
    pub main_panel: MainPanel,
    pub setup_tab: SetupTab,
    pub focus: SetupField,
    pub name_text: String,
    pub title: TitleAnimator,
    pub last_high_score_rank: Option<usize>,
    pub last_outcome: Option<GameOutcome>,
    pub max_mine_count: u32,
    pending_start: Option<Difficulty>,
    max_score: u32,
}

impl Window {
    pub fn new(settings: &Settings, max_score: u32) -> Self {
        Self {
            main_panel: MainPanel::NewGame,
            setup_tab: SetupTab::Play,
            focus: SetupField::Name,
            name_text: settings.last_player_name.clone(),
            title: TitleAnimator::new(),
            last_high_score_rank: None,
            last_outcome: None,
            max_mine_count: settings.last_difficulty.max_mine_count(),
            pending_start: None,
            max_score,
        }
    }

    pub fn tick(&mut self) {
        self.title.tick();
    }

    /// Leaving the name field counts as a commit.
    pub fn focus_next(&mut self, settings: &mut Settings, forward: bool) {
        if self.focus == SetupField::Name {
            let text = self.name_text.clone();
            self.on_player_name_committed(settings, &text);
        }
        self.focus = self.focus.step(forward);
    }

    pub fn select_tab(&mut self, tab: SetupTab) {
        self.setup_tab = tab;
    }

    /// Every keystroke: sanitize and overwrite both the store and the field.
    pub fn on_player_name_changed(&mut self, settings: &mut Settings, text: &str) {
        settings.last_player_name = sanitize_player_name(text);
        self.name_text = settings.last_player_name.clone();
    }

    pub fn on_player_name_committed(&mut self, settings: &mut Settings, text: &str) {
        settings.last_player_name = sanitize_player_name(text);
        self.name_text = settings.last_player_name.clone();
        debug!(name = %settings.last_player_name, "player name committed");
    }

    pub fn push_name_char(&mut self, settings: &mut Settings, ch: char) {
        let mut text = self.name_text.clone();
        text.push(ch);
        self.on_player_name_changed(settings, &text);
    }

    pub fn pop_name_char(&mut self, settings: &mut Settings) {
        let mut text = self.name_text.clone();
        text.pop();
        self.on_player_name_changed(settings, &text);
    }

    pub fn on_difficulty_click(&mut self, settings: &mut Settings, preset: Preset) {
        settings.last_difficulty = preset.difficulty();
        self.max_mine_count = settings.last_difficulty.max_mine_count();
        debug!(preset = preset.label(), "difficulty preset selected");
    }

    /// Nudge the focused numeric field by `delta`.
    pub fn adjust_focused(&mut self, settings: &mut Settings, delta: i32) {
        let d = &mut settings.last_difficulty;
        let nudge = |v: u32| v.saturating_add_signed(delta);
        match self.focus {
            SetupField::Name => return,
            SetupField::Width => d.set_width(nudge(d.width)),
            SetupField::Height => d.set_height(nudge(d.height)),
            SetupField::Mines => d.set_mine_count(nudge(d.mine_count)),
        }
        self.max_mine_count = d.max_mine_count();
    }

    pub fn is_difficulty_selected(&self, settings: &Settings, preset: Preset) -> bool {
        preset.matches(&settings.last_difficulty)
    }

    /// Switches to the game panel; the board itself is started on the next
    /// frame by `run_deferred`.
    pub fn on_start_new_game_click(&mut self, settings: &Settings) {
        self.pending_start = Some(settings.last_difficulty);
        self.last_high_score_rank = None;
        self.main_panel = MainPanel::Game;
    }

    pub fn run_deferred(&mut self, settings: &Settings, board: &mut dyn GameBoard) {
        if let Some(difficulty) = self.pending_start.take() {
            info!(
                width = difficulty.width,
                height = difficulty.height,
                mines = difficulty.mine_count,
                "starting new game"
            );
            board.set_player_name(&settings.last_player_name);
            board.set_draw_options(settings.cell_draw_size, settings.use_grid_canvas);
            board.start_new_game(difficulty);
        }
    }

    pub fn on_continue_game_click(&mut self, board: &mut dyn GameBoard) {
        if !board.is_game_active() {
            return;
        }
        board.continue_game();
        self.main_panel = MainPanel::Game;
    }

    pub fn on_restart_game_click(&mut self, board: &mut dyn GameBoard) {
        self.last_high_score_rank = None;
        board.restart_game();
    }

    pub fn goto_new_game_panel(&mut self, board: &mut dyn GameBoard) {
        board.pause_game();
        self.main_panel = MainPanel::NewGame;
    }

    /// Scores the finished game against the table. Returns the new rank, if any.
    pub fn on_game_over(
        &mut self,
        settings: &mut Settings,
        board: &dyn GameBoard,
        outcome: GameOutcome,
    ) -> Option<usize> {
        self.last_outcome = Some(outcome);
        self.last_high_score_rank = board.difficulty().and_then(|difficulty| {
            record_game_over(
                &mut settings.high_scores,
                &difficulty,
                &outcome,
                &settings.last_player_name,
                self.max_score,
            )
        });
        info!(
            won = outcome.won,
            elapsed = outcome.elapsed_secs,
            clicks = outcome.clicks,
            rank = ?self.last_high_score_rank,
            "game over"
        );
        self.last_high_score_rank
    }
}
