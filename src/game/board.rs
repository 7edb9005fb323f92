use crate::game::Difficulty;

/// What the board reports when a game ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOutcome {
    pub won: bool,
    pub elapsed_secs: f32,
    pub clicks: u32,
}

/// The playable board. Owned outside the window; the window only drives it.
pub trait GameBoard {
    fn is_game_active(&self) -> bool;
    /// Difficulty of the game in progress (or the last one started).
    fn difficulty(&self) -> Option<Difficulty>;
    fn start_new_game(&mut self, difficulty: Difficulty);
    fn continue_game(&mut self);
    fn pause_game(&mut self);
    fn restart_game(&mut self);
    fn set_player_name(&mut self, name: &str);
    /// Cell size in terminal columns and whether to draw grid lines.
    fn set_draw_options(&mut self, cell_draw_size: u16, use_grid_canvas: bool);
}
