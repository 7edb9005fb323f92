pub mod board;
pub mod difficulty;
pub mod name;
pub mod scores;
pub mod title;

pub use board::{GameBoard, GameOutcome};
pub use difficulty::{Difficulty, Preset};
pub use name::sanitize_player_name;
pub use scores::{record_game_over, HighScoreEntry, HighScoreTable};
pub use title::{render_title, TitleAnimator, TitleSpan};
