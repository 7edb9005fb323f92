use serde::{Deserialize, Serialize};

use crate::{MAX_GRID_SIZE, MAX_MINE_RATIO, MIN_GRID_SIZE, MIN_MINE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub width: u32,
    pub height: u32,
    pub mine_count: u32,
}

impl Difficulty {
    pub const BEGINNER: Difficulty = Difficulty::new(9, 9, 10);
    pub const INTERMEDIATE: Difficulty = Difficulty::new(16, 16, 40);
    pub const EXPERT: Difficulty = Difficulty::new(30, 16, 99);

    pub const fn new(width: u32, height: u32, mine_count: u32) -> Self {
        Self {
            width,
            height,
            mine_count,
        }
    }

    pub fn total_cells(&self) -> u32 {
        self.width.saturating_mul(self.height)
    }

    pub fn is_beginner(&self) -> bool {
        *self == Self::BEGINNER
    }

    pub fn is_intermediate(&self) -> bool {
        *self == Self::INTERMEDIATE
    }

    pub fn is_expert(&self) -> bool {
        *self == Self::EXPERT
    }

    /// Upper bound for the mine count on this grid: a quarter of the cells.
    pub fn max_mine_count(&self) -> u32 {
        ((self.total_cells() as f32) * MAX_MINE_RATIO).floor() as u32
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.clamp_mines();
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.clamp_mines();
    }

    pub fn set_mine_count(&mut self, mine_count: u32) {
        self.mine_count = mine_count;
        self.clamp_mines();
    }

    /// Pull every field back into bounds, grid first so the mine cap is sane.
    pub fn clamp_to_bounds(&mut self) {
        self.width = self.width.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.height = self.height.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.clamp_mines();
    }

    fn clamp_mines(&mut self) {
        let max = self.max_mine_count().max(MIN_MINE_COUNT);
        self.mine_count = self.mine_count.clamp(MIN_MINE_COUNT, max);
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Beginner, Preset::Intermediate, Preset::Expert];

    pub fn difficulty(self) -> Difficulty {
        match self {
            Preset::Beginner => Difficulty::BEGINNER,
            Preset::Intermediate => Difficulty::INTERMEDIATE,
            Preset::Expert => Difficulty::EXPERT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preset::Beginner => "Beginner",
            Preset::Intermediate => "Intermediate",
            Preset::Expert => "Expert",
        }
    }

    pub fn matches(self, difficulty: &Difficulty) -> bool {
        match self {
            Preset::Beginner => difficulty.is_beginner(),
            Preset::Intermediate => difficulty.is_intermediate(),
            Preset::Expert => difficulty.is_expert(),
        }
    }
}
