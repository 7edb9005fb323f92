use serde::{Deserialize, Serialize};

use crate::game::{Difficulty, GameOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u32,
    pub elapsed_time: f32,
    pub click_count: u32,
}

impl HighScoreEntry {
    pub fn new(player_name: impl Into<String>, score: u32, elapsed_time: f32, click_count: u32) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            elapsed_time,
            click_count,
        }
    }
}

/// Descending by score, never longer than `capacity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreTable {
    capacity: usize,
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Build from arbitrary entries (e.g. a hand-edited settings file):
    /// stable-sorts descending and drops whatever doesn't fit.
    pub fn from_entries(capacity: usize, mut entries: Vec<HighScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(capacity);
        Self { capacity, entries }
    }

    pub fn normalize(&mut self) {
        let entries = std::mem::take(&mut self.entries);
        *self = Self::from_entries(self.capacity, entries);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Rank the entry would land on, without inserting it.
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        match self.entries.iter().position(|e| e.score < score) {
            Some(rank) => Some(rank),
            None if !self.is_full() => Some(self.entries.len()),
            None => None,
        }
    }

    /// Fixed-capacity ranked insert. Returns the 0-based rank the entry took.
    pub fn try_insert(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.rank_for(entry.score)?;
        self.entries.insert(rank, entry);
        self.entries.truncate(self.capacity);
        Some(rank)
    }
}

impl Default for HighScoreTable {
    fn default() -> Self {
        Self::new(crate::DEFAULT_HIGH_SCORE_CAPACITY)
    }
}

/// `floor(max / elapsed + max / clicks)`; `None` when either divisor is unusable.
pub fn compute_score(elapsed_secs: f32, clicks: u32, max_score: u32) -> Option<u32> {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 || clicks == 0 {
        return None;
    }
    let max = max_score as f64;
    let value = max / elapsed_secs as f64 + max / clicks as f64;
    Some(value.floor() as u32)
}

/// Game-over path: only won Expert games are scored and ranked.
pub fn record_game_over(
    table: &mut HighScoreTable,
    difficulty: &Difficulty,
    outcome: &GameOutcome,
    player_name: &str,
    max_score: u32,
) -> Option<usize> {
    if !outcome.won || !difficulty.is_expert() {
        return None;
    }
    let score = compute_score(outcome.elapsed_secs, outcome.clicks, max_score)?;
    table.try_insert(HighScoreEntry::new(
        player_name,
        score,
        outcome.elapsed_secs,
        outcome.clicks,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(name: &str, score: u32) -> HighScoreEntry {
        HighScoreEntry::new(name, score, 100.0, 50)
    }

    fn table(capacity: usize, scores: &[u32]) -> HighScoreTable {
        let entries = scores
            .iter()
            .enumerate()
            .map(|(i, s)| entry(&format!("p{i}"), *s))
            .collect();
        HighScoreTable::from_entries(capacity, entries)
    }

    fn scores(t: &HighScoreTable) -> Vec<u32> {
        t.entries().iter().map(|e| e.score).collect()
    }

    fn won(elapsed_secs: f32, clicks: u32) -> GameOutcome {
        GameOutcome {
            won: true,
            elapsed_secs,
            clicks,
        }
    }

    #[test]
    fn score_formula_is_additive() {
        assert_eq!(compute_score(50.0, 10, 1000), Some(120));
        assert_eq!(compute_score(3.0, 7, 1000), Some(476));
        // fast but clicky can beat slow but careful
        let fast = compute_score(10.0, 400, 1000).unwrap();
        let slow = compute_score(900.0, 200, 1000).unwrap();
        assert!(fast > slow);
    }

    #[test]
    fn score_formula_rejects_zero_divisors() {
        assert_eq!(compute_score(0.0, 10, 1000), None);
        assert_eq!(compute_score(10.0, 0, 1000), None);
        assert_eq!(compute_score(f32::NAN, 10, 1000), None);
        assert_eq!(compute_score(-1.0, 10, 1000), None);
    }

    #[test]
    fn insert_into_partial_table_keeps_order() {
        let mut t = table(5, &[90, 70, 50]);
        assert_eq!(t.try_insert(entry("new", 80)), Some(1));
        assert_eq!(scores(&t), vec![90, 80, 70, 50]);
    }

    #[test]
    fn lowest_score_appends_when_room_left() {
        let mut t = table(5, &[90, 70]);
        assert_eq!(t.try_insert(entry("new", 10)), Some(2));
        assert_eq!(scores(&t), vec![90, 70, 10]);
    }

    #[test]
    fn tie_ranks_below_existing() {
        let mut t = table(5, &[90, 70]);
        assert_eq!(t.try_insert(entry("new", 70)), Some(2));
        assert_eq!(t.entries()[1].player_name, "p1");
    }

    #[test]
    fn full_table_rejects_non_qualifying_score() {
        let mut t = table(3, &[90, 70, 50]);
        let before = t.clone();
        assert_eq!(t.try_insert(entry("new", 50)), None);
        assert_eq!(t.try_insert(entry("new", 1)), None);
        assert_eq!(t, before);
    }

    #[test]
    fn full_table_shifts_and_drops_last() {
        let mut t = table(4, &[90, 70, 50, 30]);
        assert_eq!(t.try_insert(entry("new", 60)), Some(2));
        assert_eq!(scores(&t), vec![90, 70, 60, 50]);
        assert_eq!(t.entries()[3].player_name, "p2");
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn empty_table_takes_first_entry() {
        let mut t = HighScoreTable::new(3);
        assert_eq!(t.try_insert(entry("a", 5)), Some(0));
        let mut zero = HighScoreTable::new(0);
        assert_eq!(zero.try_insert(entry("a", 5)), None);
        assert!(zero.is_empty());
    }

    #[test]
    fn from_entries_sorts_and_truncates() {
        let t = table(2, &[10, 90, 50]);
        assert_eq!(scores(&t), vec![90, 50]);
        assert!(t.is_full());
    }

    #[test]
    fn game_over_requires_win_on_expert() {
        let mut t = HighScoreTable::new(5);
        let lost = GameOutcome {
            won: false,
            elapsed_secs: 1.0,
            clicks: 1,
        };
        assert_eq!(
            record_game_over(&mut t, &Difficulty::EXPERT, &lost, "me", 1000),
            None
        );
        assert_eq!(
            record_game_over(&mut t, &Difficulty::BEGINNER, &won(1.0, 1), "me", 1000),
            None
        );
        let custom = Difficulty::new(30, 16, 98);
        assert_eq!(record_game_over(&mut t, &custom, &won(1.0, 1), "me", 1000), None);
        assert!(t.is_empty());
    }

    #[test]
    fn game_over_records_entry() {
        let mut t = HighScoreTable::new(5);
        let rank = record_game_over(&mut t, &Difficulty::EXPERT, &won(50.0, 10), "me", 1000);
        assert_eq!(rank, Some(0));
        let e = &t.entries()[0];
        assert_eq!(e.player_name, "me");
        assert_eq!(e.score, 120);
        assert_eq!(e.click_count, 10);
    }

    #[test]
    fn repeated_game_over_inserts_twice() {
        let mut t = HighScoreTable::new(5);
        let first = record_game_over(&mut t, &Difficulty::EXPERT, &won(50.0, 10), "me", 1000);
        let second = record_game_over(&mut t, &Difficulty::EXPERT, &won(50.0, 10), "me", 1000);
        assert_eq!((first, second), (Some(0), Some(1)));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn zero_clicks_never_ranks() {
        let mut t = HighScoreTable::new(5);
        assert_eq!(
            record_game_over(&mut t, &Difficulty::EXPERT, &won(10.0, 0), "me", 1000),
            None
        );
        assert!(t.is_empty());
    }

    proptest! {
        #[test]
        fn insert_keeps_table_sorted_and_bounded(
            capacity in 0usize..12,
            existing in proptest::collection::vec(0u32..1000, 0..16),
            score in 0u32..1000,
        ) {
            let mut t = table(capacity, &existing);
            let before = t.clone();
            let rank = t.try_insert(entry("new", score));
            let s = scores(&t);
            prop_assert!(t.len() <= capacity);
            prop_assert!(s.windows(2).all(|w| w[0] >= w[1]));
            match rank {
                Some(r) => {
                    prop_assert_eq!(t.entries()[r].player_name.as_str(), "new");
                    prop_assert!(before.entries()[..r].iter().all(|e| e.score >= score));
                    if !before.is_full() {
                        prop_assert_eq!(t.len(), before.len() + 1);
                    }
                }
                None => {
                    prop_assert!(before.is_full());
                    prop_assert!(before.entries().iter().all(|e| e.score >= score));
                    prop_assert_eq!(&t, &before);
                }
            }
        }
    }
}
