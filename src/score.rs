//! Scoring system following modern Tetris guidelines

use serde::{Deserialize, Serialize};

/// Type of line clear for scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClearType {
    None,
    Single,
    Double,
    Triple,
    Tetris,
    TSpinMini,
    TSpinZero,
    TSpinSingle,
    TSpinDouble,
    TSpinTriple,
}

impl ClearType {
    /// Base points at level 1
    pub fn base_score(&self) -> u64 {
        match self {
            ClearType::None => 0,
            ClearType::Single => 100,
            ClearType::Double => 300,
            ClearType::Triple => 500,
            ClearType::Tetris => 800,
            ClearType::TSpinMini => 100,
            ClearType::TSpinZero => 400,
            ClearType::TSpinSingle => 800,
            ClearType::TSpinDouble => 1200,
            ClearType::TSpinTriple => 1600,
        }
    }

    /// Clears that extend a back-to-back chain
    pub fn is_difficult(&self) -> bool {
        matches!(
            self,
            ClearType::Tetris
                | ClearType::TSpinMini
                | ClearType::TSpinSingle
                | ClearType::TSpinDouble
                | ClearType::TSpinTriple
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClearType::None => "",
            ClearType::Single => "Single",
            ClearType::Double => "Double",
            ClearType::Triple => "Triple",
            ClearType::Tetris => "Tetris",
            ClearType::TSpinMini => "Mini T-Spin",
            ClearType::TSpinZero => "T-Spin",
            ClearType::TSpinSingle => "T-Spin Single",
            ClearType::TSpinDouble => "T-Spin Double",
            ClearType::TSpinTriple => "T-Spin Triple",
        }
    }
}

/// Classify a lock by lines cleared and T-spin flags
pub fn determine_clear_type(lines_cleared: u32, is_t_spin: bool, is_t_spin_mini: bool) -> ClearType {
    if !is_t_spin {
        return match lines_cleared {
            0 => ClearType::None,
            1 => ClearType::Single,
            2 => ClearType::Double,
            3 => ClearType::Triple,
            _ => ClearType::Tetris,
        };
    }
    if is_t_spin_mini && lines_cleared <= 1 {
        return ClearType::TSpinMini;
    }
    match lines_cleared {
        0 => ClearType::TSpinZero,
        1 => ClearType::TSpinSingle,
        2 => ClearType::TSpinDouble,
        _ => ClearType::TSpinTriple,
    }
}

/// Outcome of [`Score::process_line_clear`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearResult {
    pub clear_type: ClearType,
    pub score: u64,
    pub back_to_back: bool,
    pub combo: i32,
}

/// Score, combo and back-to-back bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Consecutive clearing locks, -1 when no combo is running
    pub combo: i32,
    /// Consecutive difficult clears, -1 when no chain is running
    pub back_to_back: i32,
    pub last_clear: Option<ClearType>,
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

impl Score {
    pub fn new() -> Self {
        Self {
            points: 0,
            combo: -1,
            back_to_back: -1,
            last_clear: None,
        }
    }

    /// Score a lock and update combo and back-to-back state
    pub fn process_line_clear(
        &mut self,
        lines_cleared: u32,
        level: u32,
        is_t_spin: bool,
        is_t_spin_mini: bool,
    ) -> ClearResult {
        let clear_type = determine_clear_type(lines_cleared, is_t_spin, is_t_spin_mini);

        if lines_cleared == 0 && clear_type != ClearType::TSpinZero {
            self.reset_combo();
            self.last_clear = None;
            return ClearResult {
                clear_type,
                score: 0,
                back_to_back: false,
                combo: self.combo,
            };
        }

        self.combo += 1;

        let level = level as u64;
        let mut score = clear_type.base_score() * level;

        // Back-to-back bonus (1.5x for consecutive difficult clears)
        let mut back_to_back = false;
        if lines_cleared > 0 {
            if clear_type.is_difficult() {
                if self.back_to_back >= 0 {
                    score = score * 3 / 2;
                    back_to_back = true;
                }
                self.back_to_back += 1;
            } else {
                self.back_to_back = -1;
            }
        }

        // Combo bonus
        score += 50 * self.combo as u64 * level;

        self.points += score;
        self.last_clear = Some(clear_type);

        ClearResult {
            clear_type,
            score,
            back_to_back,
            combo: self.combo,
        }
    }

    /// Add score for soft drop (1 point per cell)
    pub fn add_soft_drop(&mut self, cells: u32) {
        self.points += cells as u64;
    }

    /// Add score for hard drop (2 points per cell)
    pub fn add_hard_drop(&mut self, cells: u32) {
        self.points += cells as u64 * 2;
    }

    /// Reset combo (called when piece locks without clearing lines)
    pub fn reset_combo(&mut self) {
        self.combo = -1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_type_classification() {
        assert_eq!(determine_clear_type(0, false, false), ClearType::None);
        assert_eq!(determine_clear_type(4, false, false), ClearType::Tetris);
        assert_eq!(determine_clear_type(0, true, false), ClearType::TSpinZero);
        assert_eq!(determine_clear_type(1, true, true), ClearType::TSpinMini);
        assert_eq!(determine_clear_type(2, true, true), ClearType::TSpinDouble);
        assert_eq!(determine_clear_type(3, true, false), ClearType::TSpinTriple);
        assert_eq!(determine_clear_type(4, true, false), ClearType::TSpinTriple);
    }

    #[test]
    fn test_base_values_at_level_one() {
        for (lines, expected) in [(1, 100), (2, 300), (3, 500), (4, 800)] {
            let mut score = Score::new();
            let result = score.process_line_clear(lines, 1, false, false);
            assert_eq!(result.score, expected);
            assert_eq!(score.points, expected);
        }
    }

    #[test]
    fn test_level_multiplier() {
        let mut score = Score::new();
        let result = score.process_line_clear(4, 3, false, false);
        assert_eq!(result.score, 2400);
    }

    #[test]
    fn test_back_to_back() {
        let mut score = Score::new();
        // First tetris
        score.process_line_clear(4, 1, false, false);
        assert_eq!(score.points, 800);
        // Second tetris: 800 * 1.5 + combo 1 bonus of 50
        let second = score.process_line_clear(4, 1, false, false);
        assert_eq!(second.score, 1250);
        assert!(second.back_to_back);
        assert_eq!(score.back_to_back, 1);
    }

    #[test]
    fn test_single_breaks_back_to_back() {
        let mut score = Score::new();
        score.process_line_clear(4, 1, false, false);
        score.process_line_clear(1, 1, false, false);
        assert_eq!(score.back_to_back, -1);
        // Break combo too so only the multiplier question remains
        score.process_line_clear(0, 1, false, false);
        let tetris = score.process_line_clear(4, 1, false, false);
        assert!(!tetris.back_to_back);
        assert_eq!(tetris.score, 800);
    }

    #[test]
    fn test_combo() {
        let mut score = Score::new();
        let scores: Vec<_> = (0..3)
            .map(|_| score.process_line_clear(1, 1, false, false))
            .map(|r| (r.score, r.combo))
            .collect();
        assert_eq!(scores, vec![(100, 0), (150, 1), (200, 2)]);
        assert_eq!(score.points, 450);

        let miss = score.process_line_clear(0, 1, false, false);
        assert_eq!(miss.score, 0);
        assert_eq!(score.combo, -1);
        assert_eq!(score.last_clear, None);
    }

    #[test]
    fn test_t_spin_zero_keeps_back_to_back() {
        let mut score = Score::new();
        score.process_line_clear(4, 1, false, false);
        let zero = score.process_line_clear(0, 1, true, false);
        assert_eq!(zero.clear_type, ClearType::TSpinZero);
        // 400 base + combo 1 bonus
        assert_eq!(zero.score, 450);
        assert!(!zero.back_to_back);
        assert_eq!(score.back_to_back, 0);

        let tsd = score.process_line_clear(2, 1, true, false);
        assert!(tsd.back_to_back);
        assert_eq!(tsd.score, 1200 * 3 / 2 + 100);
    }

    #[test]
    fn test_mini_without_lines_scores_nothing() {
        let mut score = Score::new();
        score.process_line_clear(1, 1, false, false);
        let mini = score.process_line_clear(0, 1, true, true);
        assert_eq!(mini.clear_type, ClearType::TSpinMini);
        assert_eq!(mini.score, 0);
        assert_eq!(score.combo, -1);
    }

    #[test]
    fn test_mini_single_extends_back_to_back() {
        let mut score = Score::new();
        score.process_line_clear(4, 2, false, false);
        let mini = score.process_line_clear(1, 2, true, true);
        assert!(mini.back_to_back);
        // 100 * 2 * 1.5 + 50 * 1 * 2
        assert_eq!(mini.score, 300 + 100);
    }

    #[test]
    fn test_drop_points() {
        let mut score = Score::new();
        score.add_soft_drop(3);
        score.add_hard_drop(10);
        assert_eq!(score.points, 23);
    }
}
