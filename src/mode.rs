//! Game modes: Marathon, Sprint, Ultra

use serde::{Deserialize, Serialize};

/// Available game modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Marathon, // 150 lines over 15 levels
    Sprint,   // Clear 40 lines as fast as possible
    Ultra,    // Score as much as possible in 2 minutes
}

impl GameMode {
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::Marathon => "Marathon",
            GameMode::Sprint => "Sprint",
            GameMode::Ultra => "Ultra",
        }
    }

    pub fn all() -> &'static [GameMode] {
        &[GameMode::Marathon, GameMode::Sprint, GameMode::Ultra]
    }

    /// The fixed rule set for this mode
    pub fn config(&self) -> ModeConfig {
        match self {
            GameMode::Marathon => ModeConfig {
                mode: GameMode::Marathon,
                start_level: 1,
                lines_per_level: 10,
                max_level: 15,
                time_limit_ms: 0,
                line_target: 150,
                completable: true,
            },
            GameMode::Sprint => ModeConfig {
                mode: GameMode::Sprint,
                start_level: 1,
                lines_per_level: 0,
                max_level: 1,
                time_limit_ms: 0,
                line_target: 40,
                completable: true,
            },
            GameMode::Ultra => ModeConfig {
                mode: GameMode::Ultra,
                start_level: 1,
                lines_per_level: 10,
                max_level: 15,
                time_limit_ms: 120_000,
                line_target: 0,
                completable: false,
            },
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameMode::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown game mode '{s}'"))
    }
}

/// Immutable rules of a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeConfig {
    pub mode: GameMode,
    pub start_level: u32,
    /// Lines needed per level, 0 = no progression
    pub lines_per_level: u32,
    pub max_level: u32,
    /// 0 = unlimited
    pub time_limit_ms: u64,
    /// 0 = none
    pub line_target: u32,
    pub completable: bool,
}

impl Default for ModeConfig {
    fn default() -> Self {
        GameMode::default().config()
    }
}

impl ModeConfig {
    /// Lines required to advance from `level` to the next one
    pub fn lines_for_level(&self, _level: u32) -> u32 {
        self.lines_per_level
    }
}

/// Level reached after `total_lines`, capped at one past the mode's max level
pub fn calculate_level(mode: &ModeConfig, start_level: u32, total_lines: u32) -> u32 {
    let mut level = start_level;
    let mut remaining = total_lines;
    loop {
        let needed = mode.lines_for_level(level);
        if needed == 0 || remaining < needed {
            break;
        }
        remaining -= needed;
        level += 1;
        if level > mode.max_level {
            break;
        }
    }
    level.min(mode.max_level + 1)
}

/// Whether the mode's goal has been reached
pub fn is_mode_completed(mode: &ModeConfig, level: u32, total_lines: u32, _elapsed_ms: u64) -> bool {
    if !mode.completable {
        return false;
    }
    match mode.mode {
        GameMode::Marathon => level > mode.max_level,
        GameMode::Sprint => total_lines >= mode.line_target,
        // Ends on time expiry instead
        GameMode::Ultra => false,
    }
}

pub fn is_time_expired(mode: &ModeConfig, elapsed_ms: u64) -> bool {
    mode.time_limit_ms > 0 && elapsed_ms >= mode.time_limit_ms
}

/// Guideline gravity: milliseconds per row at the given level, floored at 16
pub fn gravity_interval_ms(level: u32) -> f64 {
    let level = level.max(1) as f64;
    let seconds = (0.8 - (level - 1.0) * 0.007).powf(level - 1.0);
    (seconds * 1000.0).max(16.0)
}

/// Format milliseconds as MM:SS.mmm
pub fn format_time(elapsed_ms: u64) -> String {
    let minutes = elapsed_ms / 60000;
    let seconds = (elapsed_ms % 60000) / 1000;
    let millis = elapsed_ms % 1000;
    format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marathon_levels() {
        let marathon = GameMode::Marathon.config();
        assert_eq!(calculate_level(&marathon, 1, 0), 1);
        assert_eq!(calculate_level(&marathon, 1, 9), 1);
        assert_eq!(calculate_level(&marathon, 1, 10), 2);
        assert_eq!(calculate_level(&marathon, 1, 149), 15);
        assert_eq!(calculate_level(&marathon, 1, 150), 16);
        assert_eq!(calculate_level(&marathon, 1, 1000), 16);
        assert_eq!(calculate_level(&marathon, 5, 20), 7);
    }

    #[test]
    fn test_sprint_has_no_progression() {
        let sprint = GameMode::Sprint.config();
        assert_eq!(calculate_level(&sprint, 1, 0), 1);
        assert_eq!(calculate_level(&sprint, 1, 39), 1);
    }

    #[test]
    fn test_completion() {
        let marathon = GameMode::Marathon.config();
        assert!(!is_mode_completed(&marathon, 15, 149, 0));
        assert!(is_mode_completed(&marathon, 16, 150, 0));

        let sprint = GameMode::Sprint.config();
        assert!(!is_mode_completed(&sprint, 1, 39, 0));
        assert!(is_mode_completed(&sprint, 1, 41, 0));

        let ultra = GameMode::Ultra.config();
        assert!(!is_mode_completed(&ultra, 15, 500, 200_000));
    }

    #[test]
    fn test_time_expiry() {
        let ultra = GameMode::Ultra.config();
        assert!(!is_time_expired(&ultra, 119_999));
        assert!(is_time_expired(&ultra, 120_000));
        let marathon = GameMode::Marathon.config();
        assert!(!is_time_expired(&marathon, u64::MAX));
    }

    #[test]
    fn test_gravity_curve() {
        assert!((gravity_interval_ms(1) - 1000.0).abs() < 1e-9);
        assert_eq!(gravity_interval_ms(0), gravity_interval_ms(1));
        for level in 1..13 {
            assert!(gravity_interval_ms(level + 1) < gravity_interval_ms(level));
        }
        assert_eq!(gravity_interval_ms(20), 16.0);
        assert_eq!(gravity_interval_ms(30), 16.0);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("sprint".parse::<GameMode>(), Ok(GameMode::Sprint));
        assert_eq!("ULTRA".parse::<GameMode>(), Ok(GameMode::Ultra));
        assert!("zen".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00.000");
        assert_eq!(format_time(61_234), "01:01.234");
    }
}
