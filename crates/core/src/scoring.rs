//! Scoring module - classic line-clear scoring, levels and gravity
//!
//! Points are awarded once per lock for all rows cleared by it, so a Tetris
//! (4 rows at once) scores 800 x level rather than 4 x 100 x level.

use crate::types::{
    DROP_INTERVAL_FLOOR_MS, LEVEL_SPEEDS, LEVEL_SPEED_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
    START_LEVEL,
};

/// Calculate line clear score
/// lines: number of lines cleared by one lock (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    calculate_line_score_with(&LINE_SCORES, lines, level)
}

/// Same as [`calculate_line_score`] with a custom table.
///
/// Counts outside the table score nothing.
pub fn calculate_line_score_with(table: &[u32; 5], lines: usize, level: u32) -> u32 {
    match table.get(lines) {
        Some(&base) => base.saturating_mul(level.max(1)),
        None => 0,
    }
}

/// Level reached after `total_lines` cleared lines
pub fn calculate_level(total_lines: u32) -> u32 {
    calculate_level_with(total_lines, LINES_PER_LEVEL, START_LEVEL)
}

pub fn calculate_level_with(total_lines: u32, lines_per_level: u32, start_level: u32) -> u32 {
    start_level.max(1) + total_lines / lines_per_level.max(1)
}

/// Get gravity interval for a level (in milliseconds)
///
/// Levels 1-5 use `LEVEL_SPEEDS`, later levels get 20ms faster each until the floor.
/// The floor keeps the interval above a few frames at `TICK_MS`, so from level 12 on
/// it stops decreasing.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let level = level.max(1) as usize;
    if level <= LEVEL_SPEEDS.len() {
        return LEVEL_SPEEDS[level - 1].max(DROP_INTERVAL_FLOOR_MS);
    }

    let last = LEVEL_SPEEDS[LEVEL_SPEEDS.len() - 1];
    let extra = (level - LEVEL_SPEEDS.len()) as u32;
    last.saturating_sub(extra.saturating_mul(LEVEL_SPEED_STEP_MS))
        .max(DROP_INTERVAL_FLOOR_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        assert_eq!(calculate_line_score(1, 3), 300);
        assert_eq!(calculate_line_score(4, 5), 4000);
    }

    #[test]
    fn test_tetris_beats_four_singles() {
        assert!(calculate_line_score(4, 1) > 4 * calculate_line_score(1, 1));
    }

    #[test]
    fn test_out_of_table_scores_nothing() {
        assert_eq!(calculate_line_score(5, 1), 0);
        assert_eq!(calculate_line_score(20, 3), 0);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);

        assert_eq!(calculate_level_with(4, 2, 3), 5);
        assert_eq!(calculate_level_with(4, 0, 0), 5);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 800);
        assert_eq!(get_drop_interval_ms(2), 600);
        assert_eq!(get_drop_interval_ms(5), 200);
        assert_eq!(get_drop_interval_ms(6), 180);
        assert_eq!(get_drop_interval_ms(12), 60);
        assert_eq!(get_drop_interval_ms(50), DROP_INTERVAL_FLOOR_MS);
        // Level 0 is treated as level 1.
        assert_eq!(get_drop_interval_ms(0), 800);
    }

    #[test]
    fn test_drop_interval_strictly_decreases_until_floor() {
        let mut prev = get_drop_interval_ms(1);
        for level in 2..40 {
            let next = get_drop_interval_ms(level);
            if prev > DROP_INTERVAL_FLOOR_MS {
                assert!(next < prev, "level {} did not speed up", level);
            } else {
                assert_eq!(next, DROP_INTERVAL_FLOOR_MS);
            }
            prev = next;
        }
    }
}
