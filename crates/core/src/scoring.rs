//! Scoring module - line clear points, hard drop bonus, level and gravity
//!
//! There is no level multiplier, combo or back-to-back: a clear is worth a
//! flat table value, and the level only affects gravity.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, FALLBACK_POINTS_PER_LINE, HARD_DROP_POINTS_PER_ROW, LINE_SCORES,
    LINES_PER_LEVEL, MIN_DROP_MS,
};

/// Points for clearing `lines` rows in one lock
///
/// 1/2/3/4 rows use the table (100/300/500/800). Any other count falls back
/// to 200 per line, which also makes 0 rows worth 0.
pub fn calculate_line_score(lines: u32) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines as usize],
        _ => lines.saturating_mul(FALLBACK_POINTS_PER_LINE),
    }
}

/// Hard drop bonus for the rows travelled
pub fn calculate_hard_drop_score(rows: u32) -> u32 {
    rows.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level for a total line count (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, never below the floor
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(reduction).max(MIN_DROP_MS)
}
