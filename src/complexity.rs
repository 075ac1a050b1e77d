//! File complexity scoring.
//!
//! A coarse, monotonic proxy built from symbol counts and file length,
//! bounded to a small ordinal range so it can rank files without pretending
//! to be a cyclomatic measure.

/// Weights and bounds for the score.
pub mod points {
    pub const PER_FUNCTION: usize = 2;
    pub const PER_CLASS: usize = 3;

    pub const LONG_FILE_LINES: usize = 500;
    pub const MEDIUM_FILE_LINES: usize = 200;
    pub const SHORT_FILE_LINES: usize = 100;

    pub const LONG_FILE_BONUS: usize = 5;
    pub const MEDIUM_FILE_BONUS: usize = 3;
    pub const SHORT_FILE_BONUS: usize = 1;

    pub const MAX_SCORE: u8 = 10;
}

/// Score a file from its extracted symbol counts and line count.
///
/// `2 * functions + 3 * classes` plus a line-count bonus, clamped to
/// [`points::MAX_SCORE`]. Saturating throughout, so synthetic inputs near
/// `usize::MAX` stay in range.
pub fn score(functions: usize, classes: usize, line_count: usize) -> u8 {
    let symbols = functions
        .saturating_mul(points::PER_FUNCTION)
        .saturating_add(classes.saturating_mul(points::PER_CLASS));

    let bonus = if line_count > points::LONG_FILE_LINES {
        points::LONG_FILE_BONUS
    } else if line_count > points::MEDIUM_FILE_LINES {
        points::MEDIUM_FILE_BONUS
    } else if line_count > points::SHORT_FILE_LINES {
        points::SHORT_FILE_BONUS
    } else {
        0
    };

    symbols.saturating_add(bonus).min(points::MAX_SCORE as usize) as u8
}
