use crate::dates::{days_between, years_between};
use crate::models::{Target, VisualizationResult};
use chrono::NaiveDate;

/// Project `today` onto the window from `together_since` to `target.end_date`.
///
/// - progress is `elapsed / total * 100`, clamped to `[0, 100]`; a window that
///   does not end after it starts reports 0
/// - remaining days and years are floored at 0
/// - `is_past` once no days remain (end date today or earlier)
pub fn project(
    together_since: NaiveDate,
    target: &Target,
    today: NaiveDate,
) -> VisualizationResult {
    let end = target.end_date;
    let total_span = days_between(together_since, end);
    let elapsed = days_between(together_since, today);
    let remaining = days_between(today, end).max(0);
    let years_left = years_between(today, end).max(0);

    let progress_percent = if total_span > 0 {
        (elapsed as f64 / total_span as f64 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    VisualizationResult {
        end_date: end,
        label: target.label.clone(),
        days_remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
        years_remaining: years_left as u32,
        progress_percent,
        is_past: remaining == 0,
    }
}
