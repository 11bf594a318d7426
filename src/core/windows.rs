// @file: oi_chart/src/core/windows.rs
// @description: Splits the current UTC day into request windows of at most 200 rows each.
// @author: LAS.

use std::cmp::Ordering;
use chrono::{DateTime, NaiveTime, Utc};
use crate::core::errors::AppError;
use crate::core::models::{TimeWindow, MAX_ROWS_PER_REQUEST};


//
// PUBLIC INTERFACE
//

/// Seconds covered by one full page of rows at the given granularity.
pub fn window_span_secs(interval_minutes: u32) -> i64 {
    i64::from(MAX_ROWS_PER_REQUEST) * 60 * i64::from(interval_minutes)
}

/// Exchange label for an open interest period, e.g. `5` -> `"5min"`.
pub fn period_label(interval_minutes: u32) -> String {
    format!("{}min", interval_minutes)
}

/// UTC midnight of `now`'s day and `now` itself, both in whole epoch seconds.
pub fn utc_day_bounds(now: DateTime<Utc>) -> (i64, i64) {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    (midnight.timestamp(), now.timestamp())
}

/// Plans the windows covering `[day_start, now]`.
///
/// Every window but the last is a full page. The last one starts where the
/// full pages stop and asks for the remaining rows, rounded half-to-even in
/// exact integer arithmetic.
/// It is always emitted, even when that remainder rounds to zero.
pub fn plan_windows(day_start: i64, now: i64, interval_minutes: u32) -> Result<Vec<TimeWindow>, AppError> {
    let total_span: i64 = now - day_start;

    if interval_minutes == 0 || total_span < 0 {
        return Err(AppError::InvalidTimeRange { day_start, now, interval_minutes });
    }

    // #1. Full pages
    let span: i64 = window_span_secs(interval_minutes);
    let full_windows: i64 = total_span / span;

    let mut windows: Vec<TimeWindow> = (0..full_windows)
        .map(|i| TimeWindow::full_page(day_start + i * span))
        .collect();

    // #2. Trailing partial page
    let remainder: i64 = total_span - full_windows * span;
    let row_limit: u32 = rows_half_even(remainder, span);

    windows.push(TimeWindow::partial(day_start + full_windows * span, row_limit));

    Ok(windows)
}


//
// INTERNAL HELPERS
//

// round(remainder / span * 200), ties to even. `0 <= remainder < span`.
fn rows_half_even(remainder: i64, span: i64) -> u32 {
    let scaled: i64 = remainder * i64::from(MAX_ROWS_PER_REQUEST);
    let (quotient, rest) = (scaled / span, scaled % span);

    let rounded: i64 = match (2 * rest).cmp(&span) {
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 1 => quotient + 1,
        _ => quotient,
    };
    rounded as u32
}
