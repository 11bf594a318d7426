// @file: oi_chart/src/core/fetcher.rs
// @description: Paginated price and open interest fetchers assembling one time-keyed table each.
// @author: LAS.

use log::{debug, info};
use crate::core::errors::AppError;
use crate::core::interfaces::MarketDataSession;
use crate::core::models::{CandleRow, OpenInterestRow, TimeKeyed, TimeTable, TimeWindow};
use crate::core::windows::{period_label, plan_windows};


//
// PUBLIC INTERFACE
//

pub fn fetch_price_table<S: MarketDataSession + ?Sized>(
    session: &S,
    symbol: &str,
    interval_minutes: u32,
    day_start: i64,
    now: i64,
) -> Result<TimeTable<CandleRow>, AppError> {
    let windows: Vec<TimeWindow> = plan_windows(day_start, now, interval_minutes)?;
    info!("Fetching {} candles ({}min) in {} windows", symbol, interval_minutes, windows.len());

    let table = assemble(&windows, |window| {
        // Full pages rely on the exchange default limit
        let limit: Option<u32> = if window.is_full() { None } else { Some(window.row_limit) };
        session.query_kline(symbol, interval_minutes, window.start, limit)
    })?;

    info!("Assembled {} candle rows for {}", table.len(), symbol);
    Ok(table)
}

pub fn fetch_open_interest_table<S: MarketDataSession + ?Sized>(
    session: &S,
    symbol: &str,
    interval_minutes: u32,
    day_start: i64,
    now: i64,
) -> Result<TimeTable<OpenInterestRow>, AppError> {
    let windows: Vec<TimeWindow> = plan_windows(day_start, now, interval_minutes)?;
    let period: String = period_label(interval_minutes);
    info!("Fetching {} open interest ({}) in {} windows", symbol, period, windows.len());

    let table = assemble(&windows, |window| {
        session.query_open_interest(symbol, &period, window.start, Some(window.row_limit))
    })?;

    info!("Assembled {} open interest rows for {}", table.len(), symbol);
    Ok(table)
}


//
// INTERNAL HELPERS
//

// Issues one query per window, strictly in order. The first failure aborts the whole fetch.
fn assemble<R, F>(windows: &[TimeWindow], mut query: F) -> Result<TimeTable<R>, AppError>
where
    R: TimeKeyed,
    F: FnMut(&TimeWindow) -> Result<Vec<R>, AppError>,
{
    let mut table: TimeTable<R> = TimeTable::new();

    for (i, window) in windows.iter().enumerate() {
        let batch: Vec<R> = query(window)?;
        debug!(
            "window {}/{} start={} limit={} -> {} rows",
            i + 1, windows.len(), window.start, window.row_limit, batch.len()
        );
        table.append(batch);
    }

    table.sort_by_time();
    Ok(table)
}
