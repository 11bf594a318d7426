// @file: oi_chart/src/core/models.rs
// @description: Request windows, table rows and the time-keyed table assembled from paginated responses.
// @author: LAS.

use serde::{Deserialize, Serialize};


//
// CONSTANTS
//

/// Hard cap on rows returned by one exchange request.
pub const MAX_ROWS_PER_REQUEST: u32 = 200;


//
// REQUEST WINDOWS
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: i64,
    pub row_limit: u32,
    /// Set by the planner; a trailing window can round up to 200 rows and still be partial.
    pub full: bool,
}

impl TimeWindow {
    pub fn full_page(start: i64) -> Self {
        Self { start, row_limit: MAX_ROWS_PER_REQUEST, full: true }
    }

    pub fn partial(start: i64, row_limit: u32) -> Self {
        Self { start, row_limit, full: false }
    }

    pub fn is_full(&self) -> bool {
        self.full
    }
}


//
// TABLE ROWS
//

/// A row that can live in a `TimeTable`.
pub trait TimeKeyed {
    /// Data column names, excluding the time key.
    const COLUMNS: &'static [&'static str];

    fn time_key(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandleRow {
    pub open_time: i64,
    #[serde(rename = "Open")] pub open: f64,
    #[serde(rename = "High")] pub high: f64,
    #[serde(rename = "Low")] pub low: f64,
    #[serde(rename = "Close")] pub close: f64,
    #[serde(rename = "Volume")] pub volume: f64,
}

impl TimeKeyed for CandleRow {
    const COLUMNS: &'static [&'static str] = &["Open", "High", "Low", "Close", "Volume"];

    fn time_key(&self) -> i64 {
        self.open_time
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenInterestRow {
    pub timestamp: i64,
    pub open_interest: f64,
}

impl TimeKeyed for OpenInterestRow {
    const COLUMNS: &'static [&'static str] = &["open_interest"];

    fn time_key(&self) -> i64 {
        self.timestamp
    }
}


//
// ASSEMBLED TABLE
//

/// Append-only sequence of rows ordered by their time key.
///
/// Keys are expected to be unique because request windows never overlap,
/// but duplicates returned by the exchange are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeTable<R> {
    rows: Vec<R>,
}

impl<R: TimeKeyed> TimeTable<R> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn append(&mut self, batch: Vec<R>) {
        self.rows.extend(batch);
    }

    /// Stable sort, so duplicate keys keep their arrival order.
    pub fn sort_by_time(&mut self) {
        self.rows.sort_by_key(|row| row.time_key());
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().map(TimeKeyed::time_key)
    }

    pub fn first_key(&self) -> Option<i64> {
        self.rows.first().map(TimeKeyed::time_key)
    }

    pub fn last_key(&self) -> Option<i64> {
        self.rows.last().map(TimeKeyed::time_key)
    }
}

impl<R: TimeKeyed> Default for TimeTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TimeKeyed> From<Vec<R>> for TimeTable<R> {
    fn from(rows: Vec<R>) -> Self {
        let mut table = Self { rows };
        table.sort_by_time();
        table
    }
}
