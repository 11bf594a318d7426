// @file: oi_chart/src/core/interfaces.rs
// @description: Session capability the fetchers depend on, so fixtures can stand in for the exchange.
// @author: LAS.

use crate::core::errors::AppError;
use crate::core::models::{CandleRow, OpenInterestRow};

//
// TRAIT DEFINITIONS
//

pub trait MarketDataSession {
    // #1. Candles starting at `start_time` (epoch seconds)
    // `None` leaves the row limit to the exchange default (200).
    fn query_kline(
        &self,
        symbol: &str,
        interval_minutes: u32,
        start_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<CandleRow>, AppError>;

    // #2. Open interest samples; `period` is the exchange label, e.g. "5min"
    fn query_open_interest(
        &self,
        symbol: &str,
        period: &str,
        start_time: i64,
        limit: Option<u32>,
    ) -> Result<Vec<OpenInterestRow>, AppError>;
}
