// @file: oi_chart/src/app.rs
// @description: One fetch-and-compose cycle for the current UTC day, with the exchange session injected.
// @author: LAS.

use chrono::{DateTime, Utc};
use log::info;
use crate::chart::composer::compose_figure;
use crate::chart::figure::Figure;
use crate::core::errors::AppError;
use crate::core::fetcher::{fetch_open_interest_table, fetch_price_table};
use crate::core::interfaces::MarketDataSession;
use crate::core::models::{CandleRow, OpenInterestRow, TimeTable};
use crate::core::windows::utc_day_bounds;
use crate::utils::config::AppConfig;


//
// TYPE DEFINITIONS
//

#[derive(Debug)]
pub struct DayChart {
    pub prices: TimeTable<CandleRow>,
    pub open_interest: TimeTable<OpenInterestRow>,
    pub figure: Figure,
}


//
// ENTRY POINT
//

pub fn run_current_day<S: MarketDataSession + ?Sized>(
    session: &S,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<DayChart, AppError> {
    // #1. Resolve the day being charted
    let (day_start, now_secs) = utc_day_bounds(now);
    info!(
        "Charting {} from {} to {} ({}min)",
        config.symbol, day_start, now_secs, config.interval_minutes
    );

    // #2. Fetch both series, prices first
    let prices = fetch_price_table(session, &config.symbol, config.interval_minutes, day_start, now_secs)?;
    let open_interest = fetch_open_interest_table(session, &config.symbol, config.interval_minutes, day_start, now_secs)?;

    // #3. Compose
    let figure: Figure = compose_figure(&prices, &open_interest, &config.title());

    Ok(DayChart { prices, open_interest, figure })
}
