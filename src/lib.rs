// @file: oi_chart/src/lib.rs
// @description: Current-day candle and open interest chart: window planning, paginated fetchers, figure output.
// @author: LAS.

pub mod app;
pub mod chart;
pub mod core;
pub mod connectors;
pub mod tests;
pub mod utils;
