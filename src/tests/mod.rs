// @file: oi_chart/src/tests/mod.rs
// @description: Offline test suites driven by a fixture session instead of the live exchange.
// @author: LAS.

pub mod day_run;
