// @file: oi_chart/src/utils/mod.rs
// @description: Configuration helpers.
// @author: LAS.

pub mod config;
